use crate::battle::Combatant;
use crate::catalog::ItemCatalog;
use crate::creature::CreatureInst;
use schema::StatKind;

/// Resolve a creature's effective combat stat: base value plus the bonus of
/// every equipped item that touches the stat. Unknown item ids are treated
/// as empty slots. Pure, no failure mode.
pub fn effective_stat(creature: &CreatureInst, stat: StatKind, items: &ItemCatalog) -> u32 {
    let base = match stat {
        StatKind::Attack => creature.base_stats.attack,
        StatKind::Defense => creature.base_stats.defense,
        StatKind::Speed => creature.base_stats.speed,
        StatKind::MaxHp => creature.base_stats.hp,
    };

    let bonus: u32 = creature
        .equipment
        .values()
        .filter_map(|item_id| items.get(item_id))
        .filter_map(|def| def.bonuses.as_ref())
        .map(|bonuses| bonuses.get(stat))
        .sum();

    base + bonus
}

/// Snapshot the player's creature for combat, with equipment folded in.
/// Current HP is carried over as-is but never above the effective maximum.
pub fn combat_snapshot(creature: &CreatureInst, items: &ItemCatalog) -> Combatant {
    let max_hp = effective_stat(creature, StatKind::MaxHp, items);
    Combatant {
        name: creature.name.clone(),
        element: creature.element,
        level: creature.level,
        attack: effective_stat(creature, StatKind::Attack, items),
        defense: effective_stat(creature, StatKind::Defense, items),
        speed: effective_stat(creature, StatKind::Speed, items),
        hp: creature.current_hp.min(max_hp),
        max_hp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::{
        BodyType, ElementType, GearSlot, ItemCategory, ItemDef, MonsterStats, Rarity, StatBonuses,
    };

    fn test_catalog() -> ItemCatalog {
        ItemCatalog::from_defs(vec![
            ItemDef {
                id: "iron_helm".to_string(),
                name: "Iron Helm".to_string(),
                category: ItemCategory::Gear,
                rarity: Rarity::Common,
                price: 150,
                slot: Some(GearSlot::Head),
                bonuses: Some(StatBonuses {
                    defense: 6,
                    ..StatBonuses::default()
                }),
                effect: None,
            },
            ItemDef {
                id: "fang_charm".to_string(),
                name: "Fang Charm".to_string(),
                category: ItemCategory::Gear,
                rarity: Rarity::Common,
                price: 180,
                slot: Some(GearSlot::Accessory),
                bonuses: Some(StatBonuses {
                    attack: 5,
                    ..StatBonuses::default()
                }),
                effect: None,
            },
        ])
        .unwrap()
    }

    fn test_creature() -> CreatureInst {
        CreatureInst::from_monster_stats(
            1,
            &MonsterStats {
                name: "Mossling".to_string(),
                element: Some(ElementType::Verdant),
                body: Some(BodyType::Quadruped),
                hp: Some(50),
                attack: Some(12),
                defense: Some(10),
                speed: Some(8),
                description: None,
                ability: None,
            },
        )
    }

    #[test]
    fn test_bare_creature_uses_base_stats() {
        let creature = test_creature();
        let items = test_catalog();

        assert_eq!(effective_stat(&creature, StatKind::Attack, &items), 12);
        assert_eq!(effective_stat(&creature, StatKind::Defense, &items), 10);
        assert_eq!(effective_stat(&creature, StatKind::MaxHp, &items), 50);
    }

    #[test]
    fn test_equipped_bonuses_stack_across_slots() {
        let mut creature = test_creature();
        let items = test_catalog();
        creature
            .equipment
            .insert(GearSlot::Head, "iron_helm".to_string());
        creature
            .equipment
            .insert(GearSlot::Accessory, "fang_charm".to_string());

        assert_eq!(effective_stat(&creature, StatKind::Defense, &items), 16);
        assert_eq!(effective_stat(&creature, StatKind::Attack, &items), 17);
        // Unbonused stats are untouched
        assert_eq!(effective_stat(&creature, StatKind::Speed, &items), 8);
    }

    #[test]
    fn test_unknown_item_id_treated_as_empty_slot() {
        let mut creature = test_creature();
        let items = test_catalog();
        creature
            .equipment
            .insert(GearSlot::Head, "deleted_item".to_string());

        assert_eq!(effective_stat(&creature, StatKind::Defense, &items), 10);
    }

    #[test]
    fn test_combat_snapshot_includes_equipment() {
        let mut creature = test_creature();
        let items = test_catalog();
        creature
            .equipment
            .insert(GearSlot::Accessory, "fang_charm".to_string());
        creature.take_damage(20);

        let snapshot = combat_snapshot(&creature, &items);
        assert_eq!(snapshot.attack, 17);
        assert_eq!(snapshot.hp, 30);
        assert_eq!(snapshot.max_hp, 50);
        assert_eq!(snapshot.level, 1);
    }
}
