use crate::battle::Combatant;
use crate::catalog::ItemCatalog;
use crate::rng::RollRng;
use schema::{ElementType, ItemId, Rarity, ZoneDef};

/// Percent chance that a zone's exclusive loot pool is used instead of the
/// generic tiered tables.
const EXCLUSIVE_LOOT_PERCENT: u8 = 12;

/// Roll a wild enemy for a battle encounter in this zone. The enemy's
/// element follows the zone's weight table; its level tracks the stronger
/// of the trainer and the active creature, scaled by the zone's difficulty
/// multiplier with a ±1 jitter.
pub fn roll_enemy(
    zone: &ZoneDef,
    trainer_level: u32,
    creature_level: u32,
    rng: &mut RollRng,
) -> Combatant {
    let weights: Vec<u32> = zone.element_weights.iter().map(|(_, w)| *w).collect();
    let element = zone.element_weights[rng.weighted_index(&weights, "enemy element")].0;

    let base = trainer_level.max(creature_level);
    let scaled = ((base as f32 * zone.difficulty_multiplier).round() as u32).max(1);
    let level = (scaled + rng.pick_range(0, 2, "enemy level jitter")).saturating_sub(1).max(1);

    let max_hp = 30 + level * 8;
    Combatant {
        name: enemy_name(element),
        element,
        level,
        attack: 8 + level * 3,
        defense: 6 + level * 2,
        speed: 8 + level * 2,
        hp: max_hp,
        max_hp,
    }
}

fn enemy_name(element: ElementType) -> String {
    let name = match element {
        ElementType::Neutral => "Drifting Wisp",
        ElementType::Ember => "Cinder Imp",
        ElementType::Tide => "Brine Lurker",
        ElementType::Verdant => "Thorn Stalker",
        ElementType::Storm => "Static Howler",
        ElementType::Stone => "Crag Golem",
        ElementType::Gale => "Zephyr Shrike",
        ElementType::Umbral => "Gloom Shade",
    };
    name.to_string()
}

/// Roll a loot item id for this zone. The exclusive pool is preferred with
/// low probability; otherwise a single uniform roll is compared against
/// nested rarity thresholds, highest tier first, widened by the zone's loot
/// tier. Missing rarities in the catalog degrade to the next lower tier.
pub fn roll_loot(zone: &ZoneDef, items: &ItemCatalog, rng: &mut RollRng) -> Option<ItemId> {
    if !zone.exclusive_loot.is_empty() && rng.chance(EXCLUSIVE_LOOT_PERCENT, "exclusive loot") {
        let index = rng.pick_range(0, zone.exclusive_loot.len() as u32 - 1, "exclusive pick");
        return Some(zone.exclusive_loot[index as usize].clone());
    }

    let tier = u32::from(zone.loot_tier);
    let roll = u32::from(rng.next_roll("loot rarity"));
    let rarity = if roll < 2 + tier {
        Rarity::Legendary
    } else if roll < 10 + tier * 2 {
        Rarity::Epic
    } else if roll < 30 + tier * 4 {
        Rarity::Rare
    } else {
        Rarity::Common
    };

    // Degrade gracefully through lower tiers when the catalog has no item
    // of the rolled rarity.
    let mut current = rarity;
    loop {
        let pool = items.items_of_rarity(current);
        if !pool.is_empty() {
            let index = rng.pick_range(0, pool.len() as u32 - 1, "loot pick");
            return Some(pool[index as usize].id.clone());
        }
        current = match current {
            Rarity::Legendary => Rarity::Epic,
            Rarity::Epic => Rarity::Rare,
            Rarity::Rare => Rarity::Common,
            Rarity::Common => return None,
        };
    }
}

/// Fixed effect value for a hazard event in this zone, scaled by tier.
pub fn roll_hazard_damage(zone: &ZoneDef, rng: &mut RollRng) -> u32 {
    rng.pick_range(6, 12, "hazard damage") + 4 * u32::from(zone.difficulty_tier)
}

/// Experience and coin reward for a discovery event.
pub fn roll_discovery_reward(zone: &ZoneDef, rng: &mut RollRng) -> (u32, u32) {
    let tier_bonus = 10 * u32::from(zone.difficulty_tier);
    let exp = rng.pick_range(15, 35, "discovery exp") + tier_bonus;
    let coins = rng.pick_range(10, 25, "discovery coins") + tier_bonus;
    (exp, coins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::{ItemCategory, ItemDef};

    fn zone() -> ZoneDef {
        ZoneDef {
            id: "cinder_caves".to_string(),
            name: "Cinder Caves".to_string(),
            description: String::new(),
            difficulty_tier: 2,
            difficulty_multiplier: 1.5,
            loot_tier: 2,
            unlock_level: 8,
            element_weights: vec![(ElementType::Ember, 55), (ElementType::Stone, 45)],
            exclusive_loot: vec!["umbral_shard".to_string()],
            connections: vec![],
        }
    }

    fn item(id: &str, rarity: Rarity) -> ItemDef {
        ItemDef {
            id: id.to_string(),
            name: id.to_string(),
            category: ItemCategory::Material,
            rarity,
            price: 10,
            slot: None,
            bonuses: None,
            effect: None,
        }
    }

    fn catalog() -> ItemCatalog {
        ItemCatalog::from_defs(vec![
            item("pebble", Rarity::Common),
            item("shard", Rarity::Rare),
            item("relic", Rarity::Epic),
        ])
        .unwrap()
    }

    #[test]
    fn test_enemy_scales_with_progression_and_zone() {
        // base level max(4, 6) = 6, scaled by 1.5 -> 9, jitter roll 50 -> +1 -> 9
        let mut rng = RollRng::new_scripted(vec![0, 50]);
        let enemy = roll_enemy(&zone(), 4, 6, &mut rng);

        assert_eq!(enemy.element, ElementType::Ember);
        assert_eq!(enemy.level, 9);
        assert_eq!(enemy.max_hp, 30 + 9 * 8);
        assert_eq!(enemy.hp, enemy.max_hp);
        assert_eq!(enemy.attack, 8 + 9 * 3);
        assert_eq!(enemy.name, "Cinder Imp");
    }

    #[test]
    fn test_enemy_level_jitter_bounds() {
        // Jitter roll 0 -> scaled - 1; roll 99 -> scaled + 1
        let mut rng = RollRng::new_scripted(vec![0, 0]);
        assert_eq!(roll_enemy(&zone(), 6, 6, &mut rng).level, 8);
        let mut rng = RollRng::new_scripted(vec![0, 99]);
        assert_eq!(roll_enemy(&zone(), 6, 6, &mut rng).level, 10);
    }

    #[test]
    fn test_enemy_level_never_below_one() {
        let mut shallow = zone();
        shallow.difficulty_multiplier = 0.1;
        let mut rng = RollRng::new_scripted(vec![0, 0]);
        assert_eq!(roll_enemy(&shallow, 1, 1, &mut rng).level, 1);
    }

    #[test]
    fn test_exclusive_pool_preferred_on_low_roll() {
        // Roll 0 < 12 percent: exclusive pool; pick index roll 0
        let mut rng = RollRng::new_scripted(vec![0, 0]);
        let loot = roll_loot(&zone(), &catalog(), &mut rng);
        assert_eq!(loot, Some("umbral_shard".to_string()));
    }

    #[test]
    fn test_rarity_thresholds_highest_first() {
        // Exclusive roll 50 misses. Loot tier 2: legendary < 4, epic < 14,
        // rare < 38, else common.
        let mut rng = RollRng::new_scripted(vec![50, 3, 0]);
        // Legendary is missing from the catalog, so the roll degrades to epic
        assert_eq!(roll_loot(&zone(), &catalog(), &mut rng), Some("relic".to_string()));

        let mut rng = RollRng::new_scripted(vec![50, 13, 0]);
        assert_eq!(roll_loot(&zone(), &catalog(), &mut rng), Some("relic".to_string()));

        let mut rng = RollRng::new_scripted(vec![50, 37, 0]);
        assert_eq!(roll_loot(&zone(), &catalog(), &mut rng), Some("shard".to_string()));

        let mut rng = RollRng::new_scripted(vec![50, 38, 0]);
        assert_eq!(roll_loot(&zone(), &catalog(), &mut rng), Some("pebble".to_string()));
    }

    #[test]
    fn test_empty_catalog_yields_no_loot() {
        let empty = ItemCatalog::from_defs(vec![]).unwrap();
        let mut plain = zone();
        plain.exclusive_loot.clear();
        let mut rng = RollRng::new_scripted(vec![99]);
        assert_eq!(roll_loot(&plain, &empty, &mut rng), None);
    }

    #[test]
    fn test_hazard_damage_scales_with_tier() {
        let mut rng = RollRng::new_scripted(vec![0]);
        // tier 2: minimum 6 + 8 = 14
        assert_eq!(roll_hazard_damage(&zone(), &mut rng), 14);
    }

    #[test]
    fn test_discovery_reward_in_range() {
        let mut rng = RollRng::new_scripted(vec![99, 99]);
        let (exp, coins) = roll_discovery_reward(&zone(), &mut rng);
        assert_eq!(exp, 35 + 20);
        assert_eq!(coins, 25 + 20);
    }
}
