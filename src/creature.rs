use schema::{BaseStats, BodyType, ElementType, EvolutionStage, GearSlot, ItemId, MonsterStats};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::progression::BASE_EXP_TO_NEXT;

/// A creature owned by the player's roster. Mutated only through the
/// progression, equipment, and encounter-commit paths; everything else takes
/// it by shared reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureInst {
    pub id: u32,
    pub name: String,
    pub element: ElementType,
    pub body: BodyType,
    /// Base combat stats before gear. `base_stats.hp` is the maximum HP.
    pub base_stats: BaseStats,
    /// Always within [0, base_stats.hp]. Zero means fainted, never removed.
    pub current_hp: u32,
    pub level: u32,
    pub exp: u32,
    pub exp_to_next: u32,
    pub stage: EvolutionStage,
    /// At most one item per slot; values are catalog ids.
    pub equipment: HashMap<GearSlot, ItemId>,
    pub description: String,
    pub ability: Option<String>,
}

impl CreatureInst {
    /// Build a fresh level-1 creature from a content-generation record.
    /// Missing or negative stats are defaulted to zero rather than rejected;
    /// max HP is floored at 1 so the HP invariant holds even for a fully
    /// malformed payload.
    pub fn from_monster_stats(id: u32, record: &MonsterStats) -> Self {
        let hp = default_stat(record.hp).max(1);
        let base_stats = BaseStats {
            hp,
            attack: default_stat(record.attack),
            defense: default_stat(record.defense),
            speed: default_stat(record.speed),
        };

        CreatureInst {
            id,
            name: record.name.clone(),
            element: record.element.unwrap_or(ElementType::Neutral),
            body: record.body.unwrap_or(BodyType::Quadruped),
            base_stats,
            current_hp: hp,
            level: 1,
            exp: 0,
            exp_to_next: BASE_EXP_TO_NEXT,
            stage: EvolutionStage::Stage0,
            equipment: HashMap::new(),
            description: record.description.clone().unwrap_or_default(),
            ability: record.ability.clone(),
        }
    }

    /// Apply a re-skin record from the content collaborator, e.g. after an
    /// evolution produced new art and lore. Stats are untouched; only the
    /// presentation fields change.
    pub fn apply_form(&mut self, record: &MonsterStats) {
        self.name = record.name.clone();
        if let Some(body) = record.body {
            self.body = body;
        }
        if let Some(description) = &record.description {
            self.description = description.clone();
        }
        if let Some(ability) = &record.ability {
            self.ability = Some(ability.clone());
        }
    }

    pub fn max_hp(&self) -> u32 {
        self.base_stats.hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn hp_ratio(&self) -> f64 {
        f64::from(self.current_hp) / f64::from(self.max_hp().max(1))
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current_hp = (self.current_hp + amount).min(self.max_hp());
    }

    pub fn heal_full(&mut self) {
        self.current_hp = self.max_hp();
    }

    pub fn equipped(&self, slot: GearSlot) -> Option<&ItemId> {
        self.equipment.get(&slot)
    }
}

fn default_stat(value: Option<i64>) -> u32 {
    value.unwrap_or(0).clamp(0, i64::from(u32::MAX)) as u32
}
