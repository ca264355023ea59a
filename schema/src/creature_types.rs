use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, EnumIter)]
pub enum ElementType {
    Neutral,
    Ember,
    Tide,
    Verdant,
    Storm,
    Stone,
    Gale,
    Umbral,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, EnumIter)]
pub enum BodyType {
    Quadruped,
    Biped,
    Winged,
    Serpentine,
    Amorphous,
}

/// Evolution tiers, ordered. A creature only ever advances one stage at a
/// time, and never moves backwards.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash, EnumIter,
)]
pub enum EvolutionStage {
    Stage0,
    Stage1,
    Stage2,
    Stage3,
}

impl EvolutionStage {
    /// The stage this one evolves into, or None at the final tier.
    pub fn next(self) -> Option<EvolutionStage> {
        match self {
            EvolutionStage::Stage0 => Some(EvolutionStage::Stage1),
            EvolutionStage::Stage1 => Some(EvolutionStage::Stage2),
            EvolutionStage::Stage2 => Some(EvolutionStage::Stage3),
            EvolutionStage::Stage3 => None,
        }
    }
}

impl fmt::Display for EvolutionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The four combat-relevant stats a creature carries. `MaxHp` resolves
/// against the creature's maximum HP, not its current HP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, EnumIter)]
pub enum StatKind {
    Attack,
    Defense,
    Speed,
    MaxHp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

impl BaseStats {
    pub fn total(&self) -> u32 {
        self.hp + self.attack + self.defense + self.speed
    }
}

/// The record a content-generation collaborator hands over when a new
/// creature is created (or re-skinned on evolution). All stat fields are
/// optional on the wire; the engine defensively defaults anything missing.
/// The contract says core stats are non-null, but a malformed payload must
/// not crash the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterStats {
    pub name: String,
    #[serde(default)]
    pub element: Option<ElementType>,
    #[serde(default)]
    pub body: Option<BodyType>,
    #[serde(default)]
    pub hp: Option<i64>,
    #[serde(default)]
    pub attack: Option<i64>,
    #[serde(default)]
    pub defense: Option<i64>,
    #[serde(default)]
    pub speed: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ability: Option<String>,
}
