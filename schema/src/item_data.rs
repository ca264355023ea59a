use crate::StatKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// Catalog items are keyed by stable string ids ("iron_helm") so the RON
/// data files stay readable and new items need no code change.
pub type ItemId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum ItemCategory {
    Consumable,
    Food,
    Material,
    Gear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash, EnumIter)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, EnumIter)]
pub enum GearSlot {
    Head,
    Body,
    Accessory,
}

impl fmt::Display for GearSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Flat stat bonuses granted by a piece of gear while equipped. Fields
/// default to zero so data files only list the stats an item touches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBonuses {
    #[serde(default)]
    pub attack: u32,
    #[serde(default)]
    pub defense: u32,
    #[serde(default)]
    pub speed: u32,
    #[serde(default)]
    pub hp: u32,
}

impl StatBonuses {
    pub fn get(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
            StatKind::MaxHp => self.hp,
        }
    }
}

/// Behavioral effect of a consumable, described as data rather than code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemEffect {
    RestoreHp(u32),
    RestoreHpFull,
    GrantExp(u32),
}

/// Immutable catalog entry for an item. Gear entries declare a slot and a
/// bonus vector; consumables declare an effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
    pub category: ItemCategory,
    pub rarity: Rarity,
    pub price: u32,
    #[serde(default)]
    pub slot: Option<GearSlot>,
    #[serde(default)]
    pub bonuses: Option<StatBonuses>,
    #[serde(default)]
    pub effect: Option<ItemEffect>,
}

impl ItemDef {
    pub fn is_gear(&self) -> bool {
        self.category == ItemCategory::Gear
    }
}
