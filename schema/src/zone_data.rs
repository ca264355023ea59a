use crate::{ElementType, ItemId};
use serde::{Deserialize, Serialize};

pub type ZoneId = String;

/// Static definition of an explorable location. Zones form a graph via
/// `connections`; travel is only legal along an edge, and only once the
/// trainer has reached `unlock_level`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneDef {
    pub id: ZoneId,
    pub name: String,
    pub description: String,
    /// Coarse danger band. Hazard encounters only occur at or above the
    /// scheduler's configured tier threshold.
    pub difficulty_tier: u8,
    /// Scales enemy levels relative to the player's own progression.
    pub difficulty_multiplier: f32,
    /// Widens the rarity thresholds of the generic loot tables.
    pub loot_tier: u8,
    pub unlock_level: u32,
    /// Weighted element table for enemy generation in this zone.
    pub element_weights: Vec<(ElementType, u32)>,
    /// Zone-exclusive loot pool, preferred over the generic tables with low
    /// probability.
    #[serde(default)]
    pub exclusive_loot: Vec<ItemId>,
    pub connections: Vec<ZoneId>,
}
