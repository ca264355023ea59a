use crate::errors::{CatalogError, CatalogResult};
use schema::{ItemDef, ItemId, Rarity, ZoneDef, ZoneId};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Read-only item catalog, injected into the session at startup.
#[derive(Debug, Clone)]
pub struct ItemCatalog {
    items: HashMap<ItemId, ItemDef>,
}

impl ItemCatalog {
    /// Build a catalog from definitions, rejecting duplicate ids.
    pub fn from_defs(defs: Vec<ItemDef>) -> CatalogResult<Self> {
        let mut items = HashMap::new();
        for def in defs {
            if items.contains_key(&def.id) {
                return Err(CatalogError::DuplicateId(def.id));
            }
            items.insert(def.id.clone(), def);
        }
        Ok(ItemCatalog { items })
    }

    /// Load `items.ron` from the data directory.
    pub fn load(data_path: &Path) -> CatalogResult<Self> {
        let path = data_path.join("items.ron");
        let content =
            fs::read_to_string(&path).map_err(|e| CatalogError::Io(format!("{}: {}", path.display(), e)))?;
        let defs: Vec<ItemDef> =
            ron::from_str(&content).map_err(|e| CatalogError::Malformed(e.to_string()))?;
        Self::from_defs(defs)
    }

    pub fn get(&self, item_id: &str) -> Option<&ItemDef> {
        self.items.get(item_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items of a rarity tier, sorted by id so rolls against the list
    /// are stable for a given catalog.
    pub fn items_of_rarity(&self, rarity: Rarity) -> Vec<&ItemDef> {
        let mut matches: Vec<&ItemDef> = self
            .items
            .values()
            .filter(|def| def.rarity == rarity)
            .collect();
        matches.sort_by(|a, b| a.id.cmp(&b.id));
        matches
    }
}

/// Read-only zone catalog describing the location graph.
#[derive(Debug, Clone)]
pub struct ZoneCatalog {
    zones: HashMap<ZoneId, ZoneDef>,
}

impl ZoneCatalog {
    /// Build a catalog from definitions, validating that every connection
    /// points at a known zone and every zone can roll an enemy element.
    pub fn from_defs(defs: Vec<ZoneDef>) -> CatalogResult<Self> {
        let mut zones = HashMap::new();
        for def in &defs {
            if zones.contains_key(&def.id) {
                return Err(CatalogError::DuplicateId(def.id.clone()));
            }
            zones.insert(def.id.clone(), def.clone());
        }
        for def in &defs {
            for connection in &def.connections {
                if !zones.contains_key(connection) {
                    return Err(CatalogError::UnknownReference(format!(
                        "{} -> {}",
                        def.id, connection
                    )));
                }
            }
            if def.element_weights.iter().all(|(_, weight)| *weight == 0) {
                return Err(CatalogError::Malformed(format!(
                    "zone {} has no positive element weights",
                    def.id
                )));
            }
        }
        Ok(ZoneCatalog { zones })
    }

    /// Load `zones.ron` from the data directory.
    pub fn load(data_path: &Path) -> CatalogResult<Self> {
        let path = data_path.join("zones.ron");
        let content =
            fs::read_to_string(&path).map_err(|e| CatalogError::Io(format!("{}: {}", path.display(), e)))?;
        let defs: Vec<ZoneDef> =
            ron::from_str(&content).map_err(|e| CatalogError::Malformed(e.to_string()))?;
        Self::from_defs(defs)
    }

    pub fn get(&self, zone_id: &str) -> Option<&ZoneDef> {
        self.zones.get(zone_id)
    }

    pub fn require(&self, zone_id: &str) -> CatalogResult<&ZoneDef> {
        self.zones
            .get(zone_id)
            .ok_or_else(|| CatalogError::UnknownZone(zone_id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::{ElementType, ItemCategory};

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

    fn zone(id: &str, connections: &[&str]) -> ZoneDef {
        ZoneDef {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            difficulty_tier: 0,
            difficulty_multiplier: 1.0,
            loot_tier: 0,
            unlock_level: 1,
            element_weights: vec![(ElementType::Neutral, 1)],
            exclusive_loot: vec![],
            connections: connections.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_item_catalog_rejects_duplicates() {
        let result = ItemCatalog::from_defs(vec![
            item("ore", Rarity::Common),
            item("ore", Rarity::Rare),
        ]);
        assert_eq!(result.unwrap_err(), CatalogError::DuplicateId("ore".to_string()));
    }

    #[test]
    fn test_items_of_rarity_is_sorted() {
        let catalog = ItemCatalog::from_defs(vec![
            item("zinc", Rarity::Common),
            item("amber", Rarity::Common),
            item("relic", Rarity::Epic),
        ])
        .unwrap();

        let commons: Vec<&str> = catalog
            .items_of_rarity(Rarity::Common)
            .iter()
            .map(|def| def.id.as_str())
            .collect();
        assert_eq!(commons, vec!["amber", "zinc"]);
        assert!(catalog.items_of_rarity(Rarity::Legendary).is_empty());
    }

    #[test]
    fn test_zone_catalog_validates_connections() {
        let result = ZoneCatalog::from_defs(vec![zone("meadow", &["nowhere"])]);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::UnknownReference("meadow -> nowhere".to_string())
        );
    }

    #[test]
    fn test_zone_catalog_rejects_zero_weight_tables() {
        let mut bad = zone("meadow", &[]);
        bad.element_weights = vec![(ElementType::Ember, 0)];
        let result = ZoneCatalog::from_defs(vec![bad]);
        assert!(matches!(result, Err(CatalogError::Malformed(_))));
    }

    #[test]
    fn test_bundled_data_files_parse_and_cross_reference() {
        let items = ItemCatalog::load(Path::new("data")).expect("items.ron should parse");
        let zones = ZoneCatalog::load(Path::new("data")).expect("zones.ron should parse");
        assert!(!items.is_empty());
        assert!(!zones.is_empty());

        // Every zone-exclusive loot id must resolve against the item catalog
        for zone_id in ["meadow", "mosswood", "shorefall", "cinder_caves", "drowned_grotto"] {
            let zone = zones.require(zone_id).expect("bundled zone should exist");
            for item_id in &zone.exclusive_loot {
                assert!(
                    items.get(item_id).is_some(),
                    "zone {} references unknown loot {}",
                    zone_id,
                    item_id
                );
            }
        }
    }

    #[test]
    fn test_zone_catalog_round_trip() {
        let catalog =
            ZoneCatalog::from_defs(vec![zone("meadow", &["cavern"]), zone("cavern", &["meadow"])])
                .unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.require("meadow").is_ok());
        assert_eq!(
            catalog.require("abyss").unwrap_err(),
            CatalogError::UnknownZone("abyss".to_string())
        );
    }
}
