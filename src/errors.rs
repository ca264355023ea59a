use schema::{GearSlot, ItemId, ZoneId};
use std::fmt;

/// Main error type for the Creature Quest session engine
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// Error related to equipping or unequipping gear
    Equipment(EquipmentError),
    /// Error related to level or evolution progression
    Progression(ProgressionError),
    /// Error related to encounter scheduling or resolution
    Encounter(EncounterError),
    /// Error related to currency and purchases
    Economy(EconomyError),
    /// Error related to catalog data or zone travel
    Catalog(CatalogError),
    /// Error related to snapshot save/load
    Persistence(PersistenceError),
}

/// Errors raised when an equip/unequip operation is invalid
#[derive(Debug, Clone, PartialEq)]
pub enum EquipmentError {
    /// The item id does not exist in the item catalog
    UnknownItem(ItemId),
    /// The trainer does not hold the item in inventory
    NotInInventory(ItemId),
    /// The item is not gear and cannot be equipped
    NotGear(ItemId),
    /// The item's declared slot does not match the requested slot
    SlotMismatch {
        item: ItemId,
        declared: Option<GearSlot>,
        requested: GearSlot,
    },
    /// Unequip was requested on an empty slot
    SlotEmpty(GearSlot),
}

/// Errors raised by progression transitions
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressionError {
    /// Evolution attempted below the level threshold for the next stage
    NotEligible { level: u32, required: u32 },
    /// The creature is already at the final evolution stage
    FinalStage,
}

/// Errors raised by the encounter scheduler and resolver
#[derive(Debug, Clone, PartialEq)]
pub enum EncounterError {
    /// An encounter is already pending or resolving
    Busy,
    /// The requested operation requires the explorable state
    NotExplorable,
}

/// Errors raised by trainer-side economy operations
#[derive(Debug, Clone, PartialEq)]
pub enum EconomyError {
    /// Purchase price exceeds the trainer's balance
    InsufficientFunds { price: u32, balance: u32 },
    /// The item id does not exist in the item catalog
    UnknownItem(ItemId),
    /// The trainer does not hold the item in inventory
    NotInInventory(ItemId),
    /// The item has no usable effect
    NotConsumable(ItemId),
}

/// Errors raised while loading catalogs or moving between zones
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// The data file could not be read
    Io(String),
    /// The data file could not be parsed
    Malformed(String),
    /// Two catalog entries share an id
    DuplicateId(String),
    /// A catalog entry references an id that does not exist
    UnknownReference(String),
    /// The zone id does not exist in the zone catalog
    UnknownZone(ZoneId),
    /// The destination zone is not connected to the current zone
    NotConnected { from: ZoneId, to: ZoneId },
    /// The trainer has not reached the zone's unlock level
    ZoneLocked { zone: ZoneId, required: u32 },
}

/// Errors raised by snapshot encode/decode
#[derive(Debug, Clone, PartialEq)]
pub enum PersistenceError {
    Encode(String),
    Decode(String),
    /// The decoded snapshot violates a session invariant
    Inconsistent(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Equipment(err) => write!(f, "Equipment error: {}", err),
            GameError::Progression(err) => write!(f, "Progression error: {}", err),
            GameError::Encounter(err) => write!(f, "Encounter error: {}", err),
            GameError::Economy(err) => write!(f, "Economy error: {}", err),
            GameError::Catalog(err) => write!(f, "Catalog error: {}", err),
            GameError::Persistence(err) => write!(f, "Persistence error: {}", err),
        }
    }
}

impl fmt::Display for EquipmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipmentError::UnknownItem(id) => write!(f, "Unknown item: {}", id),
            EquipmentError::NotInInventory(id) => write!(f, "Item not in inventory: {}", id),
            EquipmentError::NotGear(id) => write!(f, "Item is not gear: {}", id),
            EquipmentError::SlotMismatch {
                item,
                declared,
                requested,
            } => match declared {
                Some(slot) => write!(
                    f,
                    "Item {} goes in the {} slot, not {}",
                    item, slot, requested
                ),
                None => write!(f, "Item {} declares no gear slot", item),
            },
            EquipmentError::SlotEmpty(slot) => write!(f, "No item equipped in {} slot", slot),
        }
    }
}

impl fmt::Display for ProgressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressionError::NotEligible { level, required } => {
                write!(f, "Not eligible to evolve: level {} of {}", level, required)
            }
            ProgressionError::FinalStage => write!(f, "Already at the final evolution stage"),
        }
    }
}

impl fmt::Display for EncounterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncounterError::Busy => write!(f, "An encounter is already in progress"),
            EncounterError::NotExplorable => write!(f, "Not in an explorable state"),
        }
    }
}

impl fmt::Display for EconomyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EconomyError::InsufficientFunds { price, balance } => {
                write!(
                    f,
                    "Insufficient funds: price {} but balance {}",
                    price, balance
                )
            }
            EconomyError::UnknownItem(id) => write!(f, "Unknown item: {}", id),
            EconomyError::NotInInventory(id) => write!(f, "Item not in inventory: {}", id),
            EconomyError::NotConsumable(id) => write!(f, "Item has no usable effect: {}", id),
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(details) => write!(f, "Failed to read data file: {}", details),
            CatalogError::Malformed(details) => write!(f, "Malformed catalog data: {}", details),
            CatalogError::DuplicateId(id) => write!(f, "Duplicate catalog id: {}", id),
            CatalogError::UnknownReference(id) => {
                write!(f, "Catalog references unknown id: {}", id)
            }
            CatalogError::UnknownZone(id) => write!(f, "Unknown zone: {}", id),
            CatalogError::NotConnected { from, to } => {
                write!(f, "Zone {} is not connected to {}", from, to)
            }
            CatalogError::ZoneLocked { zone, required } => {
                write!(f, "Zone {} unlocks at trainer level {}", zone, required)
            }
        }
    }
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Encode(details) => {
                write!(f, "Failed to encode snapshot: {}", details)
            }
            PersistenceError::Decode(details) => {
                write!(f, "Failed to decode snapshot: {}", details)
            }
            PersistenceError::Inconsistent(details) => {
                write!(f, "Inconsistent snapshot: {}", details)
            }
        }
    }
}

impl std::error::Error for GameError {}
impl std::error::Error for EquipmentError {}
impl std::error::Error for ProgressionError {}
impl std::error::Error for EncounterError {}
impl std::error::Error for EconomyError {}
impl std::error::Error for CatalogError {}
impl std::error::Error for PersistenceError {}

impl From<EquipmentError> for GameError {
    fn from(err: EquipmentError) -> Self {
        GameError::Equipment(err)
    }
}

impl From<ProgressionError> for GameError {
    fn from(err: ProgressionError) -> Self {
        GameError::Progression(err)
    }
}

impl From<EncounterError> for GameError {
    fn from(err: EncounterError) -> Self {
        GameError::Encounter(err)
    }
}

impl From<EconomyError> for GameError {
    fn from(err: EconomyError) -> Self {
        GameError::Economy(err)
    }
}

impl From<CatalogError> for GameError {
    fn from(err: CatalogError) -> Self {
        GameError::Catalog(err)
    }
}

impl From<PersistenceError> for GameError {
    fn from(err: PersistenceError) -> Self {
        GameError::Persistence(err)
    }
}

/// Type alias for Results using GameError
pub type GameResult<T> = Result<T, GameError>;

/// Type alias for Results using CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;
