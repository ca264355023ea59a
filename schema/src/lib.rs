// Creature Quest Schema - Shared type definitions
// This crate contains the core enums and data structs that are shared between
// the session engine and its external collaborators: the content-generation
// service that produces creature records, and the static item/zone catalogs
// injected at startup.

// Re-export the main types
pub use creature_types::*;
pub use item_data::*;
pub use zone_data::*;

pub mod creature_types;
pub mod item_data;
pub mod zone_data;
