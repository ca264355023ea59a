//! Creature Quest Encounter & Progression Engine
//!
//! The session core of a creature-collection game: timed random encounters,
//! deterministic-from-stats combat simulation, reward resolution, and
//! invariant-preserving progression of a trainer and their creature roster.
//! Rendering, content generation, and persistence are external
//! collaborators consumed through narrow interfaces.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod battle;
pub mod catalog;
pub mod creature;
pub mod encounter;
pub mod equipment;
pub mod errors;
pub mod progression;
pub mod rng;
pub mod session;
pub mod stats;
pub mod trainer;

// --- PUBLIC API RE-EXPORTS ---
// This section defines the public-facing API of the `creature-quest` crate,
// making it easy for users to import the most important types directly.

// --- From the `schema` crate ---
// Re-export all shared data definitions and static enums.
pub use schema::{
    BaseStats,
    BodyType,
    ElementType,
    EvolutionStage,
    GearSlot,
    ItemCategory,
    ItemDef,
    ItemEffect,
    ItemId,
    MonsterStats,
    Rarity,
    StatBonuses,
    StatKind,
    ZoneDef,
    ZoneId,
};

// --- From this crate's modules (`src/`) ---

// Session orchestration and the presentation interface.
pub use encounter::{EncounterKind, EncounterPayload, GameSignal, SchedulerConfig};
pub use session::{GameSession, RenderView, SessionMode, SessionSnapshot};

// Core runtime types.
pub use battle::{simulate, CombatOutcome, Combatant, Verdict, MAX_COMBAT_ROUNDS};
pub use catalog::{ItemCatalog, ZoneCatalog};
pub use creature::CreatureInst;
pub use rng::RollRng;
pub use trainer::Trainer;

// Primary stat and progression functions.
pub use progression::{apply_experience, apply_trainer_experience, can_evolve, evolve};
pub use stats::effective_stat;

// Crate-specific error and result types.
pub use errors::{
    CatalogError, EconomyError, EncounterError, EquipmentError, GameError, GameResult,
    PersistenceError, ProgressionError,
};
