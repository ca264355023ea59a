pub mod simulator;
pub mod state;

pub use simulator::{simulate, CombatOutcome, MAX_COMBAT_ROUNDS};
pub use state::{CombatEvent, CombatLog, Combatant, Verdict};
