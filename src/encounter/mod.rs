pub mod commands;
pub mod generation;
pub mod resolver;
pub mod scheduler;

use crate::battle::Combatant;
use schema::ItemId;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use commands::{execute_commands, EncounterCommand};
pub use resolver::{ActiveEncounter, EncounterPhase, ResolverStep};
pub use scheduler::{EncounterScheduler, SchedulerConfig, SchedulerEvent};

/// The four categories of random world event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum EncounterKind {
    Battle,
    Treasure,
    Discovery,
    Hazard,
}

impl EncounterKind {
    /// Emote key shown by the rendering collaborator during the
    /// anticipation delay. The engine never interprets these.
    pub fn emote_key(self) -> &'static str {
        match self {
            EncounterKind::Battle => "emote.alert",
            EncounterKind::Treasure => "emote.sparkle",
            EncounterKind::Discovery => "emote.curious",
            EncounterKind::Hazard => "emote.danger",
        }
    }
}

impl fmt::Display for EncounterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Category-specific payload, built when an encounter opens and consumed
/// when its rewards are committed. Matching is exhaustive everywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EncounterPayload {
    Battle { enemy: Combatant },
    Treasure { item_id: ItemId },
    Discovery { exp: u32, coins: u32 },
    Hazard { damage: u32 },
}

/// Everything the engine tells the presentation layer. Emitted from the
/// session's single dispatch point; the engine does not know how these are
/// drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameSignal {
    /// An encounter was selected and is being staged; show the emote.
    PreEventCue {
        kind: EncounterKind,
        emote: String,
    },
    EncounterOpened {
        kind: EncounterKind,
    },
    /// One staged log line, revealed on the resolver's cadence.
    LogLine(String),
    EncounterClosed {
        kind: EncounterKind,
    },
    CreatureLeveledUp {
        level: u32,
    },
    TrainerLeveledUp {
        level: u32,
    },
    /// The active creature now satisfies the evolution eligibility query.
    EvolutionReady,
    ItemReceived {
        item_id: ItemId,
    },
    CoinsReceived {
        amount: u32,
    },
    CreatureDamaged {
        amount: u32,
        remaining_hp: u32,
    },
    ExpGained {
        amount: u32,
    },
}
