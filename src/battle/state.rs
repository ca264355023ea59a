use schema::ElementType;
use serde::{Deserialize, Serialize};

/// Terminal verdict of a combat simulation. Exactly one is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Player,
    Enemy,
    Draw,
}

/// A combat-ready snapshot of one side. The player's side is produced by
/// the stat resolver with equipment folded in; enemies are generated
/// directly at these values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub element: ElementType,
    pub level: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub hp: u32,
    pub max_hp: u32,
}

impl Combatant {
    pub fn hp_ratio(&self) -> f64 {
        f64::from(self.hp) / f64::from(self.max_hp.max(1))
    }
}

/// Events produced during a combat simulation, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    RoundStarted {
        round: u32,
    },
    DamageDealt {
        attacker: String,
        target: String,
        damage: u32,
        remaining_hp: u32,
    },
    Defeated {
        name: String,
    },
    /// Both sides survived every round; decided on remaining HP ratios.
    WentTheDistance,
    Ended {
        verdict: Verdict,
        player_name: String,
        enemy_name: String,
    },
}

impl CombatEvent {
    /// Human-readable line for the staged battle log. Returns None for
    /// events that carry no user-visible text.
    pub fn format(&self) -> Option<String> {
        match self {
            CombatEvent::RoundStarted { round } => Some(format!("--- Round {} ---", round)),
            CombatEvent::DamageDealt {
                attacker,
                target,
                damage,
                remaining_hp,
            } => Some(format!(
                "{} strikes {} for {} damage! ({} HP left)",
                attacker, target, damage, remaining_hp
            )),
            CombatEvent::Defeated { name } => Some(format!("{} is defeated!", name)),
            CombatEvent::WentTheDistance => {
                Some("Both sides are still standing as the dust settles...".to_string())
            }
            CombatEvent::Ended {
                verdict,
                player_name,
                enemy_name,
            } => match verdict {
                Verdict::Player => Some(format!("{} wins the battle!", player_name)),
                Verdict::Enemy => Some(format!("{} wins the battle!", enemy_name)),
                Verdict::Draw => Some("The battle ends in a draw.".to_string()),
            },
        }
    }
}

/// Ordered collection of combat events for one simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatLog {
    events: Vec<CombatEvent>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// The formatted lines of every visible event, in order. This is what
    /// the encounter resolver reveals one line at a time.
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().filter_map(CombatEvent::format).collect()
    }
}
