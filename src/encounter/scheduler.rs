use crate::encounter::EncounterKind;
use crate::errors::{EncounterError, GameResult};
use crate::rng::RollRng;
use schema::ZoneDef;

/// Tunables for the periodic encounter roll. Defaults sit in the middle of
/// the design ranges; tests tighten them.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    /// Wall-clock gap between encounter checks while idle.
    pub check_interval_ms: u64,
    /// Percent chance per check that an encounter fires.
    pub encounter_percent: u8,
    /// Delay between selecting an encounter and opening it, during which
    /// the pre-event emote is shown.
    pub anticipation_ms: u64,
    pub battle_weight: u32,
    pub treasure_weight: u32,
    pub discovery_weight: u32,
    pub hazard_weight: u32,
    /// Hazards only roll in zones at or above this difficulty tier.
    pub hazard_min_tier: u8,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            check_interval_ms: 2500,
            encounter_percent: 8,
            anticipation_ms: 1800,
            battle_weight: 50,
            treasure_weight: 30,
            discovery_weight: 12,
            hazard_weight: 8,
            hazard_min_tier: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchedulerState {
    /// No encounter selected; periodic checks run while explorable.
    Idle,
    /// An encounter was selected and fires once the anticipation delay
    /// elapses.
    Staging {
        kind: EncounterKind,
        fires_at: u64,
    },
    /// The fired encounter is being resolved; checks are ignored until
    /// `finish` is called.
    Resolving,
}

/// What a tick asks the session to do.
#[derive(Debug, Clone, PartialEq)]
pub enum SchedulerEvent {
    /// Encounter selected; stage the pre-event indicator.
    Cue { kind: EncounterKind },
    /// Anticipation elapsed; open the encounter now.
    Fire { kind: EncounterKind },
}

/// Timed state machine that decides when random encounters happen. It is
/// advanced purely by `tick(now)`; it holds no real timers, so abandoning
/// an encounter is a plain state reset and nothing can fire afterwards.
#[derive(Debug, Clone)]
pub struct EncounterScheduler {
    config: SchedulerConfig,
    state: SchedulerState,
    next_check_at: u64,
}

impl EncounterScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            state: SchedulerState::Idle,
            next_check_at: 0,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// True from the moment an encounter is selected until `finish`.
    pub fn is_pending(&self) -> bool {
        self.state != SchedulerState::Idle
    }

    /// Advance the scheduler. `explorable` is false whenever the player is
    /// in a menu, a battle screen, or any other overlay; checks are
    /// suspended (pushed forward) for as long as that holds.
    pub fn tick(
        &mut self,
        now: u64,
        explorable: bool,
        zone: &ZoneDef,
        rng: &mut RollRng,
    ) -> Option<SchedulerEvent> {
        match self.state {
            SchedulerState::Staging { kind, fires_at } => {
                // A staged encounter waits out menus as well as the
                // anticipation delay; it never opens behind an overlay.
                if explorable && now >= fires_at {
                    self.state = SchedulerState::Resolving;
                    Some(SchedulerEvent::Fire { kind })
                } else {
                    None
                }
            }
            SchedulerState::Resolving => None,
            SchedulerState::Idle => {
                if !explorable {
                    self.next_check_at = now + self.config.check_interval_ms;
                    return None;
                }
                if now < self.next_check_at {
                    return None;
                }
                self.next_check_at = now + self.config.check_interval_ms;

                if !rng.chance(self.config.encounter_percent, "encounter check") {
                    return None;
                }
                let kind = self.roll_category(zone, rng);
                self.state = SchedulerState::Staging {
                    kind,
                    fires_at: now + self.config.anticipation_ms,
                };
                Some(SchedulerEvent::Cue { kind })
            }
        }
    }

    /// Manually stage an encounter of the given kind (debug menus, scripted
    /// story beats). Fails with `Busy` while one is already pending.
    pub fn trigger(&mut self, now: u64, kind: EncounterKind) -> GameResult<()> {
        if self.is_pending() {
            return Err(EncounterError::Busy.into());
        }
        self.state = SchedulerState::Staging {
            kind,
            fires_at: now,
        };
        Ok(())
    }

    /// Return to idle once the fired encounter has fully closed (or was
    /// abandoned). The next check waits a full interval.
    pub fn finish(&mut self, now: u64) {
        self.state = SchedulerState::Idle;
        self.next_check_at = now + self.config.check_interval_ms;
    }

    fn roll_category(&self, zone: &ZoneDef, rng: &mut RollRng) -> EncounterKind {
        let hazard_eligible = zone.difficulty_tier >= self.config.hazard_min_tier;
        let categories = [
            (EncounterKind::Battle, self.config.battle_weight),
            (EncounterKind::Treasure, self.config.treasure_weight),
            (EncounterKind::Discovery, self.config.discovery_weight),
            (
                EncounterKind::Hazard,
                if hazard_eligible {
                    self.config.hazard_weight
                } else {
                    0
                },
            ),
        ];
        let weights: Vec<u32> = categories.iter().map(|(_, weight)| *weight).collect();
        categories[rng.weighted_index(&weights, "encounter category")].0
    }
}
