use crate::battle::{simulate, Combatant, Verdict, MAX_COMBAT_ROUNDS};
use crate::catalog::ItemCatalog;
use crate::encounter::generation::{
    roll_discovery_reward, roll_enemy, roll_hazard_damage, roll_loot,
};
use crate::encounter::{EncounterCommand, EncounterKind, EncounterPayload, GameSignal};
use crate::rng::RollRng;
use schema::ZoneDef;

/// Cadence of the staged log reveal.
const REVEAL_INTERVAL_MS: u64 = 900;
/// How long a finished encounter stays on screen before closing.
const RESULT_HOLD_MS: u64 = 2500;
/// Flat HP penalty for losing a battle. The creature faints but is never
/// removed from the roster.
const BATTLE_LOSS_HP_PENALTY: u32 = 10;
/// Percent chance a won battle also drops loot.
const BONUS_LOOT_PERCENT: u8 = 50;

/// Lifecycle of a single encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterPhase {
    Intro,
    Action,
    Result,
    Closed,
}

/// What one `advance` call produced: presentation signals, a reward batch
/// to commit (non-empty exactly once, at the result transition), and
/// whether the encounter has fully closed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolverStep {
    pub signals: Vec<GameSignal>,
    pub commands: Vec<EncounterCommand>,
    pub closed: bool,
}

/// A single in-flight encounter, advanced by explicit `advance(now)` calls
/// from the session's dispatch point. Holds no timers of its own, so
/// dropping it is a complete cancellation.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveEncounter {
    kind: EncounterKind,
    payload: EncounterPayload,
    phase: EncounterPhase,
    script: Vec<String>,
    revealed: usize,
    next_reveal_at: u64,
    verdict: Option<Verdict>,
    hold_until: u64,
}

impl ActiveEncounter {
    /// Build the encounter payload and intro script (the Intro phase work).
    /// For battles the enemy snapshot is rolled here; the simulation itself
    /// runs when the action phase begins.
    pub fn open(
        kind: EncounterKind,
        now: u64,
        zone: &ZoneDef,
        player_name: &str,
        trainer_level: u32,
        creature_level: u32,
        items: &ItemCatalog,
        rng: &mut RollRng,
    ) -> Self {
        let (kind, payload, script) = match kind {
            EncounterKind::Battle => {
                let enemy = roll_enemy(zone, trainer_level, creature_level, rng);
                let script = vec![
                    format!("A wild {} appears!", enemy.name),
                    format!("{} squares up to defend {}.", player_name, zone.name),
                ];
                (kind, EncounterPayload::Battle { enemy }, script)
            }
            EncounterKind::Treasure => match roll_loot(zone, items, rng) {
                Some(item_id) => {
                    let name = items
                        .get(&item_id)
                        .map(|def| def.name.clone())
                        .unwrap_or_else(|| item_id.clone());
                    let script = vec![
                        "Something glints in the undergrowth...".to_string(),
                        format!("It's a {}!", name),
                    ];
                    (kind, EncounterPayload::Treasure { item_id }, script)
                }
                // An exhausted catalog leaves nothing to find; the event
                // degrades to a small discovery.
                None => discovery(zone, rng),
            },
            EncounterKind::Discovery => discovery(zone, rng),
            EncounterKind::Hazard => {
                let damage = roll_hazard_damage(zone, rng);
                let script = vec![
                    "The ground shifts beneath you!".to_string(),
                    format!("{} takes {} damage from the hazard!", player_name, damage),
                ];
                (kind, EncounterPayload::Hazard { damage }, script)
            }
        };

        ActiveEncounter {
            kind,
            payload,
            phase: EncounterPhase::Intro,
            script,
            revealed: 0,
            next_reveal_at: now,
            verdict: None,
            hold_until: 0,
        }
    }

    pub fn kind(&self) -> EncounterKind {
        self.kind
    }

    pub fn phase(&self) -> EncounterPhase {
        self.phase
    }

    pub fn payload(&self) -> &EncounterPayload {
        &self.payload
    }

    /// Advance the staged reveal against the injected clock. `player` is
    /// the equipment-inclusive snapshot of the active creature, used when a
    /// battle's action phase begins.
    pub fn advance(
        &mut self,
        now: u64,
        player: &Combatant,
        zone: &ZoneDef,
        items: &ItemCatalog,
        rng: &mut RollRng,
    ) -> ResolverStep {
        let mut step = ResolverStep::default();

        loop {
            match self.phase {
                EncounterPhase::Intro => {
                    if let EncounterPayload::Battle { enemy } = &self.payload {
                        let outcome = simulate(player, enemy, MAX_COMBAT_ROUNDS, rng);
                        self.verdict = Some(outcome.verdict);
                        self.script.extend(outcome.log.lines());
                    }
                    self.phase = EncounterPhase::Action;
                }
                EncounterPhase::Action => {
                    // One line per elapsed interval; a caller that fell
                    // behind catches up a line per dispatch, not in a burst.
                    if self.revealed < self.script.len() && now >= self.next_reveal_at {
                        step.signals
                            .push(GameSignal::LogLine(self.script[self.revealed].clone()));
                        self.revealed += 1;
                        self.next_reveal_at = now + REVEAL_INTERVAL_MS;
                    }
                    if self.revealed < self.script.len() {
                        break;
                    }
                    step.commands = self.result_commands(zone, items, rng);
                    self.phase = EncounterPhase::Result;
                    self.hold_until = now + RESULT_HOLD_MS;
                }
                EncounterPhase::Result => {
                    if now < self.hold_until {
                        break;
                    }
                    self.phase = EncounterPhase::Closed;
                    step.closed = true;
                }
                EncounterPhase::Closed => break,
            }
        }

        step
    }

    /// The reward batch for this encounter's terminal result.
    fn result_commands(
        &self,
        zone: &ZoneDef,
        items: &ItemCatalog,
        rng: &mut RollRng,
    ) -> Vec<EncounterCommand> {
        match &self.payload {
            EncounterPayload::Battle { enemy } => match self.verdict {
                Some(Verdict::Player) => {
                    let mut commands = vec![
                        EncounterCommand::GrantCreatureExp {
                            amount: enemy.level * 12,
                        },
                        EncounterCommand::GrantTrainerExp {
                            amount: enemy.level * 8,
                        },
                        EncounterCommand::AddCoins {
                            amount: rng.pick_range(enemy.level * 4, enemy.level * 7, "battle coins"),
                        },
                    ];
                    if rng.chance(BONUS_LOOT_PERCENT, "bonus loot") {
                        if let Some(item_id) = roll_loot(zone, items, rng) {
                            commands.push(EncounterCommand::AddItem { item_id });
                        }
                    }
                    commands
                }
                Some(Verdict::Enemy) => vec![EncounterCommand::DamageCreature {
                    amount: BATTLE_LOSS_HP_PENALTY,
                }],
                Some(Verdict::Draw) => vec![EncounterCommand::GrantCreatureExp {
                    amount: enemy.level * 4,
                }],
                // A battle payload always carries a verdict by the time the
                // result phase runs
                None => Vec::new(),
            },
            EncounterPayload::Treasure { item_id } => vec![EncounterCommand::AddItem {
                item_id: item_id.clone(),
            }],
            EncounterPayload::Discovery { exp, coins } => vec![
                EncounterCommand::GrantCreatureExp { amount: *exp },
                EncounterCommand::GrantTrainerExp { amount: *exp },
                EncounterCommand::AddCoins { amount: *coins },
            ],
            EncounterPayload::Hazard { damage } => vec![EncounterCommand::DamageCreature {
                amount: *damage,
            }],
        }
    }
}

fn discovery(zone: &ZoneDef, rng: &mut RollRng) -> (EncounterKind, EncounterPayload, Vec<String>) {
    let (exp, coins) = roll_discovery_reward(zone, rng);
    let script = vec![
        "You notice something unusual off the path...".to_string(),
        format!("You chart a hidden corner of {}.", zone.name),
    ];
    (
        EncounterKind::Discovery,
        EncounterPayload::Discovery { exp, coins },
        script,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::{ElementType, ItemCategory, ItemDef, Rarity};

    fn zone() -> ZoneDef {
        ZoneDef {
            id: "meadow".to_string(),
            name: "Sunwashed Meadow".to_string(),
            description: String::new(),
            difficulty_tier: 0,
            difficulty_multiplier: 1.0,
            loot_tier: 0,
            unlock_level: 1,
            element_weights: vec![(ElementType::Neutral, 1)],
            exclusive_loot: vec![],
            connections: vec![],
        }
    }

    fn catalog() -> ItemCatalog {
        ItemCatalog::from_defs(vec![ItemDef {
            id: "glow_moss".to_string(),
            name: "Glow Moss".to_string(),
            category: ItemCategory::Material,
            rarity: Rarity::Common,
            price: 15,
            slot: None,
            bonuses: None,
            effect: None,
        }])
        .unwrap()
    }

    fn player() -> Combatant {
        Combatant {
            name: "Mossling".to_string(),
            element: ElementType::Verdant,
            level: 5,
            attack: 60,
            defense: 20,
            speed: 12,
            hp: 80,
            max_hp: 80,
        }
    }

    #[test]
    fn test_treasure_reveals_script_then_commits_item() {
        // Loot rolls: exclusive skipped (empty pool), rarity 99 -> common,
        // pick 0 -> glow_moss
        let mut rng = RollRng::new_scripted(vec![99, 0]);
        let mut encounter = ActiveEncounter::open(
            EncounterKind::Treasure,
            1000,
            &zone(),
            "Mossling",
            1,
            1,
            &catalog(),
            &mut rng,
        );
        assert_eq!(encounter.phase(), EncounterPhase::Intro);

        // First advance reveals the first line immediately
        let step = encounter.advance(1000, &player(), &zone(), &catalog(), &mut rng);
        assert_eq!(
            step.signals,
            vec![GameSignal::LogLine(
                "Something glints in the undergrowth...".to_string()
            )]
        );
        assert!(step.commands.is_empty());
        assert_eq!(encounter.phase(), EncounterPhase::Action);

        // Second line comes only after the reveal interval
        let step = encounter.advance(1500, &player(), &zone(), &catalog(), &mut rng);
        assert!(step.signals.is_empty());

        let step = encounter.advance(1900, &player(), &zone(), &catalog(), &mut rng);
        assert_eq!(
            step.signals,
            vec![GameSignal::LogLine("It's a Glow Moss!".to_string())]
        );
        // Script finished: the reward batch is produced exactly once
        assert_eq!(
            step.commands,
            vec![EncounterCommand::AddItem {
                item_id: "glow_moss".to_string()
            }]
        );
        assert_eq!(encounter.phase(), EncounterPhase::Result);

        // Holds on screen, then closes
        let step = encounter.advance(2000, &player(), &zone(), &catalog(), &mut rng);
        assert!(!step.closed);
        let step = encounter.advance(1900 + RESULT_HOLD_MS, &player(), &zone(), &catalog(), &mut rng);
        assert!(step.closed);
        assert_eq!(encounter.phase(), EncounterPhase::Closed);
    }

    #[test]
    fn test_battle_win_commands_scale_with_enemy_level() {
        // Enemy roll: element 0, jitter 50 (-> level 5 at multiplier 1.0)
        let mut rng = RollRng::new_scripted(vec![0, 50]);
        let mut encounter = ActiveEncounter::open(
            EncounterKind::Battle,
            0,
            &zone(),
            "Mossling",
            5,
            5,
            &catalog(),
            &mut rng,
        );
        let enemy_level = match encounter.payload() {
            EncounterPayload::Battle { enemy } => enemy.level,
            other => panic!("expected battle payload, got {:?}", other),
        };
        assert_eq!(enemy_level, 5);

        // At unit variance the player (60 atk vs 16 def) deals 51 per round
        // and downs the 70 HP enemy early in round two. Rolls: player r1,
        // enemy r1, player r2, then battle coins (50 -> mid range) and the
        // bonus-loot chance (99: no drop).
        let mut rng = RollRng::new_scripted(vec![0, 0, 0, 50, 99]);
        let mut now = 0;
        let mut commands = Vec::new();
        for _ in 0..32 {
            let step = encounter.advance(now, &player(), &zone(), &catalog(), &mut rng);
            if !step.commands.is_empty() {
                commands = step.commands;
                break;
            }
            now += REVEAL_INTERVAL_MS;
        }

        assert_eq!(
            commands[0],
            EncounterCommand::GrantCreatureExp { amount: 60 }
        );
        assert_eq!(commands[1], EncounterCommand::GrantTrainerExp { amount: 40 });
        // Coins: pick_range(20, 35) with roll 50 -> 20 + 8 = 28
        assert_eq!(commands[2], EncounterCommand::AddCoins { amount: 28 });
        assert_eq!(commands.len(), 3);
    }

    #[test]
    fn test_battle_loss_applies_flat_penalty() {
        let mut rng = RollRng::new_scripted(vec![0, 50]);
        let mut encounter = ActiveEncounter::open(
            EncounterKind::Battle,
            0,
            &zone(),
            "Mossling",
            5,
            5,
            &catalog(),
            &mut rng,
        );

        // A defenseless level-1 player loses in the first round
        let weakling = Combatant {
            attack: 1,
            defense: 0,
            hp: 1,
            max_hp: 1,
            ..player()
        };
        let mut rng = RollRng::new_scripted(vec![0, 0]);
        let mut now = 0;
        let mut commands = Vec::new();
        for _ in 0..32 {
            let step = encounter.advance(now, &weakling, &zone(), &catalog(), &mut rng);
            if !step.commands.is_empty() {
                commands = step.commands;
                break;
            }
            now += REVEAL_INTERVAL_MS;
        }

        assert_eq!(
            commands,
            vec![EncounterCommand::DamageCreature {
                amount: BATTLE_LOSS_HP_PENALTY
            }]
        );
    }

    #[test]
    fn test_hazard_payload_drives_damage_command() {
        // Hazard damage roll 50 -> 6 + 3 = 9 at tier 0
        let mut rng = RollRng::new_scripted(vec![50]);
        let mut encounter = ActiveEncounter::open(
            EncounterKind::Hazard,
            0,
            &zone(),
            "Mossling",
            1,
            1,
            &catalog(),
            &mut rng,
        );
        let expected = match encounter.payload() {
            EncounterPayload::Hazard { damage } => *damage,
            other => panic!("expected hazard payload, got {:?}", other),
        };
        assert_eq!(expected, 9);

        let mut rng = RollRng::new_scripted(vec![]);
        let mut now = 0;
        let mut commands = Vec::new();
        for _ in 0..8 {
            let step = encounter.advance(now, &player(), &zone(), &catalog(), &mut rng);
            if !step.commands.is_empty() {
                commands = step.commands;
                break;
            }
            now += REVEAL_INTERVAL_MS;
        }
        assert_eq!(
            commands,
            vec![EncounterCommand::DamageCreature { amount: expected }]
        );
    }

    #[test]
    fn test_empty_catalog_treasure_degrades_to_discovery() {
        let empty = ItemCatalog::from_defs(vec![]).unwrap();
        // Rarity roll 99 finds nothing; discovery rolls follow
        let mut rng = RollRng::new_scripted(vec![99, 50, 50]);
        let encounter = ActiveEncounter::open(
            EncounterKind::Treasure,
            0,
            &zone(),
            "Mossling",
            1,
            1,
            &empty,
            &mut rng,
        );

        assert_eq!(encounter.kind(), EncounterKind::Discovery);
        assert!(matches!(
            encounter.payload(),
            EncounterPayload::Discovery { .. }
        ));
    }
}
