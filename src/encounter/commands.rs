use crate::creature::CreatureInst;
use crate::encounter::GameSignal;
use crate::progression;
use crate::trainer::Trainer;
use schema::ItemId;

/// Atomic state changes produced when an encounter reaches its result
/// phase. Building the batch is separated from applying it so the commit
/// stays a single synchronous step at the session's dispatch point.
#[derive(Debug, Clone, PartialEq)]
pub enum EncounterCommand {
    GrantCreatureExp { amount: u32 },
    GrantTrainerExp { amount: u32 },
    AddCoins { amount: u32 },
    AddItem { item_id: ItemId },
    DamageCreature { amount: u32 },
}

/// Apply a command batch to the trainer and the active creature, emitting
/// the signals the presentation layer cares about.
pub fn execute_commands(
    commands: &[EncounterCommand],
    trainer: &mut Trainer,
    creature: &mut CreatureInst,
) -> Vec<GameSignal> {
    let mut signals = Vec::new();

    for command in commands {
        match command {
            EncounterCommand::GrantCreatureExp { amount } => {
                let report = progression::apply_experience(creature, *amount);
                signals.push(GameSignal::ExpGained { amount: *amount });
                if report.leveled_up() {
                    signals.push(GameSignal::CreatureLeveledUp {
                        level: report.new_level,
                    });
                    if progression::can_evolve(creature) {
                        signals.push(GameSignal::EvolutionReady);
                    }
                }
            }
            EncounterCommand::GrantTrainerExp { amount } => {
                let report = progression::apply_trainer_experience(trainer, *amount);
                if report.leveled_up() {
                    signals.push(GameSignal::TrainerLeveledUp {
                        level: report.new_level,
                    });
                }
            }
            EncounterCommand::AddCoins { amount } => {
                trainer.earn(*amount);
                signals.push(GameSignal::CoinsReceived { amount: *amount });
            }
            EncounterCommand::AddItem { item_id } => {
                trainer.add_item(item_id.clone());
                signals.push(GameSignal::ItemReceived {
                    item_id: item_id.clone(),
                });
            }
            EncounterCommand::DamageCreature { amount } => {
                creature.take_damage(*amount);
                signals.push(GameSignal::CreatureDamaged {
                    amount: *amount,
                    remaining_hp: creature.current_hp,
                });
            }
        }
    }

    signals
}
