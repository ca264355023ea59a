use crate::creature::CreatureInst;
use crate::errors::{GameResult, ProgressionError};
use crate::trainer::Trainer;
use schema::EvolutionStage;

// Constants for the progression curves
pub const BASE_EXP_TO_NEXT: u32 = 100;
pub const MAX_LEVEL: u32 = 100;
const LEVEL_HP_GAIN: u32 = 20;
const LEVEL_STAT_GAIN: u32 = 5;
const TRAINER_EXP_STEP: u32 = 150;

// Level required to reach each stage
const STAGE1_LEVEL: u32 = 10;
const STAGE2_LEVEL: u32 = 25;
const STAGE3_LEVEL: u32 = 50;

/// Outcome of an experience grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUpReport {
    pub levels_gained: u32,
    pub new_level: u32,
}

impl LevelUpReport {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// Grant experience to a creature, applying as many level-ups as the amount
/// covers. Each level-up grows the threshold by ×1.4 (floored), raises max
/// HP by 20 and the other stats by 5, and fully heals.
pub fn apply_experience(creature: &mut CreatureInst, amount: u32) -> LevelUpReport {
    let old_level = creature.level;
    creature.exp = creature.exp.saturating_add(amount);

    while creature.level < MAX_LEVEL && creature.exp >= creature.exp_to_next {
        creature.exp -= creature.exp_to_next;
        creature.level += 1;
        // floor(x * 1.4); widened so the threshold cannot overflow at the
        // top of the curve
        creature.exp_to_next =
            (u64::from(creature.exp_to_next) * 7 / 5).min(u64::from(u32::MAX)) as u32;

        creature.base_stats.hp += LEVEL_HP_GAIN;
        creature.base_stats.attack += LEVEL_STAT_GAIN;
        creature.base_stats.defense += LEVEL_STAT_GAIN;
        creature.base_stats.speed += LEVEL_STAT_GAIN;
        creature.heal_full();
    }
    if creature.level == MAX_LEVEL {
        creature.exp = creature.exp.min(creature.exp_to_next - 1);
    }

    LevelUpReport {
        levels_gained: creature.level - old_level,
        new_level: creature.level,
    }
}

/// Level required to advance INTO the given stage, None for Stage0.
pub fn evolution_threshold(stage: EvolutionStage) -> Option<u32> {
    match stage {
        EvolutionStage::Stage0 => None,
        EvolutionStage::Stage1 => Some(STAGE1_LEVEL),
        EvolutionStage::Stage2 => Some(STAGE2_LEVEL),
        EvolutionStage::Stage3 => Some(STAGE3_LEVEL),
    }
}

/// Evolution is a query plus an explicit action, never automatic on
/// level-up. Eligible iff the next stage exists and the creature's level
/// has reached its threshold.
pub fn can_evolve(creature: &CreatureInst) -> bool {
    match creature.stage.next().and_then(evolution_threshold) {
        Some(required) => creature.level >= required,
        None => false,
    }
}

/// Advance the creature one evolution stage: ×1.5 attack, defense, and max
/// HP, with current HP scaled alongside the maximum.
pub fn evolve(creature: &mut CreatureInst) -> GameResult<EvolutionStage> {
    let next = creature
        .stage
        .next()
        .ok_or(ProgressionError::FinalStage)?;
    let required = evolution_threshold(next).unwrap_or(u32::MAX);
    if creature.level < required {
        return Err(ProgressionError::NotEligible {
            level: creature.level,
            required,
        }
        .into());
    }

    creature.base_stats.attack = creature.base_stats.attack * 3 / 2;
    creature.base_stats.defense = creature.base_stats.defense * 3 / 2;
    creature.base_stats.hp = creature.base_stats.hp * 3 / 2;
    creature.current_hp = (creature.current_hp * 3 / 2).min(creature.base_stats.hp);
    creature.stage = next;
    Ok(next)
}

/// The trainer's parallel track: linear threshold of `level * 150`, with
/// the same multi-level overflow loop for consistency.
pub fn apply_trainer_experience(trainer: &mut Trainer, amount: u32) -> LevelUpReport {
    let old_level = trainer.level;
    trainer.exp = trainer.exp.saturating_add(amount);

    while trainer.exp >= trainer.level * TRAINER_EXP_STEP {
        trainer.exp -= trainer.level * TRAINER_EXP_STEP;
        trainer.level += 1;
    }

    LevelUpReport {
        levels_gained: trainer.level - old_level,
        new_level: trainer.level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GameError;
    use pretty_assertions::assert_eq;
    use schema::MonsterStats;

    fn hatchling() -> CreatureInst {
        CreatureInst::from_monster_stats(
            1,
            &MonsterStats {
                name: "Pebblit".to_string(),
                element: None,
                body: None,
                hp: Some(40),
                attack: Some(10),
                defense: Some(10),
                speed: Some(10),
                description: None,
                ability: None,
            },
        )
    }

    #[test]
    fn test_small_grant_no_level_up() {
        let mut creature = hatchling();
        let report = apply_experience(&mut creature, 99);

        assert!(!report.leveled_up());
        assert_eq!(creature.level, 1);
        assert_eq!(creature.exp, 99);
        assert_eq!(creature.exp_to_next, 100);
    }

    #[test]
    fn test_large_grant_chains_level_ups() {
        // 250 exp from level 1: consume 100 -> level 2 (next 140), consume
        // 140 -> level 3 (next 196), 10 exp left over.
        let mut creature = hatchling();
        let report = apply_experience(&mut creature, 250);

        assert_eq!(report.levels_gained, 2);
        assert_eq!(report.new_level, 3);
        assert_eq!(creature.level, 3);
        assert_eq!(creature.exp, 10);
        assert_eq!(creature.exp_to_next, 196);
    }

    #[test]
    fn test_level_up_raises_stats_and_heals() {
        let mut creature = hatchling();
        creature.take_damage(30);

        apply_experience(&mut creature, 100);

        assert_eq!(creature.base_stats.hp, 60);
        assert_eq!(creature.current_hp, 60);
        assert_eq!(creature.base_stats.attack, 15);
        assert_eq!(creature.base_stats.defense, 15);
        assert_eq!(creature.base_stats.speed, 15);
    }

    #[test]
    fn test_exp_invariant_holds_across_grants() {
        let mut creature = hatchling();
        for amount in [0, 17, 230, 999, 5000] {
            apply_experience(&mut creature, amount);
            assert!(
                creature.exp < creature.exp_to_next,
                "exp {} must stay below threshold {}",
                creature.exp,
                creature.exp_to_next
            );
        }
    }

    #[test]
    fn test_level_cap_clamps_overflow_exp() {
        let mut creature = hatchling();
        creature.level = MAX_LEVEL - 1;
        creature.exp_to_next = 500;

        let report = apply_experience(&mut creature, u32::MAX);

        assert_eq!(report.new_level, MAX_LEVEL);
        assert_eq!(report.levels_gained, 1);
        // The invariant exp < exp_to_next holds even at the cap
        assert!(creature.exp < creature.exp_to_next);

        // Further grants are absorbed without leveling
        let report = apply_experience(&mut creature, 10_000);
        assert!(!report.leveled_up());
        assert_eq!(creature.level, MAX_LEVEL);
    }

    #[test]
    fn test_evolve_below_threshold_fails() {
        let mut creature = hatchling();
        creature.level = 9;

        assert!(!can_evolve(&creature));
        let err = evolve(&mut creature).unwrap_err();
        assert_eq!(
            err,
            GameError::Progression(ProgressionError::NotEligible {
                level: 9,
                required: 10
            })
        );
        assert_eq!(creature.stage, EvolutionStage::Stage0);
    }

    #[test]
    fn test_evolve_multiplies_stats() {
        let mut creature = hatchling();
        creature.level = 10;
        creature.current_hp = 20;

        assert!(can_evolve(&creature));
        let stage = evolve(&mut creature).unwrap();

        assert_eq!(stage, EvolutionStage::Stage1);
        assert_eq!(creature.base_stats.attack, 15);
        assert_eq!(creature.base_stats.defense, 15);
        assert_eq!(creature.base_stats.hp, 60);
        // Current HP follows the maximum
        assert_eq!(creature.current_hp, 30);
        // Speed is not part of the evolution bonus
        assert_eq!(creature.base_stats.speed, 10);
    }

    #[test]
    fn test_evolve_requires_consecutive_stages() {
        // A Stage1 creature at level 50 is eligible for Stage2 (threshold
        // 25), never for a jump straight to Stage3.
        let mut creature = hatchling();
        creature.level = 50;
        creature.stage = EvolutionStage::Stage1;

        assert!(can_evolve(&creature));
        assert_eq!(evolve(&mut creature).unwrap(), EvolutionStage::Stage2);
        assert_eq!(creature.stage, EvolutionStage::Stage2);
    }

    #[test]
    fn test_final_stage_cannot_evolve() {
        let mut creature = hatchling();
        creature.level = 99;
        creature.stage = EvolutionStage::Stage3;

        assert!(!can_evolve(&creature));
        let err = evolve(&mut creature).unwrap_err();
        assert_eq!(err, GameError::Progression(ProgressionError::FinalStage));
    }

    #[test]
    fn test_trainer_track_levels_on_overflow() {
        let mut trainer = Trainer::new("Rowan".to_string(), "meadow".to_string());

        let report = apply_trainer_experience(&mut trainer, 149);
        assert!(!report.leveled_up());
        assert_eq!(trainer.level, 1);

        // 1 more reaches the level-1 threshold of 150
        let report = apply_trainer_experience(&mut trainer, 1);
        assert_eq!(report.new_level, 2);
        assert_eq!(trainer.exp, 0);
    }

    #[test]
    fn test_trainer_track_supports_multi_level_grants() {
        let mut trainer = Trainer::new("Rowan".to_string(), "meadow".to_string());

        // 150 (level 1) + 300 (level 2) = 450 spent, 50 left at level 3
        let report = apply_trainer_experience(&mut trainer, 500);
        assert_eq!(report.levels_gained, 2);
        assert_eq!(trainer.level, 3);
        assert_eq!(trainer.exp, 50);
    }
}
