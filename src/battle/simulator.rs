use crate::battle::state::{CombatEvent, CombatLog, Combatant, Verdict};
use crate::rng::RollRng;

/// Default round cap. Combat always terminates within this many rounds.
pub const MAX_COMBAT_ROUNDS: u32 = 6;

/// Result of a full combat simulation: the verdict, the event log, and the
/// final HP of both sides (already clamped to zero).
#[derive(Debug, Clone, PartialEq)]
pub struct CombatOutcome {
    pub verdict: Verdict,
    pub log: CombatLog,
    pub player_hp: u32,
    pub enemy_hp: u32,
}

/// Simulate a bounded battle between the player's creature and an enemy.
///
/// Each round the player strikes first: damage is
/// `max(1, floor(atk * 100 / (100 + def) * variance))` with variance
/// uniform in [1.0, 1.5) for the player and [0.8, 1.3) for the enemy. If
/// neither side falls within `max_rounds`, the higher remaining-HP ratio
/// wins and an exact tie is a draw.
pub fn simulate(
    player: &Combatant,
    enemy: &Combatant,
    max_rounds: u32,
    rng: &mut RollRng,
) -> CombatOutcome {
    let mut log = CombatLog::new();
    let mut player = player.clone();
    let mut enemy = enemy.clone();

    let mut verdict = None;
    for round in 1..=max_rounds {
        log.push(CombatEvent::RoundStarted { round });

        let player_hit = damage_roll(player.attack, enemy.defense, 1.0, 1.5, rng, "player attack");
        enemy.hp = enemy.hp.saturating_sub(player_hit);
        log.push(CombatEvent::DamageDealt {
            attacker: player.name.clone(),
            target: enemy.name.clone(),
            damage: player_hit,
            remaining_hp: enemy.hp,
        });
        if enemy.hp == 0 {
            log.push(CombatEvent::Defeated {
                name: enemy.name.clone(),
            });
            verdict = Some(Verdict::Player);
            break;
        }

        let enemy_hit = damage_roll(enemy.attack, player.defense, 0.8, 1.3, rng, "enemy attack");
        player.hp = player.hp.saturating_sub(enemy_hit);
        log.push(CombatEvent::DamageDealt {
            attacker: enemy.name.clone(),
            target: player.name.clone(),
            damage: enemy_hit,
            remaining_hp: player.hp,
        });
        if player.hp == 0 {
            log.push(CombatEvent::Defeated {
                name: player.name.clone(),
            });
            verdict = Some(Verdict::Enemy);
            break;
        }
    }

    let verdict = verdict.unwrap_or_else(|| {
        log.push(CombatEvent::WentTheDistance);
        match player
            .hp_ratio()
            .partial_cmp(&enemy.hp_ratio())
            .unwrap_or(std::cmp::Ordering::Equal)
        {
            std::cmp::Ordering::Greater => Verdict::Player,
            std::cmp::Ordering::Less => Verdict::Enemy,
            std::cmp::Ordering::Equal => Verdict::Draw,
        }
    });

    log.push(CombatEvent::Ended {
        verdict,
        player_name: player.name.clone(),
        enemy_name: enemy.name.clone(),
    });

    CombatOutcome {
        verdict,
        log,
        player_hp: player.hp,
        enemy_hp: enemy.hp,
    }
}

/// One attack's damage: `max(1, floor(atk * 100 / (100 + def) * variance))`.
fn damage_roll(
    attack: u32,
    defense: u32,
    variance_lo: f64,
    variance_hi: f64,
    rng: &mut RollRng,
    reason: &str,
) -> u32 {
    let variance = rng.factor(variance_lo, variance_hi, reason);
    let raw = f64::from(attack) * 100.0 / f64::from(100 + defense) * variance;
    (raw.floor() as u32).max(1)
}
