//! Cost evaluation for match candidates.
//!
//! Assigns a scalar cost to one fully formed candidate; lower is better.
//! Hard-limit overflows dominate (they only appear in the relaxed tier),
//! followed by consecutive-play overflow, then soft criteria: mixed-pairing
//! bonus, play/officiating load spread, and skill balance. A small jitter
//! drawn from the run's seeded generator breaks exact ties reproducibly
//! without overwhelming the real signal.

use std::collections::HashMap;

use rand::Rng;

use super::{FairnessLedger, MatchCandidate};
use crate::models::{Gender, Player, Settings};

/// Penalty weights for the cost function.
///
/// Defaults mirror the tuning the scheduler ships with; hard-limit
/// overflows weigh two orders of magnitude more than load spread so the
/// relaxed tier still picks the least-bad violation.
#[derive(Debug, Clone, PartialEq)]
pub struct CostWeights {
    /// Per unit of partner-count overflow past the hard limit.
    pub partner_overflow: f64,
    /// Per unit of opponent-count overflow past the hard limit.
    pub opponent_overflow: f64,
    /// Per unit of consecutive-play overflow past the hard limit.
    pub consecutive_overflow: f64,
    /// Added per mixed team (negative = bonus).
    pub mixed_bonus: f64,
    /// Per unit of play-count spread (max − min).
    pub play_load: f64,
    /// Per unit of officiating-count spread.
    pub officiating_load: f64,
    /// Per level of team skill-sum difference.
    pub level_gap: f64,
    /// Width of the uniform tie-break jitter.
    pub jitter_span: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            partner_overflow: 50.0,
            opponent_overflow: 50.0,
            consecutive_overflow: 30.0,
            mixed_bonus: -5.0,
            play_load: 1.0,
            officiating_load: 0.5,
            level_gap: 0.2,
            jitter_span: 0.01,
        }
    }
}

/// The gender-role a player counts as for mixed-pairing purposes.
///
/// A female player at or above the configured strong-level threshold counts
/// as male when the strong-player rule is enabled; every other player keeps
/// their stated gender.
pub fn effective_role(player: &Player, settings: &Settings) -> Gender {
    if settings.strong_female_as_male
        && player.gender == Gender::Female
        && player.level >= settings.strong_level_threshold
    {
        Gender::Male
    } else {
        player.gender
    }
}

/// Whether two players form a mixed team under the gender-role rule.
pub fn is_mixed_pair(a: &Player, b: &Player, settings: &Settings) -> bool {
    effective_role(a, settings) != effective_role(b, settings)
}

fn level_of(roster: &HashMap<String, Player>, id: &str) -> u8 {
    roster.get(id).map(|p| p.level).unwrap_or(1)
}

/// Scores one candidate for the given slot. Lower is better.
pub fn candidate_cost(
    candidate: &MatchCandidate,
    slot_index: usize,
    ledger: &FairnessLedger,
    roster: &HashMap<String, Player>,
    settings: &Settings,
    weights: &CostWeights,
    rng: &mut impl Rng,
) -> f64 {
    let mut cost = 0.0;
    let t1 = &candidate.team1;
    let t2 = &candidate.team2;

    // Partner overflow.
    for team in [t1, t2] {
        let count = ledger.partner_count(&team[0], &team[1]) + 1;
        if count > settings.max_same_teammate {
            cost += weights.partner_overflow * (count - settings.max_same_teammate) as f64;
        }
    }

    // Opponent overflow across the four cross-team pairs.
    for a in t1 {
        for b in t2 {
            let count = ledger.opponent_count(a, b) + 1;
            if count > settings.max_same_opponent {
                cost += weights.opponent_overflow * (count - settings.max_same_opponent) as f64;
            }
        }
    }

    // Consecutive-play overflow.
    for id in candidate.playing() {
        if ledger.played_previous_slot(id, slot_index) {
            let streak = ledger.streak(id) + 1;
            if streak > settings.max_consecutive_plays {
                cost += weights.consecutive_overflow
                    * (streak - settings.max_consecutive_plays) as f64;
            }
        }
    }

    // Mixed-pairing bonus.
    if settings.prefer_mixed {
        for team in [t1, t2] {
            if let (Some(a), Some(b)) = (roster.get(&team[0]), roster.get(&team[1])) {
                if is_mixed_pair(a, b, settings) {
                    cost += weights.mixed_bonus;
                }
            }
        }
    }

    // Load spread after simulating this match.
    let playing = candidate.playing();
    cost += weights.play_load * ledger.play_spread_with(&playing) as f64;
    let officiating = candidate.officiating();
    cost += weights.officiating_load * ledger.officiating_spread_with(&officiating) as f64;

    // Skill balance between team level sums.
    let sum1 = level_of(roster, &t1[0]) as i32 + level_of(roster, &t1[1]) as i32;
    let sum2 = level_of(roster, &t2[0]) as i32 + level_of(roster, &t2[1]) as i32;
    cost += weights.level_gap * (sum1 - sum2).abs() as f64;

    // Deterministic tie-break jitter.
    cost += (rng.random::<f64>() - 0.5) * weights.jitter_span;

    cost
}
