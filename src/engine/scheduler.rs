//! Greedy slot×court scheduling driver.
//!
//! # Algorithm
//!
//! 1. Plan the slot sequence from the settings' time window.
//! 2. For each slot, for each court: enumerate candidates from the players
//!    not yet used this slot, score them, commit the cheapest.
//! 3. An empty candidate set skips the slot's remaining courts; there is no
//!    backtracking and a skipped cell is never retried.
//!
//! The whole run is a pure function over (roster, settings): no I/O, no
//! shared state beyond the run-scoped ledger, and all randomness comes from
//! one generator seeded by roster size, court count, and the reroll counter.

use std::collections::{HashMap, HashSet};

use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::{candidate_cost, slot_candidates, CostWeights, FairnessLedger, MatchCandidate};
use crate::models::{
    plan_slots, MatchAssignment, Officials, Player, Schedule, Settings, TimeSlot,
};

/// Minimum selected players for any match: four playing plus three officials.
const MIN_PARTICIPANTS: usize = 7;

/// The schedule generator, with configurable cost weights.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use matchplan::engine::ScheduleEngine;
/// use matchplan::models::{Player, Settings};
///
/// let players: Vec<Player> = (0..8)
///     .map(|i| Player::new(format!("p{i}"), format!("Player {i}")).with_level(4))
///     .collect();
/// let settings = Settings::new(NaiveDate::from_ymd_opt(2025, 3, 8).unwrap())
///     .with_window(
///         NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
///         NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
///     );
///
/// let schedule = ScheduleEngine::new().generate(&players, &settings);
/// assert!(!schedule.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleEngine {
    weights: CostWeights,
}

impl ScheduleEngine {
    /// Creates an engine with the default weights.
    pub fn new() -> Self {
        Self {
            weights: CostWeights::default(),
        }
    }

    /// Overrides the cost weights.
    pub fn with_weights(mut self, weights: CostWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Generates a schedule for the selected players.
    ///
    /// An empty schedule means insufficient players or time window; that is
    /// a normal outcome, not a failure.
    pub fn generate(&self, players: &[Player], settings: &Settings) -> Schedule {
        let roster: Vec<Player> = players.iter().filter(|p| p.selected).cloned().collect();
        let plan = plan_slots(settings, roster.len());
        let mut schedule = Schedule::new(plan.used_short);

        if roster.len() < MIN_PARTICIPANTS || plan.slots.is_empty() {
            debug!(
                "nothing to schedule: {} selected players, {} slots",
                roster.len(),
                plan.slots.len()
            );
            return schedule;
        }

        let courts = settings.courts.max(1);
        let mut rng = ChaCha8Rng::seed_from_u64(settings.seed(roster.len()));
        let ids: Vec<String> = roster.iter().map(|p| p.id.clone()).collect();
        let index: HashMap<String, Player> =
            roster.iter().map(|p| (p.id.clone(), p.clone())).collect();
        let mut ledger = FairnessLedger::new(ids.iter().map(String::as_str));

        for slot in &plan.slots {
            let mut used: HashSet<String> = HashSet::new();
            for court in 1..=courts {
                let set =
                    slot_candidates(slot.index, &ids, &used, &ledger, &index, settings, &mut rng);
                if set.candidates.is_empty() {
                    debug!(
                        "slot {} court {}: no feasible match, skipping remaining courts",
                        slot.index, court
                    );
                    break;
                }

                let mut best: Option<(f64, MatchCandidate)> = None;
                for cand in set.candidates {
                    let cost = candidate_cost(
                        &cand,
                        slot.index,
                        &ledger,
                        &index,
                        settings,
                        &self.weights,
                        &mut rng,
                    );
                    if best.as_ref().is_none_or(|(c, _)| cost < *c) {
                        best = Some((cost, cand));
                    }
                }
                let Some((cost, chosen)) = best else { break };

                ledger.commit(&chosen, slot.index);
                for id in chosen.playing().into_iter().chain(chosen.officiating()) {
                    used.insert(id.to_string());
                }
                debug!(
                    "slot {} court {}: committed at cost {:.3} (relaxed: {})",
                    slot.index,
                    court,
                    cost,
                    chosen.relaxed || set.pool_relaxed
                );
                let relaxed = chosen.relaxed || set.pool_relaxed;
                if let Some(assignment) = materialize(slot, court, &chosen, relaxed, &index) {
                    schedule.push(assignment);
                }
            }
        }

        schedule
    }
}

/// Resolves a committed candidate's ids into a displayable assignment.
fn materialize(
    slot: &TimeSlot,
    court: u32,
    candidate: &MatchCandidate,
    relaxed: bool,
    index: &HashMap<String, Player>,
) -> Option<MatchAssignment> {
    let p = |id: &str| index.get(id).cloned();
    Some(MatchAssignment {
        court,
        slot_index: slot.index,
        start: slot.start,
        end: slot.end,
        teams: [
            [p(&candidate.team1[0])?, p(&candidate.team1[1])?],
            [p(&candidate.team2[0])?, p(&candidate.team2[1])?],
        ],
        officials: Officials {
            umpire: p(&candidate.umpire)?,
            line1: p(&candidate.line1)?,
            line2: p(&candidate.line2)?,
        },
        relaxed,
    })
}

/// Generates a schedule with the default cost weights.
pub fn generate_schedule(players: &[Player], settings: &Settings) -> Schedule {
    ScheduleEngine::new().generate(players, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use chrono::{NaiveDate, NaiveTime};

    fn roster(n: usize) -> Vec<Player> {
        let names = [
            "Ann", "Ben", "Cam", "Dee", "Eli", "Fay", "Gus", "Ida", "Jo", "Kit", "Lou", "Max",
            "Nia", "Ole", "Pia", "Quin",
        ];
        (0..n)
            .map(|i| {
                let gender = if i % 3 == 2 { Gender::Female } else { Gender::Male };
                Player::new(format!("p{i}"), names[i % names.len()])
                    .with_gender(gender)
                    .with_level(3 + (i % 6) as u8)
            })
            .collect()
    }

    fn settings(minutes: u32) -> Settings {
        let start = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let end = start + chrono::Duration::minutes(minutes as i64);
        Settings::new(NaiveDate::from_ymd_opt(2025, 3, 8).unwrap()).with_window(start, end)
    }

    #[test]
    fn test_three_players_yield_nothing() {
        let schedule = generate_schedule(&roster(3), &settings(120));
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_four_players_yield_nothing() {
        // A match needs three officials on top of the four players.
        let schedule = generate_schedule(&roster(4), &settings(120));
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_unselected_players_ignored() {
        let mut players = roster(10);
        for p in players.iter_mut().skip(3) {
            p.selected = false;
        }
        let schedule = generate_schedule(&players, &settings(120));
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_zero_slot_window() {
        let schedule = generate_schedule(&roster(8), &settings(5));
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_eight_players_three_slots_unique_partners() {
        // Window fits exactly three 12-minute slots; teammate limit 1.
        let players = roster(8);
        let s = settings(36).with_limits(1, 2, 2);
        let schedule = generate_schedule(&players, &s);

        assert_eq!(schedule.match_count(), 3);
        assert_eq!(schedule.relaxed_count(), 0);
        let mut partner_counts: HashMap<(String, String), u32> = HashMap::new();
        for m in &schedule.matches {
            assert_eq!(m.court, 1);
            for team in &m.teams {
                let mut pair = [team[0].id.clone(), team[1].id.clone()];
                pair.sort();
                let [a, b] = pair;
                *partner_counts.entry((a, b)).or_insert(0) += 1;
            }
        }
        assert!(
            partner_counts.values().all(|&c| c <= 1),
            "a pair was teammates more than once: {partner_counts:?}"
        );
    }

    #[test]
    fn test_roles_distinct_within_each_match() {
        let schedule = generate_schedule(&roster(9), &settings(60));
        assert!(!schedule.is_empty());
        for m in &schedule.matches {
            let ids: HashSet<String> = m.participants().map(|p| p.id.clone()).collect();
            assert_eq!(ids.len(), 7);
        }
    }

    #[test]
    fn test_no_double_booking_across_courts() {
        // 14 players fill two courts per slot with nobody left over.
        let players = roster(14);
        let s = settings(24).with_courts(2);
        let schedule = generate_schedule(&players, &s);
        assert_eq!(schedule.match_count(), 4);

        for slot_index in [0, 1] {
            let mut seen: HashSet<String> = HashSet::new();
            for m in schedule.matches_for_slot(slot_index) {
                for p in m.participants() {
                    assert!(seen.insert(p.id.clone()), "{} double-booked in slot {slot_index}", p.id);
                }
            }
        }
    }

    #[test]
    fn test_consecutive_limit_respected_or_flagged() {
        let players = roster(8);
        let s = settings(96).with_limits(2, 4, 2); // eight slots
        let schedule = generate_schedule(&players, &s);
        assert!(schedule.match_count() >= 6);

        // Reconstruct per-slot playing sets.
        let mut played: HashMap<String, Vec<usize>> = HashMap::new();
        let mut relaxed_slots: HashSet<usize> = HashSet::new();
        for m in &schedule.matches {
            if m.relaxed {
                relaxed_slots.insert(m.slot_index);
            }
            for p in m.playing() {
                played.entry(p.id.clone()).or_default().push(m.slot_index);
            }
        }
        for (id, mut slots) in played {
            slots.sort_unstable();
            for w in slots.windows(3) {
                if w[0] + 1 == w[1] && w[1] + 1 == w[2] {
                    assert!(
                        relaxed_slots.contains(&w[2]),
                        "{id} played slots {w:?} without a flagged relaxation"
                    );
                }
            }
        }
    }

    #[test]
    fn test_short_format_flag() {
        // Nine players on one court exceed the threshold of 8.
        let players = roster(9);
        let s = settings(24);
        let schedule = generate_schedule(&players, &s);
        assert!(schedule.used_short);
        let m = &schedule.matches[0];
        assert_eq!((m.end - m.start).num_minutes(), 8);
    }

    #[test]
    fn test_deterministic_for_identical_inputs() {
        let players = roster(10);
        let s = settings(60).with_courts(1).with_reroll(4);
        let first = generate_schedule(&players, &s);
        let second = generate_schedule(&players, &s);
        assert_eq!(first, second);
    }

    #[test]
    fn test_reroll_changes_some_outcome() {
        let players = roster(10);
        let base = generate_schedule(&players, &settings(60));
        let changed = (1..=20).any(|reroll| {
            generate_schedule(&players, &settings(60).with_reroll(reroll)) != base
        });
        assert!(changed, "twenty rerolls never changed the schedule");
    }

    #[test]
    fn test_schedule_serde_round_trip() {
        let schedule = generate_schedule(&roster(8), &settings(36));
        let json = serde_json::to_string(&schedule).unwrap();
        let back: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(schedule, back);
    }

    #[test]
    fn test_custom_weights_still_schedule() {
        let engine = ScheduleEngine::new().with_weights(CostWeights {
            mixed_bonus: 0.0,
            level_gap: 1.0,
            ..CostWeights::default()
        });
        let schedule = engine.generate(&roster(8), &settings(36));
        assert_eq!(schedule.match_count(), 3);
    }
}
