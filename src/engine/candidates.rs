//! Candidate enumeration for one slot×court cell.
//!
//! Exhaustive enumeration over the whole roster is infeasible, so the pool
//! is truncated to a bounded top-N by need (lowest play count first) with a
//! seeded partial shuffle, team splits are pre-ranked by a cheap pairing
//! heuristic, and officiating triples come from a sliding window over the
//! least-loaded officials. Candidates are classified strict or relaxed
//! against the hard pair limits; the relaxed tier is only surfaced when the
//! strict tier is empty, so a court is never left unused merely because of
//! a fairness limit.

use std::collections::{HashMap, HashSet};

use rand::Rng;

use super::{is_mixed_pair, FairnessLedger};
use crate::models::{Player, Settings};

/// Pool size cap for the combinatorial search.
const POOL_LIMIT: usize = 8;

/// Max officiating triples considered per team split.
const OFFICIATING_WINDOWS: usize = 6;

/// A fully formed match proposal: two teams plus three officials, by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCandidate {
    /// First team pair.
    pub team1: [String; 2],
    /// Second team pair.
    pub team2: [String; 2],
    /// Chair umpire.
    pub umpire: String,
    /// First line judge.
    pub line1: String,
    /// Second line judge.
    pub line2: String,
    /// True when this proposal exceeds a hard pair limit.
    pub relaxed: bool,
}

impl MatchCandidate {
    /// The four playing ids.
    pub fn playing(&self) -> [&str; 4] {
        [&self.team1[0], &self.team1[1], &self.team2[0], &self.team2[1]]
    }

    /// The three officiating ids.
    pub fn officiating(&self) -> [&str; 3] {
        [&self.umpire, &self.line1, &self.line2]
    }
}

/// Result of candidate enumeration for one cell.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    /// Feasible candidates, unordered; selection is the evaluator's job.
    pub candidates: Vec<MatchCandidate>,
    /// True when fewer than four players satisfied the consecutive-play
    /// rule and the pool fell back to all not-yet-used players.
    pub pool_relaxed: bool,
}

/// Enumerates match candidates for `slot_index` from players not yet used
/// in this slot.
///
/// An empty set means the cell cannot be filled; the driver skips the
/// remaining courts of the slot in that case.
pub fn slot_candidates(
    slot_index: usize,
    roster_ids: &[String],
    used: &HashSet<String>,
    ledger: &FairnessLedger,
    roster: &HashMap<String, Player>,
    settings: &Settings,
    rng: &mut impl Rng,
) -> CandidateSet {
    let pool = playing_pool(slot_index, roster_ids, used, ledger, settings, rng);
    let mut strict = Vec::new();
    let mut soft = Vec::new();

    for four in combinations_of_four(&pool.ids) {
        for (team1, team2) in ranked_splits(&four, ledger, roster, settings, rng) {
            let playing: HashSet<&str> = HashSet::from([
                team1[0].as_str(),
                team1[1].as_str(),
                team2[0].as_str(),
                team2[1].as_str(),
            ]);
            let rest: Vec<String> = roster_ids
                .iter()
                .filter(|id| !playing.contains(id.as_str()) && !used.contains(*id))
                .cloned()
                .collect();

            let within_limits = !ledger.would_exceed_limits(
                &team1,
                &team2,
                settings.max_same_teammate,
                settings.max_same_opponent,
            );

            for trio in officiating_triples(&rest, ledger) {
                let candidate = MatchCandidate {
                    team1: team1.clone(),
                    team2: team2.clone(),
                    umpire: trio[0].clone(),
                    line1: trio[1].clone(),
                    line2: trio[2].clone(),
                    relaxed: !within_limits,
                };
                if within_limits {
                    strict.push(candidate);
                } else {
                    soft.push(candidate);
                }
            }
        }
    }

    CandidateSet {
        candidates: if strict.is_empty() { soft } else { strict },
        pool_relaxed: pool.relaxed,
    }
}

struct PlayingPool {
    ids: Vec<String>,
    relaxed: bool,
}

/// Builds the truncated playing pool for a cell.
///
/// Players already used this slot are never eligible. The consecutive-play
/// rule is dropped only when it leaves fewer than four candidates, so a
/// slot is not wasted just to protect a rest break.
fn playing_pool(
    slot_index: usize,
    roster_ids: &[String],
    used: &HashSet<String>,
    ledger: &FairnessLedger,
    settings: &Settings,
    rng: &mut impl Rng,
) -> PlayingPool {
    let mut ids: Vec<String> = roster_ids
        .iter()
        .filter(|id| {
            !used.contains(*id)
                && ledger.is_playable(id, slot_index, settings.max_consecutive_plays)
        })
        .cloned()
        .collect();

    let relaxed = ids.len() < 4;
    if relaxed {
        ids = roster_ids
            .iter()
            .filter(|id| !used.contains(*id))
            .cloned()
            .collect();
    }

    // Most-rested first; stable sort keeps roster order on ties.
    ids.sort_by_key(|id| (ledger.play_count(id), ledger.streak(id)));

    if ids.len() > 1 {
        // Partial Fisher–Yates over the leading entries, then truncate.
        let top = ids.len().min(POOL_LIMIT);
        for i in (1..top).rev() {
            let j = rng.random_range(0..=i);
            ids.swap(i, j);
        }
        ids.truncate(top);
    }

    PlayingPool { ids, relaxed }
}

fn combinations_of_four(pool: &[String]) -> Vec<[String; 4]> {
    let mut combos = Vec::new();
    for i in 0..pool.len() {
        for j in i + 1..pool.len() {
            for k in j + 1..pool.len() {
                for l in k + 1..pool.len() {
                    combos.push([
                        pool[i].clone(),
                        pool[j].clone(),
                        pool[k].clone(),
                        pool[l].clone(),
                    ]);
                }
            }
        }
    }
    combos
}

/// The three team splits of a four-player group, cheapest-looking first.
///
/// Ranking biases exploration toward promising splits without pruning any:
/// mixed teams score −2 each when preferred, and known partner/opponent
/// rematches add their counts.
fn ranked_splits(
    four: &[String; 4],
    ledger: &FairnessLedger,
    roster: &HashMap<String, Player>,
    settings: &Settings,
    rng: &mut impl Rng,
) -> Vec<([String; 2], [String; 2])> {
    let [a, b, c, d] = four;
    let splits = [
        ([a.clone(), b.clone()], [c.clone(), d.clone()]),
        ([a.clone(), c.clone()], [b.clone(), d.clone()]),
        ([a.clone(), d.clone()], [b.clone(), c.clone()]),
    ];

    let mut scored: Vec<(i64, f64, ([String; 2], [String; 2]))> = splits
        .into_iter()
        .map(|(t1, t2)| {
            let score = split_score(&t1, &t2, ledger, roster, settings);
            (score, rng.random::<f64>(), (t1, t2))
        })
        .collect();
    scored.sort_by(|x, y| {
        x.0.cmp(&y.0)
            .then(x.1.partial_cmp(&y.1).unwrap_or(std::cmp::Ordering::Equal))
    });
    scored.into_iter().map(|(_, _, split)| split).collect()
}

fn split_score(
    team1: &[String; 2],
    team2: &[String; 2],
    ledger: &FairnessLedger,
    roster: &HashMap<String, Player>,
    settings: &Settings,
) -> i64 {
    let mut score = 0i64;
    if settings.prefer_mixed {
        for team in [team1, team2] {
            if let (Some(a), Some(b)) = (roster.get(&team[0]), roster.get(&team[1])) {
                if is_mixed_pair(a, b, settings) {
                    score -= 2;
                }
            }
        }
    }
    score += ledger.partner_count(&team1[0], &team1[1]) as i64;
    score += ledger.partner_count(&team2[0], &team2[1]) as i64;
    for a in team1 {
        for b in team2 {
            score += ledger.opponent_count(a, b) as i64;
        }
    }
    score
}

/// Officiating triples from the non-playing remainder: a sliding window of
/// three over the officials ranked by ascending officiating count, capped
/// to bound the blow-up while still favoring the least-loaded people.
fn officiating_triples(rest: &[String], ledger: &FairnessLedger) -> Vec<[String; 3]> {
    let mut ranked = rest.to_vec();
    ranked.sort_by_key(|id| ledger.officiating_count(id));

    let mut triples = Vec::new();
    let mut i = 0;
    while i + 3 <= ranked.len() && triples.len() < OFFICIATING_WINDOWS {
        triples.push([
            ranked[i].clone(),
            ranked[i + 1].clone(),
            ranked[i + 2].clone(),
        ]);
        i += 1;
    }
    triples
}
