//! Fairness ledger: mutable per-player and per-pair counters for one run.
//!
//! The ledger is exclusively owned by a single scheduling run and dropped
//! with it. Counts only increase, and only through [`FairnessLedger::commit`],
//! exactly once per committed match per relevant pair/player.

use std::collections::HashMap;

use super::MatchCandidate;

/// Unordered pair key: the two ids in lexicographic order.
fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// The four cross-team player pairs of a match.
fn cross_pairs(team1: &[String; 2], team2: &[String; 2]) -> [(String, String); 4] {
    [
        pair_key(&team1[0], &team2[0]),
        pair_key(&team1[0], &team2[1]),
        pair_key(&team1[1], &team2[0]),
        pair_key(&team1[1], &team2[1]),
    ]
}

/// Fairness state for one scheduling run.
#[derive(Debug, Clone)]
pub struct FairnessLedger {
    partner_counts: HashMap<(String, String), u32>,
    opponent_counts: HashMap<(String, String), u32>,
    play_counts: HashMap<String, u32>,
    officiating_counts: HashMap<String, u32>,
    streaks: HashMap<String, u32>,
    last_played: HashMap<String, Option<usize>>,
}

impl FairnessLedger {
    /// Creates a fresh ledger covering the given player ids.
    pub fn new<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mut play_counts = HashMap::new();
        let mut officiating_counts = HashMap::new();
        let mut streaks = HashMap::new();
        let mut last_played = HashMap::new();
        for id in ids {
            play_counts.insert(id.to_string(), 0);
            officiating_counts.insert(id.to_string(), 0);
            streaks.insert(id.to_string(), 0);
            last_played.insert(id.to_string(), None);
        }
        Self {
            partner_counts: HashMap::new(),
            opponent_counts: HashMap::new(),
            play_counts,
            officiating_counts,
            streaks,
            last_played,
        }
    }

    /// Times the two players have been teammates.
    pub fn partner_count(&self, a: &str, b: &str) -> u32 {
        self.partner_counts.get(&pair_key(a, b)).copied().unwrap_or(0)
    }

    /// Times the two players have faced each other.
    pub fn opponent_count(&self, a: &str, b: &str) -> u32 {
        self.opponent_counts.get(&pair_key(a, b)).copied().unwrap_or(0)
    }

    /// Matches played so far.
    pub fn play_count(&self, id: &str) -> u32 {
        self.play_counts.get(id).copied().unwrap_or(0)
    }

    /// Matches officiated so far.
    pub fn officiating_count(&self, id: &str) -> u32 {
        self.officiating_counts.get(id).copied().unwrap_or(0)
    }

    /// Current consecutive-play streak.
    pub fn streak(&self, id: &str) -> u32 {
        self.streaks.get(id).copied().unwrap_or(0)
    }

    /// Whether the player competed in the slot immediately before `slot_index`.
    pub fn played_previous_slot(&self, id: &str, slot_index: usize) -> bool {
        match self.last_played.get(id) {
            Some(&Some(last)) => last + 1 == slot_index,
            _ => false,
        }
    }

    /// Whether the player may compete in `slot_index` under the
    /// consecutive-play limit.
    pub fn is_playable(&self, id: &str, slot_index: usize, max_consecutive: u32) -> bool {
        !(self.played_previous_slot(id, slot_index) && self.streak(id) >= max_consecutive)
    }

    /// Whether committing these teams would push any partner or opponent
    /// pair past its hard limit.
    pub fn would_exceed_limits(
        &self,
        team1: &[String; 2],
        team2: &[String; 2],
        max_teammate: u32,
        max_opponent: u32,
    ) -> bool {
        if self.partner_count(&team1[0], &team1[1]) + 1 > max_teammate
            || self.partner_count(&team2[0], &team2[1]) + 1 > max_teammate
        {
            return true;
        }
        cross_pairs(team1, team2)
            .iter()
            .any(|k| self.opponent_counts.get(k).copied().unwrap_or(0) + 1 > max_opponent)
    }

    /// Play-count spread (max − min) after simulating one more match for
    /// each id in `playing`, across every tracked player.
    pub fn play_spread_with(&self, playing: &[&str]) -> u32 {
        Self::spread_with(&self.play_counts, playing)
    }

    /// Officiating-count spread after simulating one more duty for each id
    /// in `officiating`.
    pub fn officiating_spread_with(&self, officiating: &[&str]) -> u32 {
        Self::spread_with(&self.officiating_counts, officiating)
    }

    fn spread_with(counts: &HashMap<String, u32>, bumped: &[&str]) -> u32 {
        let mut min = u32::MAX;
        let mut max = 0;
        for (id, &count) in counts {
            let v = if bumped.contains(&id.as_str()) {
                count + 1
            } else {
                count
            };
            min = min.min(v);
            max = max.max(v);
        }
        if min == u32::MAX {
            0
        } else {
            max - min
        }
    }

    /// Records a committed match: pair counts, play/officiating totals,
    /// streaks, and last-played slots. Not reversible within a run.
    pub fn commit(&mut self, candidate: &MatchCandidate, slot_index: usize) {
        let k1 = pair_key(&candidate.team1[0], &candidate.team1[1]);
        let k2 = pair_key(&candidate.team2[0], &candidate.team2[1]);
        *self.partner_counts.entry(k1).or_insert(0) += 1;
        *self.partner_counts.entry(k2).or_insert(0) += 1;
        for k in cross_pairs(&candidate.team1, &candidate.team2) {
            *self.opponent_counts.entry(k).or_insert(0) += 1;
        }
        for id in candidate.playing() {
            let continued = self.played_previous_slot(id, slot_index);
            let streak = self.streaks.entry(id.to_string()).or_insert(0);
            *streak = if continued { *streak + 1 } else { 1 };
            self.last_played.insert(id.to_string(), Some(slot_index));
            *self.play_counts.entry(id.to_string()).or_insert(0) += 1;
        }
        for id in candidate.officiating() {
            *self.officiating_counts.entry(id.to_string()).or_insert(0) += 1;
        }
    }
}
