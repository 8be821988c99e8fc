//! Schedule output model.
//!
//! A `Schedule` is the complete result of one generation run: one
//! `MatchAssignment` per filled slot×court cell, plus the slot-format flag.
//! It also carries the manual-override hook (`swap_players`) used by
//! editing frontends.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Player;

/// The three officiating roles of one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Officials {
    /// Chair umpire.
    pub umpire: Player,
    /// First line judge.
    pub line1: Player,
    /// Second line judge.
    pub line2: Player,
}

/// One scheduled match: a slot×court cell with teams and officials.
///
/// The five roles (two teams, three officials) are pairwise distinct
/// players; no player appears in two assignments of the same slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchAssignment {
    /// Court number, 1-based.
    pub court: u32,
    /// Slot index, 0-based chronological.
    pub slot_index: usize,
    /// Match start instant.
    pub start: NaiveDateTime,
    /// Match end instant.
    pub end: NaiveDateTime,
    /// The two teams, each an ordered pair of players.
    pub teams: [[Player; 2]; 2],
    /// Umpire and line judges.
    pub officials: Officials,
    /// True when no candidate within the hard fairness limits existed and
    /// this match was committed from the relaxed set.
    pub relaxed: bool,
}

impl MatchAssignment {
    /// The four playing players.
    pub fn playing(&self) -> impl Iterator<Item = &Player> {
        self.teams.iter().flatten()
    }

    /// The three officiating players.
    pub fn officiating(&self) -> [&Player; 3] {
        [
            &self.officials.umpire,
            &self.officials.line1,
            &self.officials.line2,
        ]
    }

    /// All seven involved players.
    pub fn participants(&self) -> impl Iterator<Item = &Player> {
        self.playing().chain(self.officiating())
    }
}

/// Identifies one seat in a produced schedule: a (slot, court, team, seat)
/// position holding a playing player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatRef {
    /// Slot index of the target match.
    pub slot_index: usize,
    /// Court number of the target match, 1-based.
    pub court: u32,
    /// Team side, 0 or 1.
    pub team: usize,
    /// Seat within the team, 0 or 1.
    pub seat: usize,
}

/// A complete generated schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Assignments ordered by slot, then court.
    pub matches: Vec<MatchAssignment>,
    /// Whether the short slot format was in effect.
    pub used_short: bool,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new(used_short: bool) -> Self {
        Self {
            matches: Vec::new(),
            used_short,
        }
    }

    /// Appends an assignment.
    pub fn push(&mut self, assignment: MatchAssignment) {
        self.matches.push(assignment);
    }

    /// Number of scheduled matches.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Whether nothing could be scheduled.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// All assignments in a slot.
    pub fn matches_for_slot(&self, slot_index: usize) -> Vec<&MatchAssignment> {
        self.matches
            .iter()
            .filter(|m| m.slot_index == slot_index)
            .collect()
    }

    /// The assignment at a given slot×court cell, if filled.
    pub fn match_at(&self, slot_index: usize, court: u32) -> Option<&MatchAssignment> {
        self.matches
            .iter()
            .find(|m| m.slot_index == slot_index && m.court == court)
    }

    /// Number of matches committed from the relaxed candidate set.
    pub fn relaxed_count(&self) -> usize {
        self.matches.iter().filter(|m| m.relaxed).count()
    }

    /// Exchanges the players seated at two cells.
    ///
    /// This is the manual-override hook: it mutates the already-produced
    /// assignment list and performs **no fairness revalidation** — a human
    /// making the swap is taken as an informed override. Use
    /// [`crate::validation::audit_schedule`] afterwards to re-check the
    /// fairness limits if desired.
    ///
    /// Returns `false` if either reference does not resolve to a seat.
    pub fn swap_players(&mut self, a: SeatRef, b: SeatRef) -> bool {
        if a.team > 1 || a.seat > 1 || b.team > 1 || b.seat > 1 {
            return false;
        }
        let find = |matches: &[MatchAssignment], r: SeatRef| {
            matches
                .iter()
                .position(|m| m.slot_index == r.slot_index && m.court == r.court)
        };
        let (Some(ia), Some(ib)) = (find(&self.matches, a), find(&self.matches, b)) else {
            return false;
        };
        if ia == ib && a.team == b.team && a.seat == b.seat {
            return true; // dropped onto itself
        }
        let pa = self.matches[ia].teams[a.team][a.seat].clone();
        let pb = self.matches[ib].teams[b.team][b.seat].clone();
        self.matches[ia].teams[a.team][a.seat] = pb;
        self.matches[ib].teams[b.team][b.seat] = pa;
        true
    }
}
