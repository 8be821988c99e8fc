//! The schedule generator.
//!
//! A constrained greedy search over slot×court cells:
//!
//! 1. **`ledger`** tracks fairness state for one run (pair counts, play and
//!    officiating loads, streaks).
//! 2. **`candidates`** enumerates feasible (teams, officials) proposals for
//!    a cell, classified strict (within hard limits) or relaxed.
//! 3. **`cost`** scores each proposal; lower is better, with a small
//!    seeded jitter for reproducible tie-breaking.
//! 4. **`scheduler`** drives the slot×court loop, committing the cheapest
//!    proposal per cell.
//!
//! The design is intentionally greedy per slot — no backtracking and no
//! global optimization pass.

mod candidates;
mod cost;
mod ledger;
mod scheduler;

pub use candidates::{slot_candidates, CandidateSet, MatchCandidate};
pub use cost::{candidate_cost, effective_role, is_mixed_pair, CostWeights};
pub use ledger::FairnessLedger;
pub use scheduler::{generate_schedule, ScheduleEngine};
