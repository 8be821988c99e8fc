//! Doubles tournament scheduling engine.
//!
//! Assigns players to fixed-length time slots across a fixed number of
//! courts, producing for every slot×court two teams of two players plus
//! three officiating roles (umpire, two line judges). Hard fairness limits
//! (repeat teammates, repeat opponents, consecutive plays) are enforced via
//! a two-tier strict/relaxed candidate search; soft criteria (mixed pairing,
//! skill balance, load spread) are optimized by a weighted cost function
//! with deterministic seeded tie-breaking.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Player`, `Settings`, `TimeSlot`,
//!   `MatchAssignment`, `Schedule`
//! - **`engine`**: The generator — fairness ledger, candidate enumeration,
//!   cost evaluation, slot×court driver
//! - **`validation`**: Roster/settings integrity checks and post-hoc
//!   schedule audits
//! - **`export`**: CSV serialization of a produced schedule
//!
//! # Determinism
//!
//! Given an identical roster, settings, and reroll counter, generation is
//! bit-for-bit reproducible: all randomness flows through one seeded
//! generator scoped to the run. Incrementing the reroll counter changes
//! tie-break outcomes without touching hard constraints.

pub mod engine;
pub mod export;
pub mod models;
pub mod validation;

pub use engine::generate_schedule;
