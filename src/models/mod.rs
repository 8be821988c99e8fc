//! Domain models for doubles tournament scheduling.
//!
//! - **`player`**: `Player`, `Gender`, skill level range
//! - **`settings`**: `Settings` — courts, time window, hard fairness limits
//! - **`slot`**: `TimeSlot` planning from a date and time window
//! - **`assignment`**: `MatchAssignment`, `Schedule`, manual seat swaps

mod assignment;
mod player;
mod settings;
mod slot;

pub use assignment::{MatchAssignment, Officials, Schedule, SeatRef};
pub use player::{clamp_level, Gender, Player, LEVEL_MAX, LEVEL_MIN};
pub use settings::Settings;
pub use slot::{plan_slots, SlotPlan, TimeSlot};
