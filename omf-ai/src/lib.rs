//! Personality-driven computer opponent for a 2097-style robot fighting game.
//!
//! The engine is a hierarchical, event-reactive tactical planner. Each
//! simulation tick the fighter engine calls [`AiController::poll`] with a
//! [`omf_core::FighterView`] snapshot and receives zero or more pad
//! [`omf_core::Action`]s; combat events are fed back through
//! [`AiController::on_event`]. Internally the controller layers:
//!
//! - skill gates ([`gates`]) that bias every stochastic decision by the 1..=6
//!   difficulty level,
//! - a per-move learning table ([`stats`]) scoring what has hit, been blocked
//!   and from how far,
//! - a tactic vocabulary ([`tactics`]) compiled into a movement phase plus an
//!   attack phase,
//! - an event reactor ([`events`]) that cancels or suggests tactics and
//!   permanently reshapes the pilot personality when the opponent keeps
//!   landing throws or projectiles,
//! - a per-tick executor ([`executor`]) that drains command strings, runs
//!   tactic phases and falls back to ambient movement.
//!
//! All randomness flows through an injectable seeded generator so fights are
//! reproducible in tests.

pub mod controller;
pub mod events;
pub mod executor;
pub mod gates;
pub mod inputs;
pub mod picker;
pub mod stats;
pub mod tactics;
pub mod tuning;

#[cfg(test)]
pub(crate) mod test_support;

pub use controller::AiController;
pub use stats::{MoveMemory, MoveStat};
pub use tactics::{AttackPhase, AttackTrigger, MovePhase, Tactic, TacticState};
pub use tuning::AiTuning;
