//! Shared schema for a 2097-style robot fighting game: pad input masks,
//! fighter/projectile snapshots, the move catalog, pilot personality vectors
//! and the range oracle.
//!
//! This crate is pure data plus a handful of infallible oracles; the decision
//! engine that consumes it lives in `omf-ai`.

pub mod catalog;
pub mod pilot;
pub mod range;
pub mod schema;

pub use catalog::*;
pub use pilot::*;
pub use range::*;
pub use schema::*;
