//! Falling-block puzzle engine.
//!
//! The engine owns the complete rule set: board state, the shape catalog and
//! rotation, collision validation, gravity timing, scoring, and the game-over
//! state machine. It performs no I/O and never reads the clock itself; hosts
//! pass [`std::time::Instant`] values in and persist scores through the
//! [`ScoreStore`] seam, which keeps every rule testable without sleeping.

pub use self::{core::*, engine::*};

mod core;
mod engine;
