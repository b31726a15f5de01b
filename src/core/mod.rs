//! Core machine primitives.
//!
//! This module contains the pieces every component builds on:
//! - State definitions via the `State` trait
//! - Guard predicates for gating decisions
//! - Immutable, timestamped history of settled changes
//!
//! Nothing in here performs side effects.

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::State;
