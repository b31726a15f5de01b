//! Timestamped history of settled state changes.
//!
//! The transition controller records every completed view change here so
//! hosts and tests can audit the sequence of settled states.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single settled state change.
///
/// # Example
///
/// ```rust
/// use puzzleroom::core::StateTransition;
/// use puzzleroom::transition::RoomSide;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: RoomSide::Main,
///     to: RoomSide::Right,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.to, RoomSide::Right);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being left
    pub from: S,
    /// The state being entered
    pub to: S,
    /// When the change settled
    pub timestamp: DateTime<Utc>,
}

impl<S: State> StateTransition<S> {
    /// Record a change that settles now.
    pub fn now(from: S, to: S) -> Self {
        Self {
            from,
            to,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered history of state changes.
///
/// `record` returns a new history rather than mutating the existing one.
///
/// # Example
///
/// ```rust
/// use puzzleroom::core::{StateHistory, StateTransition};
/// use puzzleroom::transition::RoomSide;
///
/// let history = StateHistory::new()
///     .record(StateTransition::now(RoomSide::Main, RoomSide::Right))
///     .record(StateTransition::now(RoomSide::Right, RoomSide::Left));
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&RoomSide::Main, &RoomSide::Right, &RoomSide::Left]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the first transition followed by the `to`
    /// state of every transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded change.
    ///
    /// Returns `None` when nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// The most recent change, if any.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    /// All transitions in recording order.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
