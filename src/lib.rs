//! Puzzleroom: the interactive core of a single-room puzzle game
//!
//! Independent puzzle state machines feed a shared progress ledger; gated
//! interactables unlock on other puzzles' outcomes; a transition controller
//! moves the player between the room overview and focused zoom views. All
//! outward communication goes through a session-owned event channel.
//!
//! # Core Concepts
//!
//! - **Session**: `SessionContext` owns the event channel, progress ledger and
//!   inventory for one play-through. Nothing is global.
//! - **Puzzles**: each puzzle embeds a `PuzzleCore` whose unsolved → solved
//!   lifecycle runs the solve protocol at most once.
//! - **Gates**: `GateSpec` conditions are evaluated together and every
//!   denial is reported.
//! - **Transitions**: one overview/zoom transition in flight at a time;
//!   requests arriving mid-transition are dropped.
//!
//! # Example
//!
//! ```rust
//! use puzzleroom::events::{EventRecorder, GameEvent};
//! use puzzleroom::puzzles::{CodePanelPuzzle, Puzzle, PuzzleDefinition};
//! use puzzleroom::session::SessionContext;
//! use std::time::Duration;
//!
//! let mut session = SessionContext::default();
//! let recorder = EventRecorder::all(session.events());
//!
//! for (key, value) in [("digit_0", 3), ("digit_1", 7), ("digit_2", 1), ("digit_3", 5)] {
//!     session.progress_mut().reveal_digit(key, value);
//! }
//! assert_eq!(session.progress().get_code(), [3, 7, 1, 5]);
//!
//! let mut panel = CodePanelPuzzle::new(
//!     PuzzleDefinition::new("code_panel"),
//!     Duration::from_millis(700),
//! );
//! for digit in [3, 7, 1, 5] {
//!     panel.enter_digit(digit);
//! }
//! panel.submit(&mut session);
//!
//! assert!(panel.is_solved());
//! assert_eq!(recorder.events(), vec![GameEvent::puzzle_solved("code_panel")]);
//! ```

#[macro_use]
mod macros;

pub mod config;
pub mod content;
pub mod core;
pub mod error;
pub mod events;
pub mod interaction;
pub mod logging;
pub mod progress;
pub mod puzzles;
pub mod session;
pub mod transition;

// Re-export commonly used types
pub use config::SessionConfig;
pub use core::{Guard, State, StateHistory, StateTransition};
pub use error::{CatalogError, ConfigError};
pub use events::{EventChannel, GameEvent, Topic};
pub use progress::ProgressManager;
pub use session::SessionContext;
