//! Overview/zoom transitions and room navigation.

mod controller;
mod phase;
mod presenter;
mod room;

pub use controller::{DropReason, TransitionController, TransitionOutcome};
pub use phase::{InputScope, ViewPhase, ZoomViewState};
pub use presenter::{InstantPresenter, TimedPresenter, ViewPresenter};
pub use room::RoomSide;
