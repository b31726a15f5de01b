//! Topics and payloads carried by the event channel.

use serde::{Deserialize, Serialize};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Topic {
    PuzzleSolved,
    PuzzleAttemptFailed,
    ZoomEnter,
    ZoomExit,
    Interact,
    HoverEnter,
    HoverExit,
    GameComplete,
    GameStart,
}

impl Topic {
    pub const ALL: [Topic; 9] = [
        Topic::PuzzleSolved,
        Topic::PuzzleAttemptFailed,
        Topic::ZoomEnter,
        Topic::ZoomExit,
        Topic::Interact,
        Topic::HoverEnter,
        Topic::HoverExit,
        Topic::GameComplete,
        Topic::GameStart,
    ];
}

/// Everything the core tells the presentation layer.
///
/// This is the only outward interface of the crate: renderers, audio and
/// cursor collaborators subscribe to these and never touch core state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    PuzzleSolved { puzzle_id: String },
    PuzzleAttemptFailed { puzzle_id: String },
    /// Request to open a zoom view.
    ZoomEnter { view_id: String },
    /// Request to return to the overview.
    ZoomExit,
    Interact { interactable_id: String },
    HoverEnter { interactable_id: String },
    HoverExit { interactable_id: String },
    GameComplete,
    GameStart,
}

impl GameEvent {
    pub fn topic(&self) -> Topic {
        match self {
            GameEvent::PuzzleSolved { .. } => Topic::PuzzleSolved,
            GameEvent::PuzzleAttemptFailed { .. } => Topic::PuzzleAttemptFailed,
            GameEvent::ZoomEnter { .. } => Topic::ZoomEnter,
            GameEvent::ZoomExit => Topic::ZoomExit,
            GameEvent::Interact { .. } => Topic::Interact,
            GameEvent::HoverEnter { .. } => Topic::HoverEnter,
            GameEvent::HoverExit { .. } => Topic::HoverExit,
            GameEvent::GameComplete => Topic::GameComplete,
            GameEvent::GameStart => Topic::GameStart,
        }
    }

    pub fn puzzle_solved(puzzle_id: impl Into<String>) -> Self {
        GameEvent::PuzzleSolved {
            puzzle_id: puzzle_id.into(),
        }
    }

    pub fn puzzle_attempt_failed(puzzle_id: impl Into<String>) -> Self {
        GameEvent::PuzzleAttemptFailed {
            puzzle_id: puzzle_id.into(),
        }
    }

    pub fn zoom_enter(view_id: impl Into<String>) -> Self {
        GameEvent::ZoomEnter {
            view_id: view_id.into(),
        }
    }

    pub fn interact(interactable_id: impl Into<String>) -> Self {
        GameEvent::Interact {
            interactable_id: interactable_id.into(),
        }
    }

    pub fn hover_enter(interactable_id: impl Into<String>) -> Self {
        GameEvent::HoverEnter {
            interactable_id: interactable_id.into(),
        }
    }

    pub fn hover_exit(interactable_id: impl Into<String>) -> Self {
        GameEvent::HoverExit {
            interactable_id: interactable_id.into(),
        }
    }
}
