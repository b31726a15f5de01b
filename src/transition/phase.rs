//! Controller phases, input scope and per-view presentation state.

use crate::core::State;
use serde::{Deserialize, Serialize};

/// Where the view controller is.
///
/// `Overview` and `Zoom` are the settled phases; the two transitioning
/// phases only exist while an animation is suspended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum ViewPhase {
    Overview,
    TransitioningToZoom { view_id: String },
    Zoom { view_id: String },
    TransitioningToOverview { view_id: String },
}

impl State for ViewPhase {
    fn name(&self) -> &str {
        match self {
            Self::Overview => "Overview",
            Self::TransitioningToZoom { .. } => "TransitioningToZoom",
            Self::Zoom { .. } => "Zoom",
            Self::TransitioningToOverview { .. } => "TransitioningToOverview",
        }
    }
}

impl ViewPhase {
    pub fn zoom(view_id: impl Into<String>) -> Self {
        Self::Zoom {
            view_id: view_id.into(),
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Overview | Self::Zoom { .. })
    }

    pub fn is_transitioning(&self) -> bool {
        !self.is_settled()
    }

    /// The zoom view that is settled open, if any.
    pub fn active_zoom(&self) -> Option<&str> {
        match self {
            Self::Zoom { view_id } => Some(view_id),
            _ => None,
        }
    }
}

/// Which input the host should currently route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputScope {
    Disabled,
    Overview,
    Zoom(String),
}

/// Presentation state of one registered zoom view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomViewState {
    pub view_id: String,
    pub active: bool,
}
