//! Presentation seam driven by the transition controller.

use super::phase::InputScope;
use super::room::RoomSide;
use crate::config::SessionConfig;
use async_trait::async_trait;
use std::time::Duration;

/// Animation and visibility hooks.
///
/// The two fades are the only suspension points of a transition. The
/// visibility and input hooks are plain notifications and default to doing
/// nothing.
#[async_trait]
pub trait ViewPresenter: Send + Sync {
    async fn fade_out(&self);

    async fn fade_in(&self);

    fn set_overview_visible(&self, _visible: bool) {}

    fn set_zoom_view_visible(&self, _view_id: &str, _visible: bool) {}

    fn set_input(&self, _scope: &InputScope) {}

    fn show_room_side(&self, _side: RoomSide) {}
}

/// Fades that simply wait out a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct TimedPresenter {
    duration: Duration,
}

impl TimedPresenter {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Fade length taken from `transition_duration_ms`.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.transition_duration())
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

#[async_trait]
impl ViewPresenter for TimedPresenter {
    async fn fade_out(&self) {
        tokio::time::sleep(self.duration).await;
    }

    async fn fade_in(&self) {
        tokio::time::sleep(self.duration).await;
    }
}

/// Fades that complete on the first poll. For headless hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPresenter;

#[async_trait]
impl ViewPresenter for InstantPresenter {
    async fn fade_out(&self) {}

    async fn fade_in(&self) {}
}
