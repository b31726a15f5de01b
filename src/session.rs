//! Per-session context.
//!
//! One `SessionContext` is built at session start and passed by reference to
//! every component that needs the event channel, the progress ledger or the
//! inventory. There is no global lookup anywhere in the crate.

use crate::config::SessionConfig;
use crate::events::{EventChannel, GameEvent};
use crate::interaction::Inventory;
use crate::progress::ProgressManager;
use tracing::{info, info_span, Span};
use uuid::Uuid;

#[derive(Debug)]
pub struct SessionContext {
    id: Uuid,
    config: SessionConfig,
    events: EventChannel,
    progress: ProgressManager,
    inventory: Inventory,
    started: bool,
}

impl SessionContext {
    pub fn new(config: SessionConfig) -> Self {
        let events = EventChannel::new();
        let progress = ProgressManager::with_digits_required(events.clone(), config.digits_required);
        Self {
            id: Uuid::new_v4(),
            config,
            events,
            progress,
            inventory: Inventory::default(),
            started: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn events(&self) -> &EventChannel {
        &self.events
    }

    pub fn progress(&self) -> &ProgressManager {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut ProgressManager {
        &mut self.progress
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// Span carrying the session id, for hosts to enter around input
    /// handling.
    pub fn span(&self) -> Span {
        info_span!("session", id = %self.id)
    }

    /// Publish `GameStart`. Only the first call has any effect.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        info!(session = %self.id, "Game started");
        self.events.publish(GameEvent::GameStart);
        true
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Explicit full reset of progress and inventory. Subscriptions are kept.
    pub fn reset(&mut self) {
        self.progress.reset();
        self.inventory.clear();
    }

    /// Drop every event subscription at the end of the session.
    pub fn teardown(&self) {
        self.events.clear_all();
        info!(session = %self.id, "Session torn down");
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
