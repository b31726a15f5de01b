//! Clickable entities whose action is permitted only when their gate passes.

use super::gate::{GateDenial, GateSpec};
use crate::events::GameEvent;
use crate::session::SessionContext;
use std::fmt;
use stillwater::validation::Validation;
use tracing::debug;

/// Action bound to an interactable, run after `Interact` is published.
pub type InteractAction = Box<dyn FnMut(&mut SessionContext) + Send>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteractOutcome {
    Acted,
    Blocked(Vec<GateDenial>),
}

impl InteractOutcome {
    pub fn is_acted(&self) -> bool {
        matches!(self, Self::Acted)
    }
}

pub struct GatedInteractable {
    id: String,
    gate: GateSpec,
    used_once: bool,
    hovered: bool,
    action: Option<InteractAction>,
}

impl GatedInteractable {
    pub fn new(id: impl Into<String>, gate: GateSpec) -> Self {
        Self {
            id: id.into(),
            gate,
            used_once: false,
            hovered: false,
            action: None,
        }
    }

    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: FnMut(&mut SessionContext) + Send + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn gate(&self) -> &GateSpec {
        &self.gate
    }

    pub fn can_act(&self, session: &SessionContext) -> bool {
        self.gate.evaluate(self.used_once, session).is_success()
    }

    /// Every reason the interactable is currently blocked. Empty when it can
    /// act.
    pub fn denials(&self, session: &SessionContext) -> Vec<GateDenial> {
        match self.gate.evaluate(self.used_once, session) {
            Validation::Success(()) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }

    /// Click. When permitted: consume a one-time use, publish `Interact`,
    /// then run the bound action. When blocked nothing changes and nothing is
    /// published.
    pub fn interact(&mut self, session: &mut SessionContext) -> InteractOutcome {
        let denials = self.denials(session);
        if !denials.is_empty() {
            debug!(interactable = %self.id, ?denials, "Interaction blocked");
            return InteractOutcome::Blocked(denials);
        }

        if self.gate.is_one_time_use() {
            self.used_once = true;
        }
        session.events().publish(GameEvent::interact(self.id.clone()));
        if let Some(action) = self.action.as_mut() {
            action(session);
        }
        InteractOutcome::Acted
    }

    /// Pointer entered. Published regardless of the gate.
    pub fn hover_enter(&mut self, session: &SessionContext) {
        self.hovered = true;
        session.events().publish(GameEvent::hover_enter(self.id.clone()));
    }

    /// Pointer left. Published regardless of the gate.
    pub fn hover_exit(&mut self, session: &SessionContext) {
        self.hovered = false;
        session.events().publish(GameEvent::hover_exit(self.id.clone()));
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn has_been_used(&self) -> bool {
        self.used_once
    }
}

impl fmt::Debug for GatedInteractable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatedInteractable")
            .field("id", &self.id)
            .field("gate", &self.gate)
            .field("used_once", &self.used_once)
            .field("hovered", &self.hovered)
            .field("action", &self.action.is_some())
            .finish()
    }
}
