//! Preconditions on interactive entities.
//!
//! Evaluation accumulates every reason an interaction is blocked instead of
//! stopping at the first one, so a host can show all of them at once.

use crate::core::Guard;
use crate::progress::ProgressManager;
use crate::session::SessionContext;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Why an interaction was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GateDenial {
    #[error("One-time interactable has already been used")]
    AlreadyUsed,

    #[error("Requires puzzle '{puzzle_id}' to be solved")]
    PuzzleUnsolved { puzzle_id: String },

    #[error("Requires item '{item_id}'")]
    MissingItem { item_id: String },

    #[error("Custom check failed: {message}")]
    CustomCheckFailed { message: String },
}

pub type GateResult = Validation<(), NonEmptyVec<GateDenial>>;

/// Declarative gate configuration for a [`GatedInteractable`].
///
/// [`GatedInteractable`]: super::GatedInteractable
#[derive(Clone, Debug, Default)]
pub struct GateSpec {
    one_time_use: bool,
    required_puzzle_id: Option<String>,
    required_item: Option<String>,
    checks: Vec<(Guard<ProgressManager>, String)>,
}

impl GateSpec {
    /// A gate that never blocks.
    pub fn open() -> Self {
        Self::default()
    }

    pub fn one_time_use(mut self) -> Self {
        self.one_time_use = true;
        self
    }

    /// Require a solved puzzle. An empty id means no requirement.
    pub fn requires_puzzle(mut self, puzzle_id: impl Into<String>) -> Self {
        let puzzle_id = puzzle_id.into();
        self.required_puzzle_id = (!puzzle_id.is_empty()).then_some(puzzle_id);
        self
    }

    /// Require an inventory item. An empty id means no requirement.
    pub fn requires_item(mut self, item_id: impl Into<String>) -> Self {
        let item_id = item_id.into();
        self.required_item = (!item_id.is_empty()).then_some(item_id);
        self
    }

    /// Add a predicate over progress; `message` is reported when it fails.
    pub fn when(mut self, guard: Guard<ProgressManager>, message: impl Into<String>) -> Self {
        self.checks.push((guard, message.into()));
        self
    }

    pub fn is_one_time_use(&self) -> bool {
        self.one_time_use
    }

    pub fn required_puzzle_id(&self) -> Option<&str> {
        self.required_puzzle_id.as_deref()
    }

    pub fn required_item(&self) -> Option<&str> {
        self.required_item.as_deref()
    }

    /// Check every condition, collecting all denials.
    pub fn evaluate(&self, used_once: bool, session: &SessionContext) -> GateResult {
        let mut checks: Vec<GateResult> = Vec::new();

        if self.one_time_use {
            checks.push(if used_once {
                Validation::fail(GateDenial::AlreadyUsed)
            } else {
                Validation::success(())
            });
        }

        if let Some(puzzle_id) = &self.required_puzzle_id {
            checks.push(if session.progress().is_puzzle_solved(puzzle_id) {
                Validation::success(())
            } else {
                Validation::fail(GateDenial::PuzzleUnsolved {
                    puzzle_id: puzzle_id.clone(),
                })
            });
        }

        if let Some(item_id) = &self.required_item {
            checks.push(if session.inventory().has_item(item_id) {
                Validation::success(())
            } else {
                Validation::fail(GateDenial::MissingItem {
                    item_id: item_id.clone(),
                })
            });
        }

        for (guard, message) in &self.checks {
            checks.push(if guard.check(session.progress()) {
                Validation::success(())
            } else {
                Validation::fail(GateDenial::CustomCheckFailed {
                    message: message.clone(),
                })
            });
        }

        Validation::all_vec(checks).map(|_| ())
    }
}
