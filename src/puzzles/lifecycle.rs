//! Shared unsolved → solved lifecycle and the solve/fail protocol.

use super::definition::PuzzleDefinition;
use crate::core::State;
use crate::events::GameEvent;
use crate::progress::ProgressManager;
use crate::session::SessionContext;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

state_enum! {
    #[derive(Copy, Eq, Hash)]
    pub enum PuzzleStatus {
        Unsolved,
        Solved,
    }
    final: [Solved]
}

/// Presentation hooks for sound and visual feedback.
///
/// Every method defaults to doing nothing. Implementations must not mutate
/// core state; they only react.
pub trait PuzzleFeedback: Send + Sync {
    /// The puzzle was just solved by the player.
    fn solved(&self, _definition: &PuzzleDefinition) {}

    /// The puzzle was found solved on activation; show the solved look
    /// without replaying any solve effects.
    fn already_solved(&self, _definition: &PuzzleDefinition) {}

    fn failed_attempt(&self, _definition: &PuzzleDefinition) {}
}

/// The lifecycle every concrete puzzle embeds.
///
/// Once `Solved`, a core never returns to `Unsolved`; a full progress reset
/// is expected to come with freshly built puzzles.
pub struct PuzzleCore {
    definition: PuzzleDefinition,
    status: PuzzleStatus,
    feedback: Option<Arc<dyn PuzzleFeedback>>,
}

impl PuzzleCore {
    pub fn new(definition: PuzzleDefinition) -> Self {
        Self {
            definition,
            status: PuzzleStatus::Unsolved,
            feedback: None,
        }
    }

    pub fn set_feedback(&mut self, feedback: Arc<dyn PuzzleFeedback>) {
        self.feedback = Some(feedback);
    }

    pub fn id(&self) -> &str {
        &self.definition.puzzle_id
    }

    pub fn definition(&self) -> &PuzzleDefinition {
        &self.definition
    }

    pub fn status(&self) -> PuzzleStatus {
        self.status
    }

    pub fn is_solved(&self) -> bool {
        self.status.is_final()
    }

    /// Jump straight to `Solved` if the ledger already has this puzzle.
    ///
    /// Returns `true` on the jump. Nothing is published and no reward is
    /// revealed; only the `already_solved` hook runs.
    pub fn sync_with_progress(&mut self, progress: &ProgressManager) -> bool {
        if self.is_solved() || !progress.is_puzzle_solved(self.id()) {
            return false;
        }
        self.status = PuzzleStatus::Solved;
        debug!(puzzle = self.definition.label(), "Puzzle restored as already solved");
        if let Some(feedback) = &self.feedback {
            feedback.already_solved(&self.definition);
        }
        true
    }

    /// Run the solve protocol at most once per instance.
    ///
    /// In order: mark solved in the ledger, reveal the reward digit if one is
    /// configured, publish `PuzzleSolved`, then run the `solved` hook.
    /// Returns `false` if this instance was already solved.
    pub fn complete(&mut self, session: &mut SessionContext) -> bool {
        if self.is_solved() {
            return false;
        }
        self.status = PuzzleStatus::Solved;

        let progress = session.progress_mut();
        progress.solve_puzzle(&self.definition.puzzle_id);
        if let Some((key, value)) = self.definition.reward() {
            progress.reveal_digit(key, value);
        }

        session
            .events()
            .publish(GameEvent::puzzle_solved(self.definition.puzzle_id.clone()));

        if let Some(feedback) = &self.feedback {
            feedback.solved(&self.definition);
        }

        info!(
            puzzle = self.definition.label(),
            reward = ?self.definition.reward(),
            "Puzzle complete"
        );
        true
    }

    /// Publish `PuzzleAttemptFailed`. Never touches the ledger.
    pub fn report_failed_attempt(&self, session: &SessionContext) {
        if self.is_solved() {
            return;
        }
        session
            .events()
            .publish(GameEvent::puzzle_attempt_failed(self.definition.puzzle_id.clone()));
        if let Some(feedback) = &self.feedback {
            feedback.failed_attempt(&self.definition);
        }
        debug!(puzzle = self.definition.label(), "Wrong answer");
    }
}

impl fmt::Debug for PuzzleCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PuzzleCore")
            .field("definition", &self.definition)
            .field("status", &self.status)
            .field("feedback", &self.feedback.is_some())
            .finish()
    }
}

/// Behavior shared by all concrete puzzles.
pub trait Puzzle {
    fn core(&self) -> &PuzzleCore;

    fn core_mut(&mut self) -> &mut PuzzleCore;

    /// Validate the current runtime state, calling `complete` on success and
    /// `report_failed_attempt` on a wrong answer where the puzzle has one.
    fn check_solution(&mut self, session: &mut SessionContext);

    /// Put runtime state into its solved configuration. Called on activation
    /// when the ledger already has the puzzle solved.
    fn restore_solved(&mut self, _session: &SessionContext) {}

    fn id(&self) -> &str {
        self.core().id()
    }

    fn is_solved(&self) -> bool {
        self.core().is_solved()
    }

    /// Sync with the ledger when the puzzle becomes reachable.
    ///
    /// Returns `true` if the puzzle turned out to be already solved.
    fn activate(&mut self, session: &SessionContext) -> bool {
        if !self.core_mut().sync_with_progress(session.progress()) {
            return false;
        }
        self.restore_solved(session);
        true
    }

    fn set_feedback(&mut self, feedback: Arc<dyn PuzzleFeedback>) {
        self.core_mut().set_feedback(feedback);
    }
}
