//! Predicate guards.
//!
//! A guard is a pure boolean check over some read-only context. Gated
//! interactables use them for custom unlock conditions over the progress
//! ledger.

use std::fmt;
use std::sync::Arc;

/// Pure predicate over a context value.
///
/// # Example
///
/// ```rust
/// use puzzleroom::core::Guard;
///
/// let at_least_two = Guard::new(|n: &usize| *n >= 2);
///
/// assert!(!at_least_two.check(&1));
/// assert!(at_least_two.check(&3));
/// ```
pub struct Guard<T: ?Sized> {
    predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T: ?Sized> Guard<T> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic for a given context.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Check if the guard passes for this context.
    pub fn check(&self, context: &T) -> bool {
        (self.predicate)(context)
    }
}

impl<T: ?Sized> Clone for Guard<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
