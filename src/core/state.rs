//! Core State trait shared by every machine in the crate.
//!
//! Puzzle lifecycles, room sides and view phases all implement this trait so
//! they can be named in logs and recorded in a [`StateHistory`](super::StateHistory).

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for machine states.
///
/// All methods are pure. A state is a value describing where a machine
/// currently sits; changing it is the job of the component that owns it.
///
/// # Example
///
/// ```rust
/// use puzzleroom::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum LockState {
///     Locked,
///     Open,
/// }
///
/// impl State for LockState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Locked => "Locked",
///             Self::Open => "Open",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Open)
///     }
/// }
///
/// assert!(LockState::Open.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name used in log lines.
    fn name(&self) -> &str;

    /// Terminal states accept no further transitions for the rest of the
    /// session.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}
