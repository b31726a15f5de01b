//! Game progress ledger and its manager.

mod ledger;
mod manager;

pub use ledger::{digit_key, GameProgress, CODE_LENGTH};
pub use manager::{ProgressManager, DEFAULT_DIGITS_REQUIRED};
