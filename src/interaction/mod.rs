//! Gated interactables and the player inventory.

mod gate;
mod interactable;
mod inventory;

pub use gate::{GateDenial, GateResult, GateSpec};
pub use interactable::{GatedInteractable, InteractAction, InteractOutcome};
pub use inventory::Inventory;
