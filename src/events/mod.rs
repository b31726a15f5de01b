//! Topic-based event channel.
//!
//! Every outward notification of the core flows through here. The channel is
//! owned by the session, and registrations are scoped handles that
//! unsubscribe when dropped.

mod channel;
mod topic;

pub use channel::{EventChannel, EventRecorder, Subscription, SubscriptionId, WeakEventChannel};
pub use topic::{GameEvent, Topic};
