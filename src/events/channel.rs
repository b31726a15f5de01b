//! Synchronous topic-based publish/subscribe channel.

use super::topic::{GameEvent, Topic};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Handler = Arc<dyn Fn(&GameEvent) + Send + Sync>;

/// Identifies one registration on the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: BTreeMap<Topic, Vec<(SubscriptionId, Handler)>>,
}

impl Registry {
    fn remove(&mut self, topic: Topic, id: SubscriptionId) -> bool {
        let Some(handlers) = self.handlers.get_mut(&topic) else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        before != handlers.len()
    }
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Session-owned event hub.
///
/// Dispatch is synchronous: `publish` calls every handler registered for the
/// event's topic, in registration order, before returning. There is no
/// ordering guarantee across topics.
///
/// Handlers run outside the internal lock, so a handler may publish or
/// subscribe again. A handler registered during a dispatch only sees later
/// events.
///
/// Cloning yields another handle to the same hub.
#[derive(Clone, Default)]
pub struct EventChannel {
    registry: Arc<Mutex<Registry>>,
}

impl EventChannel {
    /// Create an empty channel with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-owning handle for handlers that need to reach back into the
    /// channel without keeping it alive.
    pub fn downgrade(&self) -> WeakEventChannel {
        WeakEventChannel {
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Publish an event to every subscriber of its topic.
    ///
    /// Returns how many handlers received it.
    pub fn publish(&self, event: GameEvent) -> usize {
        let topic = event.topic();
        let handlers: Vec<Handler> = {
            let registry = lock(&self.registry);
            registry
                .handlers
                .get(&topic)
                .map(|entries| entries.iter().map(|(_, h)| Arc::clone(h)).collect())
                .unwrap_or_default()
        };

        if handlers.is_empty() {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }

        for handler in &handlers {
            handler(&event);
        }
        handlers.len()
    }

    /// Register a handler for one topic.
    ///
    /// The handler stays registered until the returned [`Subscription`] is
    /// dropped or cancelled, or until [`EventChannel::clear_all`].
    pub fn subscribe<F>(&self, topic: Topic, handler: F) -> Subscription
    where
        F: Fn(&GameEvent) + Send + Sync + 'static,
    {
        let mut registry = lock(&self.registry);
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry
            .handlers
            .entry(topic)
            .or_default()
            .push((id, Arc::new(handler)));

        Subscription {
            registry: Arc::downgrade(&self.registry),
            topic,
            id,
            active: true,
        }
    }

    /// Remove a registration by id. Returns `false` if it was not present.
    pub fn unsubscribe(&self, topic: Topic, id: SubscriptionId) -> bool {
        lock(&self.registry).remove(topic, id)
    }

    /// Remove every registration on every topic.
    pub fn clear_all(&self) {
        let mut registry = lock(&self.registry);
        let removed: usize = registry.handlers.values().map(Vec::len).sum();
        registry.handlers.clear();
        tracing::debug!(removed, "Cleared all event subscriptions");
    }

    /// Number of handlers currently registered for `topic`.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        lock(&self.registry)
            .handlers
            .get(&topic)
            .map_or(0, Vec::len)
    }
}

impl fmt::Debug for EventChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = lock(&self.registry);
        let counts: BTreeMap<Topic, usize> = registry
            .handlers
            .iter()
            .map(|(topic, handlers)| (*topic, handlers.len()))
            .collect();
        f.debug_struct("EventChannel")
            .field("subscribers", &counts)
            .finish()
    }
}

/// Weak counterpart of [`EventChannel`], obtained from
/// [`EventChannel::downgrade`].
#[derive(Clone, Default)]
pub struct WeakEventChannel {
    registry: Weak<Mutex<Registry>>,
}

impl WeakEventChannel {
    /// `None` once every strong handle to the channel is gone.
    pub fn upgrade(&self) -> Option<EventChannel> {
        self.registry
            .upgrade()
            .map(|registry| EventChannel { registry })
    }
}

impl fmt::Debug for WeakEventChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakEventChannel")
            .field("alive", &(self.registry.strong_count() > 0))
            .finish()
    }
}

/// Scoped registration handle.
///
/// Dropping it unsubscribes the handler, so a component that keeps its
/// subscriptions as fields is detached automatically on teardown.
#[must_use = "dropping a Subscription immediately unsubscribes its handler"]
pub struct Subscription {
    registry: Weak<Mutex<Registry>>,
    topic: Topic,
    id: SubscriptionId,
    active: bool,
}

impl Subscription {
    /// Id to pass to [`EventChannel::unsubscribe`].
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Topic the handler is registered on.
    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Unsubscribe now.
    pub fn cancel(self) {
        drop(self);
    }

    /// Keep the handler registered for the rest of the session.
    ///
    /// The returned id can still be passed to [`EventChannel::unsubscribe`].
    pub fn detach(mut self) -> SubscriptionId {
        self.active = false;
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).remove(self.topic, self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("topic", &self.topic)
            .field("id", &self.id)
            .field("active", &self.active)
            .finish()
    }
}

/// Collects every event published on a set of topics.
///
/// Handy for debug overlays and for asserting on the outward event stream.
pub struct EventRecorder {
    events: Arc<Mutex<Vec<GameEvent>>>,
    _subscriptions: Vec<Subscription>,
}

impl EventRecorder {
    /// Record every topic.
    pub fn all(channel: &EventChannel) -> Self {
        Self::topics(channel, &Topic::ALL)
    }

    pub fn topics(channel: &EventChannel, topics: &[Topic]) -> Self {
        let events = Arc::new(Mutex::new(Vec::new()));
        let subscriptions = topics
            .iter()
            .map(|&topic| {
                let sink = Arc::clone(&events);
                channel.subscribe(topic, move |event| {
                    sink.lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push(event.clone());
                })
            })
            .collect();

        Self {
            events,
            _subscriptions: subscriptions,
        }
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<GameEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self, topic: Topic) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|event| event.topic() == topic)
            .count()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
