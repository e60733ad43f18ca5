//! Page-wide transition event bus.
//!
//! A single [`TransitionBus`] is created by the orchestrator and passed by
//! reference to whoever needs it; there is no ambient global. Publishing
//! delivers synchronously, on the same frame, to the subscribers registered
//! at that moment — no queueing, no replay for late subscribers. The
//! subscriber list is snapshotted before dispatch, so a handler may
//! subscribe or unsubscribe (itself included) while an event is in flight.
//!
//! Subscriptions must be removed on component unmount; acting on a
//! torn-down target is the primary correctness hazard here.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// The event name components listen for, kept for hosts that bridge the bus
/// onto a real page's event system.
pub const TRANSITION_EVENT: &str = "section-transition";

/// A named section transition.
///
/// Consumers must ignore kinds they do not recognize; `Other` carries the
/// name through untouched so unknown values survive the trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionKind {
    /// Glass-shatter flash (works → philosophy).
    Shatter,
    /// Light-speed streak sweep (philosophy → skills).
    Lightspeed,
    /// Anything else; ignored by the built-in overlay.
    Other(String),
}

impl TransitionKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "shatter" => TransitionKind::Shatter,
            "lightspeed" => TransitionKind::Lightspeed,
            other => TransitionKind::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TransitionKind::Shatter => "shatter",
            TransitionKind::Lightspeed => "lightspeed",
            TransitionKind::Other(name) => name,
        }
    }
}

/// Payload carried on the bus. Ephemeral; not retained after dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionEvent {
    pub kind: TransitionKind,
}

impl TransitionEvent {
    pub fn new(kind: TransitionKind) -> Self {
        Self { kind }
    }
}

/// Identifies a subscription for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

type Handler = Rc<RefCell<dyn FnMut(&TransitionEvent)>>;

/// Synchronous broadcast channel for [`TransitionEvent`]s.
///
/// Interior-mutable so trigger callbacks holding a shared reference can
/// publish while the orchestrator owns the bus.
#[derive(Default)]
pub struct TransitionBus {
    subscribers: RefCell<Vec<(SubscriberId, Handler)>>,
    next_id: Cell<u64>,
}

impl TransitionBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for every event published after this call.
    pub fn subscribe<F>(&self, handler: F) -> SubscriberId
    where
        F: FnMut(&TransitionEvent) + 'static,
    {
        let id = SubscriberId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.subscribers
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(handler))));
        id
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id);
        subscribers.len() != before
    }

    /// Deliver an event to all current subscribers, synchronously.
    pub fn publish(&self, event: &TransitionEvent) {
        log::debug!("bus: publish {:?}", event.kind);
        // Snapshot so handlers can (un)subscribe during dispatch.
        let snapshot: Vec<Handler> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();
        for handler in snapshot {
            // A handler that is already running (recursive publish) is
            // skipped rather than re-entered.
            match handler.try_borrow_mut() {
                Ok(mut handler) => handler(event),
                Err(_) => {
                    log::warn!("bus: skipped re-entrant handler during {:?}", event.kind)
                }
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}
