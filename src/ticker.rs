//! Frame scheduler.
//!
//! The engine has exactly one scheduling primitive: "run before the next
//! repaint". Components register a per-frame callback and receive a
//! [`TickerHandle`] whose cancellation (explicit or on drop) guarantees the
//! callback never runs again. Callbacks run in registration order, which is
//! how the per-frame phase ordering (scroll → triggers → bus → overlays →
//! cursor) is established.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};

/// Timing information delivered to every frame callback.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    /// Current time in seconds, from the host's monotonic clock.
    pub now: f64,
    /// Seconds since the previous tick. Zero on the first tick.
    pub dt: f32,
}

type FrameCallback = Box<dyn FnMut(Tick)>;

struct Entry {
    id: u64,
    callback: FrameCallback,
}

#[derive(Default)]
struct Inner {
    entries: Vec<Entry>,
    /// Registrations made while a tick is in flight.
    pending: Vec<Entry>,
    cancelled: HashSet<u64>,
    next_id: u64,
    last_now: Option<f64>,
    ticking: bool,
}

/// A cooperative, single-threaded frame scheduler.
pub struct Ticker {
    inner: Rc<RefCell<Inner>>,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticker {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner::default())),
        }
    }

    /// Register a per-frame callback. The callback runs on every
    /// [`Ticker::tick`] until the returned handle is cancelled or dropped.
    pub fn register<F>(&self, callback: F) -> TickerHandle
    where
        F: FnMut(Tick) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let entry = Entry {
            id,
            callback: Box::new(callback),
        };
        if inner.ticking {
            inner.pending.push(entry);
        } else {
            inner.entries.push(entry);
        }
        log::trace!("ticker: registered callback {id}");
        TickerHandle {
            id,
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Run one frame. `now` is the host clock in seconds.
    ///
    /// Callbacks registered during the tick start on the next tick.
    /// Callbacks cancelled during the tick are skipped before they would
    /// next run.
    pub fn tick(&self, now: f64) {
        let (mut entries, dt) = {
            let mut inner = self.inner.borrow_mut();
            let dt = inner
                .last_now
                .map(|last| (now - last).max(0.0) as f32)
                .unwrap_or(0.0);
            inner.last_now = Some(now);
            inner.ticking = true;
            (std::mem::take(&mut inner.entries), dt)
        };

        let tick = Tick { now, dt };
        for entry in entries.iter_mut() {
            // Re-check per callback: an earlier callback this frame may have
            // cancelled a later one.
            let skip = self.inner.borrow().cancelled.contains(&entry.id);
            if !skip {
                (entry.callback)(tick);
            }
        }

        let mut inner = self.inner.borrow_mut();
        let pending = std::mem::take(&mut inner.pending);
        entries.extend(pending);
        let cancelled = std::mem::take(&mut inner.cancelled);
        entries.retain(|e| !cancelled.contains(&e.id));
        inner.entries = entries;
        inner.ticking = false;
    }

    /// Number of live callbacks (including ones queued mid-tick).
    pub fn len(&self) -> usize {
        let inner = self.inner.borrow();
        inner.entries.len() + inner.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cancellation handle for a registered frame callback.
///
/// Dropping the handle cancels the callback, so every recurring registration
/// carries its teardown with it.
pub struct TickerHandle {
    id: u64,
    inner: Weak<RefCell<Inner>>,
}

impl TickerHandle {
    /// Stop the callback from ever running again.
    pub fn cancel(&self) {
        if let Some(inner) = self.inner.upgrade() {
            let mut inner = inner.borrow_mut();
            if inner.ticking {
                inner.cancelled.insert(self.id);
                inner.pending.retain(|e| e.id != self.id);
            } else {
                inner.entries.retain(|e| e.id != self.id);
            }
            log::trace!("ticker: cancelled callback {}", self.id);
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
