//! Smooth scroll publisher.
//!
//! Translates raw wheel/touch deltas into a smoothed scroll offset with
//! inertia and republishes the updated [`ScrollState`] to subscribers once
//! per animation frame. While active, the host is expected to suppress
//! native scrolling so the two do not fight.
//!
//! The publisher is optional: when smooth scrolling is disabled in the site
//! configuration it is never constructed, and consumers fall back to raw
//! offsets (no smoothing, no inertia) fed by the host.

use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::Easing;
use crate::ticker::Tick;

/// Scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Direction of the latest scroll motion. Sticky: holds its last value while
/// the offset is stationary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollDirection {
    Up,
    #[default]
    Down,
}

/// Smoothing configuration for the scroll publisher.
#[derive(Debug, Clone)]
pub struct ScrollConfig {
    /// How long the eased catch-up to a new target takes.
    pub duration_secs: f32,
    pub easing: Easing,
    pub orientation: Orientation,
    /// Scale applied to wheel deltas before smoothing.
    pub wheel_multiplier: f32,
    /// Scale applied to touch deltas before smoothing.
    pub touch_multiplier: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            duration_secs: 1.2,
            easing: Easing::ExpoOut,
            orientation: Orientation::Vertical,
            wheel_multiplier: 1.0,
            touch_multiplier: 2.0,
        }
    }
}

/// Published once per frame to every subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollState {
    /// Accumulated raw input offset (the smoothing target).
    pub raw: f32,
    /// Current smoothed offset.
    pub smoothed: f32,
    /// Change in smoothed offset on the last frame, in pixels.
    pub velocity: f32,
    pub direction: ScrollDirection,
}

/// In-flight eased move from one offset to another.
#[derive(Debug, Clone)]
struct Glide {
    from: f32,
    to: f32,
    started_at: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSubscriberId(u64);

type Subscriber = Rc<RefCell<dyn FnMut(&ScrollState)>>;

/// The smooth scroll engine.
pub struct SmoothScroll {
    config: ScrollConfig,
    state: ScrollState,
    /// Maximum scrollable offset (content extent minus viewport).
    limit: f32,
    target: f32,
    glide: Option<Glide>,
    running: bool,
    subscribers: Vec<(ScrollSubscriberId, Subscriber)>,
    next_id: u64,
}

impl SmoothScroll {
    pub fn new(config: ScrollConfig, limit: f32) -> Self {
        Self {
            config,
            state: ScrollState::default(),
            limit: limit.max(0.0),
            target: 0.0,
            glide: None,
            running: false,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Allow input to move the scroll target. Disabled until called (the
    /// loading sequence keeps the page pinned).
    pub fn start(&mut self) {
        log::debug!("scroll: started");
        self.running = true;
    }

    /// Freeze the scroll target; pending inertia still settles.
    pub fn stop(&mut self) {
        log::debug!("scroll: stopped");
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn orientation(&self) -> Orientation {
        self.config.orientation
    }

    /// Update the scrollable extent (after layout or viewport changes).
    /// Clamps the current target into the new range.
    pub fn set_limit(&mut self, limit: f32) {
        self.limit = limit.max(0.0);
        self.target = self.target.clamp(0.0, self.limit);
        self.state.raw = self.target;
    }

    pub fn handle_wheel(&mut self, delta: f32) {
        self.push_input(delta * self.config.wheel_multiplier);
    }

    pub fn handle_touch(&mut self, delta: f32) {
        self.push_input(delta * self.config.touch_multiplier);
    }

    /// Animate to an absolute offset (corner navigation).
    pub fn scroll_to(&mut self, offset: f32) {
        self.target = offset.clamp(0.0, self.limit);
        self.state.raw = self.target;
    }

    /// Move to an absolute offset without gliding.
    pub fn jump_to(&mut self, offset: f32) {
        self.target = offset.clamp(0.0, self.limit);
        self.state.raw = self.target;
        self.state.smoothed = self.target;
        self.glide = None;
    }

    fn push_input(&mut self, delta: f32) {
        if !self.running {
            return;
        }
        self.target = (self.target + delta).clamp(0.0, self.limit);
        self.state.raw = self.target;
    }

    /// Subscribe to per-frame state updates.
    pub fn subscribe<F>(&mut self, subscriber: F) -> ScrollSubscriberId
    where
        F: FnMut(&ScrollState) + 'static,
    {
        let id = ScrollSubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers
            .push((id, Rc::new(RefCell::new(subscriber))));
        id
    }

    pub fn unsubscribe(&mut self, id: ScrollSubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Advance the smoothing and notify subscribers. Called once per frame
    /// from the frame pipeline.
    pub fn on_frame(&mut self, tick: Tick) {
        // Retarget mid-flight: restart the glide from the current offset so
        // rapid wheel input keeps its momentum without snapping.
        let needs_glide = match &self.glide {
            Some(glide) => glide.to != self.target,
            None => self.state.smoothed != self.target,
        };
        if needs_glide {
            self.glide = Some(Glide {
                from: self.state.smoothed,
                to: self.target,
                started_at: tick.now,
            });
        }

        let previous = self.state.smoothed;
        if let Some(glide) = &self.glide {
            let elapsed = (tick.now - glide.started_at) as f32;
            let progress = if self.config.duration_secs <= 0.0 {
                1.0
            } else {
                (elapsed / self.config.duration_secs).clamp(0.0, 1.0)
            };
            let eased = self.config.easing.evaluate(progress);
            self.state.smoothed = glide.from + (glide.to - glide.from) * eased;
            if progress >= 1.0 {
                self.state.smoothed = glide.to;
                self.glide = None;
            }
        }

        self.state.velocity = self.state.smoothed - previous;
        if self.state.velocity > 0.0 {
            self.state.direction = ScrollDirection::Down;
        } else if self.state.velocity < 0.0 {
            self.state.direction = ScrollDirection::Up;
        }

        let snapshot: Vec<Subscriber> = self
            .subscribers
            .iter()
            .map(|(_, subscriber)| subscriber.clone())
            .collect();
        for subscriber in snapshot {
            subscriber.borrow_mut()(&self.state);
        }
    }
}
