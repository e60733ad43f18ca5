//! Full-screen transition overlay.
//!
//! Listens on the transition bus and plays the matching cover effect over
//! whatever sections are crossing underneath: a white flash for `Shatter`, a
//! horizontal streak sweep for `Lightspeed`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::{Easing, Step, Timeline};
use crate::bus::{SubscriberId, TransitionBus, TransitionKind};
use crate::stage::{Stage, VisualStyle};

pub const FLASH_ID: &str = "transition-flash";
pub const STREAKS_ID: &str = "transition-streaks";

pub struct TransitionOverlay {
    bus: Rc<TransitionBus>,
    subscription: Option<SubscriberId>,
    /// Kinds received since the last frame; drained on `advance`.
    pending: Rc<RefCell<Vec<TransitionKind>>>,
    active: Vec<Timeline>,
}

impl TransitionOverlay {
    pub fn new(bus: Rc<TransitionBus>) -> Self {
        let pending: Rc<RefCell<Vec<TransitionKind>>> = Rc::default();
        let queue = pending.clone();
        let subscription = bus.subscribe(move |event| {
            queue.borrow_mut().push(event.kind.clone());
        });
        Self {
            bus,
            subscription: Some(subscription),
            pending,
            active: Vec::new(),
        }
    }

    /// Build timelines for events received since the last frame, then step
    /// everything that is still running.
    pub fn advance(&mut self, dt: f32, stage: &mut dyn Stage) {
        for kind in self.pending.borrow_mut().drain(..) {
            match kind {
                TransitionKind::Shatter => {
                    log::debug!("overlay: shatter flash");
                    let mut timeline = flash_timeline();
                    timeline.play();
                    self.active.push(timeline);
                }
                TransitionKind::Lightspeed => {
                    log::debug!("overlay: lightspeed streaks");
                    let mut timeline = streak_timeline(stage.viewport().x);
                    timeline.play();
                    self.active.push(timeline);
                }
                TransitionKind::Other(name) => {
                    log::debug!("overlay: ignoring unknown transition {name:?}");
                }
            }
        }
        for timeline in &mut self.active {
            timeline.advance(dt, stage);
        }
        self.active.retain(|timeline| !timeline.is_finished());
    }

    pub fn is_active(&self) -> bool {
        !self.active.is_empty()
    }

    /// Drop the bus subscription and cancel anything mid-flight.
    pub fn teardown(&mut self, stage: &mut dyn Stage) {
        if let Some(id) = self.subscription.take() {
            self.bus.unsubscribe(id);
        }
        for timeline in &mut self.active {
            timeline.cancel(stage);
        }
        self.active.clear();
    }
}

/// White flash: snap to full opacity, then a long expo fade.
fn flash_timeline() -> Timeline {
    let covered = VisualStyle::default().with_opacity(1.0);
    let clear = VisualStyle::default().with_opacity(0.0);
    Timeline::new()
        .step(
            Step::uniform([FLASH_ID], clear, covered)
                .duration(0.1)
                .easing(Easing::PowerIn(2)),
        )
        .step(
            Step::uniform([FLASH_ID], covered, clear)
                .duration(0.8)
                .easing(Easing::ExpoOut),
        )
}

/// Streak sweep across the full viewport width.
fn streak_timeline(viewport_width: f32) -> Timeline {
    Timeline::new().step(
        Step::uniform(
            [STREAKS_ID],
            VisualStyle::default()
                .with_opacity(1.0)
                .with_translate(-viewport_width, 0.0),
            VisualStyle::default()
                .with_opacity(1.0)
                .with_translate(viewport_width, 0.0),
        )
        .duration(0.8)
        .easing(Easing::PowerInOut(5)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::TransitionEvent;
    use crate::geometry::Vec2;
    use crate::stage::MemoryStage;

    fn setup() -> (Rc<TransitionBus>, TransitionOverlay, MemoryStage) {
        let bus = Rc::new(TransitionBus::new());
        let overlay = TransitionOverlay::new(bus.clone());
        let stage = MemoryStage::new(Vec2::new(1440.0, 900.0));
        (bus, overlay, stage)
    }

    #[test]
    fn test_shatter_plays_flash() {
        let (bus, mut overlay, mut stage) = setup();

        bus.publish(&TransitionEvent::new(TransitionKind::Shatter));
        overlay.advance(0.05, &mut stage);
        assert!(overlay.is_active());
        let opacity = stage.style(&FLASH_ID.into()).unwrap().opacity;
        assert!(opacity > 0.0);

        // Flash decays back to transparent and the timeline retires.
        for _ in 0..60 {
            overlay.advance(1.0 / 60.0, &mut stage);
        }
        assert!(!overlay.is_active());
        let opacity = stage.style(&FLASH_ID.into()).unwrap().opacity;
        assert!(opacity < 0.01);
    }

    #[test]
    fn test_lightspeed_sweeps_streaks() {
        let (bus, mut overlay, mut stage) = setup();

        bus.publish(&TransitionEvent::new(TransitionKind::Lightspeed));
        overlay.advance(0.4, &mut stage);
        let x = stage.style(&STREAKS_ID.into()).unwrap().translate.x;
        assert!(x > -1440.0 && x < 1440.0);

        overlay.advance(1.0, &mut stage);
        let x = stage.style(&STREAKS_ID.into()).unwrap().translate.x;
        assert!((x - 1440.0).abs() < 1e-3);
        assert!(!overlay.is_active());
    }

    #[test]
    fn test_unknown_kind_ignored() {
        let (bus, mut overlay, mut stage) = setup();
        bus.publish(&TransitionEvent::new(TransitionKind::Other("warp".into())));
        overlay.advance(0.1, &mut stage);
        assert!(!overlay.is_active());
    }

    #[test]
    fn test_teardown_unsubscribes() {
        let (bus, mut overlay, mut stage) = setup();
        assert_eq!(bus.subscriber_count(), 1);
        overlay.teardown(&mut stage);
        assert_eq!(bus.subscriber_count(), 0);

        // Events after teardown are not collected.
        bus.publish(&TransitionEvent::new(TransitionKind::Shatter));
        overlay.advance(0.1, &mut stage);
        assert!(!overlay.is_active());
    }
}
