//! Viewport trigger registry.
//!
//! A trigger ties a page region to scroll-offset thresholds and fires
//! edge-triggered callbacks when the smoothed offset crosses them: `on_enter`
//! going forward, `on_leave` past the end going forward, `on_enter_back` and
//! `on_leave_back` coming back. A trigger can also *scrub* — continuously
//! report 0..1 progress between its thresholds for driving proportional
//! visual properties — and *pin* its region in place while its progress
//! advances.
//!
//! Thresholds are written as an edge-plus-anchor phrase
//! (`"top 80%"`: the region's top edge at 80% of viewport height) and are
//! resolved into absolute scroll offsets from element geometry. They must be
//! re-resolved via [`TriggerRegistry::refresh`] whenever layout changes.

use std::rc::Rc;
use std::cell::RefCell;

use crate::animation::{Smoothed, Timeline};
use crate::bus::TransitionBus;
use crate::scroll::ScrollState;
use crate::stage::{ElementId, Stage, VisualStyle};

/// Which edge of the region a threshold references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionEdge {
    Top,
    Center,
    Bottom,
}

/// A scroll threshold: "region edge meets this fraction of the viewport".
///
/// `viewport_anchor` is a fraction of viewport height measured from its top:
/// 0.0 = top, 1.0 = bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdSpec {
    pub edge: RegionEdge,
    pub viewport_anchor: f32,
}

impl ThresholdSpec {
    pub const fn new(edge: RegionEdge, viewport_anchor: f32) -> Self {
        Self {
            edge,
            viewport_anchor,
        }
    }

    /// Parse a threshold phrase: `"top 80%"`, `"bottom 20%"`,
    /// `"top top"`, `"bottom bottom"`, `"center center"`, ...
    pub fn parse(spec: &str) -> Option<Self> {
        let mut words = spec.split_whitespace();
        let edge = match words.next()? {
            "top" => RegionEdge::Top,
            "center" => RegionEdge::Center,
            "bottom" => RegionEdge::Bottom,
            _ => return None,
        };
        let anchor = match words.next()? {
            "top" => 0.0,
            "center" => 0.5,
            "bottom" => 1.0,
            percent => {
                let digits = percent.strip_suffix('%')?;
                digits.parse::<f32>().ok()? / 100.0
            }
        };
        if words.next().is_some() {
            return None;
        }
        Some(Self::new(edge, anchor))
    }

    /// The scroll offset at which this threshold is met for `region`.
    fn resolve(&self, region: &crate::geometry::Rect, viewport_height: f32) -> f32 {
        let edge_y = match self.edge {
            RegionEdge::Top => region.top(),
            RegionEdge::Center => region.center().y,
            RegionEdge::Bottom => region.bottom(),
        };
        edge_y - viewport_height * self.viewport_anchor
    }
}

/// What to do to a gated timeline on each trigger edge, in
/// four-slot order: enter, leave, enter-back, leave-back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleAction {
    Play,
    Pause,
    Resume,
    Reverse,
    Restart,
    #[default]
    None,
}

impl ToggleAction {
    fn parse(word: &str) -> Option<Self> {
        match word {
            "play" => Some(ToggleAction::Play),
            "pause" => Some(ToggleAction::Pause),
            "resume" => Some(ToggleAction::Resume),
            "reverse" => Some(ToggleAction::Reverse),
            "restart" => Some(ToggleAction::Restart),
            "none" => Some(ToggleAction::None),
            _ => None,
        }
    }

    fn apply(self, timeline: &Rc<RefCell<Timeline>>) {
        let mut timeline = timeline.borrow_mut();
        match self {
            ToggleAction::Play => timeline.play(),
            ToggleAction::Pause => timeline.pause(),
            ToggleAction::Resume => timeline.resume(),
            ToggleAction::Reverse => timeline.reverse(),
            ToggleAction::Restart => timeline.restart(),
            ToggleAction::None => {}
        }
    }
}

/// The four-slot action word list (`"play none none reverse"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

impl ToggleActions {
    pub const PLAY_REVERSE: Self = Self {
        on_enter: ToggleAction::Play,
        on_leave: ToggleAction::None,
        on_enter_back: ToggleAction::None,
        on_leave_back: ToggleAction::Reverse,
    };

    pub fn parse(spec: &str) -> Option<Self> {
        let words: Vec<_> = spec.split_whitespace().collect();
        if words.len() != 4 {
            return None;
        }
        Some(Self {
            on_enter: ToggleAction::parse(words[0])?,
            on_leave: ToggleAction::parse(words[1])?,
            on_enter_back: ToggleAction::parse(words[2])?,
            on_leave_back: ToggleAction::parse(words[3])?,
        })
    }
}

/// Context handed to edge callbacks; publishing transitions is the common
/// use.
pub struct TriggerContext<'a> {
    pub bus: &'a TransitionBus,
    pub stage: &'a mut dyn Stage,
}

type EdgeCallback = Box<dyn FnMut(&mut TriggerContext)>;
type ScrubCallback = Box<dyn FnMut(f32, &mut dyn Stage)>;

/// Where the scroll offset sits relative to a trigger's span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Before,
    Inside,
    After,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerId(u64);

/// Builder for a trigger registration.
pub struct TriggerBuilder {
    region: ElementId,
    start: ThresholdSpec,
    end: Option<ThresholdSpec>,
    on_enter: Option<EdgeCallback>,
    on_leave: Option<EdgeCallback>,
    on_enter_back: Option<EdgeCallback>,
    on_leave_back: Option<EdgeCallback>,
    scrub: Option<(f32, ScrubCallback)>,
    pin: bool,
    anticipate_pin: f32,
    timeline: Option<(Rc<RefCell<Timeline>>, ToggleActions)>,
}

impl TriggerBuilder {
    pub fn new(region: impl Into<ElementId>, start: ThresholdSpec) -> Self {
        Self {
            region: region.into(),
            start,
            end: None,
            on_enter: None,
            on_leave: None,
            on_enter_back: None,
            on_leave_back: None,
            scrub: None,
            pin: false,
            anticipate_pin: 0.0,
            timeline: None,
        }
    }

    /// End threshold; defaults to the region's bottom edge leaving the
    /// viewport top (the widest sensible span).
    pub fn end(mut self, end: ThresholdSpec) -> Self {
        self.end = Some(end);
        self
    }

    pub fn on_enter<F: FnMut(&mut TriggerContext) + 'static>(mut self, f: F) -> Self {
        self.on_enter = Some(Box::new(f));
        self
    }

    pub fn on_leave<F: FnMut(&mut TriggerContext) + 'static>(mut self, f: F) -> Self {
        self.on_leave = Some(Box::new(f));
        self
    }

    pub fn on_enter_back<F: FnMut(&mut TriggerContext) + 'static>(mut self, f: F) -> Self {
        self.on_enter_back = Some(Box::new(f));
        self
    }

    pub fn on_leave_back<F: FnMut(&mut TriggerContext) + 'static>(mut self, f: F) -> Self {
        self.on_leave_back = Some(Box::new(f));
        self
    }

    /// Continuous progress reporting. `lag` is a smoothing factor in
    /// `(0, 1]`: 1.0 locks progress to the scroll offset, smaller values
    /// let it catch up over several frames.
    pub fn scrub<F: FnMut(f32, &mut dyn Stage) + 'static>(mut self, lag: f32, f: F) -> Self {
        self.scrub = Some((lag, Box::new(f)));
        self
    }

    /// Hold the region fixed in the viewport while inside the trigger span.
    pub fn pin(mut self) -> Self {
        self.pin = true;
        self
    }

    /// Start the pin slightly early, proportionally to scroll velocity.
    pub fn anticipate_pin(mut self, factor: f32) -> Self {
        self.anticipate_pin = factor;
        self
    }

    /// Gate a timeline behind this trigger with the given toggle actions.
    pub fn timeline(mut self, timeline: Rc<RefCell<Timeline>>, actions: ToggleActions) -> Self {
        self.timeline = Some((timeline, actions));
        self
    }
}

struct Trigger {
    id: TriggerId,
    region: ElementId,
    start: ThresholdSpec,
    end: Option<ThresholdSpec>,
    on_enter: Option<EdgeCallback>,
    on_leave: Option<EdgeCallback>,
    on_enter_back: Option<EdgeCallback>,
    on_leave_back: Option<EdgeCallback>,
    scrub: Option<(Smoothed<f32>, ScrubCallback)>,
    pin: bool,
    anticipate_pin: f32,
    timeline: Option<(Rc<RefCell<Timeline>>, ToggleActions)>,
    /// Resolved absolute offsets; `None` until geometry is available.
    span: Option<(f32, f32)>,
    zone: Zone,
    pinned: bool,
}

impl Trigger {
    /// Recompute the absolute offset span from current geometry.
    fn resolve(&mut self, stage: &dyn Stage) {
        let viewport_height = stage.viewport().y;
        let Some(region) = stage.region(&self.region) else {
            // Not mounted; keep the stale span (if any) until it reappears.
            return;
        };
        let start = self.start.resolve(&region, viewport_height);
        let end = match &self.end {
            Some(end) => end.resolve(&region, viewport_height),
            None => ThresholdSpec::new(RegionEdge::Bottom, 0.0).resolve(&region, viewport_height),
        };
        self.span = Some((start, end.max(start)));
    }

    fn zone_for(&self, offset: f32) -> Option<Zone> {
        let (start, end) = self.span?;
        Some(if offset < start {
            Zone::Before
        } else if offset < end {
            Zone::Inside
        } else {
            Zone::After
        })
    }

    fn raw_progress(&self, offset: f32) -> f32 {
        let Some((start, end)) = self.span else {
            return 0.0;
        };
        if end <= start {
            return if offset >= start { 1.0 } else { 0.0 };
        }
        ((offset - start) / (end - start)).clamp(0.0, 1.0)
    }
}

/// Registry evaluating all triggers against each scroll update, in
/// registration order.
#[derive(Default)]
pub struct TriggerRegistry {
    triggers: Vec<Trigger>,
    next_id: u64,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trigger. Thresholds resolve lazily on the first update or
    /// refresh where the region is mounted.
    pub fn register(&mut self, builder: TriggerBuilder) -> TriggerId {
        let id = TriggerId(self.next_id);
        self.next_id += 1;
        log::debug!("trigger: registered {:?} on {}", id, builder.region);
        self.triggers.push(Trigger {
            id,
            region: builder.region,
            start: builder.start,
            end: builder.end,
            on_enter: builder.on_enter,
            on_leave: builder.on_leave,
            on_enter_back: builder.on_enter_back,
            on_leave_back: builder.on_leave_back,
            scrub: builder
                .scrub
                .map(|(lag, callback)| (Smoothed::new(0.0, lag), callback)),
            pin: builder.pin,
            anticipate_pin: builder.anticipate_pin,
            timeline: builder.timeline,
            span: None,
            zone: Zone::Before,
            pinned: false,
        });
        id
    }

    /// Remove a trigger (section unmount).
    pub fn remove(&mut self, id: TriggerId) -> bool {
        let before = self.triggers.len();
        self.triggers.retain(|t| t.id != id);
        self.triggers.len() != before
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Re-resolve every trigger's thresholds from current geometry and
    /// re-derive its active zone *without* firing callbacks. Call after any
    /// layout change (viewport resize, loading screen removal).
    pub fn refresh(&mut self, stage: &dyn Stage, offset: f32) {
        log::debug!("trigger: refresh at offset {offset}");
        for trigger in &mut self.triggers {
            trigger.resolve(stage);
            if let Some(zone) = trigger.zone_for(offset) {
                trigger.zone = zone;
            }
            let progress = trigger.raw_progress(offset);
            if let Some((smoothed, _)) = &mut trigger.scrub {
                smoothed.snap(progress);
            }
        }
    }

    /// Evaluate every trigger against the new scroll state, firing edge
    /// callbacks, scrub updates, toggle actions and pins.
    pub fn update(&mut self, scroll: &ScrollState, stage: &mut dyn Stage, bus: &TransitionBus) {
        let offset = scroll.smoothed;
        for trigger in &mut self.triggers {
            if trigger.span.is_none() {
                trigger.resolve(stage);
            }
            let Some(zone) = trigger.zone_for(offset) else {
                continue; // region never mounted: silent no-op
            };
            let previous = trigger.zone;
            trigger.zone = zone;

            if previous != zone {
                let mut fire = |callback: &mut Option<EdgeCallback>,
                                action: ToggleAction,
                                timeline: &Option<(Rc<RefCell<Timeline>>, ToggleActions)>| {
                    if let Some(callback) = callback {
                        let mut ctx = TriggerContext { bus, stage };
                        callback(&mut ctx);
                    }
                    if let Some((timeline, _)) = timeline {
                        action.apply(timeline);
                    }
                };
                let actions = trigger
                    .timeline
                    .as_ref()
                    .map(|(_, actions)| *actions)
                    .unwrap_or_default();
                match (previous, zone) {
                    (Zone::Before, Zone::Inside) => {
                        fire(&mut trigger.on_enter, actions.on_enter, &trigger.timeline)
                    }
                    (Zone::Inside, Zone::After) => {
                        fire(&mut trigger.on_leave, actions.on_leave, &trigger.timeline)
                    }
                    (Zone::After, Zone::Inside) => fire(
                        &mut trigger.on_enter_back,
                        actions.on_enter_back,
                        &trigger.timeline,
                    ),
                    (Zone::Inside, Zone::Before) => fire(
                        &mut trigger.on_leave_back,
                        actions.on_leave_back,
                        &trigger.timeline,
                    ),
                    // A large jump can skip the inside zone entirely; fire
                    // both edges so downstream state stays consistent.
                    (Zone::Before, Zone::After) => {
                        fire(&mut trigger.on_enter, actions.on_enter, &trigger.timeline);
                        fire(&mut trigger.on_leave, actions.on_leave, &trigger.timeline);
                    }
                    (Zone::After, Zone::Before) => {
                        fire(
                            &mut trigger.on_enter_back,
                            actions.on_enter_back,
                            &trigger.timeline,
                        );
                        fire(
                            &mut trigger.on_leave_back,
                            actions.on_leave_back,
                            &trigger.timeline,
                        );
                    }
                    _ => unreachable!("zone unchanged"),
                }
            }

            if let Some((smoothed, callback)) = &mut trigger.scrub {
                let raw = {
                    let Some((start, end)) = trigger.span else {
                        continue;
                    };
                    if end <= start {
                        if offset >= start {
                            1.0
                        } else {
                            0.0
                        }
                    } else {
                        ((offset - start) / (end - start)).clamp(0.0, 1.0)
                    }
                };
                smoothed.set_target(raw);
                let previous_value = *smoothed.current();
                let value = *smoothed.advance();
                if value != previous_value || zone == Zone::Inside {
                    callback(value, stage);
                }
            }

            if trigger.pin {
                let Some((start, _)) = trigger.span else {
                    continue;
                };
                let lead = trigger.anticipate_pin * scroll.velocity.abs();
                let hold = zone == Zone::Inside || (zone == Zone::Before && offset >= start - lead);
                if hold {
                    // Counteract the scroll so the region appears fixed.
                    let style = VisualStyle::default().with_translate(0.0, offset - start);
                    stage.apply(&trigger.region, &style);
                    trigger.pinned = true;
                } else if trigger.pinned {
                    stage.apply(&trigger.region, &VisualStyle::default());
                    trigger.pinned = false;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, Vec2};
    use crate::stage::MemoryStage;
    use std::cell::Cell;

    fn stage_with_section(top: f32) -> MemoryStage {
        let mut stage = MemoryStage::new(Vec2::new(1440.0, 1000.0));
        stage.insert_region("section", Rect::new(0.0, top, 1440.0, 1000.0));
        stage
    }

    fn scroll_at(offset: f32) -> ScrollState {
        ScrollState {
            raw: offset,
            smoothed: offset,
            velocity: 0.0,
            direction: crate::scroll::ScrollDirection::Down,
        }
    }

    #[test]
    fn test_parse_threshold_grammar() {
        let t = ThresholdSpec::parse("top 80%").unwrap();
        assert_eq!(t.edge, RegionEdge::Top);
        assert!((t.viewport_anchor - 0.8).abs() < 1e-6);

        let t = ThresholdSpec::parse("bottom bottom").unwrap();
        assert_eq!(t.edge, RegionEdge::Bottom);
        assert_eq!(t.viewport_anchor, 1.0);

        assert!(ThresholdSpec::parse("sideways 50%").is_none());
        assert!(ThresholdSpec::parse("top").is_none());
        assert!(ThresholdSpec::parse("top 80% extra").is_none());
    }

    #[test]
    fn test_enter_fires_exactly_once_at_threshold() {
        // Region top at 1300, viewport 1000: "top 80%" is met at offset
        // 1300 - 800 = 500.
        let mut stage = stage_with_section(1300.0);
        let bus = TransitionBus::new();
        let mut registry = TriggerRegistry::new();

        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        registry.register(
            TriggerBuilder::new("section", ThresholdSpec::parse("top 80%").unwrap())
                .on_enter(move |_| c.set(c.get() + 1)),
        );

        registry.update(&scroll_at(499.0), &mut stage, &bus);
        assert_eq!(count.get(), 0);

        registry.update(&scroll_at(500.0), &mut stage, &bus);
        assert_eq!(count.get(), 1);

        // Still past the threshold: no repeated firing while stationary or
        // advancing.
        registry.update(&scroll_at(500.0), &mut stage, &bus);
        registry.update(&scroll_at(700.0), &mut stage, &bus);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_leave_back_after_enter() {
        let mut stage = stage_with_section(1300.0);
        let bus = TransitionBus::new();
        let mut registry = TriggerRegistry::new();

        let entered = Rc::new(Cell::new(0));
        let left_back = Rc::new(Cell::new(0));
        let e = entered.clone();
        let l = left_back.clone();
        registry.register(
            TriggerBuilder::new("section", ThresholdSpec::parse("top 80%").unwrap())
                .on_enter(move |_| e.set(e.get() + 1))
                .on_leave_back(move |_| l.set(l.get() + 1)),
        );

        registry.update(&scroll_at(600.0), &mut stage, &bus);
        assert_eq!(entered.get(), 1);
        assert_eq!(left_back.get(), 0);

        registry.update(&scroll_at(400.0), &mut stage, &bus);
        assert_eq!(left_back.get(), 1);

        // Re-cross forward and back again: both fire again, once each.
        registry.update(&scroll_at(600.0), &mut stage, &bus);
        registry.update(&scroll_at(400.0), &mut stage, &bus);
        assert_eq!(entered.get(), 2);
        assert_eq!(left_back.get(), 2);
    }

    #[test]
    fn test_enter_back_after_leaving_forward() {
        let mut stage = stage_with_section(1300.0);
        let bus = TransitionBus::new();
        let mut registry = TriggerRegistry::new();

        let entered_back = Rc::new(Cell::new(0));
        let eb = entered_back.clone();
        registry.register(
            TriggerBuilder::new("section", ThresholdSpec::parse("top 80%").unwrap())
                .end(ThresholdSpec::parse("bottom top").unwrap())
                .on_enter_back(move |_| eb.set(eb.get() + 1)),
        );

        // Span: start 500, end = bottom(2300) - 0 = 2300.
        registry.update(&scroll_at(600.0), &mut stage, &bus);
        registry.update(&scroll_at(2500.0), &mut stage, &bus); // past end
        registry.update(&scroll_at(2000.0), &mut stage, &bus); // back inside
        assert_eq!(entered_back.get(), 1);
    }

    #[test]
    fn test_scrub_reports_progress() {
        let mut stage = stage_with_section(1000.0);
        let bus = TransitionBus::new();
        let mut registry = TriggerRegistry::new();

        let last = Rc::new(Cell::new(-1.0f32));
        let l = last.clone();
        registry.register(
            TriggerBuilder::new("section", ThresholdSpec::parse("top top").unwrap())
                .end(ThresholdSpec::parse("bottom top").unwrap())
                .scrub(1.0, move |progress, _| l.set(progress)),
        );

        // Span: 1000 .. 2000.
        registry.update(&scroll_at(1000.0), &mut stage, &bus);
        assert_eq!(last.get(), 0.0);
        registry.update(&scroll_at(1500.0), &mut stage, &bus);
        assert!((last.get() - 0.5).abs() < 1e-5);
        registry.update(&scroll_at(2000.0), &mut stage, &bus);
        assert!((last.get() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_scrub_lag_catches_up_over_frames() {
        let mut stage = stage_with_section(1000.0);
        let bus = TransitionBus::new();
        let mut registry = TriggerRegistry::new();

        let last = Rc::new(Cell::new(0.0f32));
        let l = last.clone();
        registry.register(
            TriggerBuilder::new("section", ThresholdSpec::parse("top top").unwrap())
                .end(ThresholdSpec::parse("bottom top").unwrap())
                .scrub(0.5, move |progress, _| l.set(progress)),
        );

        registry.update(&scroll_at(2000.0), &mut stage, &bus);
        let first = last.get();
        assert!(first > 0.0 && first < 1.0); // lagging behind

        for _ in 0..20 {
            registry.update(&scroll_at(2000.0), &mut stage, &bus);
        }
        assert!((last.get() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_refresh_rebinds_geometry_without_firing() {
        let mut stage = stage_with_section(1300.0);
        let bus = TransitionBus::new();
        let mut registry = TriggerRegistry::new();

        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        registry.register(
            TriggerBuilder::new("section", ThresholdSpec::parse("top 80%").unwrap())
                .on_enter(move |_| c.set(c.get() + 1)),
        );
        registry.update(&scroll_at(0.0), &mut stage, &bus);

        // Layout shifts the section much higher; at offset 600 the trigger
        // region is now already past its start threshold.
        stage.insert_region("section", Rect::new(0.0, 900.0, 1440.0, 1000.0));
        registry.refresh(&stage, 600.0);
        assert_eq!(count.get(), 0); // refresh never fires callbacks

        // Subsequent updates fire only on fresh crossings.
        registry.update(&scroll_at(650.0), &mut stage, &bus);
        assert_eq!(count.get(), 0);
        registry.update(&scroll_at(50.0), &mut stage, &bus);
        registry.update(&scroll_at(650.0), &mut stage, &bus);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_missing_region_is_silent() {
        let mut stage = MemoryStage::new(Vec2::new(1440.0, 1000.0));
        let bus = TransitionBus::new();
        let mut registry = TriggerRegistry::new();

        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        registry.register(
            TriggerBuilder::new("ghost", ThresholdSpec::parse("top 80%").unwrap())
                .on_enter(move |_| c.set(c.get() + 1)),
        );
        registry.update(&scroll_at(10_000.0), &mut stage, &bus);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_toggle_actions_play_reverse() {
        use crate::animation::{Easing, Step, Timeline};

        let mut stage = stage_with_section(1300.0);
        let bus = TransitionBus::new();
        let mut registry = TriggerRegistry::new();

        let timeline = Rc::new(RefCell::new(
            Timeline::new().step(
                Step::uniform(
                    ["section-header"],
                    VisualStyle::default().with_opacity(0.0).with_translate(0.0, 50.0),
                    VisualStyle::default(),
                )
                .duration(0.8)
                .easing(Easing::PowerOut(3)),
            ),
        ));
        registry.register(
            TriggerBuilder::new("section", ThresholdSpec::parse("top 80%").unwrap())
                .timeline(timeline.clone(), ToggleActions::PLAY_REVERSE),
        );

        registry.update(&scroll_at(600.0), &mut stage, &bus);
        assert!(timeline.borrow().is_playing());

        timeline.borrow_mut().advance(0.4, &mut stage);
        registry.update(&scroll_at(400.0), &mut stage, &bus);
        // leave-back reverses
        timeline.borrow_mut().advance(10.0, &mut stage);
        assert!(
            (stage
                .style(&"section-header".into())
                .unwrap()
                .opacity)
                .abs()
                < 1e-5
        );
    }

    #[test]
    fn test_pin_holds_region() {
        let mut stage = stage_with_section(1000.0);
        let bus = TransitionBus::new();
        let mut registry = TriggerRegistry::new();

        registry.register(
            TriggerBuilder::new("section", ThresholdSpec::parse("top top").unwrap())
                .end(ThresholdSpec::parse("bottom top").unwrap())
                .pin(),
        );

        // Inside the span the region is translated by (offset - start).
        registry.update(&scroll_at(1250.0), &mut stage, &bus);
        let style = stage.style(&"section".into()).unwrap();
        assert_eq!(style.translate.y, 250.0);

        // Leaving the span releases the pin.
        registry.update(&scroll_at(2500.0), &mut stage, &bus);
        let style = stage.style(&"section".into()).unwrap();
        assert_eq!(style.translate.y, 0.0);
    }

    #[test]
    fn test_toggle_actions_parse() {
        let actions = ToggleActions::parse("play none none reverse").unwrap();
        assert_eq!(actions, ToggleActions::PLAY_REVERSE);
        assert!(ToggleActions::parse("play none none").is_none());
        assert!(ToggleActions::parse("play explode none reverse").is_none());
    }
}
