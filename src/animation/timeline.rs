//! Declarative animation timelines.
//!
//! A [`Timeline`] is an ordered list of [`Step`]s, each interpolating a set
//! of target elements between a starting and an ending [`VisualStyle`] over a
//! duration, through an easing curve, optionally staggered per element.
//! Steps are positioned relative to each other at build time (a step can
//! start before the previous one ends), so a whole section entrance is one
//! value that can be played, reversed, restarted or cancelled as a unit.
//!
//! Timelines are advanced by the frame pipeline with real elapsed seconds
//! and write styles straight to the [`Stage`]; targets that are not mounted
//! are silently skipped.

use crate::animation::easing::Easing;
use crate::animation::interpolate::Animatable;
use crate::stage::{ElementId, Stage, VisualStyle};

/// Where a stagger fans out from within a step's target group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StaggerOrigin {
    /// First target leads.
    Start,
    /// Middle of the group leads; edges trail (the bento "explosion").
    Center,
    /// Last target leads.
    End,
    /// An explicit target index leads.
    Index(usize),
}

/// Per-element delay offsets within a step.
#[derive(Debug, Clone, Copy)]
pub struct Stagger {
    /// Delay between consecutive ranks, in seconds. Ignored when `amount`
    /// is set.
    pub each: f32,
    /// Total time distributed across all ranks (the farthest rank starts
    /// this long after the closest).
    pub amount: Option<f32>,
    pub from: StaggerOrigin,
}

impl Stagger {
    pub fn each(each: f32) -> Self {
        Self {
            each,
            amount: None,
            from: StaggerOrigin::Start,
        }
    }

    pub fn amount(amount: f32) -> Self {
        Self {
            each: 0.0,
            amount: Some(amount),
            from: StaggerOrigin::Start,
        }
    }

    pub fn from(mut self, origin: StaggerOrigin) -> Self {
        self.from = origin;
        self
    }

    /// Delay for target `index` out of `count`.
    fn delay(&self, index: usize, count: usize) -> f32 {
        if count <= 1 {
            return 0.0;
        }
        let rank = match self.from {
            StaggerOrigin::Start => index as f32,
            StaggerOrigin::End => (count - 1 - index) as f32,
            StaggerOrigin::Center => {
                let center = (count - 1) as f32 / 2.0;
                (index as f32 - center).abs()
            }
            StaggerOrigin::Index(origin) => (index as f32 - origin as f32).abs(),
        };
        match self.amount {
            Some(amount) => {
                let max_rank = match self.from {
                    StaggerOrigin::Start | StaggerOrigin::End => (count - 1) as f32,
                    StaggerOrigin::Center => (count - 1) as f32 / 2.0,
                    StaggerOrigin::Index(origin) => {
                        (origin as f32).max((count - 1 - origin.min(count - 1)) as f32)
                    }
                };
                if max_rank > 0.0 {
                    amount * rank / max_rank
                } else {
                    0.0
                }
            }
            None => self.each * rank,
        }
    }

    /// Largest delay any target in the group receives.
    fn span(&self, count: usize) -> f32 {
        (0..count)
            .map(|i| self.delay(i, count))
            .fold(0.0, f32::max)
    }
}

/// Where a step sits on the timeline, relative to the step before it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepPosition {
    /// Starts when the previous step (including its stagger) ends.
    AfterPrevious,
    /// Starts together with the previous step.
    WithPrevious,
    /// Offset in seconds from the previous step's end; negative overlaps.
    RelativeToPrevious(f32),
    /// Absolute time from timeline start.
    At(f32),
}

/// One target of a step with its own endpoint styles.
#[derive(Debug, Clone)]
pub struct TargetStyles {
    pub id: ElementId,
    pub from: VisualStyle,
    pub to: VisualStyle,
}

/// One interpolated span of a timeline.
#[derive(Debug, Clone)]
pub struct Step {
    targets: Vec<TargetStyles>,
    duration: f32,
    easing: Easing,
    stagger: Option<Stagger>,
    position: StepPosition,
    /// Endless back-and-forth (floating loops). Yoyo steps never finish and
    /// are excluded from the timeline's completion time.
    yoyo: bool,
}

impl Step {
    /// A step animating every target between the same two styles.
    pub fn uniform<I>(ids: I, from: VisualStyle, to: VisualStyle) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ElementId>,
    {
        let targets = ids
            .into_iter()
            .map(|id| TargetStyles {
                id: id.into(),
                from,
                to,
            })
            .collect();
        Self::from_targets(targets)
    }

    /// A step with per-target endpoint styles (e.g. tiles converging from
    /// direction-dependent offsets).
    pub fn per_target(targets: Vec<TargetStyles>) -> Self {
        Self::from_targets(targets)
    }

    fn from_targets(targets: Vec<TargetStyles>) -> Self {
        Self {
            targets,
            duration: 0.5,
            easing: Easing::EaseOut,
            stagger: None,
            position: StepPosition::AfterPrevious,
            yoyo: false,
        }
    }

    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = seconds.max(0.0);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn stagger(mut self, stagger: Stagger) -> Self {
        self.stagger = Some(stagger);
        self
    }

    pub fn position(mut self, position: StepPosition) -> Self {
        self.position = position;
        self
    }

    pub fn yoyo(mut self) -> Self {
        self.yoyo = true;
        self
    }

    fn stagger_span(&self) -> f32 {
        self.stagger
            .as_ref()
            .map(|s| s.span(self.targets.len()))
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Playback {
    /// Not started, or cancelled back to rest.
    Idle,
    Playing,
    Reversing,
    Paused,
    /// Ran to the end; styles clamped at `to`.
    Finished,
}

#[derive(Debug, Clone)]
struct ScheduledStep {
    step: Step,
    start: f32,
}

/// A playable, reversible sequence of steps.
#[derive(Debug, Clone)]
pub struct Timeline {
    steps: Vec<ScheduledStep>,
    delay: f32,
    /// Playhead in seconds past the delay.
    head: f32,
    state: Playback,
    /// Time at which every non-yoyo step has finished.
    total: f32,
    /// At least one yoyo step; forward playback never finishes.
    endless: bool,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            delay: 0.0,
            head: 0.0,
            state: Playback::Idle,
            total: 0.0,
            endless: false,
        }
    }

    /// Delay before the first step once playback starts.
    pub fn delay(mut self, seconds: f32) -> Self {
        self.delay = seconds.max(0.0);
        self
    }

    /// Append a step, resolving its position against the steps so far.
    pub fn step(mut self, step: Step) -> Self {
        let prev = self.steps.last();
        let prev_start = prev.map(|s| s.start).unwrap_or(0.0);
        let prev_end = prev
            .map(|s| s.start + s.step.duration + s.step.stagger_span())
            .unwrap_or(0.0);
        let start = match step.position {
            StepPosition::AfterPrevious => prev_end,
            StepPosition::WithPrevious => prev_start,
            StepPosition::RelativeToPrevious(offset) => (prev_end + offset).max(0.0),
            StepPosition::At(t) => t.max(0.0),
        };
        if step.yoyo {
            self.endless = true;
        } else {
            self.total = self
                .total
                .max(start + step.duration + step.stagger_span());
        }
        self.steps.push(ScheduledStep { step, start });
        self
    }

    /// Begin (or resume) forward playback.
    pub fn play(&mut self) {
        if self.state == Playback::Finished {
            return;
        }
        self.state = Playback::Playing;
    }

    /// Play backward from the current head toward the start.
    pub fn reverse(&mut self) {
        self.state = Playback::Reversing;
    }

    pub fn pause(&mut self) {
        if matches!(self.state, Playback::Playing | Playback::Reversing) {
            self.state = Playback::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == Playback::Paused {
            self.state = Playback::Playing;
        }
    }

    /// Rewind to the start and play forward.
    pub fn restart(&mut self) {
        self.head = 0.0;
        self.state = Playback::Playing;
    }

    /// Move the playhead without changing playback state. Styles update on
    /// the next `advance`.
    pub fn seek(&mut self, seconds: f32) {
        self.head = seconds.max(0.0);
        if self.state == Playback::Finished && self.head < self.delay + self.total {
            self.state = Playback::Paused;
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, Playback::Playing | Playback::Reversing)
    }

    pub fn is_finished(&self) -> bool {
        self.state == Playback::Finished
    }

    /// Total running time (delay + steps, excluding endless yoyo steps).
    pub fn duration(&self) -> f32 {
        self.delay + self.total
    }

    /// Advance the playhead and write interpolated styles to the stage.
    ///
    /// Yoyo steps fold their local time into a triangle wave and keep
    /// running for as long as the timeline is not idle.
    pub fn advance(&mut self, dt: f32, stage: &mut dyn Stage) {
        match self.state {
            Playback::Idle => return,
            Playback::Playing => {
                self.head += dt;
                if !self.endless && self.head >= self.delay + self.total {
                    self.head = self.delay + self.total;
                    self.state = Playback::Finished;
                }
            }
            Playback::Reversing => {
                self.head -= dt;
                if self.head <= 0.0 {
                    self.head = 0.0;
                    self.state = Playback::Idle;
                    // One last write below leaves everything at its `from`
                    // style before going dormant.
                }
            }
            Playback::Paused | Playback::Finished => {}
        }
        self.write_styles(stage);
    }

    /// Cancel playback and snap every target to its rest (`from`) state, so
    /// tearing down and remounting a section never leaves half-animated
    /// styles behind.
    pub fn cancel(&mut self, stage: &mut dyn Stage) {
        self.head = 0.0;
        self.state = Playback::Idle;
        for scheduled in &self.steps {
            for target in &scheduled.step.targets {
                stage.apply(&target.id, &target.from);
            }
        }
    }

    fn write_styles(&self, stage: &mut dyn Stage) {
        let local = self.head - self.delay;
        if local < 0.0 {
            return;
        }
        for scheduled in &self.steps {
            let step = &scheduled.step;
            let count = step.targets.len();
            for (index, target) in step.targets.iter().enumerate() {
                let item_start = scheduled.start
                    + step
                        .stagger
                        .as_ref()
                        .map(|s| s.delay(index, count))
                        .unwrap_or(0.0);
                let progress = if step.duration <= 0.0 {
                    if local >= item_start {
                        1.0
                    } else {
                        0.0
                    }
                } else if step.yoyo {
                    let elapsed = (local - item_start).max(0.0);
                    triangle(elapsed / step.duration)
                } else {
                    ((local - item_start) / step.duration).clamp(0.0, 1.0)
                };
                let eased = step.easing.evaluate(progress);
                let style = VisualStyle::lerp(&target.from, &target.to, eased);
                stage.apply(&target.id, &style);
            }
        }
    }
}

/// Mirror `t` into an endless 0→1→0 wave.
fn triangle(t: f32) -> f32 {
    let phase = t.rem_euclid(2.0);
    if phase <= 1.0 {
        phase
    } else {
        2.0 - phase
    }
}
