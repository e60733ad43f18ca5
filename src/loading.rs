//! Loading screen sequence.
//!
//! Intro: the brand text rises in while a percentage counter runs 0→100.
//! After a short hold the exit plays: text whips up and out, the counter
//! fades, and the panel slides off the top of the viewport, all overlapping.

use crate::animation::{lerp_toward, Easing, Step, StepPosition, Timeline};
use crate::stage::{Stage, VisualStyle};

pub const BRAND_ID: &str = "loading-brand";
pub const COUNTER_ID: &str = "loading-counter";
pub const PANEL_ID: &str = "loading-panel";

const COUNTER_SECS: f32 = 1.5;
const HOLD_SECS: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingPhase {
    Intro,
    Exit,
    Done,
}

pub struct LoadingSequence {
    intro: Timeline,
    exit: Timeline,
    phase: LoadingPhase,
    elapsed: f32,
    viewport_height: f32,
}

impl LoadingSequence {
    pub fn new(viewport_height: f32) -> Self {
        let mut intro = intro_timeline();
        intro.play();
        Self {
            intro,
            exit: exit_timeline(viewport_height),
            phase: LoadingPhase::Intro,
            elapsed: 0.0,
            viewport_height,
        }
    }

    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == LoadingPhase::Done
    }

    /// The rounded 0–100 percentage shown while loading.
    pub fn counter(&self) -> u8 {
        let progress = (self.elapsed / COUNTER_SECS).clamp(0.0, 1.0);
        (100.0 * Easing::PowerOut(3).evaluate(progress)).round() as u8
    }

    pub fn advance(&mut self, dt: f32, stage: &mut dyn Stage) {
        self.elapsed += dt;
        match self.phase {
            LoadingPhase::Intro => {
                self.intro.advance(dt, stage);
                let intro_over = self.intro.is_finished() && self.counter() == 100;
                if intro_over && self.elapsed >= self.intro.duration().max(COUNTER_SECS) + HOLD_SECS
                {
                    log::debug!("loading: intro complete, playing exit");
                    self.phase = LoadingPhase::Exit;
                    self.exit.play();
                }
            }
            LoadingPhase::Exit => {
                self.exit.advance(dt, stage);
                if self.exit.is_finished() {
                    log::info!("loading: sequence complete");
                    self.phase = LoadingPhase::Done;
                }
            }
            LoadingPhase::Done => {}
        }
    }

    /// Skip straight to the end state (reduced motion).
    pub fn finish_now(&mut self, stage: &mut dyn Stage) {
        self.elapsed = self.elapsed.max(COUNTER_SECS);
        self.intro.advance(1_000.0, stage);
        self.exit.play();
        self.exit.advance(1_000.0, stage);
        self.phase = LoadingPhase::Done;
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }
}

fn intro_timeline() -> Timeline {
    Timeline::new().step(
        Step::uniform(
            [BRAND_ID],
            VisualStyle::default().with_opacity(0.0).with_translate(0.0, 80.0),
            VisualStyle::default(),
        )
        .duration(1.2)
        .easing(Easing::PowerOut(5)),
    )
}

fn exit_timeline(viewport_height: f32) -> Timeline {
    Timeline::new()
        .step(
            Step::uniform(
                [BRAND_ID],
                VisualStyle::default(),
                VisualStyle::default().with_opacity(0.0).with_translate(0.0, -60.0),
            )
            .duration(0.3)
            .easing(Easing::ExpoIn),
        )
        .step(
            Step::uniform(
                [COUNTER_ID],
                VisualStyle::default(),
                VisualStyle::default().with_opacity(0.0),
            )
            .duration(0.2)
            .position(StepPosition::WithPrevious),
        )
        .step(
            Step::uniform(
                [PANEL_ID],
                VisualStyle::default(),
                VisualStyle::default().with_translate(0.0, -viewport_height),
            )
            .duration(0.7)
            .easing(Easing::ExpoInOut)
            .position(StepPosition::WithPrevious),
        )
}

/// Counter smoothing helper for hosts that want the displayed number to
/// lag behind the actual count.
pub fn smooth_counter(displayed: f32, actual: f32) -> f32 {
    lerp_toward(displayed, actual, 0.2)
}
