//! The interpolation engine: per-frame exponential smoothing toward a target.
//!
//! Everything that "chases" something in the engine — the ghost cursor, its
//! trail points, scrubbed trigger progress, project-card tilt — goes through
//! [`lerp_toward`] or its stateful wrapper [`Smoothed`]: each invocation
//! closes a fixed fraction of the remaining distance, so the sequence of
//! values converges geometrically at rate `(1 - factor)` per call.
//!
//! Convergence speed is intentionally tied to invocation rate (once per
//! rendered frame), not wall-clock time, so a slower frame rate means slower easing.

use crate::geometry::{Color, Vec2};
use crate::stage::VisualStyle;

/// Advance `current` toward `target`, closing `factor` of the remaining
/// distance. `factor` must lie in `(0, 1]`: 1.0 snaps immediately, values
/// near 0 barely move. Pure function; call once per frame.
pub fn lerp_toward(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Types that can be animated by interpolating between values.
pub trait Animatable: Clone + PartialEq {
    /// Linear interpolation: t = 0.0 returns `from`, t = 1.0 returns `to`.
    /// t outside `[0, 1]` extrapolates (overshooting easings rely on this).
    fn lerp(from: &Self, to: &Self, t: f32) -> Self;
}

impl Animatable for f32 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Animatable for Vec2 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Vec2::new(
            f32::lerp(&from.x, &to.x, t),
            f32::lerp(&from.y, &to.y, t),
        )
    }
}

impl Animatable for Color {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Color {
            r: from.r + (to.r - from.r) * t,
            g: from.g + (to.g - from.g) * t,
            b: from.b + (to.b - from.b) * t,
            a: from.a + (to.a - from.a) * t,
        }
    }
}

impl Animatable for VisualStyle {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        VisualStyle {
            translate: Vec2::lerp(&from.translate, &to.translate, t),
            scale: f32::lerp(&from.scale, &to.scale, t),
            rotate_x: f32::lerp(&from.rotate_x, &to.rotate_x, t),
            rotate_y: f32::lerp(&from.rotate_y, &to.rotate_y, t),
            opacity: f32::lerp(&from.opacity, &to.opacity, t),
            depth: f32::lerp(&from.depth, &to.depth, t),
            blur: f32::lerp(&from.blur, &to.blur, t),
        }
    }
}

/// A value that eases toward its target by a fixed fraction per frame.
#[derive(Debug, Clone)]
pub struct Smoothed<T: Animatable> {
    current: T,
    target: T,
    factor: f32,
}

impl<T: Animatable> Smoothed<T> {
    /// `factor` is clamped into `(0, 1]`.
    pub fn new(initial: T, factor: f32) -> Self {
        Self {
            target: initial.clone(),
            current: initial,
            factor: factor.clamp(f32::EPSILON, 1.0),
        }
    }

    pub fn set_target(&mut self, target: T) {
        self.target = target;
    }

    /// Jump both current value and target, skipping the easing.
    pub fn snap(&mut self, value: T) {
        self.current = value.clone();
        self.target = value;
    }

    /// One smoothing step; call once per frame.
    pub fn advance(&mut self) -> &T {
        self.current = T::lerp(&self.current, &self.target, self.factor);
        &self.current
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Whether current and target coincide (exactly; callers needing a
    /// tolerance compare distances themselves).
    pub fn settled(&self) -> bool {
        self.current == self.target
    }
}
