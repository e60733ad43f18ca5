//! Ghost cursor follower.
//!
//! A primary point chases the raw pointer through exponential smoothing and
//! drags a chain of trail points behind it, each following the one before it
//! at a lazier factor. Hovering an interactive element pulls the follower
//! toward that element's center (the magnetic effect) and swaps the head dot
//! for an enlarged hollow ring.

use crate::animation::Smoothed;
use crate::config::CursorSettings;
use crate::geometry::Vec2;
use crate::stage::{CursorSurface, ElementId, Stage};

/// How much of the blended hover target comes from the raw pointer; the rest
/// comes from the hovered element's center.
const MAGNETIC_POINTER_WEIGHT: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HoverState {
    Idle,
    Hovering,
}

pub struct CursorFollower {
    settings: CursorSettings,
    pointer: Vec2,
    primary: Smoothed<Vec2>,
    trail: Vec<Smoothed<Vec2>>,
    hover_target: Option<ElementId>,
    state: HoverState,
}

impl CursorFollower {
    pub fn new(settings: CursorSettings) -> Self {
        let primary = Smoothed::new(Vec2::ZERO, settings.elasticity);
        let trail = (0..settings.trail_length)
            .map(|_| Smoothed::new(Vec2::ZERO, settings.trail_smoothing))
            .collect();
        Self {
            settings,
            pointer: Vec2::ZERO,
            primary,
            trail,
            hover_target: None,
            state: HoverState::Idle,
        }
    }

    /// Latest raw pointer position, in surface coordinates.
    pub fn pointer_moved(&mut self, position: Vec2) {
        self.pointer = position;
    }

    /// Set or clear the hovered interactive element. The host resolves which
    /// element the pointer is over; the follower only reacts to the result.
    pub fn set_hover_target(&mut self, target: Option<ElementId>) {
        self.state = if target.is_some() {
            HoverState::Hovering
        } else {
            HoverState::Idle
        };
        self.hover_target = target;
    }

    pub fn is_hovering(&self) -> bool {
        self.state == HoverState::Hovering
    }

    pub fn position(&self) -> Vec2 {
        *self.primary.current()
    }

    /// Resize the drawing surface. Trail state is untouched so the chain
    /// keeps gliding through a resize.
    pub fn resize(&self, surface: &mut dyn CursorSurface, size: Vec2) {
        surface.resize(size);
    }

    fn blended_target(&self, stage: &dyn Stage) -> Vec2 {
        let Some(target) = (self.state == HoverState::Hovering)
            .then_some(self.hover_target.as_ref())
            .flatten()
        else {
            return self.pointer;
        };
        match stage.region(target) {
            Some(region) => {
                self.pointer * MAGNETIC_POINTER_WEIGHT
                    + region.center() * (1.0 - MAGNETIC_POINTER_WEIGHT)
            }
            // Target unmounted: behave as if idle this frame.
            None => self.pointer,
        }
    }

    /// One frame of chase plus redraw. Call from the ticker.
    pub fn advance(&mut self, stage: &dyn Stage, surface: &mut dyn CursorSurface) {
        self.primary.set_target(self.blended_target(stage));
        let head = *self.primary.advance();

        let mut lead = head;
        for point in &mut self.trail {
            point.set_target(lead);
            lead = *point.advance();
        }

        self.draw(surface, head);
    }

    fn draw(&self, surface: &mut dyn CursorSurface, head: Vec2) {
        surface.clear();

        // Trail first so the head draws on top. Size and opacity decay
        // linearly toward the tail.
        let count = self.trail.len();
        let head_radius = self.settings.base_size * 1.5;
        for (i, point) in self.trail.iter().enumerate().rev() {
            let fade = 1.0 - (i as f32 + 1.0) / (count as f32 + 1.0);
            surface.fill_circle(
                *point.current(),
                head_radius * fade,
                self.settings.trail_color.with_alpha(fade * 0.5),
            );
        }

        match self.state {
            HoverState::Idle => {
                surface.fill_circle(head, self.settings.base_size / 2.0, self.settings.trail_color);
            }
            HoverState::Hovering => {
                let ring = self.settings.base_size * self.settings.hover_scale * 1.25;
                surface.stroke_circle(head, ring, self.settings.hover_color, 1.5);
            }
        }
    }
}
