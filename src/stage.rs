//! The seam between the engine and the externally-owned render surface.
//!
//! The engine never creates or destroys visual elements. It reads their
//! geometry and issues imperative style mutations against them through the
//! [`Stage`] trait, addressing elements by stable string identifiers. The
//! host (a real page, or the in-memory implementations below for tests and
//! demos) owns element lifetime entirely; a lookup for an element that is
//! not (or no longer) mounted returns `None` and the caller no-ops.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use crate::geometry::{Color, Rect, Vec2};

/// A non-owning reference to a visual element: an identifier plus whatever
/// lookup the host performs. Cheap to clone and hash.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ElementId(Arc<str>);

impl ElementId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.0)
    }
}

/// The visual properties the engine animates.
///
/// Translate, scale, perspective rotation, opacity, z-depth and blur:
/// everything the page choreography mutates per frame. `Default` is the
/// identity (fully visible, untransformed) rest state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualStyle {
    pub translate: Vec2,
    /// Uniform scale; 1.0 = natural size.
    pub scale: f32,
    /// Rotation around the horizontal axis, degrees.
    pub rotate_x: f32,
    /// Rotation around the vertical axis, degrees.
    pub rotate_y: f32,
    pub opacity: f32,
    /// Translation along the depth axis; negative recedes.
    pub depth: f32,
    /// Blur radius in pixels.
    pub blur: f32,
}

impl Default for VisualStyle {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            scale: 1.0,
            rotate_x: 0.0,
            rotate_y: 0.0,
            opacity: 1.0,
            depth: 0.0,
            blur: 0.0,
        }
    }
}

impl VisualStyle {
    pub fn with_translate(mut self, x: f32, y: f32) -> Self {
        self.translate = Vec2::new(x, y);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotate_x(mut self, degrees: f32) -> Self {
        self.rotate_x = degrees;
        self
    }

    pub fn with_rotate_y(mut self, degrees: f32) -> Self {
        self.rotate_y = degrees;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_blur(mut self, blur: f32) -> Self {
        self.blur = blur;
        self
    }
}

bitflags! {
    /// What changed on an element since the host last drained dirty state.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// A style mutation was applied.
        const STYLE    = 0b01;
        /// The element's geometry was (re)registered.
        const GEOMETRY = 0b10;
    }
}

/// The externally-owned page the engine choreographs.
pub trait Stage {
    /// Current viewport size in pixels.
    fn viewport(&self) -> Vec2;

    /// Document-space bounding box of an element, or `None` if it is not
    /// currently mounted.
    fn region(&self, id: &ElementId) -> Option<Rect>;

    /// Apply a visual style to an element. Unknown ids are a silent no-op.
    fn apply(&mut self, id: &ElementId, style: &VisualStyle);
}

/// An in-memory [`Stage`] recording applied styles, used by tests and demos.
#[derive(Default)]
pub struct MemoryStage {
    viewport: Vec2,
    regions: HashMap<ElementId, Rect>,
    styles: HashMap<ElementId, VisualStyle>,
    dirty: HashMap<ElementId, DirtyFlags>,
    apply_count: u64,
}

impl MemoryStage {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    /// Mount (or re-lay-out) an element at the given document-space rect.
    pub fn insert_region(&mut self, id: impl Into<ElementId>, rect: Rect) {
        let id = id.into();
        *self.dirty.entry(id.clone()).or_insert(DirtyFlags::empty()) |= DirtyFlags::GEOMETRY;
        self.regions.insert(id, rect);
    }

    /// Unmount an element; subsequent lookups return `None`.
    pub fn remove_region(&mut self, id: &ElementId) {
        self.regions.remove(id);
    }

    /// Last style applied to an element, if any.
    pub fn style(&self, id: &ElementId) -> Option<&VisualStyle> {
        self.styles.get(id)
    }

    /// Total number of `apply` calls, across all elements.
    pub fn apply_count(&self) -> u64 {
        self.apply_count
    }

    /// Drain and return per-element dirty flags accumulated since the last
    /// call. Hosts use this to know what to repaint.
    pub fn take_dirty(&mut self) -> HashMap<ElementId, DirtyFlags> {
        std::mem::take(&mut self.dirty)
    }
}

impl Stage for MemoryStage {
    fn viewport(&self) -> Vec2 {
        self.viewport
    }

    fn region(&self, id: &ElementId) -> Option<Rect> {
        self.regions.get(id).copied()
    }

    fn apply(&mut self, id: &ElementId, style: &VisualStyle) {
        self.apply_count += 1;
        *self.dirty.entry(id.clone()).or_insert(DirtyFlags::empty()) |= DirtyFlags::STYLE;
        self.styles.insert(id.clone(), *style);
    }
}

/// The drawing surface the cursor follower paints on every frame.
///
/// Kept deliberately tiny: the follower only ever clears and draws circles.
pub trait CursorSurface {
    fn size(&self) -> Vec2;
    /// Resize the surface. Must not disturb anything the caller has
    /// accumulated outside the surface (trail state lives in the follower).
    fn resize(&mut self, size: Vec2);
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, line_width: f32);
}

/// One recorded cursor-surface draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Fill {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Stroke {
        center: Vec2,
        radius: f32,
        color: Color,
        line_width: f32,
    },
}

/// An in-memory [`CursorSurface`] recording draw calls.
#[derive(Default)]
pub struct MemorySurface {
    size: Vec2,
    /// Commands of the current (not-yet-cleared) frame.
    frame: Vec<DrawCommand>,
    draw_calls: u64,
    clears: u64,
}

impl MemorySurface {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn frame_commands(&self) -> &[DrawCommand] {
        &self.frame
    }

    /// Total draw calls over the surface's lifetime (excludes clears).
    pub fn draw_calls(&self) -> u64 {
        self.draw_calls
    }

    pub fn clears(&self) -> u64 {
        self.clears
    }
}

impl CursorSurface for MemorySurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn resize(&mut self, size: Vec2) {
        self.size = size;
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.frame.clear();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.draw_calls += 1;
        self.frame.push(DrawCommand::Fill {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, line_width: f32) {
        self.draw_calls += 1;
        self.frame.push(DrawCommand::Stroke {
            center,
            radius,
            color,
            line_width,
        });
    }
}
