//! Drawing surface contract
//!
//! The simulation never draws. Its render pass emits calls against this
//! trait; the windowing shell implements it over a real 2D canvas. Handles
//! are opaque and owned by the surface.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque handle to a drawable primitive allocated by the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeHandle(pub u32);

/// Primitive kinds the surface can allocate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Rect,
    Oval,
    Line,
    /// The player marker
    Sprite,
}

/// Cosmetic palette; never behavioral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    Green,
    Brown,
    Red,
    Pink,
    SkyBlue,
    LightGreen,
    LightYellow,
}

/// How a shape is painted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub fill: Option<Tint>,
    pub outline: Option<Tint>,
    pub stroke_width: f32,
}

impl ShapeStyle {
    pub fn filled(tint: Tint) -> Self {
        Self {
            fill: Some(tint),
            outline: None,
            stroke_width: 0.0,
        }
    }

    pub fn outlined(tint: Tint, stroke_width: f32) -> Self {
        Self {
            fill: None,
            outline: Some(tint),
            stroke_width,
        }
    }
}

/// Axis-aligned box in arena coordinates (origin top-left, y down).
///
/// For `Line` shapes the two corners are the segment endpoints, so `min`
/// and `max` are not required to be ordered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Square of side `size` centered on `center`
    pub fn from_center(center: Vec2, size: f32) -> Self {
        let half = Vec2::splat(size / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Inclusive containment on all four edges; a degenerate box contains
    /// nothing
    pub fn contains(&self, p: Vec2) -> bool {
        !self.is_degenerate()
            && self.min.x <= p.x
            && p.x <= self.max.x
            && self.min.y <= p.y
            && p.y <= self.max.y
    }

    /// Open-interval containment on all four edges; a degenerate box
    /// contains nothing
    pub fn contains_open(&self, p: Vec2) -> bool {
        !self.is_degenerate()
            && self.min.x < p.x
            && p.x < self.max.x
            && self.min.y < p.y
            && p.y < self.max.y
    }

    fn is_degenerate(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }
}

/// The collaborator contract: shape allocation, repositioning, and the
/// terminal banner
pub trait Surface {
    fn create_shape(&mut self, kind: ShapeKind, style: ShapeStyle) -> ShapeHandle;
    fn set_shape_position(&mut self, handle: ShapeHandle, bounds: Rect);
    fn set_shape_visible(&mut self, handle: ShapeHandle, visible: bool);
    fn delete_shape(&mut self, handle: ShapeHandle);
    fn show_banner(&mut self, text: &str, tint: Tint);
}

/// Surface that allocates handles without drawing
///
/// Backs the headless binary and the test suite; tracks allocation counts
/// so shape lifetimes stay observable.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    next_handle: u32,
    released: u32,
    pub banner: Option<String>,
    pub banners_shown: u32,
}

impl HeadlessSurface {
    /// Primitives allocated and not yet released
    pub fn live_shapes(&self) -> usize {
        (self.next_handle - self.released) as usize
    }
}

impl Surface for HeadlessSurface {
    fn create_shape(&mut self, _kind: ShapeKind, _style: ShapeStyle) -> ShapeHandle {
        let handle = ShapeHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    fn set_shape_position(&mut self, _handle: ShapeHandle, _bounds: Rect) {}

    fn set_shape_visible(&mut self, _handle: ShapeHandle, _visible: bool) {}

    fn delete_shape(&mut self, _handle: ShapeHandle) {
        self.released += 1;
    }

    fn show_banner(&mut self, text: &str, _tint: Tint) {
        self.banner = Some(text.to_owned());
        self.banners_shown += 1;
    }
}
