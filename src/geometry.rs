//! Geometry primitives and layout-direction axis helpers.
//!
//! Every interactive resolver works on two axes: the *primary* (layer) axis
//! along which the layout direction travels, and the *secondary* (in-layer)
//! axis perpendicular to it.

use serde::{Deserialize, Serialize};

// ─── Point ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

// ─── Size ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

// ─── Rect ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(position: Point, size: Size) -> Self {
        Self::new(position.x, position.y, size.width, size.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Strict containment; a point on the border is outside.
    pub fn contains(&self, p: Point) -> bool {
        p.x > self.x && p.x < self.right() && p.y > self.y && p.y < self.bottom()
    }

    /// Closed-interval overlap test.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    /// Grow by `dx` left and right and `dy` above and below.
    pub fn inflate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(
            self.x - dx,
            self.y - dy,
            self.width + 2.0 * dx,
            self.height + 2.0 * dy,
        )
    }

    pub fn union(&self, other: &Rect) -> Rect {
        let x0 = self.x.min(other.x);
        let y0 = self.y.min(other.y);
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }
}

// ─── Direction ───────────────────────────────────────────────────────────────

/// Layout direction of one hierarchical level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Undefined,
    Right,
    Left,
    Down,
    Up,
}

impl Direction {
    /// Layers are stacked along x (nodes of one layer share an x band).
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Undefined | Direction::Right | Direction::Left)
    }

    /// Travel goes towards smaller coordinates.
    pub fn is_reversed(self) -> bool {
        matches!(self, Direction::Left | Direction::Up)
    }

    /// Coordinate of `p` along the layer axis.
    pub fn primary(self, p: Point) -> f64 {
        if self.is_horizontal() { p.x } else { p.y }
    }

    /// Coordinate of `p` along the in-layer axis.
    pub fn secondary(self, p: Point) -> f64 {
        if self.is_horizontal() { p.y } else { p.x }
    }

    /// Extent of `s` along the layer axis.
    pub fn primary_extent(self, s: Size) -> f64 {
        if self.is_horizontal() { s.width } else { s.height }
    }

    /// Extent of `s` along the in-layer axis.
    pub fn secondary_extent(self, s: Size) -> f64 {
        if self.is_horizontal() { s.height } else { s.width }
    }
}

/// Unit vector of the travel direction. `Undefined` behaves like `Down`.
pub fn direction_vector(direction: Direction) -> (f64, f64) {
    match direction {
        Direction::Undefined | Direction::Down => (0.0, 1.0),
        Direction::Left => (-1.0, 0.0),
        Direction::Right => (1.0, 0.0),
        Direction::Up => (0.0, -1.0),
    }
}

pub fn dot_product(v1: (f64, f64), v2: (f64, f64)) -> f64 {
    v1.0 * v2.0 + v1.1 * v2.1
}

#[cfg(test)]
#[path = "../tests/rust/test_geometry.rs"]
mod tests;
