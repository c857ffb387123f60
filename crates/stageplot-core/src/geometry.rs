//! Geometric primitives for diagram layout.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in plot space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned rectangle defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Diagram layouts use plot coordinates:
//!
//! ```text
//!    +Y
//!     ▲
//!     │
//!     │
//!   (0,0) ────────► +X
//! ```
//!
//! - **Origin**: Bottom-left corner at `(0, 0)`
//! - **Y-axis**: Increases upward, so a box's `top` is its `max_y`
//!
//! Exporters targeting screen coordinates (SVG) flip the Y axis with
//! [`Point::flip_y`] and [`Bounds::flip_y`].

/// A 2D point in plot coordinate space.
///
/// # Examples
///
/// ```
/// # use stageplot_core::geometry::Point;
/// let p = Point::new(10.0, 20.0);
/// let flipped = p.flip_y(100.0);
/// assert_eq!(flipped.y(), 80.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Mirrors the point vertically inside a canvas of the given height.
    pub fn flip_y(self, height: f32) -> Self {
        Self {
            x: self.x,
            y: height - self.y,
        }
    }
}

/// Width and height of an element or canvas
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }
}

/// An axis-aligned rectangle.
///
/// In plot coordinates `max_y` is the top edge and `min_y` the bottom edge.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds from the four edges of a rectangle in plot coordinates.
    pub fn from_edges(left: f32, bottom: f32, right: f32, top: f32) -> Self {
        Self {
            min_x: left.min(right),
            min_y: bottom.min(top),
            max_x: left.max(right),
            max_y: bottom.max(top),
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the midpoint of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns true if the two rectangles share any interior area.
    ///
    /// Rectangles that only touch along an edge do not intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    /// Mirrors the bounds vertically inside a canvas of the given height.
    pub fn flip_y(self, height: f32) -> Self {
        Self {
            min_x: self.min_x,
            min_y: height - self.max_y,
            max_x: self.max_x,
            max_y: height - self.min_y,
        }
    }
}
