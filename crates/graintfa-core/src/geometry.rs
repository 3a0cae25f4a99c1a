//! Integer pixel geometry in GUI space.
//!
//! All element placement happens on the pixel grid of the background
//! texture ("GUI space"), so every coordinate here is an `i32`.
//!
//! # Overview
//!
//! - [`Point`] - A pixel coordinate
//! - [`Size`] - Width and height in pixels
//! - [`Rect`] - A placed rectangle; the persisted form of element dimensions
//!
//! # Coordinate System
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Rectangles are half-open: a [`Rect`] at `x` with `width` covers the
//! columns `x .. x + width`.
//!
//! Arithmetic saturates at the `i32` range, so edge math on far-off
//! rectangles never overflows. Anything a GUI texture can actually show
//! stays within [`COORDINATE_LIMIT`].

use serde::{Deserialize, Serialize};

/// Largest magnitude of a coordinate or extent in GUI space.
pub const COORDINATE_LIMIT: i32 = 1 << 15;

/// A pixel coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> i32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> i32 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// # use graintfa_core::geometry::Point;
    /// let moved = Point::new(10, 5).add_point(Point::new(-3, 2));
    /// assert_eq!(moved, Point::new(7, 7));
    /// ```
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x.saturating_add(other.x),
            y: self.y.saturating_add(other.y),
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x.saturating_sub(other.x),
            y: self.y.saturating_sub(other.y),
        }
    }

    /// Returns the point clamped into `±COORDINATE_LIMIT` on both axes.
    pub fn clamp_to_limit(self) -> Self {
        Self {
            x: self.x.clamp(-COORDINATE_LIMIT, COORDINATE_LIMIT),
            y: self.y.clamp(-COORDINATE_LIMIT, COORDINATE_LIMIT),
        }
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    width: i32,
    height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> i32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> i32 {
        self.height
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

/// A rectangle on the pixel grid.
///
/// This is the persisted `dimensions` of an element instance, which is why
/// it serializes as a flat `{x, y, width, height}` object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from its top-left corner and size.
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x(), origin.y(), size.width(), size.height())
    }

    pub fn x(self) -> i32 {
        self.x
    }

    pub fn y(self) -> i32 {
        self.y
    }

    pub fn width(self) -> i32 {
        self.width
    }

    pub fn height(self) -> i32 {
        self.height
    }

    /// Returns the top-left corner.
    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Exclusive right edge (`x + width`).
    pub fn right(self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge (`y + height`).
    pub fn bottom(self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Returns true if every field lies within `±COORDINATE_LIMIT`.
    ///
    /// Element renderers offset from the edges of a bounded rectangle
    /// without any risk of overflow.
    pub fn is_bounded(self) -> bool {
        let bounded = |value: i32| (-COORDINATE_LIMIT..=COORDINATE_LIMIT).contains(&value);
        bounded(self.x) && bounded(self.y) && bounded(self.width) && bounded(self.height)
    }

    /// Returns true if the rectangle covers no pixels.
    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Returns the same rectangle moved so its top-left corner is `origin`.
    pub fn with_origin(self, origin: Point) -> Self {
        Self {
            x: origin.x(),
            y: origin.y(),
            ..self
        }
    }

    /// Returns the same rectangle resized to `size`, keeping its origin.
    pub fn with_size(self, size: Size) -> Self {
        Self {
            width: size.width(),
            height: size.height(),
            ..self
        }
    }

    /// Returns the rectangle moved by `(dx, dy)`.
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }

    /// Returns the rectangle enlarged to at least `min` on both axes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use graintfa_core::geometry::{Rect, Size};
    /// let rect = Rect::new(4, 4, 1, 30).with_min_size(Size::new(8, 8));
    /// assert_eq!(rect, Rect::new(4, 4, 8, 30));
    /// ```
    pub fn with_min_size(self, min: Size) -> Self {
        self.with_size(self.size().max(min))
    }

    /// Half-open containment test: `x <= p.x < x + width`, same for y.
    ///
    /// # Examples
    ///
    /// ```
    /// # use graintfa_core::geometry::{Point, Rect};
    /// let rect = Rect::new(10, 10, 18, 18);
    /// assert!(rect.contains(Point::new(10, 27)));
    /// assert!(!rect.contains(Point::new(28, 10)));
    /// ```
    pub fn contains(self, point: Point) -> bool {
        point.x() >= self.x
            && point.x() < self.right()
            && point.y() >= self.y
            && point.y() < self.bottom()
    }

    /// Returns the overlapping part of two rectangles, if any.
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        let rect = Rect::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y));
        (!rect.is_empty()).then_some(rect)
    }
}
