//! Geometric primitives for element layout and beam routing.
//!
//! - [`Point`] - A 2D coordinate
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Wirebeam uses the same coordinate system as SVG and the viewport it
//! reads layout from:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Element bounding boxes are expressed in viewport coordinates. Beam
//! geometry is expressed relative to the top-left corner of its container
//! (see [`Bounds::relative_to`]).

/// A 2D point.
///
/// # Examples
///
/// ```
/// # use wirebeam_core::geometry::Point;
/// let a = Point::new(60.0, 100.0);
/// let b = Point::new(720.0, 100.0);
///
/// let mid = a.midpoint(b);
/// assert_eq!(mid.x(), 390.0);
/// assert_eq!(mid.y(), 100.0);
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

    /// Returns a copy with the x-coordinate replaced
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Returns a copy with the y-coordinate replaced
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point.
    ///
    /// The result does not depend on argument order.
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Returns a new point with absolute values of both coordinates
    pub fn abs(self) -> Self {
        Self {
            x: self.x.abs(),
            y: self.y.abs(),
        }
    }
}

/// Width and height of an element
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

/// A rectangular bounding box with minimum and maximum coordinates.
///
/// This is the shape of a rendered element's bounding client rect: a
/// `left`/`top` corner plus a `width`/`height`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds from a top-left corner and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Creates bounds from `left`, `top`, `width` and `height`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use wirebeam_core::geometry::Bounds;
    /// let rect = Bounds::from_rect(40.0, 80.0, 40.0, 40.0);
    /// assert_eq!(rect.max_x(), 80.0);
    /// assert_eq!(rect.center().x(), 60.0);
    /// ```
    pub fn from_rect(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::new_from_top_left(Point::new(left, top), Size::new(width, height))
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

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Returns the center point, computed as `left + width / 2`.
    ///
    /// This is the same expression a layout reader applies to a bounding
    /// rect, so centers derived here match the ones derived from raw rects.
    pub fn center(self) -> Point {
        Point::new(
            self.min_x + self.width() / 2.0,
            self.min_y + self.height() / 2.0,
        )
    }

    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Moves the bounds by the specified offset.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Moves the bounds in the opposite direction of the specified offset.
    pub fn inverse_translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x - offset.x,
            min_y: self.min_y - offset.y,
            max_x: self.max_x - offset.x,
            max_y: self.max_y - offset.y,
        }
    }

    /// Re-expresses these bounds relative to the top-left corner of `origin`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use wirebeam_core::geometry::Bounds;
    /// let container = Bounds::from_rect(100.0, 50.0, 800.0, 200.0);
    /// let anchor = Bounds::from_rect(140.0, 130.0, 40.0, 40.0);
    ///
    /// let relative = anchor.relative_to(container);
    /// assert_eq!(relative.min_x(), 40.0);
    /// assert_eq!(relative.min_y(), 80.0);
    /// ```
    pub fn relative_to(&self, origin: Bounds) -> Self {
        self.inverse_translate(origin.min_point())
    }

    /// Returns true if `other` lies entirely within these bounds (edges inclusive).
    pub fn contains(&self, other: &Bounds) -> bool {
        other.min_x >= self.min_x
            && other.min_y >= self.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }
}
