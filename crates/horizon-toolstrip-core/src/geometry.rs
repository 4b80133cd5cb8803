//! Basic geometry types for item bounds.
//!
//! Bounds are written by the layout pass and read by the navigation
//! heuristic. Coordinates are logical pixels with the y axis pointing down.

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Convert to a glam Vec2.
    #[inline]
    pub fn to_vec2(self) -> glam::Vec2 {
        glam::Vec2::new(self.x, self.y)
    }
}

/// A size in 2D space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };
}

/// A rectangle defined by origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from origin and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Empty rectangle at origin.
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    /// Left edge x coordinate.
    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    /// Top edge y coordinate.
    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    /// Right edge x coordinate.
    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Bottom edge y coordinate.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Center point of the rectangle.
    #[inline]
    pub fn center(&self) -> Point {
        Point {
            x: self.origin.x + self.size.width / 2.0,
            y: self.origin.y + self.size.height / 2.0,
        }
    }

    /// Midpoint of the top edge.
    #[inline]
    pub fn top_center(&self) -> Point {
        Point {
            x: self.origin.x + self.size.width / 2.0,
            y: self.top(),
        }
    }

    /// Midpoint of the bottom edge.
    #[inline]
    pub fn bottom_center(&self) -> Point {
        Point {
            x: self.origin.x + self.size.width / 2.0,
            y: self.bottom(),
        }
    }
}
