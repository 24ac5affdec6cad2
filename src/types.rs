//! Core types for spark-tags.
//!
//! Colors, geometry and tag identity. Everything else in the crate is built
//! on these; geometry is expressed in host units (points, pixels or cells).

use std::fmt;

// =============================================================================
// Color
// =============================================================================

/// Tag and control color, passed through to the host untouched.
///
/// Channels are 0-255. A red channel of -1 marks [`Rgba::HOST_DEFAULT`]:
/// the host keeps its own styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Host default color (let the host decide).
    pub const HOST_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    // Standard colors
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Check if this is the host default color.
    #[inline]
    pub const fn is_host_default(&self) -> bool {
        self.r == -1
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// A point in container-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Grow both axes by `amount` on each side.
    #[inline]
    pub fn inflate(self, amount: f32) -> Self {
        Self::new(self.width + amount * 2.0, self.height + amount * 2.0)
    }

    /// True when both axes are finite and non-negative and the height is non-zero.
    pub fn is_usable(&self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height > 0.0
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub const fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if a point is inside this rect (right and bottom edges excluded).
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }
}

// =============================================================================
// Tag identity
// =============================================================================

/// Stable handle of a tag.
///
/// Assigned sequentially by the store and never reused while the store lives,
/// so ordering by id is insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagId(pub u64);

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tag#{}", self.0)
    }
}

// =============================================================================
// Font
// =============================================================================

/// Font description handed to the host text measurement service.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f32,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("system", 14.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_host_default() {
        assert!(Rgba::HOST_DEFAULT.is_host_default());
        assert!(!Rgba::WHITE.is_host_default());
        assert_eq!(Rgba::rgb(1, 2, 3), Rgba::new(1, 2, 3, 255));
    }

    #[test]
    fn test_rect_edges_and_contains() {
        let r = Rect::new(5.0, 5.0, 20.0, 10.0);
        assert_eq!(r.right(), 25.0);
        assert_eq!(r.bottom(), 15.0);
        assert!(r.contains(Point::new(5.0, 5.0)));
        assert!(r.contains(Point::new(24.9, 14.9)));
        assert!(!r.contains(Point::new(25.0, 10.0)));
        assert!(!r.contains(Point::new(10.0, 15.0)));
    }

    #[test]
    fn test_size_inflate_and_usable() {
        assert_eq!(Size::new(10.0, 4.0).inflate(2.5), Size::new(15.0, 9.0));
        assert!(Size::new(0.0, 12.0).is_usable());
        assert!(!Size::new(10.0, 0.0).is_usable());
        assert!(!Size::new(f32::NAN, 10.0).is_usable());
        assert!(!Size::new(-1.0, 10.0).is_usable());
    }

    #[test]
    fn test_tag_id_ordering() {
        assert!(TagId(1) < TagId(2));
        assert_eq!(TagId(7).to_string(), "tag#7");
    }
}
