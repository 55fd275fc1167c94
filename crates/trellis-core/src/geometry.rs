//! Geometry value types used during layout negotiation.

use std::fmt;

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Widths and columns
    Horizontal,
    /// Heights and rows
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("horizontal axis"),
            Axis::Vertical => f.write_str("vertical axis"),
        }
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle allocated to a component.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Offset of the top-left corner
    pub x: f64,
    pub y: f64,
    /// Allocated size
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Create bounds with position and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Extent of the bounds, used as a space offer.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Same top-left corner, different extent.
    pub fn with_size(&self, size: Size) -> Self {
        Self::new(self.x, self.y, size.width, size.height)
    }

    /// Get the right edge (x + width).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom edge (y + height).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check whether `other` lies entirely inside these bounds, allowing for
    /// floating point slack of `epsilon`.
    pub fn encloses(&self, other: &Bounds, epsilon: f64) -> bool {
        other.x >= self.x - epsilon
            && other.y >= self.y - epsilon
            && other.right() <= self.right() + epsilon
            && other.bottom() <= self.bottom() + epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_encloses() {
        let outer = Bounds::new(0.0, 0.0, 200.0, 100.0);
        assert!(outer.encloses(&Bounds::new(10.0, 10.0, 190.0, 90.0), 0.0));
        assert!(!outer.encloses(&Bounds::new(10.0, 10.0, 191.0, 90.0), 0.0));
        assert!(outer.encloses(&Bounds::new(10.0, 10.0, 190.0000001, 90.0), 1e-6));
    }

    #[test]
    fn test_with_size_keeps_corner() {
        let cell = Bounds::new(15.0, 25.0, 200.0, 80.0);
        assert_eq!(cell.size(), Size::new(200.0, 80.0));

        let shrunk = cell.with_size(Size::new(50.0, 80.0));
        assert_eq!(shrunk, Bounds::new(15.0, 25.0, 50.0, 80.0));
        assert!(cell.encloses(&shrunk, 0.0));
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_bounds_serde() {
        let bounds = Bounds::new(1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_string(&bounds).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":2.0,"width":3.0,"height":4.0}"#);
    }
}
