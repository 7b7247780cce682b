//! Integer rectangle geometry.
//!
//! Selection geometry lives in whole view-space pixels. Containment follows
//! raster conventions: the point test is half-open (a point on the right or
//! bottom edge counts as outside), while the rectangle test is closed. The
//! hit-testing bands in the selection module depend on exactly these rules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Point
// ============================================================================

/// A 2D point in whole-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by the given amounts.
    pub fn offset(&self, dx: i32, dy: i32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

// ============================================================================
// Size
// ============================================================================

/// A width/height pair in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero or negative.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

// ============================================================================
// Rect
// ============================================================================

/// An axis-aligned rectangle in whole-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// The zero rectangle at the origin.
    pub const ZERO: Rect = Rect {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a normalized rectangle from two arbitrary corner points.
    ///
    /// The result always has non-negative width and height, with its corners
    /// at the component-wise minimum and maximum of the inputs.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let x = p1.x.min(p2.x);
        let y = p1.y.min(p2.y);
        let width = (p1.x - p2.x).abs();
        let height = (p1.y - p2.y).abs();
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a normalized rectangle from two corners given as coordinates.
    pub fn from_coords(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self::from_corners(Point::new(x1, y1), Point::new(x2, y2))
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    pub fn position(&self) -> Point {
        self.top_left()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// True when either dimension is zero or negative.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Re-derive the rectangle from its own corners, making both dimensions
    /// non-negative.
    pub fn normalized(&self) -> Rect {
        Rect::from_corners(self.top_left(), self.bottom_right())
    }

    /// Translate by the given amounts.
    pub fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Grow the rectangle by `dx` on the left and right and `dy` on the top
    /// and bottom. Negative values shrink it.
    pub fn inflate(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(
            self.x - dx,
            self.y - dy,
            self.width + 2 * dx,
            self.height + 2 * dy,
        )
    }

    /// Half-open point containment: the right and bottom edges are outside.
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Closed rectangle containment: a rectangle flush against an edge is
    /// still contained.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.right() <= self.right()
            && other.y >= self.y
            && other.bottom() <= self.bottom()
    }

    /// Clamp a point onto the rectangle, moving each coordinate that falls
    /// outside onto the offending border.
    pub fn clamp_point(&self, p: Point) -> Point {
        let mut p = p;
        if p.x < self.left() {
            p.x = self.left();
        }
        if p.x > self.right() {
            p.x = self.right();
        }
        if p.y < self.top() {
            p.y = self.top();
        }
        if p.y > self.bottom() {
            p.y = self.bottom();
        }
        p
    }

    /// Intersection of two rectangles, or the zero rectangle when they do
    /// not overlap.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        if x2 > x1 && y2 > y1 {
            Rect::new(x1, y1, x2 - x1, y2 - y1)
        } else {
            Rect::ZERO
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners() {
        let r = Rect::from_corners(Point::new(10, 20), Point::new(50, 80));
        assert_eq!(r, Rect::new(10, 20, 40, 60));

        // Reversed corners give the same rectangle
        let r2 = Rect::from_corners(Point::new(50, 80), Point::new(10, 20));
        assert_eq!(r, r2);
    }

    #[test]
    fn test_from_corners_never_negative() {
        // Sweep corner pairs in both orders; width/height must always come
        // out non-negative and equal to the coordinate spans.
        for &(x1, y1) in &[(-30, -10), (0, 0), (17, 5), (100, 240)] {
            for &(x2, y2) in &[(-5, 40), (17, 5), (63, -8), (200, 200)] {
                let a = Rect::from_corners(Point::new(x1, y1), Point::new(x2, y2));
                let b = Rect::from_corners(Point::new(x2, y2), Point::new(x1, y1));
                assert_eq!(a, b);
                assert!(a.width >= 0 && a.height >= 0);
                assert_eq!(a.x, x1.min(x2));
                assert_eq!(a.y, y1.min(y2));
                assert_eq!(a.right(), x1.max(x2));
                assert_eq!(a.bottom(), y1.max(y2));
            }
        }
    }

    #[test]
    fn test_normalized() {
        let r = Rect::new(10, 10, -4, 6);
        assert_eq!(r.normalized(), Rect::new(6, 10, 4, 6));
        assert_eq!(Rect::new(1, 2, 3, 4).normalized(), Rect::new(1, 2, 3, 4));
    }

    #[test]
    fn test_inflate() {
        let r = Rect::new(10, 10, 20, 20);
        assert_eq!(r.inflate(2, 2), Rect::new(8, 8, 24, 24));
        assert_eq!(r.inflate(-2, -2), Rect::new(12, 12, 16, 16));
    }

    #[test]
    fn test_contains_point_half_open() {
        let r = Rect::new(10, 10, 20, 20);
        assert!(r.contains_point(Point::new(10, 10)));
        assert!(r.contains_point(Point::new(29, 29)));
        // Right and bottom edges are outside
        assert!(!r.contains_point(Point::new(30, 15)));
        assert!(!r.contains_point(Point::new(15, 30)));
        assert!(!r.contains_point(Point::new(9, 15)));
    }

    #[test]
    fn test_contains_rect_closed() {
        let frame = Rect::new(0, 0, 100, 100);
        // Flush against the frame still counts as contained
        assert!(frame.contains_rect(&Rect::new(0, 0, 100, 100)));
        assert!(frame.contains_rect(&Rect::new(80, 80, 20, 20)));
        assert!(!frame.contains_rect(&Rect::new(81, 80, 20, 20)));
        assert!(!frame.contains_rect(&Rect::new(-1, 0, 10, 10)));
    }

    #[test]
    fn test_clamp_point() {
        let r = Rect::new(10, 10, 20, 20);
        assert_eq!(r.clamp_point(Point::new(15, 15)), Point::new(15, 15));
        assert_eq!(r.clamp_point(Point::new(-5, 15)), Point::new(10, 15));
        assert_eq!(r.clamp_point(Point::new(50, 50)), Point::new(30, 30));
        // The closed right/bottom border is a legal clamp target
        assert_eq!(r.clamp_point(Point::new(30, 30)), Point::new(30, 30));
    }

    #[test]
    fn test_intersect() {
        let a = Rect::new(0, 0, 50, 50);
        let b = Rect::new(30, 30, 50, 50);
        assert_eq!(a.intersect(&b), Rect::new(30, 30, 20, 20));

        let c = Rect::new(100, 100, 10, 10);
        assert_eq!(a.intersect(&c), Rect::ZERO);
    }

    #[test]
    fn test_offset() {
        let r = Rect::new(10, 10, 20, 20);
        assert_eq!(r.offset(-3, 7), Rect::new(7, 17, 20, 20));
        assert_eq!(Point::new(1, 2).offset(3, -4), Point::new(4, -2));
    }
}
