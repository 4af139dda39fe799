#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library of 2D floor-plan geometry."]
#![doc = ""]
#![doc = "This crate provides points, Euclidean distance, Cohen-Sutherland outcodes"]
#![doc = "and line-segment clipping against an axis-aligned region."]

use core::fmt;
use libm::hypotf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::GeometryError;

/// A point `(x, y)` in floor-plan world units.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// World-frame x coordinate.
    pub x: f32,
    /// World-frame y coordinate.
    pub y: f32,
}

impl Point {
    /// The world origin `(0, 0)`.
    pub const ORIGIN: Point = Point::new(0.0, 0.0);

    /// Construct a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    /// Euclidean distance from `self` to `other`.
    pub fn distance_to(self, other: Point) -> f32 {
        distance(self, other)
    }

    /// Moves from `self` toward `target` by at most `max_step`.
    ///
    /// If `target` is within `max_step` the target itself is returned, so the
    /// result never overshoots. `max_step` is expected to be non-negative.
    ///
    /// # Arguments
    ///
    /// * `target`: The point to move toward.
    /// * `max_step`: The largest distance that may be covered.
    ///
    /// # Returns
    ///
    /// The point reached after the step.
    pub fn step_toward(self, target: Point, max_step: f32) -> Point {
        let remaining = distance(self, target);
        if remaining <= max_step {
            return target;
        }

        let ux = (target.x - self.x) / remaining;
        let uy = (target.y - self.y) / remaining;
        Point::new(self.x + ux * max_step, self.y + uy * max_step)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f32 {
    hypotf(b.x - a.x, b.y - a.y)
}

bitflags::bitflags! {
    /// Cohen-Sutherland region code of a point relative to a [`ClipRegion`].
    ///
    /// An empty outcode means the point is inside the region.
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Outcode: u8 {
        /// Left of the region (`x < left`).
        const LEFT = 0b0001;
        /// Right of the region (`x > right`).
        const RIGHT = 0b0010;
        /// Below the region (`y < bottom`).
        const BOTTOM = 0b0100;
        /// Above the region (`y > top`).
        const TOP = 0b1000;
    }
}

/// A line segment between two points.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Segment {
    /// First endpoint.
    pub start: Point,
    /// Second endpoint.
    pub end: Point,
}

impl Segment {
    /// Construct a new segment.
    pub const fn new(start: Point, end: Point) -> Self {
        Segment { start, end }
    }

    /// Length of the segment.
    pub fn length(&self) -> f32 {
        distance(self.start, self.end)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

/// Axis-aligned rectangle used to clip rendered segments and to bound
/// random sampling.
///
/// Boundaries are inclusive: a point lying exactly on an edge is inside.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "[f32; 4]", into = "[f32; 4]")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRegion {
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
}

impl ClipRegion {
    /// Construct a new clip region.
    ///
    /// # Arguments
    ///
    /// * `left`, `right`: Horizontal bounds, `left < right`.
    /// * `bottom`, `top`: Vertical bounds, `bottom < top`.
    ///
    /// # Errors
    ///
    /// Returns `Err(GeometryError::InvalidRegion)` if a bound is not finite or
    /// the region has no area.
    pub fn new(left: f32, right: f32, bottom: f32, top: f32) -> Result<Self, GeometryError> {
        if !(left.is_finite() && right.is_finite() && bottom.is_finite() && top.is_finite()) {
            return Err(GeometryError::InvalidRegion("bounds must be finite"));
        }
        if left >= right {
            return Err(GeometryError::InvalidRegion("left must be less than right"));
        }
        if bottom >= top {
            return Err(GeometryError::InvalidRegion("bottom must be less than top"));
        }
        Ok(ClipRegion { left, right, bottom, top })
    }

    /// Returns the left bound.
    pub fn left(&self) -> f32 {
        self.left
    }

    /// Returns the right bound.
    pub fn right(&self) -> f32 {
        self.right
    }

    /// Returns the bottom bound.
    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    /// Returns the top bound.
    pub fn top(&self) -> f32 {
        self.top
    }

    /// Horizontal extent of the region.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Vertical extent of the region.
    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// Returns `true` if `p` lies inside the region or on its boundary.
    pub fn contains(&self, p: Point) -> bool {
        self.outcode(p).is_empty()
    }

    /// Classifies `p` against the four half-planes of the region.
    pub fn outcode(&self, p: Point) -> Outcode {
        let mut code = Outcode::empty();

        if p.x < self.left {
            code |= Outcode::LEFT;
        } else if p.x > self.right {
            code |= Outcode::RIGHT;
        }
        if p.y < self.bottom {
            code |= Outcode::BOTTOM;
        } else if p.y > self.top {
            code |= Outcode::TOP;
        }

        code
    }

    /// Clips the segment `p0 -> p1` to the region (Cohen-Sutherland).
    ///
    /// Endpoints outside the region are moved onto the boundary they cross,
    /// TOP first, then BOTTOM, RIGHT and LEFT. A segment already inside the
    /// region is returned unchanged.
    ///
    /// # Returns
    ///
    /// `Some(segment)` with the visible part, or `None` if nothing of the
    /// segment lies inside the region.
    pub fn clip_segment(&self, p0: Point, p1: Point) -> Option<Segment> {
        let (mut p0, mut p1) = (p0, p1);
        let mut code0 = self.outcode(p0);
        let mut code1 = self.outcode(p1);

        loop {
            if code0.is_empty() && code1.is_empty() {
                return Some(Segment::new(p0, p1));
            }
            if code0.intersects(code1) {
                return None;
            }

            let clip_start = !code0.is_empty();
            let code_out = if clip_start { code0 } else { code1 };
            let crossing = self.boundary_crossing(p0, p1, code_out)?;

            if clip_start {
                p0 = crossing;
                code0 = self.outcode(p0);
            } else {
                p1 = crossing;
                code1 = self.outcode(p1);
            }
        }
    }

    /// Intersection of the line through `p0` and `p1` with the boundary
    /// selected by `code`. `None` when the line is parallel to that boundary.
    fn boundary_crossing(&self, p0: Point, p1: Point, code: Outcode) -> Option<Point> {
        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;

        if code.contains(Outcode::TOP) {
            if dy == 0.0 {
                return None;
            }
            Some(Point::new(p0.x + dx * (self.top - p0.y) / dy, self.top))
        } else if code.contains(Outcode::BOTTOM) {
            if dy == 0.0 {
                return None;
            }
            Some(Point::new(p0.x + dx * (self.bottom - p0.y) / dy, self.bottom))
        } else if code.contains(Outcode::RIGHT) {
            if dx == 0.0 {
                return None;
            }
            Some(Point::new(self.right, p0.y + dy * (self.right - p0.x) / dx))
        } else if code.contains(Outcode::LEFT) {
            if dx == 0.0 {
                return None;
            }
            Some(Point::new(self.left, p0.y + dy * (self.left - p0.x) / dx))
        } else {
            None
        }
    }
}

/// `[left, right, bottom, top]`, validated like [`ClipRegion::new`].
impl TryFrom<[f32; 4]> for ClipRegion {
    type Error = GeometryError;

    fn try_from(bounds: [f32; 4]) -> Result<Self, Self::Error> {
        let [left, right, bottom, top] = bounds;
        ClipRegion::new(left, right, bottom, top)
    }
}

impl From<ClipRegion> for [f32; 4] {
    fn from(region: ClipRegion) -> Self {
        [region.left, region.right, region.bottom, region.top]
    }
}

impl fmt::Display for ClipRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ClipRegion (x: [{:.1}, {:.1}], y: [{:.1}, {:.1}])",
            self.left, self.right, self.bottom, self.top
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f32 = 1e-4;

    fn office_region() -> ClipRegion {
        ClipRegion::new(-750.0, 550.0, -550.0, 600.0).unwrap()
    }

    fn unit_region() -> ClipRegion {
        ClipRegion::new(0.0, 10.0, 0.0, 10.0).unwrap()
    }

    fn assert_point_eq(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < EPSILON && (actual.y - expected.y).abs() < EPSILON,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_distance() {
        assert!((distance(Point::ORIGIN, Point::new(3.0, 4.0)) - 5.0).abs() < EPSILON);
        assert_eq!(distance(Point::new(2.0, 2.0), Point::new(2.0, 2.0)), 0.0);
        // Nearest exit from the origin in the office layout.
        assert!((distance(Point::ORIGIN, Point::new(550.0, -50.0)) - 552.268).abs() < 1e-2);
        assert!((distance(Point::ORIGIN, Point::new(-750.0, 300.0)) - 807.775).abs() < 1e-2);
    }

    #[test]
    fn test_step_toward() {
        let p = Point::ORIGIN.step_toward(Point::new(10.0, 0.0), 1.0);
        assert_eq!(p, Point::new(1.0, 0.0));

        let p = Point::ORIGIN.step_toward(Point::new(3.0, 4.0), 2.5);
        assert_point_eq(p, Point::new(1.5, 2.0));

        // Within reach: lands exactly on the target.
        let target = Point::new(0.3, -0.4);
        assert_eq!(Point::ORIGIN.step_toward(target, 1.0), target);
    }

    #[test]
    fn test_region_constructor_invalid() {
        assert!(matches!(
            ClipRegion::new(10.0, 0.0, 0.0, 10.0),
            Err(GeometryError::InvalidRegion("left must be less than right"))
        ));
        assert!(matches!(
            ClipRegion::new(0.0, 10.0, 5.0, 5.0),
            Err(GeometryError::InvalidRegion("bottom must be less than top"))
        ));
        assert!(matches!(
            ClipRegion::new(f32::NEG_INFINITY, 10.0, 0.0, 10.0),
            Err(GeometryError::InvalidRegion(_))
        ));
    }

    #[test]
    fn test_region_from_bounds_array() {
        let region = ClipRegion::try_from([-750.0, 550.0, -550.0, 600.0]).unwrap();
        assert_eq!(region, office_region());
        assert_eq!(<[f32; 4]>::from(region), [-750.0, 550.0, -550.0, 600.0]);

        assert_eq!(
            ClipRegion::try_from([600.0, 500.0, -550.0, 600.0]),
            Err(GeometryError::InvalidRegion("left must be less than right"))
        );
        assert!(ClipRegion::try_from([0.0, 1.0, f32::NAN, 1.0]).is_err());
    }

    #[test]
    fn test_outcode_bits() {
        let region = office_region();
        assert_eq!(region.outcode(Point::ORIGIN), Outcode::empty());
        assert_eq!(region.outcode(Point::new(-800.0, 0.0)), Outcode::LEFT);
        assert_eq!(region.outcode(Point::new(600.0, 0.0)), Outcode::RIGHT);
        assert_eq!(region.outcode(Point::new(0.0, -600.0)), Outcode::BOTTOM);
        assert_eq!(region.outcode(Point::new(0.0, 700.0)), Outcode::TOP);
        assert_eq!(
            region.outcode(Point::new(-800.0, 700.0)),
            Outcode::LEFT | Outcode::TOP
        );
        assert_eq!(
            region.outcode(Point::new(600.0, -600.0)),
            Outcode::RIGHT | Outcode::BOTTOM
        );
        assert_eq!(Outcode::LEFT.bits(), 1);
        assert_eq!(Outcode::RIGHT.bits(), 2);
        assert_eq!(Outcode::BOTTOM.bits(), 4);
        assert_eq!(Outcode::TOP.bits(), 8);
    }

    #[test]
    fn test_outcode_boundary_is_inside() {
        let region = office_region();
        assert!(region.contains(Point::new(-750.0, 0.0)));
        assert!(region.contains(Point::new(550.0, 0.0)));
        assert!(region.contains(Point::new(0.0, -550.0)));
        assert!(region.contains(Point::new(0.0, 600.0)));
        assert!(region.contains(Point::new(-750.0, 600.0)));
    }

    #[test]
    fn test_clip_inside_unchanged() {
        let region = office_region();
        let p0 = Point::new(-550.0, 600.0);
        let p1 = Point::new(550.0, 600.0);
        assert_eq!(region.clip_segment(p0, p1), Some(Segment::new(p0, p1)));
    }

    #[test]
    fn test_clip_horizontal_both_sides() {
        let region = office_region();
        let clipped = region
            .clip_segment(Point::new(-1000.0, 0.0), Point::new(1000.0, 0.0))
            .unwrap();
        assert_eq!(clipped, Segment::new(Point::new(-750.0, 0.0), Point::new(550.0, 0.0)));
    }

    #[test]
    fn test_clip_vertical_both_sides() {
        let region = office_region();
        let clipped = region
            .clip_segment(Point::new(0.0, -1000.0), Point::new(0.0, 1000.0))
            .unwrap();
        assert_eq!(clipped, Segment::new(Point::new(0.0, -550.0), Point::new(0.0, 600.0)));
    }

    #[test]
    fn test_clip_diagonal_entering_left() {
        let region = unit_region();
        let clipped = region
            .clip_segment(Point::new(-5.0, 0.0), Point::new(5.0, 10.0))
            .unwrap();
        assert_point_eq(clipped.start, Point::new(0.0, 5.0));
        assert_point_eq(clipped.end, Point::new(5.0, 10.0));
    }

    #[test]
    fn test_clip_corner_outcode_clips_top_first() {
        let region = unit_region();
        // End point is both RIGHT and TOP of the region.
        let clipped = region
            .clip_segment(Point::new(5.0, 5.0), Point::new(15.0, 25.0))
            .unwrap();
        assert_point_eq(clipped.start, Point::new(5.0, 5.0));
        assert_point_eq(clipped.end, Point::new(7.5, 10.0));
    }

    #[test]
    fn test_clip_rejects_same_side() {
        let region = office_region();
        assert_eq!(
            region.clip_segment(Point::new(-900.0, -100.0), Point::new(-800.0, 100.0)),
            None
        );
        assert_eq!(
            region.clip_segment(Point::new(0.0, 700.0), Point::new(100.0, 650.0)),
            None
        );
    }

    #[test]
    fn test_clip_rejects_segment_missing_corner() {
        let region = unit_region();
        // Starts LEFT, ends TOP: no trivial reject, but the line passes
        // above the top-left corner.
        assert_eq!(
            region.clip_segment(Point::new(-5.0, 8.0), Point::new(3.0, 16.0)),
            None
        );
    }

    #[test]
    fn test_clip_is_idempotent() {
        let region = office_region();
        let segments = [
            (Point::new(-1000.0, -700.0), Point::new(800.0, 900.0)),
            (Point::new(-760.0, 300.0), Point::new(0.0, 0.0)),
            (Point::new(100.0, 650.0), Point::new(200.0, -600.0)),
        ];
        for (p0, p1) in segments {
            let first = region.clip_segment(p0, p1).unwrap();
            let second = region.clip_segment(first.start, first.end).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_boundary_crossing_parallel_is_none() {
        let region = unit_region();
        // Horizontal line above the region never meets TOP.
        let p0 = Point::new(-5.0, 12.0);
        let p1 = Point::new(15.0, 12.0);
        assert_eq!(region.boundary_crossing(p0, p1, Outcode::TOP), None);
        // Vertical line right of the region never meets RIGHT.
        let p0 = Point::new(12.0, -5.0);
        let p1 = Point::new(12.0, 15.0);
        assert_eq!(region.boundary_crossing(p0, p1, Outcode::RIGHT), None);
        assert_eq!(region.boundary_crossing(p0, p1, Outcode::empty()), None);
    }

    #[test]
    fn test_display() {
        let region = unit_region();
        let s = format!("{}", region);
        assert!(s.contains("ClipRegion"));
        assert_eq!(format!("{}", Point::new(1.0, -2.0)), "(1.0, -2.0)");
    }
}
