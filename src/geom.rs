// Copyright 2025 Lars Brubaker
// License: MIT
//
// Exact integer geometric primitives shared by every splitter.
//
// Coordinates are 32-bit; every product is evaluated in 64-bit (or 128-bit for
// area sums) so orientation tests never lose precision.

use core::fmt;

/// Integer point, also used as a vector for cross and dot products.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };
    /// Sentinel for "no point".
    pub const INVALID: Point = Point {
        x: i32::MAX,
        y: i32::MAX,
    };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.x != i32::MAX || self.y != i32::MAX
    }

    #[inline]
    pub fn offset(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned integer box. `top` is the smaller y.
///
/// [`Rect::INVALID`] is the empty box: combining it with any point yields the
/// box of that single point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Default for Rect {
    fn default() -> Self {
        Rect::INVALID
    }
}

impl Rect {
    pub const INVALID: Rect = Rect {
        left: i32::MAX,
        top: i32::MAX,
        right: i32::MIN,
        bottom: i32::MIN,
    };

    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Rect {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Bounding box of a point sequence; `INVALID` for an empty slice.
    pub fn from_points(points: &[Point]) -> Self {
        let mut r = Rect::INVALID;
        for p in points {
            r.combine_point(*p);
        }
        r
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.left <= self.right && self.top <= self.bottom
    }

    #[inline]
    pub fn width(&self) -> i64 {
        self.right as i64 - self.left as i64
    }

    #[inline]
    pub fn height(&self) -> i64 {
        self.bottom as i64 - self.top as i64
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            ((self.left as i64 + self.right as i64) / 2) as i32,
            ((self.top as i64 + self.bottom as i64) / 2) as i32,
        )
    }

    #[inline]
    pub fn combine_point(&mut self, p: Point) {
        if p.x < self.left {
            self.left = p.x;
        }
        if p.y < self.top {
            self.top = p.y;
        }
        if p.x > self.right {
            self.right = p.x;
        }
        if p.y > self.bottom {
            self.bottom = p.y;
        }
    }

    /// Grows to cover `r`. An invalid `r` leaves the box unchanged.
    #[inline]
    pub fn combine_rect(&mut self, r: Rect) {
        if !r.is_valid() {
            return;
        }
        self.combine_point(Point::new(r.left, r.top));
        self.combine_point(Point::new(r.right, r.bottom));
    }

    /// Strict overlap: boxes that only share an edge do not intersect.
    #[inline]
    pub fn intersects(&self, r: &Rect) -> bool {
        self.left < r.right && self.top < r.bottom && self.right > r.left && self.bottom > r.top
    }

    /// Closed overlap: boxes sharing an edge or a corner still touch.
    #[inline]
    pub fn touches(&self, r: &Rect) -> bool {
        self.left.max(r.left) <= self.right.min(r.right)
            && self.top.max(r.top) <= self.bottom.min(r.bottom)
    }

    #[inline]
    pub fn contains_rect(&self, r: &Rect) -> bool {
        r.left >= self.left && r.right <= self.right && r.top >= self.top && r.bottom <= self.bottom
    }

    /// Half-open containment: right and bottom edges are outside.
    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.left && p.y >= self.top && p.x < self.right && p.y < self.bottom
    }
}

/// Integer division rounding toward negative infinity. `b` must be positive.
#[inline]
pub fn floor_div(a: i32, b: i32) -> i32 {
    debug_assert!(b > 0);
    a / b - if a % b < 0 { 1 } else { 0 }
}

/// Remainder matching [`floor_div`]; always in `0..b`.
#[inline]
pub fn floor_mod(a: i32, b: i32) -> i32 {
    debug_assert!(b > 0);
    a % b + if a % b < 0 { b } else { 0 }
}

/// `(a - origin) x (b - origin)`: twice the signed area of the triangle.
#[inline]
pub fn cross_product(origin: Point, a: Point, b: Point) -> i64 {
    let x1 = a.x as i64 - origin.x as i64;
    let y1 = a.y as i64 - origin.y as i64;
    let x2 = b.x as i64 - origin.x as i64;
    let y2 = b.y as i64 - origin.y as i64;
    x1 * y2 - x2 * y1
}

#[inline]
pub fn sign(x: i64) -> i32 {
    match x {
        0 => 0,
        x if x > 0 => 1,
        _ => -1,
    }
}

/// True if `query` lies inside the bounding box of the segment. Only
/// meaningful once `query` is known to be collinear with it.
#[inline]
pub fn is_between(line_start: Point, line_end: Point, query: Point) -> bool {
    let dy = sign(query.y as i64 - line_start.y as i64) * sign(query.y as i64 - line_end.y as i64);
    let dx = sign(query.x as i64 - line_start.x as i64) * sign(query.x as i64 - line_end.x as i64);
    dy <= 0 && dx <= 0
}

/// How a second segment meets a first one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SegmentIntersection {
    None,
    /// Both segments lie on one line and their ranges overlap (possibly in a
    /// single point).
    Collinear,
    /// The segments cross; the point is not an endpoint of the second segment.
    Crossing(Point),
    /// The first segment passes through the start of the second one.
    AtSecondStart(Point),
    /// The first segment passes through the end of the second one.
    AtSecondEnd(Point),
}

/// Classifies how segment `b0 -> b1` meets segment `a0 -> a1`.
///
/// The first segment must not have zero length. A crossing point is rounded
/// toward zero onto the integer grid.
pub fn segment_intersect(a0: Point, a1: Point, b0: Point, b1: Point) -> SegmentIntersection {
    let cross1 = cross_product(a0, a1, b0);
    let cross2 = cross_product(a0, a1, b1);
    if cross1 == 0 && cross2 == 0 {
        let (mut c1, mut c2, mut c3, mut c4) = if a0.x == a1.x {
            (a0.y, a1.y, b0.y, b1.y)
        } else {
            (a0.x, a1.x, b0.x, b1.x)
        };
        if c1 > c2 {
            core::mem::swap(&mut c1, &mut c2);
        }
        if c3 > c4 {
            core::mem::swap(&mut c3, &mut c4);
        }
        return if c1.max(c3) <= c2.min(c4) {
            SegmentIntersection::Collinear
        } else {
            SegmentIntersection::None
        };
    }

    if cross1 == 0 {
        return if is_between(a0, a1, b0) {
            SegmentIntersection::AtSecondStart(b0)
        } else {
            SegmentIntersection::None
        };
    }

    if cross2 == 0 {
        return if is_between(a0, a1, b1) {
            SegmentIntersection::AtSecondEnd(b1)
        } else {
            SegmentIntersection::None
        };
    }

    if sign(cross1) * sign(cross2) > 0 {
        return SegmentIntersection::None;
    }

    let denom = (cross2 - cross1) as f64;
    let x = (b0.x as f64 * cross2 as f64 - b1.x as f64 * cross1 as f64) / denom;
    let y = (b0.y as f64 * cross2 as f64 - b1.y as f64 * cross1 as f64) / denom;
    let p = Point::new(x as i32, y as i32);
    if is_between(a0, a1, p) {
        SegmentIntersection::Crossing(p)
    } else {
        SegmentIntersection::None
    }
}

/// Twice the signed shoelace area. Positive for the winding the tile
/// splitter treats as canonical.
pub fn signed_area2(points: &[Point]) -> i128 {
    let n = points.len();
    if n < 3 {
        return 0;
    }
    let mut sum: i128 = 0;
    let mut p = n - 1;
    for q in 0..n {
        sum += points[p].x as i128 * points[q].y as i128 - points[q].x as i128 * points[p].y as i128;
        p = q;
    }
    sum
}

/// Absolute polygon area, truncated to an integer.
pub fn area(points: &[Point]) -> i64 {
    (signed_area2(points) / 2).unsigned_abs() as i64
}
