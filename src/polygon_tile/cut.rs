// Copyright 2025 Lars Brubaker
// License: MIT
//
// Cutting a polygon ring in two along an axis-parallel line.

use crate::geom::Point;
use crate::polygon::MutablePolygon;

/// Orientation of a cut line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Axis {
    /// The line `x = c`.
    Vertical,
    /// The line `y = c`.
    Horizontal,
}

impl Axis {
    /// Coordinate compared against the cut value.
    #[inline]
    pub fn across(self, p: Point) -> i32 {
        match self {
            Axis::Vertical => p.x,
            Axis::Horizontal => p.y,
        }
    }

    /// Coordinate measured along the cut line.
    #[inline]
    pub fn along(self, p: Point) -> i32 {
        match self {
            Axis::Vertical => p.y,
            Axis::Horizontal => p.x,
        }
    }

    #[inline]
    fn point(self, across: i32, along: i32) -> Point {
        match self {
            Axis::Vertical => Point::new(across, along),
            Axis::Horizontal => Point::new(along, across),
        }
    }
}

const BELOW: u8 = 1;
const ABOVE: u8 = 2;
const ON: u8 = BELOW | ABOVE;

#[inline]
fn side(axis: Axis, cut: i32, p: Point) -> u8 {
    let c = axis.across(p);
    if c < cut {
        BELOW
    } else if c > cut {
        ABOVE
    } else {
        ON
    }
}

/// Point where segment `a`-`b` meets the cut line. Computed from the end
/// with the smaller coordinate so both directions round alike.
fn intersection(axis: Axis, cut: i32, a: Point, b: Point) -> Point {
    let (lo, hi) = if axis.across(a) < axis.across(b) {
        (a, b)
    } else {
        (b, a)
    };
    let d_along = axis.along(hi) as i128 - axis.along(lo) as i128;
    let d_across = axis.across(hi) as i128 - axis.across(lo) as i128;
    let along =
        axis.along(lo) as i128 + d_along * (cut as i128 - axis.across(lo) as i128) / d_across;
    axis.point(cut, along as i32)
}

/// Walks the ring once and distributes it into `below` (coordinates less
/// than `cut`) and `above`. Crossing points go into both outputs, vertices on
/// the line into the side the walk is leaving toward. A ring entirely on one
/// side is copied whole.
///
/// The outputs may be weak-simple: several loops joined at points on the
/// cut line.
pub(crate) fn split_along(
    points: &[Point],
    axis: Axis,
    cut: i32,
    below: &mut MutablePolygon,
    above: &mut MutablePolygon,
) {
    let n = points.len();
    if n == 0 {
        return;
    }

    let mut p1 = 0;
    let mut p2 = 0;
    let mut s1 = side(axis, cut, points[p1]);

    loop {
        p2 += 1;
        if p2 == n {
            p2 = 0;
        }
        let s2 = side(axis, cut, points[p2]);

        if s1 & s2 != 0 {
            if s2 != ON {
                s1 = s2;
            }
        } else {
            let (into, other) = if s2 == ABOVE {
                (&mut *below, &mut *above)
            } else {
                (&mut *above, &mut *below)
            };

            let end = if p2 == 0 { n } else { p2 };
            for &p in &points[p1..end] {
                into.add_unique_point(p);
            }
            p1 = end - 1;

            if axis.across(points[p1]) == cut {
                other.add_unique_point(points[p1]);
            } else {
                let x = intersection(axis, cut, points[p1], points[p2]);
                below.add_unique_point(x);
                above.add_unique_point(x);
            }

            p1 = p2;
            s1 = side(axis, cut, points[p1]);
        }

        if p2 == 0 {
            break;
        }
    }

    let rest = if s1 & BELOW != 0 {
        &mut *below
    } else {
        &mut *above
    };
    if rest.is_empty() {
        rest.assign_points(points);
    } else {
        let stop = if axis.across(points[0]) == cut { 1 % n } else { 0 };
        while p1 != stop {
            rest.add_unique_point(points[p1]);
            p1 += 1;
            if p1 == n {
                p1 = 0;
            }
        }
    }

    for out in [below, above] {
        if !out.is_empty() && out.first_point() == out.last_point() {
            out.remove_last_point();
        }
    }
}
