// Copyright 2025 Lars Brubaker
// License: MIT
//
// Intersection records of one clip segment against a polygon boundary.

use crate::geom::{cross_product, segment_intersect, sign, Point, SegmentIntersection};

/// What happens to the segment at a record.
///
/// Overlaps with the boundary come as start/end pairs. A touch overlap has
/// the boundary arrive and leave on the same side of the segment; a cross
/// overlap has it pass through. The declaration order is the tie-break when
/// records share a point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Kind {
    TouchStart,
    CrossStart,
    Crossing,
    TouchEnd,
    CrossEnd,
}

impl Kind {
    #[inline]
    pub fn is_start(self) -> bool {
        matches!(self, Kind::TouchStart | Kind::CrossStart)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Record {
    pub point: Point,
    pub kind: Kind,
}

impl Record {
    #[inline]
    fn new(point: Point, kind: Kind) -> Self {
        Record { point, kind }
    }
}

/// Which input supplied an end of an overlap.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Source {
    SegmentStart,
    SegmentEnd,
    EdgeStart,
    EdgeEnd,
}

/// Overlap of collinear segments `p1 -> p2` and `a -> b`, oriented like the
/// first one. Reports which endpoint each end of the overlap came from.
fn coincide(p1: Point, p2: Point, a: Point, b: Point) -> (Source, Source) {
    let key = |p: Point| if p1.x == p2.x { p.y } else { p.x };
    let point = |s: Source| match s {
        Source::SegmentStart => p1,
        Source::SegmentEnd => p2,
        Source::EdgeStart => a,
        Source::EdgeEnd => b,
    };

    let (mut s1, mut e1) = (Source::SegmentStart, Source::SegmentEnd);
    let swapped = key(p1) > key(p2);
    if swapped {
        core::mem::swap(&mut s1, &mut e1);
    }
    let (mut s2, mut e2) = (Source::EdgeStart, Source::EdgeEnd);
    if key(a) > key(b) {
        core::mem::swap(&mut s2, &mut e2);
    }

    let mut r1 = if key(point(s1)) < key(point(s2)) { s2 } else { s1 };
    let mut r2 = if key(point(e1)) < key(point(e2)) { e1 } else { e2 };
    if swapped {
        core::mem::swap(&mut r1, &mut r2);
    }
    (r1, r2)
}

/// Collects the records of `p1 -> p2` against the ring `poly`, plus the
/// synthetic ones bounding the segment itself, sorted along the segment.
pub(crate) fn collect(poly: &[Point], p1: Point, p2: Point, records: &mut Vec<Record>) {
    records.clear();
    let n = poly.len();
    let side = |p: Point| cross_product(p1, p2, p);

    let mut need_start = true;
    let mut need_end = true;
    let mut ends = n;
    let mut i = 0;
    while i < ends {
        let next = (i + 1) % n;
        match segment_intersect(p1, p2, poly[i], poly[next]) {
            SegmentIntersection::None | SegmentIntersection::AtSecondStart(_) => {}
            SegmentIntersection::Crossing(p) => records.push(Record::new(p, Kind::Crossing)),
            SegmentIntersection::AtSecondEnd(p) => {
                // Through a vertex only if its neighbours are on opposite sides.
                if sign(side(poly[i])) * sign(side(poly[(next + 1) % n])) < 0 {
                    records.push(Record::new(p, Kind::Crossing));
                }
            }
            SegmentIntersection::Collinear => {
                // Extend over every following vertex on the line.
                let mut l = i;
                let mut r = next + 1;
                while r != ends && r < n && side(poly[r]) == 0 {
                    r += 1;
                }
                r -= 1;
                if l == 0 {
                    // The run may also wrap around the start of the ring; the
                    // wrapped part is handled here and skipped at the end.
                    l = n - 1;
                    while l > r && side(poly[l]) == 0 {
                        l -= 1;
                    }
                    ends = l + 1;
                    l = (l + 1) % n;
                }

                let (c1, c2) = coincide(p1, p2, poly[l], poly[r]);
                let point = |s: Source| match s {
                    Source::SegmentStart => p1,
                    Source::SegmentEnd => p2,
                    Source::EdgeStart => poly[l],
                    Source::EdgeEnd => poly[r],
                };
                let before = poly[(l + n - 1) % n];
                let after = poly[(r + 1) % n];
                let (start, end) = if sign(side(before)) * sign(side(after)) > 0 {
                    (Kind::TouchStart, Kind::TouchEnd)
                } else {
                    (Kind::CrossStart, Kind::CrossEnd)
                };
                records.push(Record::new(point(c1), start));
                records.push(Record::new(point(c2), end));

                if c1 == Source::SegmentStart {
                    need_start = false;
                }
                if c2 == Source::SegmentEnd {
                    need_end = false;
                }
                if r > i {
                    i = r - 1;
                }
            }
        }
        i += 1;
    }

    if need_start {
        // Empty overlap at p1 so the walk starts with a resolved state.
        records.push(Record::new(p1, Kind::TouchStart));
        records.push(Record::new(p1, Kind::TouchEnd));
    }
    if need_end {
        records.push(Record::new(p2, Kind::Crossing));
    }

    let x_ascending = p1.x <= p2.x;
    let y_ascending = p1.y <= p2.y;
    records.sort_by(|a, b| {
        let x = if x_ascending {
            a.point.x.cmp(&b.point.x)
        } else {
            b.point.x.cmp(&a.point.x)
        };
        let y = if y_ascending {
            a.point.y.cmp(&b.point.y)
        } else {
            b.point.y.cmp(&a.point.y)
        };
        x.then(y).then(a.kind.cmp(&b.kind))
    });
}

/// Whether a point moved from `p1` toward `p2` by an infinitely small step
/// lies inside `poly` (even-odd rule).
pub(crate) fn inside_with_direction(poly: &[Point], p1: Point, p2: Point) -> bool {
    let n = poly.len();
    let dx = sign(p2.x as i64 - p1.x as i64);
    let dy = sign(p2.y as i64 - p1.y as i64);
    let ahead = |p: Point| {
        dx == sign(p.x as i64 - p1.x as i64) && dy == sign(p.y as i64 - p1.y as i64)
    };

    let mut inside = false;
    for i in 0..n {
        let a = poly[i];
        let b = poly[(i + 1) % n];
        let c1 = cross_product(p1, p2, a);
        let c2 = cross_product(p1, p2, b);
        if c1 == 0 && c2 == 0 {
            continue;
        }
        if c1 == 0 {
            if c2 > 0 && ahead(a) {
                inside = !inside;
            }
            continue;
        }
        if c2 == 0 {
            if c1 > 0 && ahead(b) {
                inside = !inside;
            }
            continue;
        }
        if sign(c1) == sign(c2) {
            continue;
        }
        let turn = (p2.x as i64 - p1.x as i64) * (b.y as i64 - a.y as i64)
            - (b.x as i64 - a.x as i64) * (p2.y as i64 - p1.y as i64);
        if sign(turn) == sign(cross_product(a, b, p1)) {
            inside = !inside;
        }
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn overlap_keeps_segment_direction() {
        let (c1, c2) = coincide(p(0, 0), p(10, 0), p(3, 0), p(12, 0));
        assert_eq!((c1, c2), (Source::EdgeStart, Source::SegmentEnd));
        let (c1, c2) = coincide(p(10, 0), p(0, 0), p(3, 0), p(12, 0));
        assert_eq!((c1, c2), (Source::SegmentStart, Source::EdgeStart));
        let (c1, c2) = coincide(p(5, 8), p(5, 2), p(5, 0), p(5, 4));
        assert_eq!((c1, c2), (Source::EdgeEnd, Source::SegmentEnd));
    }

    #[test]
    fn records_sorted_along_segment() {
        let square = [p(0, 0), p(0, 2), p(2, 2), p(2, 0)];
        let mut records = Vec::new();
        collect(&square, p(3, 1), p(-1, 1), &mut records);
        let kinds: Vec<(Point, Kind)> = records.iter().map(|r| (r.point, r.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (p(3, 1), Kind::TouchStart),
                (p(3, 1), Kind::TouchEnd),
                (p(2, 1), Kind::Crossing),
                (p(0, 1), Kind::Crossing),
                (p(-1, 1), Kind::Crossing),
            ]
        );
    }

    #[test]
    fn probe_direction() {
        let square = [p(0, 0), p(0, 2), p(2, 2), p(2, 0)];
        assert!(inside_with_direction(&square, p(0, 1), p(3, 1)));
        assert!(!inside_with_direction(&square, p(0, 1), p(-3, 1)));
        assert!(inside_with_direction(&square, p(1, 1), p(5, 5)));
    }
}
