// Copyright 2025 Lars Brubaker
// License: MIT
//
// Polyline/polygon boolean splitter.
//
// Clips a polyline against a polygon boundary and reports the parts lying
// inside (or outside) it. The boundary may be self-intersecting; inside is
// decided by the even-odd rule. Stretches where the polyline runs along the
// boundary count as inside. Touching the boundary at a vertex or grazing an
// edge is an ordinary case, not an error.

mod intersections;

use self::intersections::{collect, inside_with_direction, Kind, Record};
use crate::geom::{Point, Rect};
use crate::polygon::Polygon;
use crate::sink::SplitSink;

/// Which side of the boundary to keep.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Keep {
    Inside,
    Outside,
}

impl Keep {
    #[inline]
    fn inside(self) -> bool {
        self == Keep::Inside
    }
}

/// Boolean splitter. Holds scratch buffers only, so one instance should be
/// reused across calls.
#[derive(Debug, Default)]
pub struct PolylinePolygonSplitter {
    records: Vec<Record>,
    spans: Vec<Point>,
    segment: Vec<Point>,
    run: Vec<Point>,
}

impl PolylinePolygonSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits every maximal part of `polyline` on the `keep` side of
    /// `polygon`, in traversal order.
    ///
    /// Parts of consecutive segments that meet at the shared polyline vertex
    /// are joined into one run. Zero-length parts are never emitted, and
    /// zero-length segments of the polyline are skipped. A polyline with
    /// fewer than two points or an empty polygon produces nothing.
    pub fn split<S>(&mut self, polygon: &Polygon<'_>, polyline: &[Point], keep: Keep, sink: &mut S)
    where
        S: SplitSink + ?Sized,
    {
        let ring = polygon.points();
        if ring.is_empty() || polyline.len() < 2 {
            return;
        }
        let bbox = Rect::from_points(ring);

        let run = &mut self.run;
        run.clear();
        for pair in polyline.windows(2) {
            clip_segment(
                ring,
                &bbox,
                pair[0],
                pair[1],
                keep,
                &mut self.records,
                &mut self.spans,
                &mut self.segment,
            );
            let parts = &self.segment[..];

            let mut cur = 0;
            if let (Some(&last), Some(&first)) = (run.last(), parts.first()) {
                if last == first {
                    run.push(parts[1]);
                    cur = 2;
                }
            }
            if cur < parts.len() {
                if !run.is_empty() {
                    sink.emit(&run[..]);
                    run.clear();
                }
                // Every part but the last is complete; the last may continue
                // into the next segment.
                let last = parts.len() - 2;
                for part in parts[cur..last].chunks_exact(2) {
                    sink.emit(part);
                }
                run.extend_from_slice(&parts[last..]);
            }
        }
        if !run.is_empty() {
            sink.emit(&run[..]);
        }
    }
}

/// Clips the single segment `p1 -> p2`. The kept parts are written to `out`
/// as point pairs; touching parts are already merged and empty ones dropped.
#[allow(clippy::too_many_arguments)]
fn clip_segment(
    ring: &[Point],
    bbox: &Rect,
    p1: Point,
    p2: Point,
    keep: Keep,
    records: &mut Vec<Record>,
    spans: &mut Vec<Point>,
    out: &mut Vec<Point>,
) {
    out.clear();
    if p1 == p2 {
        return;
    }
    let keep_inside = keep.inside();
    if !bbox.touches(&Rect::from_points(&[p1, p2])) {
        if !keep_inside {
            out.push(p1);
            out.push(p2);
        }
        return;
    }

    collect(ring, p1, p2, records);

    spans.clear();
    let len = records.len();
    let mut inside = true;
    let mut i = 0;
    while i + 1 < len {
        let mut next = i + 1;
        if !records[i].kind.is_start() {
            if inside == keep_inside {
                spans.push(records[i].point);
                spans.push(records[next].point);
            }
            if records[next].kind == Kind::Crossing {
                inside = !inside;
            }
        } else {
            // Skip to the end of this overlap, nested ones included.
            let mut depth = 1;
            while next < len && depth > 0 {
                match records[next].kind {
                    Kind::Crossing => inside = !inside,
                    Kind::TouchStart | Kind::CrossStart => depth += 1,
                    Kind::TouchEnd => depth -= 1,
                    Kind::CrossEnd => {
                        depth -= 1;
                        inside = !inside;
                    }
                }
                next += 1;
            }
            next -= 1;
            if keep_inside {
                spans.push(records[i].point);
                spans.push(records[next].point);
            }
            if i == 0 {
                // The walk starts on the boundary; probe just past p1.
                inside = inside_with_direction(ring, p1, p2);
            }
        }
        i = next;
    }

    let mut i = 0;
    while i + 1 < spans.len() {
        if spans[i] == spans[i + 1] {
            i += 2;
            continue;
        }
        let mut j = i + 2;
        while j < spans.len() && spans[j - 1] == spans[j] {
            j += 2;
        }
        out.push(spans[i]);
        out.push(spans[j - 1]);
        i = j;
    }
}
