// Copyright 2025 Lars Brubaker
// License: MIT
//
// Label placement: finds the point of a polygon set farthest from every
// boundary, by quadtree refinement of candidate cells.

use core::f64::consts::SQRT_2;
use core::mem;

use log::debug;

use crate::error::SplitError;
use crate::geom::{Point, Rect};
use crate::polygon::Polygon;

/// Best label position found by [`PolygonMarker::find_central_point`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MarkPoint {
    pub center: Point,
    /// Distance from `center` to the nearest boundary, truncated. Negative
    /// when no interior point was found.
    pub radius: i64,
}

#[derive(Copy, Clone, Debug)]
struct Cell {
    center: Point,
    half_size: i32,
    /// Signed distance to the boundary, positive inside.
    distance: i64,
    /// Upper bound of `distance` anywhere in the cell.
    potential_max: i64,
}

impl Cell {
    fn new(polygons: &[Polygon<'_>], center: Point, half_size: i32) -> Self {
        let d = boundary_distance(polygons, center);
        let distance = if contains(polygons, center) { d } else { -d };
        Cell {
            center,
            half_size,
            distance,
            potential_max: distance + (half_size as f64 * SQRT_2) as i64,
        }
    }
}

/// Search state for label placement. Candidate buffers are kept between
/// calls.
#[derive(Debug)]
pub struct PolygonMarker {
    precision: i64,
    current: Vec<Cell>,
    next: Vec<Cell>,
}

impl Default for PolygonMarker {
    fn default() -> Self {
        PolygonMarker {
            precision: 1,
            current: Vec::new(),
            next: Vec::new(),
        }
    }
}

impl PolygonMarker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells whose bound beats the best distance by no more than `precision`
    /// are not refined further. Must be at least 1.
    pub fn set_precision(&mut self, precision: i32) -> Result<(), SplitError> {
        if precision < 1 {
            return Err(SplitError::InvalidPrecision(precision));
        }
        self.precision = precision as i64;
        Ok(())
    }

    pub fn precision(&self) -> i32 {
        self.precision as i32
    }

    /// Finds the point inside `polygons` farthest from every edge. The rings
    /// are combined with the even-odd rule, so holes are passed as extra
    /// rings in any orientation.
    ///
    /// Returns `None` when the rings hold no points.
    pub fn find_central_point(&mut self, polygons: &[Polygon<'_>]) -> Option<MarkPoint> {
        let mut bbox = Rect::INVALID;
        for polygon in polygons {
            bbox.combine_rect(polygon.bounding_box());
        }
        if !bbox.is_valid() {
            return None;
        }

        let half_size =
            i32::try_from((bbox.width().max(bbox.height()) + 1) / 2).unwrap_or(i32::MAX);
        let mut best = Cell::new(polygons, bbox.center(), half_size);

        self.current.clear();
        self.next.clear();
        self.current.push(best);
        let mut refined = 0usize;

        while !self.current.is_empty() {
            // Stable, so equal bounds keep their creation order.
            self.current.sort_by_key(|c| c.potential_max);
            while let Some(cell) = self.current.pop() {
                if cell.potential_max - best.distance <= self.precision {
                    continue;
                }
                let h = ((cell.half_size as i64 + 1) / 2) as i32;
                let Point { x, y } = cell.center;
                for (sx, sy) in [(-1, -1), (1, -1), (1, 1), (-1, 1)] {
                    let center = Point::new(
                        x.saturating_add(sx * h),
                        y.saturating_add(sy * h),
                    );
                    self.next.push(Cell::new(polygons, center, h));
                }
                if cell.distance > best.distance {
                    best = cell;
                }
                refined += 1;
            }
            mem::swap(&mut self.current, &mut self.next);
        }

        debug!(
            "central point {} at distance {} after refining {} cells",
            best.center, best.distance, refined
        );
        Some(MarkPoint {
            center: best.center,
            radius: best.distance,
        })
    }
}

/// Even-odd containment over every ring.
fn contains(polygons: &[Polygon<'_>], p: Point) -> bool {
    let mut inside = false;
    for polygon in polygons {
        let pts = polygon.points();
        let n = pts.len();
        for i in 0..n {
            let a = pts[if i == 0 { n - 1 } else { i - 1 }];
            let b = pts[i];
            let (left, right) = if a.x < b.x { (a, b) } else { (b, a) };
            if (p.x > left.x) == (p.x <= right.x) && orientation(p, left, right) <= 0 {
                inside = !inside;
            }
        }
    }
    inside
}

/// `(a - p) x (b - p)` without overflow for any pair of coordinates.
fn orientation(p: Point, a: Point, b: Point) -> i128 {
    let (ax, ay) = (a.x as i128 - p.x as i128, a.y as i128 - p.y as i128);
    let (bx, by) = (b.x as i128 - p.x as i128, b.y as i128 - p.y as i128);
    ax * by - bx * ay
}

/// Distance from `p` to the nearest edge of any ring, truncated.
fn boundary_distance(polygons: &[Polygon<'_>], p: Point) -> i64 {
    let mut min = i64::MAX;
    for polygon in polygons {
        let pts = polygon.points();
        let n = pts.len();
        for i in 0..n {
            let a = pts[if i == 0 { n - 1 } else { i - 1 }];
            min = min.min(segment_distance(a, pts[i], p));
        }
    }
    min
}

/// Distance from `p` to segment `a`-`b`. The foot of the perpendicular is
/// truncated onto the integer grid.
fn segment_distance(a: Point, b: Point, p: Point) -> i64 {
    let (mut x, mut y) = (a.x as i64, a.y as i64);
    let dx = b.x as i64 - x;
    let dy = b.y as i64 - y;

    if dx != 0 || dy != 0 {
        let (dx, dy) = (dx as i128, dy as i128);
        let dot = (p.x as i64 - x) as i128 * dx + (p.y as i64 - y) as i128 * dy;
        let t = dot as f64 / (dx * dx + dy * dy) as f64;
        if t > 1.0 {
            x = b.x as i64;
            y = b.y as i64;
        } else if t > 0.0 {
            x += (dx as f64 * t) as i64;
            y += (dy as f64 * t) as i64;
        }
    }

    let ex = (p.x as i64 - x) as i128;
    let ey = (p.y as i64 - y) as i128;
    ((ex * ex + ey * ey) as f64).sqrt() as i64
}
