// Copyright 2025 Lars Brubaker
// License: MIT
//
// Polygon containers: an immutable ring that owns or borrows its points, and a
// growable accumulator used as scratch space by the splitters.

use std::borrow::Cow;

use crate::geom::{self, floor_div, Point, Rect};

/// Closed ring of points. The last point connects back to the first; there is
/// no duplicated closing point.
///
/// The points are either owned or borrowed from the caller (no-copy mode). A
/// borrowed polygon cannot outlive the buffer it was built from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Polygon<'a> {
    points: Cow<'a, [Point]>,
}

impl Polygon<'static> {
    /// Takes ownership of `points`.
    pub fn new(points: Vec<Point>) -> Self {
        Polygon {
            points: Cow::Owned(points),
        }
    }

    /// Copy of `points` in reverse order.
    pub fn from_reversed(points: &[Point]) -> Self {
        Polygon::new(points.iter().rev().copied().collect())
    }

    /// The square of grid cell (`col`, `row`), listed as
    /// (left, top), (left, bottom), (right, bottom), (right, top).
    pub fn from_grid(col: i32, row: i32, size: i32) -> Self {
        Polygon::new(grid_cell_ring(col, row, size).to_vec())
    }
}

/// Corner ring of grid cell (`col`, `row`), in [`Polygon::from_grid`] order.
pub fn grid_cell_ring(col: i32, row: i32, size: i32) -> [Point; 4] {
    let left = col * size;
    let top = row * size;
    let right = left + size;
    let bottom = top + size;
    [
        Point::new(left, top),
        Point::new(left, bottom),
        Point::new(right, bottom),
        Point::new(right, top),
    ]
}

impl<'a> Polygon<'a> {
    /// Wraps caller memory without copying.
    pub fn borrowed(points: &'a [Point]) -> Self {
        Polygon {
            points: Cow::Borrowed(points),
        }
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_point(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn point_at(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::from_points(&self.points)
    }

    /// Absolute area.
    pub fn area(&self) -> i64 {
        geom::area(&self.points)
    }

    pub fn is_borrowed(&self) -> bool {
        matches!(self.points, Cow::Borrowed(_))
    }

    /// Detach from any borrowed buffer.
    pub fn into_owned(self) -> Polygon<'static> {
        Polygon {
            points: Cow::Owned(self.points.into_owned()),
        }
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points.into_owned()
    }
}

impl From<Vec<Point>> for Polygon<'static> {
    fn from(points: Vec<Point>) -> Self {
        Polygon::new(points)
    }
}

/// Expands `r` outward to multiples of `tile`. Left and top round toward
/// negative infinity, right and bottom toward positive infinity. Edges past
/// the `i32` range saturate at `i32::MIN` or `i32::MAX` rather than wrapping.
pub fn align_bounding_box_to_grid(r: Rect, tile: i32) -> Rect {
    let floor = |v: i32| -> i32 {
        (floor_div(v, tile) as i64 * tile as i64).max(i32::MIN as i64) as i32
    };
    let ceil = |v: i32| -> i32 {
        let mut cell = floor_div(v, tile) as i64;
        if v % tile != 0 {
            cell += 1;
        }
        (cell * tile as i64).min(i32::MAX as i64) as i32
    };
    Rect {
        left: floor(r.left),
        top: floor(r.top),
        right: ceil(r.right),
        bottom: ceil(r.bottom),
    }
}

/// Growable point ring used while building polygons point by point.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MutablePolygon {
    points: Vec<Point>,
}

impl MutablePolygon {
    pub fn new() -> Self {
        MutablePolygon { points: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        MutablePolygon {
            points: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.points.reserve(additional);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[inline]
    pub fn add_point(&mut self, p: Point) {
        self.points.push(p);
    }

    /// Appends `p` unless it equals the current last point.
    #[inline]
    pub fn add_unique_point(&mut self, p: Point) {
        if self.points.last() != Some(&p) {
            self.points.push(p);
        }
    }

    /// Replaces the content with a copy of `points`.
    pub fn assign_points(&mut self, points: &[Point]) {
        self.points.clear();
        self.points.extend_from_slice(points);
    }

    pub fn remove_first_point(&mut self) -> Option<Point> {
        if self.points.is_empty() {
            None
        } else {
            Some(self.points.remove(0))
        }
    }

    pub fn remove_last_point(&mut self) -> Option<Point> {
        self.points.pop()
    }

    /// Collapses runs of equal consecutive points, then drops a last point
    /// equal to the first when more than two points remain.
    pub fn remove_duplicated_points(&mut self) {
        self.points.dedup();
        let n = self.points.len();
        if n > 2 && self.points[0] == self.points[n - 1] {
            self.points.pop();
        }
    }

    pub fn first_point(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::from_points(&self.points)
    }

    /// Owned copy of the current ring.
    pub fn to_polygon(&self) -> Polygon<'static> {
        Polygon::new(self.points.clone())
    }
}

impl From<Vec<Point>> for MutablePolygon {
    fn from(points: Vec<Point>) -> Self {
        MutablePolygon { points }
    }
}
