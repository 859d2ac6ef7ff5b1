// Copyright 2025 Lars Brubaker
// License: MIT
//
// Polygon tile splitter.
//
// Cuts one polygon along grid lines until every piece fits a single tile.
// Candidates live on a LIFO work queue. Each one is either emitted, expanded
// directly into unit cells (grid-aligned rectangles), or cut in two at the
// grid line nearest the middle of its longer side. Cut chains that touch the
// line several times are separated into simple loops before being queued.

mod cut;
mod nodes;
#[cfg(test)]
mod tests;

use log::{debug, trace};

use self::cut::{split_along, Axis};
use self::nodes::Reconnector;
use crate::error::SplitError;
use crate::geom::{floor_div, signed_area2, Point, Rect};
use crate::polygon::{align_bounding_box_to_grid, grid_cell_ring, MutablePolygon, Polygon};
use crate::pool::PointBufferPool;

/// Splits polygons into tile-sized pieces.
///
/// The splitter owns its results; they stay valid until the next call to
/// [`split`](Self::split). Scratch buffers are kept between calls.
pub struct PolygonTileSplitter {
    tile_size: i32,
    queue: Vec<Vec<Point>>,
    results: Vec<Polygon<'static>>,
    below: MutablePolygon,
    above: MutablePolygon,
    reconnector: Reconnector,
    pool: PointBufferPool,
}

impl Default for PolygonTileSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl PolygonTileSplitter {
    /// Splitter with no tile size; [`set_tile_size`](Self::set_tile_size)
    /// must be called before splitting.
    pub fn new() -> Self {
        PolygonTileSplitter {
            tile_size: 0,
            queue: Vec::new(),
            results: Vec::new(),
            below: MutablePolygon::new(),
            above: MutablePolygon::new(),
            reconnector: Reconnector::new(),
            pool: PointBufferPool::new(),
        }
    }

    pub fn with_tile_size(tile_size: i32) -> Result<Self, SplitError> {
        let mut s = Self::new();
        s.set_tile_size(tile_size)?;
        Ok(s)
    }

    /// Sets the tile side length. A non-positive size is rejected and the
    /// previous size is kept.
    pub fn set_tile_size(&mut self, tile_size: i32) -> Result<(), SplitError> {
        if tile_size <= 0 {
            return Err(SplitError::InvalidTileSize(tile_size));
        }
        self.tile_size = tile_size;
        Ok(())
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Results of the last successful split.
    pub fn results(&self) -> &[Polygon<'static>] {
        &self.results
    }

    /// Splits `polygon` into pieces whose grid-aligned bounding boxes fit one
    /// tile. The input is first normalized to positive signed area.
    ///
    /// Pieces with fewer than three points are dropped. If a cut produces
    /// chains that cannot be separated into loops, the whole split fails and
    /// no pieces are returned.
    pub fn split(&mut self, polygon: &Polygon<'_>) -> Result<&[Polygon<'static>], SplitError> {
        let tile = self.tile_size;
        if tile <= 0 {
            return Err(SplitError::InvalidTileSize(tile));
        }

        self.release_results();

        let points = polygon.points();
        let mut seed = self.pool.alloc_from(points);
        if signed_area2(points) < 0 {
            seed.reverse();
        }
        let reserve = points.len() * 2;
        self.below.reserve(reserve);
        self.above.reserve(reserve);

        self.queue.clear();
        self.queue.push(seed);

        while let Some(candidate) = self.queue.pop() {
            if let Err(e) = self.process(candidate, tile) {
                self.abort();
                return Err(e);
            }
        }
        Ok(&self.results)
    }

    fn process(&mut self, candidate: Vec<Point>, tile: i32) -> Result<(), SplitError> {
        if candidate.len() < 3 {
            self.pool.free(candidate);
            return Ok(());
        }

        let bbox = align_bounding_box_to_grid(Rect::from_points(&candidate), tile);
        let tile64 = tile as i64;
        if bbox.width() <= tile64 && bbox.height() <= tile64 {
            trace!("emit piece of {} points in {:?}", candidate.len(), bbox);
            self.results.push(Polygon::new(candidate));
            return Ok(());
        }

        if self.collect_simple_rectangle(&candidate, &bbox, tile) {
            trace!("rectangle {:?} expanded into cells", bbox);
            self.pool.free(candidate);
            return Ok(());
        }

        let (axis, cut) = cut_line(&bbox, tile);
        trace!(
            "cut {} points along {:?} at {} in {:?}",
            candidate.len(),
            axis,
            cut,
            bbox
        );

        self.below.clear();
        self.above.clear();
        split_along(&candidate, axis, cut, &mut self.below, &mut self.above);
        self.pool.free(candidate);

        if !self.below.is_empty() {
            self.reconnector.divide(
                self.below.points(),
                axis,
                cut,
                true,
                &mut self.pool,
                &mut self.queue,
            )?;
        }
        if !self.above.is_empty() {
            self.reconnector.divide(
                self.above.points(),
                axis,
                cut,
                false,
                &mut self.pool,
                &mut self.queue,
            )?;
        }
        Ok(())
    }

    /// Fast path for a four-point rectangle whose corners all lie on grid
    /// lines: emits one cell polygon per covered tile.
    fn collect_simple_rectangle(&mut self, points: &[Point], bbox: &Rect, tile: i32) -> bool {
        if points.len() != 4 {
            return false;
        }
        if points.iter().any(|p| p.x % tile != 0 || p.y % tile != 0) {
            return false;
        }
        let on_corner = |p: &Point| {
            (p.x == bbox.left || p.x == bbox.right) && (p.y == bbox.top || p.y == bbox.bottom)
        };
        if !points.iter().all(on_corner) {
            return false;
        }

        for row in floor_div(bbox.top, tile)..floor_div(bbox.bottom, tile) {
            for col in floor_div(bbox.left, tile)..floor_div(bbox.right, tile) {
                // Wound like the normalized input so cells merge with the
                // other pieces.
                let [lt, lb, rb, rt] = grid_cell_ring(col, row, tile);
                let mut buf = self.pool.alloc();
                buf.extend_from_slice(&[lt, rt, rb, lb]);
                self.results.push(Polygon::new(buf));
            }
        }
        true
    }

    fn release_results(&mut self) {
        for poly in self.results.drain(..) {
            self.pool.free(poly.into_points());
        }
    }

    fn abort(&mut self) {
        debug!(
            "tile split aborted, dropping {} queued and {} finished pieces",
            self.queue.len(),
            self.results.len()
        );
        for candidate in self.queue.drain(..) {
            self.pool.free(candidate);
        }
        self.release_results();
    }
}

/// Cut across the longer side of the grid-aligned `bbox`, at the grid line
/// at or before its middle. The cut is kept at least one tile past the low
/// edge, so both halves are strictly smaller than the box.
fn cut_line(bbox: &Rect, tile: i32) -> (Axis, i32) {
    let (axis, low, high) = if bbox.width() < bbox.height() {
        (Axis::Horizontal, bbox.top as i64, bbox.bottom as i64)
    } else {
        (Axis::Vertical, bbox.left as i64, bbox.right as i64)
    };
    let tile = tile as i64;
    let middle = (low + high) >> 1;
    let cut = (middle.div_euclid(tile) * tile).max(low.div_euclid(tile) * tile + tile);
    debug_assert!(low < cut && cut < high);
    (axis, cut as i32)
}
