// Copyright 2025 Lars Brubaker
// License: MIT
//
// Recycling of point buffers for the tile splitter's candidate polygons.
//
// Candidates are created and dropped at a high rate while a polygon is cut
// down to tile size. Instead of returning their buffers to the global
// allocator, the splitter hands them back here and reuses their capacity on
// the next allocation, so repeated splits reach a steady state with no
// allocation at all.

use crate::geom::Point;

/// Free-list of `Vec<Point>` buffers.
#[derive(Default)]
pub struct PointBufferPool {
    free_list: Vec<Vec<Point>>,
    outstanding: usize,
}

impl PointBufferPool {
    pub fn new() -> Self {
        Self {
            free_list: Vec::new(),
            outstanding: 0,
        }
    }

    /// Take an empty buffer, reusing a released one when available.
    pub fn alloc(&mut self) -> Vec<Point> {
        self.outstanding += 1;
        self.free_list.pop().unwrap_or_default()
    }

    /// Take a buffer holding a copy of `points`.
    pub fn alloc_from(&mut self, points: &[Point]) -> Vec<Point> {
        let mut buf = self.alloc();
        buf.extend_from_slice(points);
        buf
    }

    /// Return a buffer to the pool. Its contents are discarded, its capacity kept.
    pub fn free(&mut self, mut buf: Vec<Point>) {
        buf.clear();
        self.outstanding = self.outstanding.saturating_sub(1);
        self.free_list.push(buf);
    }

    /// Forget outstanding allocations. Buffers that were never freed simply
    /// stay with their current owner.
    pub fn reset(&mut self) {
        self.outstanding = 0;
    }

    /// Number of buffers handed out and not yet returned.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Number of buffers ready for reuse.
    pub fn available(&self) -> usize {
        self.free_list.len()
    }
}
