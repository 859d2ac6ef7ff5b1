// Copyright 2025 Lars Brubaker
// License: MIT
//
// Polygon merger.
//
// Polygons that share edges (typically the tile pieces of one polygon) are
// fused back together. Every directed edge goes into an index keyed by its
// start point; an edge meeting its exact reverse cancels it, since both sides
// of a shared boundary are interior. The surviving edges are then walked into
// closed contours.

use indexmap::{IndexMap, IndexSet};
use log::debug;

use crate::geom::Point;
use crate::polygon::Polygon;

/// Merges edge-sharing polygons. The edge index is reused across calls.
#[derive(Debug, Default)]
pub struct PolygonMerger {
    /// Outgoing edge targets per start point. Entries are removed as soon as
    /// their last edge goes, so every key has at least one target.
    segments: IndexMap<Point, IndexSet<Point>>,
    contour: Vec<Point>,
}

impl PolygonMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `polygons` and returns the outlines of the union.
    ///
    /// All inputs should share one orientation so that shared edges appear
    /// in opposite directions. Contours are walked from the oldest surviving
    /// start point, following the oldest surviving edge at each vertex, so the
    /// output is deterministic. Loops meeting at a single vertex may come out
    /// as one contour passing through that vertex twice. Walks shorter than
    /// three points are dropped.
    pub fn merge(&mut self, polygons: &[Polygon<'_>]) -> Vec<Polygon<'static>> {
        self.segments.clear();
        for polygon in polygons {
            self.add_edges(polygon.points());
        }
        let edges: usize = self.segments.values().map(IndexSet::len).sum();

        let mut result = Vec::new();
        while let Some((&start, _)) = self.segments.first() {
            self.contour.clear();
            self.contour.push(start);
            let mut cur = start;
            while let Some(next) = self.take_edge(cur) {
                self.contour.push(next);
                cur = next;
            }
            // The walk ends back on its start point; drop the repeat.
            let len = self.contour.len() - 1;
            if len >= 3 {
                result.push(Polygon::new(self.contour[..len].to_vec()));
            }
        }

        debug!(
            "merged {} polygons ({} boundary edges) into {}",
            polygons.len(),
            edges,
            result.len()
        );
        result
    }

    fn add_edges(&mut self, points: &[Point]) {
        let n = points.len();
        if n == 0 {
            return;
        }
        let mut prev = points[n - 1];
        for &cur in points {
            let from = prev;
            prev = cur;
            if let Some(targets) = self.segments.get_mut(&cur) {
                if targets.shift_remove(&from) {
                    if targets.is_empty() {
                        self.segments.shift_remove(&cur);
                    }
                    continue;
                }
            }
            self.segments.entry(from).or_default().insert(cur);
        }
    }

    /// Removes and returns the oldest edge leaving `from`.
    fn take_edge(&mut self, from: Point) -> Option<Point> {
        let targets = self.segments.get_mut(&from)?;
        let to = targets.shift_remove_index(0)?;
        if targets.is_empty() {
            self.segments.shift_remove(&from);
        }
        Some(to)
    }
}
