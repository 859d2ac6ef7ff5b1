// Copyright 2025 Lars Brubaker
// License: MIT

use crate::geom::Point;
use crate::grid::GridId;

/// Errors reported by the splitters and the label search.
///
/// Degenerate geometry (zero-length segments, fragments with fewer than three
/// points) is never an error: it is dropped silently. These variants cover
/// configuration mistakes and inputs whose topology cannot be repaired.
#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum SplitError {
    /// The tile size must be strictly positive.
    #[error("tile size must be positive, got {0}")]
    InvalidTileSize(i32),

    /// The label search precision must be at least 1.
    #[error("label precision must be at least 1, got {0}")]
    InvalidPrecision(i32),

    /// A cut produced an odd number of boundary nodes on the cut line, so the
    /// resulting chain cannot be reconnected into closed loops. Usually caused
    /// by a polygon that crosses itself exactly on a grid line.
    #[error("odd number of nodes ({count}) on cut line {cut}")]
    OddNodeCount { count: usize, cut: i32 },

    /// Pairing the nodes on a cut line did not close every loop.
    #[error("unable to pair nodes on cut line {cut}")]
    UnpairedNode { cut: i32 },

    /// A segment leaving a grid cell has no crossing with that cell's border.
    #[error("segment {from} -> {to} has no crossing with the border of cell {cell}")]
    MissingCrossing { from: Point, to: Point, cell: GridId },
}
