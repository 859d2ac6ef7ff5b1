// Copyright 2025 Lars Brubaker
// License: MIT
//
// Cuts polylines at grid cell boundaries (Cohen–Sutherland style).
//
// Every emitted run lies in one cell; consecutive runs share the boundary
// crossing point. A run start that sits exactly on a cell boundary belongs to
// the cell the polyline heads into next.

use log::debug;

use crate::error::SplitError;
use crate::geom::Point;
use crate::grid::{GridId, Position};
use crate::sink::SplitSink;

/// Grid polyline splitter. Holds a scratch copy of the current polyline, so
/// one instance should be reused across calls.
#[derive(Debug, Default)]
pub struct PolylineTileSplitter {
    tile_size: i32,
    points: Vec<Point>,
    run: Vec<Point>,
}

impl PolylineTileSplitter {
    /// Splitter with no tile size; [`set_tile_size`](Self::set_tile_size)
    /// must be called before splitting.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tile_size(tile_size: i32) -> Result<Self, SplitError> {
        let mut s = Self::new();
        s.set_tile_size(tile_size)?;
        Ok(s)
    }

    /// Sets the cell side length. A non-positive size is rejected and the
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

    /// Splits `points` and hands every run of two or more points to `sink`.
    ///
    /// A polyline with fewer than two points produces nothing. On error, runs
    /// emitted before the failing segment have already been delivered.
    pub fn split<S>(&mut self, points: &[Point], sink: &mut S) -> Result<(), SplitError>
    where
        S: SplitSink + ?Sized,
    {
        if self.tile_size <= 0 {
            return Err(SplitError::InvalidTileSize(self.tile_size));
        }
        let n = points.len();
        if n < 2 {
            return Ok(());
        }

        let tile = self.tile_size;
        let orig = &mut self.points;
        let run = &mut self.run;
        orig.clear();
        orig.extend_from_slice(points);

        let mut pre = GridId::default();
        let mut begin = 0;
        let mut cur_idx = 1;
        let mut is_start = true;
        let mut all_in_one = true;

        while cur_idx < n {
            if is_start {
                pre = GridId::of(orig[begin], tile);
            }
            let cur = GridId::of(orig[cur_idx], tile);
            if cur == pre {
                cur_idx += 1;
                is_start = false;
                continue;
            }

            let prev_point = orig[cur_idx - 1];
            let cross = crosspoint(pre, prev_point, orig[cur_idx], tile)?;
            let cross_on_prev = prev_point == cross;

            if cross_on_prev && is_start {
                // Run start on the boundary: move it into the cell we head for.
                pre = adjust_grid_id(pre, prev_point, cur.relative_position(pre), tile);
                is_start = false;
                continue;
            }
            if cross_on_prev && begin == cur_idx - 1 {
                // Re-assigning the start did not leave the boundary.
                pre = cur;
                is_start = false;
                continue;
            }

            run.clear();
            if orig[cur_idx] != cross {
                run.extend_from_slice(&orig[begin..cur_idx]);
                if !cross_on_prev {
                    run.push(cross);
                    orig[cur_idx - 1] = cross;
                }
                // Restart from the crossing point.
                cur_idx -= 1;
            } else {
                run.extend_from_slice(&orig[begin..=cur_idx]);
            }
            if run.len() >= 2 {
                sink.emit(&run[..]);
            }

            begin = cur_idx;
            cur_idx += 1;
            is_start = true;
            all_in_one = true;
            if begin >= n - 1 {
                all_in_one = false;
                break;
            }
        }

        if all_in_one && cur_idx - begin >= 2 {
            sink.emit(&orig[begin..cur_idx]);
        }
        Ok(())
    }
}

/// Where `p1 -> p2` leaves `cell`. Left/right edges are tried before
/// bottom/top; the edge is chosen from the direction of `p2`'s cell.
fn crosspoint(cell: GridId, p1: Point, p2: Point, tile: i32) -> Result<Point, SplitError> {
    let rect = cell.rect(tile);
    let toward = GridId::of(p2, tile).relative_position(cell);

    let vertical_edge = if toward.contains(Position::LEFT) {
        Some(rect.left)
    } else if toward.contains(Position::RIGHT) {
        Some(rect.right)
    } else {
        None
    };
    if let Some(x) = vertical_edge {
        let y = if p1.x == p2.x {
            ((p1.y as i64 + p2.y as i64) / 2) as i32
        } else {
            p1.y + ((p2.y as f64 - p1.y as f64) * (x as f64 - p1.x as f64)
                / (p2.x as f64 - p1.x as f64)) as i32
        };
        if rect.top <= y && y <= rect.bottom {
            return Ok(Point::new(x, y));
        }
    }

    let horizontal_edge = if toward.contains(Position::BOTTOM) {
        Some(rect.bottom)
    } else if toward.contains(Position::TOP) {
        Some(rect.top)
    } else {
        None
    };
    if let Some(y) = horizontal_edge {
        let x = if p1.y == p2.y {
            ((p1.x as i64 + p2.x as i64) / 2) as i32
        } else {
            p1.x + ((p2.x as f64 - p1.x as f64) * (y as f64 - p1.y as f64)
                / (p2.y as f64 - p1.y as f64)) as i32
        };
        if rect.left <= x && x <= rect.right {
            return Ok(Point::new(x, y));
        }
    }

    debug!(
        "no crossing for {} -> {} out of cell {} ({:?})",
        p1, p2, cell, rect
    );
    Err(SplitError::MissingCrossing {
        from: p1,
        to: p2,
        cell,
    })
}

/// Edges of `cell` that `p` lies on, corners included.
fn edges_touching(p: Point, cell: GridId, tile: i32) -> Position {
    let rect = cell.rect(tile);
    let mut c = Position::empty();
    if rect.top <= p.y && p.y <= rect.bottom {
        if p.x == rect.left {
            c |= Position::LEFT;
        } else if p.x == rect.right {
            c |= Position::RIGHT;
        }
    }
    if rect.left <= p.x && p.x <= rect.right {
        if p.y == rect.top {
            c |= Position::TOP;
        } else if p.y == rect.bottom {
            c |= Position::BOTTOM;
        }
    }
    c
}

/// Moves a boundary point's cell one step toward `next`, along each edge the
/// point lies on.
fn adjust_grid_id(cell: GridId, p: Point, next: Position, tile: i32) -> GridId {
    let pos = edges_touching(p, cell, tile) & next;
    let mut id = cell;
    if pos.contains(Position::LEFT) {
        id.col -= 1;
    } else if pos.contains(Position::RIGHT) {
        id.col += 1;
    }
    if pos.contains(Position::TOP) {
        id.row -= 1;
    } else if pos.contains(Position::BOTTOM) {
        id.row += 1;
    }
    id
}
