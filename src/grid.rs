// Copyright 2025 Lars Brubaker
// License: MIT
//
// Uniform square grid addressing.

use core::fmt;

use crate::geom::{floor_div, Point, Rect};

bitflags::bitflags! {
    /// Cohen–Sutherland outcode: where something lies relative to a cell.
    /// Combinations such as `TOP | LEFT` describe corners.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Position: u8 {
        const LEFT = 1;
        const RIGHT = 1 << 1;
        const BOTTOM = 1 << 2;
        const TOP = 1 << 3;
    }
}

/// Column/row address of a grid cell. Cell (`col`, `row`) covers
/// `[col * size, (col + 1) * size) x [row * size, (row + 1) * size)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridId {
    pub col: i32,
    pub row: i32,
}

impl GridId {
    #[inline]
    pub const fn new(col: i32, row: i32) -> Self {
        GridId { col, row }
    }

    /// Cell containing `p`. Coordinates round toward negative infinity.
    #[inline]
    pub fn of(p: Point, tile: i32) -> Self {
        GridId {
            col: floor_div(p.x, tile),
            row: floor_div(p.y, tile),
        }
    }

    /// Closed bounds of the cell. Edges past the `i32` range saturate, which
    /// no point can lie beyond.
    pub fn rect(&self, tile: i32) -> Rect {
        let edge = |v: i64| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        let left = self.col as i64 * tile as i64;
        let top = self.row as i64 * tile as i64;
        Rect::new(
            edge(left),
            edge(top),
            edge(left + tile as i64),
            edge(top + tile as i64),
        )
    }

    /// Outcode of `self` relative to `base`.
    pub fn relative_position(&self, base: GridId) -> Position {
        let mut c = Position::empty();
        if self.col < base.col {
            c |= Position::LEFT;
        } else if self.col > base.col {
            c |= Position::RIGHT;
        }
        if self.row < base.row {
            c |= Position::TOP;
        } else if self.row > base.row {
            c |= Position::BOTTOM;
        }
        c
    }

    /// Single integer key: row in the high 32 bits, column in the low 32.
    #[inline]
    pub fn packed(&self) -> u64 {
        ((self.row as u32 as u64) << 32) | self.col as u32 as u64
    }
}

impl fmt::Display for GridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[col {}, row {}]", self.col, self.row)
    }
}
