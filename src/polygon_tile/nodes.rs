// Copyright 2025 Lars Brubaker
// License: MIT
//
// Repair of weak-simple chains produced by a cut.
//
// A chain that touches the cut line at several places may really be several
// loops glued together there. The points where the chain arrives at or
// leaves the line are collected as nodes, ordered along the line, and paired
// up; walking the chain between paired nodes yields each loop separately.
//
// Nodes live in a Vec and refer to each other by position, the same way the
// dictionary and mesh arenas link their elements.

use log::debug;
use smallvec::SmallVec;

use super::cut::Axis;
use crate::error::SplitError;
use crate::geom::Point;
use crate::polygon::MutablePolygon;
use crate::pool::PointBufferPool;

/// Point where a chain arrives at or leaves the cut line.
#[derive(Copy, Clone, Debug)]
struct Node {
    /// Index of the point in the chain.
    point: usize,
    /// Order in which the walk along the chain met this node.
    index: usize,
    /// Sorted position of the node met right after this one.
    next: usize,
    used: bool,
}

/// Scratch state for splitting weak-simple chains, reused across cuts.
#[derive(Debug, Default)]
pub(crate) struct Reconnector {
    nodes: Vec<Node>,
    order: SmallVec<[usize; 16]>,
    scratch: MutablePolygon,
}

impl Reconnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits `chain` into simple loops and pushes each onto `queue`.
    ///
    /// `below` tells which side of the line `chain` came from: true for the
    /// part with coordinates less than `cut`.
    pub fn divide(
        &mut self,
        chain: &[Point],
        axis: Axis,
        cut: i32,
        below: bool,
        pool: &mut PointBufferPool,
        queue: &mut Vec<Vec<Point>>,
    ) -> Result<(), SplitError> {
        self.collect_nodes(chain, axis, cut);

        if self.nodes.is_empty() {
            queue.push(pool.alloc_from(chain));
            return Ok(());
        }

        let count = self.nodes.len();
        if count % 2 != 0 {
            debug!("odd number of nodes ({}) on cut line {}", count, cut);
            return Err(SplitError::OddNodeCount { count, cut });
        }

        insertion_sort(&mut self.nodes, |l, r| node_less(chain, l.point, r.point, axis));
        if (axis == Axis::Horizontal) ^ below {
            self.nodes.reverse();
        }

        self.order.clear();
        self.order.resize(count, 0);
        for (pos, node) in self.nodes.iter().enumerate() {
            self.order[node.index] = pos;
        }
        for i in 0..count {
            let following = (self.nodes[i].index + 1) % count;
            self.nodes[i].next = self.order[following];
        }

        let n = chain.len();
        while let Some(start) = self.nodes.iter().position(|node| !node.used) {
            self.scratch.clear();
            let mut cur = start;
            let mut steps = 0;
            loop {
                let next = self.nodes[cur].next;
                self.nodes[cur].used = true;
                self.nodes[next].used = true;

                let to = self.nodes[next].point;
                let mut i = self.nodes[cur].point;
                while i != to {
                    self.scratch.add_unique_point(chain[i]);
                    i = (i + 1) % n;
                }
                self.scratch.add_unique_point(chain[to]);

                let Some(pair) = next.checked_sub(1) else {
                    debug!("node walk left the node list on cut line {}", cut);
                    return Err(SplitError::UnpairedNode { cut });
                };
                if pair == start {
                    queue.push(pool.alloc_from(self.scratch.points()));
                    break;
                }
                steps += 1;
                if steps > count {
                    debug!("node walk does not close on cut line {}", cut);
                    return Err(SplitError::UnpairedNode { cut });
                }
                cur = pair;
            }
        }
        Ok(())
    }

    /// Collects the chain points where the walk moves onto or off the line.
    fn collect_nodes(&mut self, chain: &[Point], axis: Axis, cut: i32) {
        self.nodes.clear();
        let n = chain.len();
        let on = |i: usize| axis.across(chain[i]) == cut;
        for cur in 0..n {
            let last = (cur + n - 1) % n;
            let next = (cur + 1) % n;
            if on(cur) && (on(last) != on(next)) {
                self.nodes.push(Node {
                    point: cur,
                    index: self.nodes.len(),
                    next: 0,
                    used: false,
                });
            }
        }
    }
}

/// Stable insertion sort driven by a strict-less predicate. The predicate is
/// not guaranteed to be a total order on degenerate input, so the slice sorts
/// of std (which may panic on inconsistent orderings) are avoided.
fn insertion_sort<T: Copy, F>(items: &mut [T], mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    for i in 1..items.len() {
        let item = items[i];
        let mut j = i;
        while j > 0 && less(&item, &items[j - 1]) {
            items[j] = items[j - 1];
            j -= 1;
        }
        items[j] = item;
    }
}

#[inline]
/// `cross_product` in i128, exact for any coordinates.
fn turn_of(origin: Point, a: Point, b: Point) -> i128 {
    let (x1, y1) = (a.x as i128 - origin.x as i128, a.y as i128 - origin.y as i128);
    let (x2, y2) = (b.x as i128 - origin.x as i128, b.y as i128 - origin.y as i128);
    x1 * y2 - x2 * y1
}

fn dist2(a: Point, b: Point) -> i128 {
    let dx = a.x as i128 - b.x as i128;
    let dy = a.y as i128 - b.y as i128;
    dx * dx + dy * dy
}

/// Orders two chain points on the cut line.
///
/// Different positions along the line compare directly. Nodes sharing a
/// position are told apart by following the chain away from each of them
/// until the two paths diverge, and checking on which side of the other the
/// first one turns.
fn node_less(chain: &[Point], l: usize, r: usize, axis: Axis) -> bool {
    let lp = chain[l];
    let rp = chain[r];
    if axis.along(lp) != axis.along(rp) {
        return axis.along(lp) < axis.along(rp);
    }

    let n = chain.len();
    let step = |i: usize, forward: bool| {
        if forward {
            (i + 1) % n
        } else {
            (i + n - 1) % n
        }
    };

    // Walk away from the line: backward when the next point stays on it.
    let l_forward = axis.across(chain[step(l, true)]) != axis.across(lp);
    let r_forward = axis.across(chain[step(r, true)]) != axis.across(rp);

    let mut b = l;
    let mut p1 = step(l, l_forward);
    let mut p2 = step(r, r_forward);
    let is_left = match axis {
        Axis::Vertical => chain[p1].x < lp.x,
        Axis::Horizontal => chain[p1].y > lp.y,
    };

    // Set once the walk from `l` passes `r`: from there on the two paths
    // have swapped sides.
    let mut crossed = false;
    let mut budget = 4 * n;

    while p1 != l && budget > 0 {
        budget -= 1;
        if p1 == r {
            crossed = true;
        }

        let a = chain[p1];
        let c = chain[p2];
        if a == c {
            b = p1;
            p1 = step(p1, l_forward);
            p2 = step(p2, r_forward);
            continue;
        }

        let base = chain[b];
        let opposite = axis.across(a) == axis.across(c)
            && axis.across(a) == axis.across(base)
            && ((axis.along(a) > axis.along(base)) ^ (axis.along(c) > axis.along(base)));
        let turn = if opposite {
            let t: i128 = if axis.along(a) < axis.along(c) { 1 } else { -1 };
            if crossed {
                -t
            } else {
                t
            }
        } else {
            let t = turn_of(a, base, c);
            if is_left {
                t
            } else {
                -t
            }
        };

        if turn > 0 {
            return true;
        }
        if turn < 0 {
            return false;
        }
        if dist2(a, base) < dist2(c, base) {
            p1 = step(p1, l_forward);
        } else {
            p2 = step(p2, r_forward);
        }
    }

    l_forward ^ is_left
}
