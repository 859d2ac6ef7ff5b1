// Copyright 2025 Lars Brubaker
// License: MIT
//
// Output sinks for the callback-style splitters.

use crate::geom::Point;

/// Receives the runs produced by a splitter, in traversal order.
///
/// The slice borrows splitter scratch memory and is only valid for the
/// duration of the call; copy it to keep it. A sink must not call back into
/// the splitter that is feeding it.
pub trait SplitSink {
    fn emit(&mut self, points: &[Point]);
}

impl<F> SplitSink for F
where
    F: FnMut(&[Point]),
{
    #[inline]
    fn emit(&mut self, points: &[Point]) {
        self(points)
    }
}

/// Sink that copies every run it receives.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Collected {
    pub runs: Vec<Vec<Point>>,
}

impl Collected {
    pub fn new() -> Self {
        Collected { runs: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.runs.clear();
    }

    pub fn into_runs(self) -> Vec<Vec<Point>> {
        self.runs
    }
}

impl SplitSink for Collected {
    fn emit(&mut self, points: &[Point]) {
        self.runs.push(points.to_vec());
    }
}
