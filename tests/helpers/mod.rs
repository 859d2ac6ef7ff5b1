// Copyright 2025 Lars Brubaker
// Shared test utilities for tilesplit tests.

#![allow(dead_code)]

use rand::Rng;
use tilesplit::geom::signed_area2;
use tilesplit::Point;

pub fn pts(coords: &[(i32, i32)]) -> Vec<Point> {
    coords.iter().map(|&c| Point::from(c)).collect()
}

/// True if `a` and `b` list the same ring, possibly starting at different
/// points. Direction matters.
pub fn same_ring(a: &[Point], b: &[Point]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    if a.is_empty() {
        return true;
    }
    let n = a.len();
    (0..n).any(|shift| (0..n).all(|i| a[(i + shift) % n] == b[i]))
}

/// Asserts that `actual` holds exactly the rings in `expected`, in order,
/// each compared up to rotation.
pub fn assert_rings(actual: &[Vec<Point>], expected: &[Vec<Point>], label: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{}: ring count differs, got {:?}",
        label,
        actual
    );
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(same_ring(a, e), "{}: ring {} is {:?}, expected {:?}", label, i, a, e);
    }
}

/// Twice the signed shoelace area.
pub fn area2(points: &[Point]) -> i128 {
    signed_area2(points)
}

/// Sum of twice the signed areas of all rings.
pub fn total_area2(rings: &[Vec<Point>]) -> i128 {
    rings.iter().map(|r| signed_area2(r)).sum()
}

pub fn segment_length(a: Point, b: Point) -> f64 {
    let dx = b.x as f64 - a.x as f64;
    let dy = b.y as f64 - a.y as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Total length of a set of polylines.
pub fn path_length(runs: &[Vec<Point>]) -> f64 {
    runs.iter()
        .map(|r| r.windows(2).map(|w| segment_length(w[0], w[1])).sum::<f64>())
        .sum()
}

/// Longest edge of the closed ring `points`.
pub fn longest_edge(points: &[Point]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| segment_length(points[i], points[(i + 1) % n]))
        .fold(0.0, f64::max)
}

/// Star-shaped (hence simple) polygon with `n` vertices around `center`,
/// one per angular sector, at radii in `r_min..r_max`.
pub fn star_polygon<R: Rng>(rng: &mut R, n: usize, center: Point, r_min: f64, r_max: f64) -> Vec<Point> {
    let sector = std::f64::consts::TAU / n as f64;
    (0..n)
        .map(|k| {
            let angle = (k as f64 + rng.gen::<f64>() * 0.8) * sector;
            let radius = rng.gen_range(r_min..r_max);
            Point::new(
                (center.x as f64 + radius * angle.cos()).round() as i32,
                (center.y as f64 + radius * angle.sin()).round() as i32,
            )
        })
        .collect()
}

/// Rectilinear histogram polygon: a flat base from `origin` to the right and
/// `bars` bars of random width and height on top of it.
pub fn histogram_polygon<R: Rng>(
    rng: &mut R,
    origin: Point,
    bars: usize,
    width: std::ops::RangeInclusive<i32>,
    max_height: i32,
) -> Vec<Point> {
    let mut top = Vec::with_capacity(bars * 2);
    let mut x = origin.x;
    for _ in 0..bars {
        let w = rng.gen_range(width.clone());
        let h = rng.gen_range(1..=max_height);
        top.push(Point::new(x, origin.y + h));
        top.push(Point::new(x + w, origin.y + h));
        x += w;
    }
    let mut points = vec![origin, Point::new(x, origin.y)];
    points.extend(top.into_iter().rev());
    points.dedup();
    points
}

/// Polyline of `n` points with both coordinates in `-extent..=extent`.
pub fn random_polyline<R: Rng>(rng: &mut R, n: usize, extent: i32) -> Vec<Point> {
    (0..n)
        .map(|_| Point::new(rng.gen_range(-extent..=extent), rng.gen_range(-extent..=extent)))
        .collect()
}
