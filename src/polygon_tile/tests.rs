// Copyright 2025 Lars Brubaker
// License: MIT
//
// Unit tests for the tile splitter internals.

use super::cut::{split_along, Axis};
use super::nodes::Reconnector;
use super::*;
use crate::geom::area;

fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

fn pts(coords: &[(i32, i32)]) -> Vec<Point> {
    coords.iter().map(|&c| Point::from(c)).collect()
}

fn split_points(tile: i32, coords: &[(i32, i32)]) -> Result<Vec<Vec<Point>>, SplitError> {
    let mut splitter = PolygonTileSplitter::with_tile_size(tile)?;
    let input = pts(coords);
    let pieces = splitter.split(&Polygon::borrowed(&input))?;
    Ok(pieces.iter().map(|poly| poly.points().to_vec()).collect())
}

#[test]
fn triangle_into_three_pieces() {
    let pieces = split_points(50, &[(0, 0), (100, 0), (0, 100)]).unwrap();
    assert_eq!(
        pieces,
        vec![
            pts(&[(50, 0), (100, 0), (50, 50)]),
            pts(&[(50, 50), (0, 100), (0, 50)]),
            pts(&[(0, 50), (0, 0), (50, 0), (50, 50)]),
        ]
    );
}

#[test]
fn clockwise_input_is_reversed_first() {
    let cw = split_points(50, &[(0, 100), (100, 0), (0, 0)]).unwrap();
    let ccw = split_points(50, &[(0, 0), (100, 0), (0, 100)]).unwrap();
    assert_eq!(cw.len(), 3);
    for piece in &cw {
        assert!(crate::geom::signed_area2(piece) >= 0);
    }
    let total: i64 = cw.iter().map(|piece| area(piece)).sum();
    assert_eq!(total, 5000);
    assert_eq!(ccw.len(), 3);
}

#[test]
fn small_polygon_is_returned_unchanged() {
    let pieces = split_points(100, &[(10, 10), (90, 10), (50, 90)]).unwrap();
    assert_eq!(pieces, vec![pts(&[(10, 10), (90, 10), (50, 90)])]);
}

#[test]
fn touching_the_far_grid_line_still_fits() {
    // Right and bottom edges exactly on a grid line belong to this tile.
    let pieces = split_points(100, &[(0, 0), (100, 0), (100, 100), (0, 100)]).unwrap();
    assert_eq!(pieces.len(), 1);
}

#[test]
fn degenerate_polygon_is_dropped() {
    let pieces = split_points(100, &[(0, 0), (300, 0)]).unwrap();
    assert!(pieces.is_empty());
}

#[test]
fn aligned_rectangle_uses_cells() {
    let pieces = split_points(100, &[(0, 0), (0, 200), (300, 200), (300, 0)]).unwrap();
    assert_eq!(pieces.len(), 6);
    assert_eq!(pieces[0], pts(&[(0, 0), (100, 0), (100, 100), (0, 100)]));
    assert_eq!(pieces[5], pts(&[(200, 100), (300, 100), (300, 200), (200, 200)]));
    for piece in &pieces {
        assert_eq!(piece.len(), 4);
        assert_eq!(crate::geom::signed_area2(piece), 20_000);
    }
}

#[test]
fn negative_rectangle() {
    let pieces = split_points(100, &[(-200, -100), (100, -100), (100, 100), (-200, 100)]).unwrap();
    assert_eq!(pieces.len(), 6);
    assert_eq!(pieces[0], pts(&[(-200, -100), (-100, -100), (-100, 0), (-200, 0)]));
}

#[test]
fn notch_is_reconnected() {
    let input = [(0, 0), (300, 0), (300, 100), (200, 100), (200, 40), (150, 40), (150, 100), (0, 100)];
    let pieces = split_points(100, &input).unwrap();
    assert_eq!(
        pieces,
        vec![
            pts(&[(200, 0), (300, 0), (300, 100), (200, 100)]),
            pts(&[(200, 40), (150, 40), (150, 100), (100, 100), (100, 0), (200, 0)]),
            pts(&[(100, 100), (0, 100), (0, 0), (100, 0)]),
        ]
    );
}

#[test]
fn negative_coordinates_terminate() {
    let pieces = split_points(37, &[(-317, -352), (-739, -520), (-420, -538)]).unwrap();
    assert_eq!(pieces.len(), 41);
    for piece in &pieces {
        let bbox = align_bounding_box_to_grid(Rect::from_points(piece), 37);
        assert!(bbox.width() <= 37 && bbox.height() <= 37);
    }
}

#[test]
fn near_180_degree_turn() {
    let pieces = split_points(
        536_870_912,
        &[
            (1762726281, 539058125),
            (1753181909, 529712634),
            (1762925162, 535180843),
            (1772668295, 540648933),
            (1776048554, 542438502),
        ],
    )
    .unwrap();
    assert_eq!(pieces.len(), 2);
    assert_eq!(pieces[0].len(), 5);
    assert_eq!(pieces[1].len(), 4);
}

#[test]
fn no_dead_loop() {
    let pieces = split_points(
        536_870_912,
        &[
            (1682195525, -108964751),
            (1566072494, -11532703),
            (1564282805, -17299054),
            (1573628415, -20082789),
            (1579593648, -27042187),
            (1674838484, -101806473),
        ],
    )
    .unwrap();
    assert_eq!(pieces.len(), 2);
    assert_eq!(pieces[0].len(), 4);
    assert_eq!(pieces[1].len(), 6);
}

#[test]
fn self_intersection_fails_without_partial_result() {
    let mut splitter = PolygonTileSplitter::with_tile_size(20).unwrap();
    let input = pts(&[(40, 0), (50, 80), (80, 0), (0, 30), (100, 50)]);
    assert!(splitter.split(&Polygon::borrowed(&input)).is_err());
    assert!(splitter.results().is_empty());
}

#[test]
fn requires_tile_size() {
    let mut splitter = PolygonTileSplitter::new();
    let input = pts(&[(0, 0), (10, 0), (0, 10)]);
    assert_eq!(
        splitter.split(&Polygon::borrowed(&input)),
        Err(SplitError::InvalidTileSize(0))
    );
    assert_eq!(splitter.set_tile_size(0), Err(SplitError::InvalidTileSize(0)));
}

#[test]
fn buffers_are_reused_between_calls() {
    let mut splitter = PolygonTileSplitter::with_tile_size(100).unwrap();
    let input = pts(&[(0, 0), (0, 200), (300, 200), (300, 0)]);
    assert_eq!(splitter.split(&Polygon::borrowed(&input)).unwrap().len(), 6);
    let available = splitter.pool.available();
    assert_eq!(splitter.split(&Polygon::borrowed(&input)).unwrap().len(), 6);
    assert_eq!(splitter.pool.available(), available);
    assert_eq!(splitter.pool.outstanding(), 6);
}

#[test]
fn cut_line_picks_longer_side() {
    assert_eq!(cut_line(&Rect::new(0, 0, 200, 100), 100), (Axis::Vertical, 100));
    assert_eq!(cut_line(&Rect::new(0, 0, 100, 300), 100), (Axis::Horizontal, 100));
    // Snapping rounds down, also for negative coordinates.
    assert_eq!(cut_line(&Rect::new(-300, 0, 0, 100), 100), (Axis::Vertical, -200));
    assert_eq!(cut_line(&Rect::new(-407, -407, -333, -333), 37), (Axis::Vertical, -370));
    assert_eq!(
        cut_line(&Rect::new(0, 0, i32::MAX, 1 << 29), 1 << 29),
        (Axis::Vertical, 1 << 29)
    );
}

#[test]
fn cut_line_stays_inside_small_boxes() {
    // Odd edges at tile size 1 must not put the cut on the far edge.
    assert_eq!(cut_line(&Rect::new(5, -3, 7, -1), 1), (Axis::Vertical, 6));
    assert_eq!(cut_line(&Rect::new(0, 5, 1, 8), 1), (Axis::Horizontal, 6));
    assert_eq!(cut_line(&Rect::new(-7, -9, -5, -6), 1), (Axis::Horizontal, -8));
    // A left edge clamped to i32::MIN still cuts on a grid line.
    assert_eq!(
        cut_line(&Rect::new(i32::MIN, 0, -2147483500, 50), 100),
        (Axis::Vertical, -2147483600)
    );
}

#[test]
fn unit_tiles_terminate() {
    let input = [(-10, 3), (5, -4), (9, 1), (2, 8), (-8, 4)];
    let pieces = split_points(1, &input).unwrap();
    assert_eq!(pieces.len(), 98);
    for piece in &pieces {
        let bbox = align_bounding_box_to_grid(Rect::from_points(piece), 1);
        assert!(bbox.width() <= 1 && bbox.height() <= 1, "{:?}", piece);
    }
}

#[test]
fn split_square_in_half() {
    let square = pts(&[(0, 0), (10, 0), (10, 10), (0, 10)]);
    let mut below = MutablePolygon::new();
    let mut above = MutablePolygon::new();
    split_along(&square, Axis::Vertical, 5, &mut below, &mut above);
    assert_eq!(below.points(), &pts(&[(0, 0), (5, 0), (5, 10), (0, 10)])[..]);
    assert_eq!(above.points(), &pts(&[(5, 0), (10, 0), (10, 10), (5, 10)])[..]);
}

#[test]
fn split_polygon_on_one_side() {
    let tri = pts(&[(0, 0), (4, 0), (4, 4)]);
    let mut below = MutablePolygon::new();
    let mut above = MutablePolygon::new();
    split_along(&tri, Axis::Vertical, 10, &mut below, &mut above);
    assert_eq!(below.points(), &tri[..]);
    assert!(above.is_empty());

    // Edge lying on the cut line stays with the polygon.
    let square = pts(&[(0, 0), (10, 0), (10, 10), (0, 10)]);
    below.clear();
    split_along(&square, Axis::Horizontal, 10, &mut below, &mut above);
    assert_eq!(below.points(), &square[..]);
    assert!(above.is_empty());
}

#[test]
fn weak_simple_chain_separates() {
    let shape = pts(&[(0, 0), (10, 0), (10, 4), (5, 4), (5, 8), (10, 8), (10, 12), (0, 12)]);
    let mut below = MutablePolygon::new();
    let mut above = MutablePolygon::new();
    split_along(&shape, Axis::Vertical, 5, &mut below, &mut above);
    assert_eq!(
        above.points(),
        &pts(&[(5, 0), (10, 0), (10, 4), (5, 4), (5, 8), (10, 8), (10, 12), (5, 12)])[..]
    );

    let mut reconnector = Reconnector::new();
    let mut pool = PointBufferPool::new();
    let mut queue = Vec::new();
    reconnector
        .divide(above.points(), Axis::Vertical, 5, false, &mut pool, &mut queue)
        .unwrap();
    assert_eq!(
        queue,
        vec![
            pts(&[(5, 0), (10, 0), (10, 4), (5, 4)]),
            pts(&[(5, 8), (10, 8), (10, 12), (5, 12)]),
        ]
    );

    queue.clear();
    reconnector
        .divide(below.points(), Axis::Vertical, 5, true, &mut pool, &mut queue)
        .unwrap();
    assert_eq!(queue, vec![pts(&[(5, 12), (0, 12), (0, 0), (5, 0)])]);
    assert_eq!(p(5, 0), queue[0][3]);
}
