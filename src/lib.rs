// tilesplit: grid tiling, clipping, merging and labeling of integer polygons
// Copyright 2025 Lars Brubaker
// License: MIT

pub mod error;
pub mod geom;
pub mod grid;
pub mod marker;
pub mod merger;
pub mod polygon;
pub mod polygon_tile;
pub mod polyline_polygon;
pub mod polyline_tile;
pub mod pool;
pub mod sink;

pub use error::SplitError;
pub use geom::{Point, Rect};
pub use grid::{GridId, Position};
pub use marker::{MarkPoint, PolygonMarker};
pub use merger::PolygonMerger;
pub use polygon::{MutablePolygon, Polygon};
pub use polygon_tile::PolygonTileSplitter;
pub use polyline_polygon::{Keep, PolylinePolygonSplitter};
pub use polyline_tile::PolylineTileSplitter;
pub use pool::PointBufferPool;
pub use sink::{Collected, SplitSink};
