//! The planning engine: pure layout and conflict computations over plain
//! model data. No I/O, no retained state: callers recompute on every
//! data change and render the results themselves.

pub mod board;
pub mod bounds;
pub mod conflict;
pub mod grid;
pub mod lanes;
pub mod zoom;

pub use board::{compute_board_layout, BoardLayout, RowLayout, Tile};
pub use bounds::{row_height, tile_bounds, MIN_TILE_HEIGHT, ROW_BASE_HEIGHT, TRACK_GUTTER};
pub use conflict::{find_conflicts, has_conflict};
pub use grid::TimeGrid;
pub use lanes::{compute_lanes, Lane, MIN_TILE_WIDTH};
pub use zoom::{UnsupportedScale, Zoom, ZoomLevel, ZOOM_LEVELS};
