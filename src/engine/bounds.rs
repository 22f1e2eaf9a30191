//! Pixel rectangles for board tiles.

use chrono::{Duration, NaiveDateTime};
use egui::{Pos2, Rect, Vec2};

use super::grid::{TimeGrid, DAYS_PER_WEEK};
use super::lanes::Lane;

/// Height of one track band within a row.
pub const ROW_BASE_HEIGHT: f32 = 28.0;
/// Vertical gap between track bands.
pub const TRACK_GUTTER: f32 = 2.0;
/// Tiles never shrink below this height.
pub const MIN_TILE_HEIGHT: f32 = 12.0;

/// Total height of a row holding `tracks` track bands.
pub fn row_height(tracks: usize) -> f32 {
    tracks.max(1) as f32 * (ROW_BASE_HEIGHT + TRACK_GUTTER)
}

/// Rectangle for one tile, given its time range, lane and the row's
/// origin y.
///
/// The horizontal extent comes from the grid; the width floor and the
/// min/max guard keep degenerate ranges (zero width, reversed endpoints
/// from clock anomalies) visible rather than invalid. The rect is then
/// reconciled with the day columns its range occupies so time-to-pixel
/// rounding can never bleed a tile across a day-separator line.
pub fn tile_bounds(
    start: NaiveDateTime,
    end: NaiveDateTime,
    lane: &Lane,
    grid: &TimeGrid,
    row_origin_y: f32,
) -> Rect {
    let x1 = grid.time_to_x(start);
    let x2 = grid.time_to_x(end);
    let mut left = x1.min(x2);
    let mut right = left + (x2 - x1).abs().max(1.0);

    // Day columns covered by the range; end is exclusive, so back the
    // last covered day off by a second. Only ranges fully inside the
    // displayed week are reconciled; off-week tiles are clipped by the
    // caller anyway.
    let first_day = (start.date() - grid.week_start).num_days();
    let last_day = ((end - Duration::seconds(1)).date() - grid.week_start).num_days();
    if first_day >= 0 && last_day < DAYS_PER_WEEK && first_day <= last_day {
        let xs = grid.day_column_xs();
        let col_left = xs[first_day as usize];
        let col_right = xs[last_day as usize + 1] - 1.0;
        left = left.max(col_left);
        right = right.min(col_right).max(left + 1.0);
    }

    let y = row_origin_y + lane.track as f32 * (ROW_BASE_HEIGHT + TRACK_GUTTER);
    let height = (ROW_BASE_HEIGHT - 1.0).max(MIN_TILE_HEIGHT);
    Rect::from_min_size(Pos2::new(left, y), Vec2::new(right - left, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn grid() -> TimeGrid {
        TimeGrid::new(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), 22.0, 140.0)
    }

    fn lane(track: usize) -> Lane {
        Lane {
            index: 0,
            count: 1,
            track,
            tracks: track + 1,
        }
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_width_follows_duration() {
        let g = grid();
        let r = tile_bounds(at(2, 9), at(2, 11), &lane(0), &g, 50.0);
        assert_eq!(r.min.x, g.time_to_x(at(2, 9)));
        assert!((r.width() - 2.0 * g.px_per_hour).abs() < 1.5);
        assert_eq!(r.min.y, 50.0);
        assert_eq!(r.height(), ROW_BASE_HEIGHT - 1.0);
    }

    #[test]
    fn test_zero_duration_still_one_pixel_wide() {
        let g = grid();
        let r = tile_bounds(at(2, 9), at(2, 9), &lane(0), &g, 0.0);
        assert!(r.width() >= 1.0);
    }

    #[test]
    fn test_reversed_range_is_normalized() {
        let g = grid();
        let r = tile_bounds(at(2, 11), at(2, 9), &lane(0), &g, 0.0);
        assert_eq!(r.min.x, g.time_to_x(at(2, 9)));
        assert!(r.width() > 1.0);
    }

    #[test]
    fn test_track_offsets_y() {
        let g = grid();
        let r0 = tile_bounds(at(2, 9), at(2, 11), &lane(0), &g, 100.0);
        let r1 = tile_bounds(at(2, 9), at(2, 11), &lane(1), &g, 100.0);
        assert_eq!(r1.min.y - r0.min.y, ROW_BASE_HEIGHT + TRACK_GUTTER);
    }

    #[test]
    fn test_tile_stays_inside_its_day_column() {
        let g = grid();
        let xs = g.day_column_xs();
        // Tuesday 00:00 to Wednesday 00:00 occupies exactly day column 1.
        let r = tile_bounds(at(3, 0), at(4, 0), &lane(0), &g, 0.0);
        assert!(r.min.x >= xs[1]);
        assert!(r.max.x <= xs[2]);
    }

    #[test]
    fn test_multi_day_range_spans_its_columns() {
        let g = grid();
        let xs = g.day_column_xs();
        let r = tile_bounds(at(3, 12), at(5, 12), &lane(0), &g, 0.0);
        assert!(r.min.x >= xs[1]);
        assert!(r.max.x <= xs[4]);
        assert!(r.width() > g.px_per_hour * 24.0);
    }

    #[test]
    fn test_row_height_scales_with_tracks() {
        assert_eq!(row_height(1), ROW_BASE_HEIGHT + TRACK_GUTTER);
        assert_eq!(row_height(3), 3.0 * (ROW_BASE_HEIGHT + TRACK_GUTTER));
        assert_eq!(row_height(0), row_height(1));
    }
}
