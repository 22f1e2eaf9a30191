//! Bidirectional mapping between calendar time and horizontal pixels.
//!
//! One `TimeGrid` covers a fixed 7-day week. The header and the grid body
//! are painted independently, so both must take their day-separator
//! positions from the same [`TimeGrid::day_column_xs`] array. That is
//! what keeps the two pixel-identical.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub const DAYS_PER_WEEK: i64 = 7;
pub const HOURS_PER_DAY: f32 = 24.0;

/// Immutable-per-configuration time↔pixel mapping for one displayed week.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    /// First day of the displayed week.
    pub week_start: NaiveDate,
    pub px_per_hour: f32,
    /// Width of the row-label gutter left of day 0.
    pub gutter: f32,
}

impl TimeGrid {
    pub fn new(week_start: NaiveDate, px_per_hour: f32, gutter: f32) -> Self {
        Self {
            week_start,
            px_per_hour,
            gutter,
        }
    }

    /// X coordinate of an instant. Instants outside the displayed week
    /// extrapolate linearly instead of clamping or failing, so callers
    /// can cull or clip off-week tiles themselves.
    pub fn time_to_x(&self, t: NaiveDateTime) -> f32 {
        let days = (t.date() - self.week_start).num_days() as f32;
        let hour = t.hour() as f32 + t.minute() as f32 / 60.0 + t.second() as f32 / 3600.0;
        self.gutter + (days * HOURS_PER_DAY + hour) * self.px_per_hour
    }

    /// Inverse of [`Self::time_to_x`], exact up to pixel rounding
    /// (resolved to whole seconds).
    pub fn x_to_time(&self, x: f32) -> NaiveDateTime {
        let hours = (x - self.gutter) / self.px_per_hour;
        let secs = (hours * 3600.0).round() as i64;
        self.week_start.and_time(NaiveTime::MIN) + Duration::seconds(secs)
    }

    /// The 8 day-boundary x coordinates: 7 day starts plus the trailing
    /// edge of the week.
    pub fn day_column_xs(&self) -> [f32; 8] {
        let mut xs = [0.0; 8];
        for (day, x) in xs.iter_mut().enumerate() {
            *x = self.gutter + day as f32 * HOURS_PER_DAY * self.px_per_hour;
        }
        xs
    }

    /// Width of the 7-day content area, excluding the gutter.
    pub fn content_width(&self) -> f32 {
        DAYS_PER_WEEK as f32 * HOURS_PER_DAY * self.px_per_hour
    }

    /// Date shown in day column `day` (0-based).
    pub fn day_date(&self, day: usize) -> NaiveDate {
        self.week_start + Duration::days(day as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> TimeGrid {
        // Monday 2026-03-02.
        TimeGrid::new(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), 22.0, 140.0)
    }

    #[test]
    fn test_week_start_midnight_maps_to_gutter_edge() {
        let g = grid();
        let t = g.week_start.and_time(NaiveTime::MIN);
        assert_eq!(g.time_to_x(t), g.gutter);
    }

    #[test]
    fn test_round_trip_within_the_week() {
        let g = grid();
        for day in 0..7 {
            for hour in [0, 7, 12, 23] {
                let t = g.day_date(day).and_hms_opt(hour, 30, 0).unwrap();
                assert_eq!(g.x_to_time(g.time_to_x(t)), t, "day {day} hour {hour}");
            }
        }
    }

    #[test]
    fn test_out_of_week_instants_extrapolate() {
        let g = grid();
        let before = (g.week_start - Duration::days(2)).and_time(NaiveTime::MIN);
        let after = (g.week_start + Duration::days(9)).and_time(NaiveTime::MIN);
        assert!(g.time_to_x(before) < g.gutter);
        assert!(g.time_to_x(after) > g.gutter + g.content_width());
        assert_eq!(g.x_to_time(g.time_to_x(before)), before);
    }

    #[test]
    fn test_day_columns_are_deterministic_and_aligned() {
        let g = grid();
        let xs = g.day_column_xs();
        assert_eq!(xs, g.day_column_xs());
        assert_eq!(xs[0], g.gutter);
        assert_eq!(xs[7], g.gutter + g.content_width());
        for day in 0..7 {
            let t = g.day_date(day).and_time(NaiveTime::MIN);
            assert_eq!(g.time_to_x(t), xs[day]);
        }
    }

    #[test]
    fn test_content_width_formula() {
        let g = grid();
        assert_eq!(g.content_width(), 7.0 * 24.0 * 22.0);
    }
}
