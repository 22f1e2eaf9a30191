//! Discrete zoom levels for the board's time scale.
//!
//! Each level pairs a minutes-per-cell value with a fixed pixels-per-cell
//! constant; gridline cadence and pixels-per-hour both derive from the
//! active level. Arbitrary scales are rejected; the gridline set only
//! makes sense for the supported menu.

use std::fmt;

/// One supported scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLevel {
    pub minutes_per_cell: u32,
    pub px_per_cell: f32,
}

/// Supported scales, finest first.
pub const ZOOM_LEVELS: &[ZoomLevel] = &[
    ZoomLevel {
        minutes_per_cell: 5,
        px_per_cell: 4.0,
    },
    ZoomLevel {
        minutes_per_cell: 15,
        px_per_cell: 9.0,
    },
    ZoomLevel {
        minutes_per_cell: 30,
        px_per_cell: 14.0,
    },
    ZoomLevel {
        minutes_per_cell: 60,
        px_per_cell: 22.0,
    },
];

/// A scale value outside the supported menu was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedScale(pub u32);

impl fmt::Display for UnsupportedScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported scale: {} minutes per cell", self.0)
    }
}

impl std::error::Error for UnsupportedScale {}

/// Current zoom state, stepping through [`ZOOM_LEVELS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zoom {
    level: usize,
}

impl Default for Zoom {
    fn default() -> Self {
        // 30 minutes per cell.
        Self { level: 2 }
    }
}

impl Zoom {
    pub fn minutes_per_cell(&self) -> u32 {
        ZOOM_LEVELS[self.level].minutes_per_cell
    }

    pub fn px_per_cell(&self) -> f32 {
        ZOOM_LEVELS[self.level].px_per_cell
    }

    pub fn minute_to_pixel(&self, minutes: f32) -> f32 {
        minutes / self.minutes_per_cell() as f32 * self.px_per_cell()
    }

    pub fn pixel_to_minute(&self, px: f32) -> f32 {
        px / self.px_per_cell() * self.minutes_per_cell() as f32
    }

    /// Pixels for one hour at the current level.
    pub fn px_per_hour(&self) -> f32 {
        self.minute_to_pixel(60.0)
    }

    /// Step to a finer scale; no-op at the finest level.
    pub fn zoom_in(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Step to a coarser scale; no-op at the coarsest level.
    pub fn zoom_out(&mut self) {
        if self.level + 1 < ZOOM_LEVELS.len() {
            self.level += 1;
        }
    }

    /// Jump to a specific scale from the supported menu.
    pub fn set_minutes_per_cell(&mut self, minutes: u32) -> Result<(), UnsupportedScale> {
        match ZOOM_LEVELS
            .iter()
            .position(|l| l.minutes_per_cell == minutes)
        {
            Some(level) => {
                self.level = level;
                Ok(())
            }
            None => Err(UnsupportedScale(minutes)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scale() {
        assert_eq!(Zoom::default().minutes_per_cell(), 30);
    }

    #[test]
    fn test_zoom_steps_through_levels() {
        let mut z = Zoom::default();
        z.zoom_in();
        assert_eq!(z.minutes_per_cell(), 15);
        z.zoom_out();
        z.zoom_out();
        assert_eq!(z.minutes_per_cell(), 60);
    }

    #[test]
    fn test_zoom_out_at_coarsest_is_a_no_op() {
        let mut z = Zoom::default();
        z.set_minutes_per_cell(60).unwrap();
        z.zoom_out();
        assert_eq!(z.minutes_per_cell(), 60);
    }

    #[test]
    fn test_zoom_in_at_finest_is_a_no_op() {
        let mut z = Zoom::default();
        z.set_minutes_per_cell(5).unwrap();
        z.zoom_in();
        assert_eq!(z.minutes_per_cell(), 5);
    }

    #[test]
    fn test_unsupported_scale_is_rejected() {
        let mut z = Zoom::default();
        assert_eq!(z.set_minutes_per_cell(7), Err(UnsupportedScale(7)));
        // State is untouched on rejection.
        assert_eq!(z.minutes_per_cell(), 30);
    }

    #[test]
    fn test_minute_pixel_pair_are_inverses() {
        let mut z = Zoom::default();
        for level in [5, 15, 30, 60] {
            z.set_minutes_per_cell(level).unwrap();
            for minutes in [0.0, 12.5, 60.0, 480.0] {
                let px = z.minute_to_pixel(minutes);
                assert!((z.pixel_to_minute(px) - minutes).abs() < 1e-3);
            }
        }
    }
}
