//! Lane assignment for one board row.
//!
//! Overlapping interventions on the same resource are spread over columns
//! by a sweep in start-time order, then the columns are folded into
//! vertical tracks when the row is too narrow to give every column at
//! least [`MIN_TILE_WIDTH`] pixels.

use chrono::NaiveDateTime;

use crate::model::Intervention;

/// Narrowest acceptable tile before the row wraps into another track.
pub const MIN_TILE_WIDTH: f32 = 60.0;

/// Placement of one intervention within its resource row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lane {
    /// Column index within the assigned track.
    pub index: usize,
    /// Columns per track for this row; every tile gets the same share of
    /// the width even when its own track holds fewer items.
    pub count: usize,
    /// Which track (vertical wrap level) the tile sits on.
    pub track: usize,
    /// Total tracks for this row.
    pub tracks: usize,
}

/// Assign a lane to every intervention of a single resource row.
///
/// The result is parallel to `items`; entries without a well-formed time
/// range come back as `None` and are excluded from layout. Input order
/// does not matter, but for a fixed input the output is identical on
/// every call: items are sorted by start with ties broken by input order,
/// and no hash-ordered structure is involved.
pub fn compute_lanes(items: &[&Intervention], row_usable_width: f32) -> Vec<Option<Lane>> {
    let mut order: Vec<(usize, NaiveDateTime, NaiveDateTime)> = items
        .iter()
        .enumerate()
        .filter_map(|(i, iv)| iv.span().map(|(s, e)| (i, s, e)))
        .collect();
    order.sort_by_key(|&(_, start, _)| start);

    // Sweep: keep the set of still-open intervals and give each new item
    // the smallest column no open interval is using.
    let mut open: Vec<(NaiveDateTime, usize)> = Vec::new();
    let mut assigned: Vec<(usize, usize)> = Vec::with_capacity(order.len());
    let mut max_cols = 0usize;
    for &(i, start, end) in &order {
        // Half-open: an interval ending exactly at `start` is closed.
        open.retain(|&(open_end, _)| open_end > start);
        let mut col = 0;
        while open.iter().any(|&(_, used)| used == col) {
            col += 1;
        }
        open.push((end, col));
        assigned.push((i, col));
        max_cols = max_cols.max(col + 1);
    }

    let mut lanes = vec![None; items.len()];
    if max_cols == 0 {
        return lanes;
    }

    // Degenerate-width cap: below MIN_TILE_WIDTH the track formula would
    // demand more tracks than columns. Clamping the width caps tracks at
    // max_cols, one column per track.
    let width = row_usable_width.max(MIN_TILE_WIDTH);
    let tracks = ((max_cols as f32 * MIN_TILE_WIDTH / width).ceil() as usize).max(1);
    let cols_per_track = max_cols.div_ceil(tracks);
    for (i, col) in assigned {
        lanes[i] = Some(Lane {
            index: col / tracks,
            count: cols_per_track,
            track: col % tracks,
            tracks,
        });
    }
    lanes
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const WIDE: f32 = 1000.0;

    fn at(hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn iv(start: NaiveDateTime, end: NaiveDateTime) -> Intervention {
        Intervention::new("Booking", start, end)
    }

    fn lanes_of(items: &[Intervention], width: f32) -> Vec<Option<Lane>> {
        let refs: Vec<&Intervention> = items.iter().collect();
        compute_lanes(&refs, width)
    }

    #[test]
    fn test_single_item_gets_the_whole_row() {
        let items = vec![iv(at(9, 0), at(11, 0))];
        let lanes = lanes_of(&items, WIDE);
        assert_eq!(
            lanes[0],
            Some(Lane {
                index: 0,
                count: 1,
                track: 0,
                tracks: 1
            })
        );
    }

    #[test]
    fn test_overlapping_pair_splits_into_two_columns() {
        let items = vec![iv(at(9, 0), at(11, 0)), iv(at(10, 0), at(12, 0))];
        let lanes = lanes_of(&items, WIDE);
        let a = lanes[0].unwrap();
        let b = lanes[1].unwrap();
        assert_eq!((a.index, a.count, a.track), (0, 2, 0));
        assert_eq!((b.index, b.count, b.track), (1, 2, 0));
    }

    #[test]
    fn test_column_freed_after_half_open_close() {
        // Second item starts exactly when the first ends: column 0 is
        // free again.
        let items = vec![iv(at(9, 0), at(10, 0)), iv(at(10, 0), at(11, 0))];
        let lanes = lanes_of(&items, WIDE);
        assert_eq!(lanes[0].unwrap().index, 0);
        assert_eq!(lanes[1].unwrap().index, 0);
        assert_eq!(lanes[1].unwrap().count, 1);
    }

    #[test]
    fn test_three_way_overlap_wraps_into_two_tracks() {
        // Three concurrent items with a width that only fits one
        // MIN_TILE_WIDTH column per track: tracks = ceil(3 * 60 / 100) = 2.
        let items = vec![
            iv(at(9, 0), at(10, 0)),
            iv(at(9, 15), at(10, 15)),
            iv(at(9, 30), at(10, 30)),
        ];
        let lanes = lanes_of(&items, 100.0);
        let got: Vec<(usize, usize)> = lanes
            .iter()
            .map(|l| {
                let l = l.unwrap();
                assert_eq!(l.tracks, 2);
                assert_eq!(l.count, 2);
                (l.track, l.index)
            })
            .collect();
        assert_eq!(got, vec![(0, 0), (1, 0), (0, 1)]);
    }

    #[test]
    fn test_zero_duration_item_is_excluded() {
        let items = vec![iv(at(9, 0), at(9, 0)), iv(at(9, 0), at(10, 0))];
        let lanes = lanes_of(&items, WIDE);
        assert!(lanes[0].is_none());
        assert_eq!(lanes[1].unwrap().count, 1);
    }

    #[test]
    fn test_missing_endpoint_is_excluded() {
        let mut open_ended = iv(at(9, 0), at(10, 0));
        open_ended.end = None;
        let items = vec![open_ended];
        assert_eq!(lanes_of(&items, WIDE), vec![None]);
    }

    #[test]
    fn test_unsorted_input_is_handled() {
        let items = vec![iv(at(10, 0), at(12, 0)), iv(at(9, 0), at(11, 0))];
        let lanes = lanes_of(&items, WIDE);
        // The 09:00 item comes first in the sweep, so it gets column 0.
        assert_eq!(lanes[1].unwrap().index, 0);
        assert_eq!(lanes[0].unwrap().index, 1);
    }

    #[test]
    fn test_overlapping_items_never_share_a_slot() {
        let items = vec![
            iv(at(8, 0), at(12, 0)),
            iv(at(9, 0), at(10, 0)),
            iv(at(9, 30), at(11, 0)),
            iv(at(10, 0), at(13, 0)),
            iv(at(12, 0), at(14, 0)),
            iv(at(12, 30), at(13, 30)),
        ];
        for width in [WIDE, 150.0, 100.0, 50.0] {
            let lanes = lanes_of(&items, width);
            for i in 0..items.len() {
                for j in (i + 1)..items.len() {
                    let (s1, e1) = items[i].span().unwrap();
                    let (s2, e2) = items[j].span().unwrap();
                    if s1 < e2 && s2 < e1 {
                        let a = lanes[i].unwrap();
                        let b = lanes[j].unwrap();
                        assert_ne!(
                            (a.track, a.index),
                            (b.track, b.index),
                            "items {i} and {j} collide at width {width}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_first_fit_reuses_lowest_free_column() {
        // Columns 0 and 1 occupied, column 0 frees at 10:00; the item
        // starting at 10:00 must take column 0, not open column 2.
        let items = vec![
            iv(at(9, 0), at(10, 0)),
            iv(at(9, 0), at(12, 0)),
            iv(at(10, 0), at(11, 0)),
        ];
        let lanes = lanes_of(&items, WIDE);
        assert_eq!(lanes[2].unwrap().index, 0);
        assert_eq!(lanes[1].unwrap().index, 1);
    }

    #[test]
    fn test_track_indices_stay_below_track_count() {
        let items: Vec<Intervention> = (0..7)
            .map(|i| iv(at(9, i * 5), at(11, 0)))
            .collect();
        let lanes = lanes_of(&items, 130.0);
        let tracks = lanes[0].unwrap().tracks;
        assert_eq!(tracks, (7.0 * MIN_TILE_WIDTH / 130.0).ceil() as usize);
        for lane in lanes.iter().flatten() {
            assert!(lane.track < tracks);
            assert!(lane.index < lane.count);
        }
    }

    #[test]
    fn test_width_below_min_tile_caps_tracks_at_column_count() {
        // Three concurrent items in a 10 px row: the width clamp keeps
        // tracks at 3 (one column per track) instead of demanding 18.
        let items = vec![
            iv(at(9, 0), at(10, 0)),
            iv(at(9, 15), at(10, 15)),
            iv(at(9, 30), at(10, 30)),
        ];
        let lanes = lanes_of(&items, 10.0);
        for (k, lane) in lanes.iter().enumerate() {
            let lane = lane.unwrap();
            assert_eq!(lane.tracks, 3);
            assert_eq!(lane.count, 1);
            assert_eq!((lane.track, lane.index), (k, 0));
        }
    }

    #[test]
    fn test_deterministic_across_calls() {
        let items = vec![
            iv(at(9, 0), at(11, 0)),
            iv(at(9, 0), at(11, 0)),
            iv(at(10, 0), at(12, 0)),
        ];
        let first = lanes_of(&items, 100.0);
        for _ in 0..10 {
            assert_eq!(lanes_of(&items, 100.0), first);
        }
    }
}
