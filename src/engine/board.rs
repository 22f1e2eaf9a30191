//! Full board layout: one row per resource, tiles placed by lane and
//! time range.
//!
//! Recomputed from scratch on every paint; nothing here is cached or
//! mutated between calls.

use egui::Rect;

use super::bounds::{row_height, tile_bounds};
use super::grid::TimeGrid;
use super::lanes::{compute_lanes, Lane};
use crate::model::{Intervention, Resource};

/// One placed tile. `item` indexes into the intervention slice the
/// layout was computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub item: usize,
    pub lane: Lane,
    pub rect: Rect,
}

/// Layout of one resource row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    pub resource: usize,
    pub origin_y: f32,
    pub tracks: usize,
    pub tiles: Vec<Tile>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardLayout {
    pub rows: Vec<RowLayout>,
    pub content_width: f32,
    pub content_height: f32,
}

/// Compute the whole board. Rows appear in resource order; an
/// intervention occupying several resources gets one tile per row.
/// `origin_y` of the first row is `top`, normally the header height.
pub fn compute_board_layout(
    resources: &[Resource],
    interventions: &[Intervention],
    grid: &TimeGrid,
    top: f32,
) -> BoardLayout {
    let row_width = grid.content_width();
    let mut rows = Vec::with_capacity(resources.len());
    let mut y = top;

    for (res_index, resource) in resources.iter().enumerate() {
        let members: Vec<usize> = interventions
            .iter()
            .enumerate()
            .filter(|(_, iv)| iv.uses_resource(resource.id))
            .map(|(i, _)| i)
            .collect();
        let items: Vec<&Intervention> = members.iter().map(|&i| &interventions[i]).collect();
        let lanes = compute_lanes(&items, row_width);

        let tracks = lanes
            .iter()
            .flatten()
            .map(|lane| lane.tracks)
            .max()
            .unwrap_or(1);

        let mut tiles = Vec::new();
        for (slot, lane) in lanes.iter().enumerate() {
            let Some(lane) = lane else { continue };
            let item = members[slot];
            // compute_lanes only assigns a lane to items with a span.
            let Some((start, end)) = interventions[item].span() else {
                continue;
            };
            tiles.push(Tile {
                item,
                lane: *lane,
                rect: tile_bounds(start, end, lane, grid, y),
            });
        }

        rows.push(RowLayout {
            resource: res_index,
            origin_y: y,
            tracks,
            tiles,
        });
        y += row_height(tracks);
    }

    BoardLayout {
        rows,
        content_width: grid.gutter + grid.content_width(),
        content_height: y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::bounds::row_height;
    use crate::model::ResourceKind;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn grid() -> TimeGrid {
        TimeGrid::new(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), 22.0, 140.0)
    }

    #[test]
    fn test_shared_intervention_appears_in_both_rows() {
        let crane = Resource::new("Crane", ResourceKind::Crane);
        let truck = Resource::new("Truck", ResourceKind::Truck);
        let iv = Intervention::new("Lift", at(2, 9), at(2, 12))
            .with_resource(crane.id)
            .with_resource(truck.id);

        let layout = compute_board_layout(&[crane, truck], &[iv], &grid(), 40.0);
        assert_eq!(layout.rows.len(), 2);
        assert_eq!(layout.rows[0].tiles.len(), 1);
        assert_eq!(layout.rows[1].tiles.len(), 1);
        assert_eq!(layout.rows[0].tiles[0].item, 0);
        assert_eq!(layout.rows[1].tiles[0].item, 0);
    }

    #[test]
    fn test_rows_stack_by_track_count() {
        let crane = Resource::new("Crane", ResourceKind::Crane);
        let truck = Resource::new("Truck", ResourceKind::Truck);
        let a = Intervention::new("A", at(2, 9), at(2, 12)).with_resource(crane.id);
        let b = Intervention::new("B", at(2, 10), at(2, 13)).with_resource(crane.id);

        let layout = compute_board_layout(&[crane, truck], &[a, b], &grid(), 0.0);
        let first = &layout.rows[0];
        assert_eq!(layout.rows[1].origin_y, first.origin_y + row_height(first.tracks));
        assert_eq!(
            layout.content_height,
            layout.rows[1].origin_y + row_height(layout.rows[1].tracks)
        );
    }

    #[test]
    fn test_unscheduled_interventions_produce_no_tiles() {
        let crane = Resource::new("Crane", ResourceKind::Crane);
        let mut draft = Intervention::draft("Draft");
        draft.resources.push(crane.id);

        let layout = compute_board_layout(std::slice::from_ref(&crane), &[draft], &grid(), 0.0);
        assert!(layout.rows[0].tiles.is_empty());
        assert_eq!(layout.rows[0].tracks, 1);
    }

    #[test]
    fn test_content_width_includes_gutter() {
        let g = grid();
        let layout = compute_board_layout(&[], &[], &g, 0.0);
        assert_eq!(layout.content_width, g.gutter + g.content_width());
        assert!(layout.rows.is_empty());
    }
}
