use chrono::{Duration, NaiveDate, NaiveDateTime};
use egui::{Align2, Color32, Id, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use crate::engine::{self, TimeGrid, Zoom};
use crate::model::Plan;
use crate::ui::theme;

/// Drag state for a tile being moved in time.
#[derive(Debug, Clone)]
struct DragSnapshot {
    start: NaiveDateTime,
    end: NaiveDateTime,
    start_pointer_x: f32,
}

/// Result details from interactions on the planning board.
#[derive(Debug, Clone, Default)]
pub struct BoardInteraction {
    pub changed: bool,
}

fn drag_id(iv: Uuid, row: usize) -> Id {
    Id::new(("tile_drag", iv, row))
}

/// Round a minute delta to the 15-minute drag snap.
fn snap_minutes(minutes: f32) -> i64 {
    ((minutes / 15.0).round() * 15.0) as i64
}

/// Render the planning board (central panel): week header, one row per
/// resource, and the intervention tiles laid out by the engine. The whole
/// layout is recomputed every frame from the current plan.
pub fn show_board(
    plan: &mut Plan,
    week_start: NaiveDate,
    zoom: &mut Zoom,
    selected: &mut Option<Uuid>,
    ui: &mut Ui,
) -> BoardInteraction {
    let mut interaction = BoardInteraction::default();

    // Ctrl+scroll steps the zoom levels.
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta);
    if ui.rect_contains_pointer(ui.max_rect()) && ui.input(|i| i.modifiers.ctrl) {
        if scroll_delta.y > 0.0 {
            zoom.zoom_in();
        } else if scroll_delta.y < 0.0 {
            zoom.zoom_out();
        }
    }

    let grid = TimeGrid::new(week_start, zoom.px_per_hour(), theme::RESOURCE_GUTTER);
    let layout = engine::compute_board_layout(
        &plan.resources,
        &plan.interventions,
        &grid,
        theme::HEADER_HEIGHT,
    );

    // Conflict flags per intervention; an intervention is excluded against
    // itself by identity inside the engine.
    let conflicted: Vec<bool> = plan
        .interventions
        .iter()
        .map(|iv| engine::has_conflict(iv, &plan.interventions))
        .collect();

    let available = ui.available_size();
    let board_width = layout.content_width.max(available.x);
    let board_height = (layout.content_height + 40.0).max(available.y);

    // Applied after painting; painting borrows the plan immutably.
    let mut pending_move: Option<(usize, NaiveDateTime, NaiveDateTime)> = None;

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) =
                ui.allocate_painter(Vec2::new(board_width, board_height), Sense::click());
            let origin = response.rect.min;
            let to_screen = |r: Rect| r.translate(origin.to_vec2());
            let mut consumed_click = false;

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

            // Both the header and the body take their day boundaries from
            // this one array; that is what keeps the separator lines
            // pixel-identical between the two.
            let day_xs = grid.day_column_xs();

            // Row backgrounds and resource labels.
            for (i, row) in layout.rows.iter().enumerate() {
                let row_h = engine::row_height(row.tracks);
                let y = origin.y + row.origin_y;
                if i % 2 == 0 {
                    painter.rect_filled(
                        Rect::from_min_size(
                            Pos2::new(origin.x, y),
                            Vec2::new(board_width, row_h),
                        ),
                        0.0,
                        theme::BG_ROW_EVEN,
                    );
                }
                painter.line_segment(
                    [
                        Pos2::new(origin.x, y + row_h),
                        Pos2::new(origin.x + board_width, y + row_h),
                    ],
                    Stroke::new(0.5, theme::BORDER_SUBTLE),
                );

                let resource = &plan.resources[row.resource];
                painter.text(
                    Pos2::new(origin.x + 10.0, y + row_h / 2.0),
                    Align2::LEFT_CENTER,
                    format!("{}  {}", theme::kind_icon(resource.kind), resource.name),
                    theme::font_header(),
                    theme::TEXT_SECONDARY,
                );
            }

            // Hour gridlines, skipped when the scale is too dense.
            if grid.px_per_hour >= 12.0 {
                for day in 0..7 {
                    for hour in 1..24 {
                        let x = origin.x + day_xs[day] + hour as f32 * grid.px_per_hour;
                        painter.line_segment(
                            [
                                Pos2::new(x, origin.y + theme::HEADER_HEIGHT),
                                Pos2::new(x, origin.y + layout.content_height),
                            ],
                            Stroke::new(0.5, theme::GRID_LINE),
                        );
                    }
                }
            }

            // Day separators, full height, from the shared boundary array.
            for &x in &day_xs {
                painter.line_segment(
                    [
                        Pos2::new(origin.x + x, origin.y),
                        Pos2::new(origin.x + x, origin.y + board_height),
                    ],
                    Stroke::new(1.0, theme::DAY_LINE),
                );
            }

            // Header: day labels between the same boundaries.
            painter.rect_filled(
                Rect::from_min_size(origin, Vec2::new(board_width, theme::HEADER_HEIGHT)),
                0.0,
                theme::BG_HEADER,
            );
            painter.text(
                Pos2::new(origin.x + 10.0, origin.y + theme::HEADER_HEIGHT / 2.0),
                Align2::LEFT_CENTER,
                "Resources",
                theme::font_header(),
                theme::TEXT_DIM,
            );
            for day in 0..7 {
                let center_x = origin.x + (day_xs[day] + day_xs[day + 1]) / 2.0;
                let date = grid.day_date(day);
                painter.text(
                    Pos2::new(center_x, origin.y + theme::HEADER_HEIGHT / 2.0 - 7.0),
                    Align2::CENTER_CENTER,
                    date.format("%a").to_string(),
                    theme::font_header(),
                    theme::TEXT_PRIMARY,
                );
                painter.text(
                    Pos2::new(center_x, origin.y + theme::HEADER_HEIGHT / 2.0 + 8.0),
                    Align2::CENTER_CENTER,
                    date.format("%d/%m").to_string(),
                    theme::font_sub(),
                    theme::TEXT_DIM,
                );
                painter.line_segment(
                    [
                        Pos2::new(origin.x + day_xs[day], origin.y),
                        Pos2::new(origin.x + day_xs[day], origin.y + theme::HEADER_HEIGHT),
                    ],
                    Stroke::new(1.0, theme::DAY_LINE),
                );
            }

            // Today marker.
            let now = chrono::Local::now().naive_local();
            let days_in = (now.date() - week_start).num_days();
            if (0..7).contains(&days_in) {
                let x = origin.x + grid.time_to_x(now);
                painter.line_segment(
                    [
                        Pos2::new(x, origin.y + theme::HEADER_HEIGHT),
                        Pos2::new(x, origin.y + board_height),
                    ],
                    Stroke::new(1.5, theme::TODAY_LINE),
                );
            }

            // Tiles.
            for row in &layout.rows {
                for tile in &row.tiles {
                    let iv = &plan.interventions[tile.item];
                    let Some(iv_id) = iv.id else { continue };
                    let rect = to_screen(tile.rect).shrink2(Vec2::new(0.0, theme::TILE_INSET));
                    let is_selected = *selected == Some(iv_id);
                    let has_conflict = conflicted[tile.item];

                    let fill = theme::status_color(iv.status);
                    painter.rect_filled(rect, Rounding::same(theme::TILE_ROUNDING), fill);
                    if has_conflict {
                        painter.rect_stroke(
                            rect,
                            Rounding::same(theme::TILE_ROUNDING),
                            Stroke::new(2.0, theme::CONFLICT),
                        );
                    }
                    if is_selected {
                        painter.rect_stroke(
                            rect.expand(1.0),
                            Rounding::same(theme::TILE_ROUNDING),
                            Stroke::new(1.5, Color32::WHITE),
                        );
                    }
                    if rect.width() > 30.0 {
                        painter.text(
                            Pos2::new(rect.min.x + 5.0, rect.center().y),
                            Align2::LEFT_CENTER,
                            &iv.title,
                            theme::font_tile(),
                            theme::TEXT_ON_TILE,
                        );
                    }

                    let tile_response = ui.interact(
                        rect,
                        ui.make_persistent_id(("tile", iv_id, row.resource)),
                        Sense::click_and_drag(),
                    );

                    if tile_response.clicked() {
                        *selected = Some(iv_id);
                        consumed_click = true;
                    }

                    if tile_response.drag_started() {
                        if let Some((start, end)) = iv.span() {
                            let ptr_x =
                                tile_response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                            ui.ctx().data_mut(|data| {
                                data.insert_temp(
                                    drag_id(iv_id, row.resource),
                                    DragSnapshot {
                                        start,
                                        end,
                                        start_pointer_x: ptr_x,
                                    },
                                );
                            });
                        }
                    }

                    if tile_response.dragged() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
                        let ptr_x =
                            tile_response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                        let snapshot = ui.ctx().data_mut(|data| {
                            data.get_temp::<DragSnapshot>(drag_id(iv_id, row.resource))
                        });
                        if let Some(snapshot) = snapshot {
                            let dx = ptr_x - snapshot.start_pointer_x;
                            let minutes = dx / grid.px_per_hour * 60.0;
                            let delta = Duration::minutes(snap_minutes(minutes));
                            pending_move =
                                Some((tile.item, snapshot.start + delta, snapshot.end + delta));
                            *selected = Some(iv_id);
                        }
                    }

                    if tile_response.drag_stopped() {
                        ui.ctx()
                            .data_mut(|data| data.remove::<DragSnapshot>(drag_id(iv_id, row.resource)));
                    }
                }
            }

            // Click on empty board space clears the selection.
            if response.clicked() && !consumed_click {
                *selected = None;
            }
        });

    if let Some((item, new_start, new_end)) = pending_move {
        let iv = &mut plan.interventions[item];
        if iv.start != Some(new_start) || iv.end != Some(new_end) {
            iv.start = Some(new_start);
            iv.end = Some(new_end);
            interaction.changed = true;
        }
    }

    interaction
}
