use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use egui::{RichText, Ui};
use uuid::Uuid;

use crate::engine;
use crate::model::{Intervention, InterventionStatus, Resource};
use crate::ui::theme;

/// Actions the intervention editor can request.
pub enum EditorAction {
    None,
    Changed,
    Delete(Uuid),
}

/// Edit one endpoint (date + time of day). Returns true when modified.
fn endpoint_row(
    label: &str,
    value: &mut Option<NaiveDateTime>,
    default: NaiveDateTime,
    salt: &str,
    ui: &mut Ui,
) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(RichText::new(label).color(theme::TEXT_SECONDARY));
        match value {
            Some(current) => {
                let mut date = current.date();
                let mut hour = current.hour();
                let mut minute = current.minute();
                if ui
                    .add(egui_extras::DatePickerButton::new(&mut date).id_salt(salt))
                    .changed()
                {
                    changed = true;
                }
                changed |= ui
                    .add(egui::DragValue::new(&mut hour).range(0..=23).suffix("h"))
                    .changed();
                changed |= ui
                    .add(egui::DragValue::new(&mut minute).range(0..=59).suffix("m"))
                    .changed();
                if changed {
                    *value = NaiveTime::from_hms_opt(hour, minute, 0)
                        .map(|t| date.and_time(t))
                        .or(*value);
                }
                if ui.small_button("✖").on_hover_text("Clear date").clicked() {
                    *value = None;
                    changed = true;
                }
            }
            None => {
                ui.label(RichText::new("unscheduled").italics().color(theme::TEXT_DIM));
                if ui.small_button("Set").clicked() {
                    *value = Some(default);
                    changed = true;
                }
            }
        }
    });
    changed
}

/// Render the editor for the selected intervention, including the live
/// conflict warning. `others` is a snapshot of every intervention in the
/// plan; the engine excludes the edited one by identity.
pub fn show_editor(
    iv: &mut Intervention,
    resources: &[Resource],
    others: &[Intervention],
    ui: &mut Ui,
) -> EditorAction {
    let mut action = EditorAction::None;
    let mut changed = false;

    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Intervention")
                .strong()
                .size(13.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let del =
                ui.small_button(RichText::new(egui_phosphor::regular::TRASH).size(11.0));
            if del.on_hover_text("Delete intervention").clicked() {
                if let Some(id) = iv.id {
                    action = EditorAction::Delete(id);
                }
            }
        });
    });
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        ui.label(RichText::new("Title").color(theme::TEXT_SECONDARY));
        changed |= ui
            .add(egui::TextEdit::singleline(&mut iv.title).desired_width(160.0))
            .changed();
    });
    ui.horizontal(|ui| {
        ui.label(RichText::new("Client").color(theme::TEXT_SECONDARY));
        changed |= ui
            .add(egui::TextEdit::singleline(&mut iv.client).desired_width(160.0))
            .changed();
    });
    ui.horizontal(|ui| {
        ui.label(RichText::new("Status").color(theme::TEXT_SECONDARY));
        egui::ComboBox::from_id_salt("editor_status")
            .selected_text(iv.status.label())
            .show_ui(ui, |ui| {
                for status in InterventionStatus::ALL {
                    changed |= ui
                        .selectable_value(&mut iv.status, status, status.label())
                        .changed();
                }
            });
    });

    let today = chrono::Local::now().date_naive();
    let default_start = today.and_hms_opt(8, 0, 0).unwrap_or_else(|| {
        NaiveDate::default().and_time(NaiveTime::MIN)
    });
    let default_end = iv
        .start
        .map(|s| s + Duration::hours(4))
        .unwrap_or(default_start + Duration::hours(4));
    changed |= endpoint_row("Start", &mut iv.start, default_start, "editor_dp_start", ui);
    changed |= endpoint_row("End", &mut iv.end, default_end, "editor_dp_end", ui);

    if iv.start.is_some() && iv.end.is_some() && iv.span().is_none() {
        ui.label(
            RichText::new("End must be after start. Not shown on the board.")
                .size(10.5)
                .color(theme::WARNING),
        );
    }

    ui.add_space(4.0);
    ui.label(RichText::new("Notes").color(theme::TEXT_SECONDARY));
    changed |= ui
        .add(
            egui::TextEdit::multiline(&mut iv.notes)
                .desired_rows(2)
                .desired_width(f32::INFINITY),
        )
        .changed();

    ui.add_space(4.0);
    ui.label(RichText::new("Resources").color(theme::TEXT_SECONDARY));
    for resource in resources {
        let mut used = iv.uses_resource(resource.id);
        let label = format!("{}  {}", theme::kind_icon(resource.kind), resource.name);
        if ui.checkbox(&mut used, label).changed() {
            if used {
                iv.resources.push(resource.id);
            } else {
                iv.resources.retain(|&id| id != resource.id);
            }
            changed = true;
        }
    }

    // Live conflict report: detection only, resolution stays with the user.
    let conflicts = engine::find_conflicts(iv, others);
    if !conflicts.is_empty() {
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!(
                "{}  Conflicts with {} intervention(s):",
                egui_phosphor::regular::WARNING,
                conflicts.len()
            ))
            .size(11.0)
            .strong()
            .color(theme::CONFLICT),
        );
        for other in conflicts {
            ui.label(
                RichText::new(format!("• {}", other.title))
                    .size(11.0)
                    .color(theme::CONFLICT),
            );
        }
    }

    if changed && !matches!(action, EditorAction::Delete(_)) {
        action = EditorAction::Changed;
    }
    action
}
