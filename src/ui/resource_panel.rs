use egui::{Color32, RichText, Ui};
use uuid::Uuid;

use crate::model::{Resource, ResourceKind};
use crate::ui::theme;

/// Actions that the resource panel can request.
pub enum ResourcePanelAction {
    None,
    Add(String, ResourceKind),
    Delete(Uuid),
}

/// Render the resource list, grouped by kind, with an inline add row.
pub fn show_resource_panel(
    resources: &[Resource],
    new_name: &mut String,
    new_kind: &mut ResourceKind,
    ui: &mut Ui,
) -> ResourcePanelAction {
    let mut action = ResourcePanelAction::None;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Resources")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", resources.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);

    // Add row: name field, kind selector, accent button.
    ui.horizontal(|ui| {
        ui.add(
            egui::TextEdit::singleline(new_name)
                .hint_text("Resource name...")
                .desired_width(120.0),
        );
        egui::ComboBox::from_id_salt("new_resource_kind")
            .selected_text(new_kind.label())
            .width(80.0)
            .show_ui(ui, |ui| {
                for kind in ResourceKind::ALL {
                    ui.selectable_value(new_kind, kind, kind.label());
                }
            });
        let btn = egui::Button::new(RichText::new("＋").color(Color32::WHITE))
            .fill(theme::ACCENT)
            .rounding(egui::Rounding::same(5.0));
        if ui.add(btn).clicked() && !new_name.trim().is_empty() {
            action = ResourcePanelAction::Add(new_name.trim().to_string(), *new_kind);
            new_name.clear();
        }
    });

    ui.add_space(6.0);
    ui.separator();
    ui.add_space(2.0);

    egui::ScrollArea::vertical()
        .id_salt("resource_rows")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for kind in ResourceKind::ALL {
                let group: Vec<&Resource> = resources.iter().filter(|r| r.kind == kind).collect();
                if group.is_empty() {
                    continue;
                }
                ui.label(
                    RichText::new(format!("{}  {}", theme::kind_icon(kind), kind.label()))
                        .size(11.0)
                        .strong()
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(2.0);

                for resource in group {
                    ui.horizontal(|ui| {
                        ui.add_space(12.0);
                        ui.label(RichText::new(&resource.name).color(theme::TEXT_PRIMARY));
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                let del = ui.small_button(
                                    RichText::new(egui_phosphor::regular::TRASH).size(11.0),
                                );
                                if del.on_hover_text("Delete resource").clicked() {
                                    action = ResourcePanelAction::Delete(resource.id);
                                }
                            },
                        );
                    });
                }
                ui.add_space(6.0);
            }
        });

    action
}
