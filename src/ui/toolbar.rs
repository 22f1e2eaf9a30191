use crate::app::PlannerApp;
use crate::engine::ZOOM_LEVELS;
use crate::ui::theme;
use egui::{menu, RichText, Ui};

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut PlannerApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  New Plan").clicked() {
                app.new_plan();
                ui.close_menu();
            }
            if ui.button("  Open...").clicked() {
                app.open_plan();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save          Ctrl+S").clicked() {
                app.save_plan();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_plan_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Import CSV...").clicked() {
                app.import_csv();
                ui.close_menu();
            }
            if ui.button("  Export CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Open Config Folder").clicked() {
                if let Some(dir) = crate::io::prefs::config_dir() {
                    let _ = open::that(&dir);
                }
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            if ui.button("  Zoom In        Ctrl+Scroll ↑").clicked() {
                app.zoom.zoom_in();
                ui.close_menu();
            }
            if ui.button("  Zoom Out      Ctrl+Scroll ↓").clicked() {
                app.zoom.zoom_out();
                ui.close_menu();
            }
            ui.separator();
            ui.label(RichText::new("Scale").small().weak());
            for level in ZOOM_LEVELS {
                let selected = app.zoom.minutes_per_cell() == level.minutes_per_cell;
                let label = format!("{} min / cell", level.minutes_per_cell);
                if ui.radio(selected, label).clicked() {
                    app.set_scale(level.minutes_per_cell);
                    ui.close_menu();
                }
            }
        });

        ui.menu_button(RichText::new("  Week  ").font(theme::font_menu()), |ui| {
            if ui.button("  ← Previous Week").clicked() {
                app.previous_week();
                ui.close_menu();
            }
            if ui.button("  Next Week →").clicked() {
                app.next_week();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Today").clicked() {
                app.goto_today();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(
            RichText::new(format!(
                "Week of {}",
                app.week_start.format("%d %b %Y")
            ))
            .size(12.0)
            .color(theme::TEXT_SECONDARY),
        );

        // Right-aligned plan name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let modified = if app.file_path.is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!("{}{}", app.plan.name, modified))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
