use crate::app::PlannerApp;
use crate::ui::theme;
use egui::{Color32, Context, RichText, Window};

/// Render the "Add Intervention" dialog.
pub fn show_add_intervention_dialog(app: &mut PlannerApp, ctx: &Context) {
    let mut should_close = false;
    Window::new(RichText::new("Add Intervention").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([340.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);

            egui::Grid::new("add_intervention_grid")
                .num_columns(2)
                .striped(false)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Title").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [220.0, 24.0],
                        egui::TextEdit::singleline(&mut app.new_title)
                            .hint_text("Intervention title..."),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Client").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [220.0, 24.0],
                        egui::TextEdit::singleline(&mut app.new_client).hint_text("Client..."),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Start").color(theme::TEXT_SECONDARY));
                    ui.horizontal(|ui| {
                        ui.add(
                            egui_extras::DatePickerButton::new(&mut app.new_start_date)
                                .id_salt("dlg_dp_start"),
                        );
                        ui.add(
                            egui::DragValue::new(&mut app.new_start_hour)
                                .range(0..=23)
                                .suffix("h"),
                        );
                    });
                    ui.end_row();

                    ui.label(RichText::new("End").color(theme::TEXT_SECONDARY));
                    ui.horizontal(|ui| {
                        ui.add(
                            egui_extras::DatePickerButton::new(&mut app.new_end_date)
                                .id_salt("dlg_dp_end"),
                        );
                        ui.add(
                            egui::DragValue::new(&mut app.new_end_hour)
                                .range(0..=23)
                                .suffix("h"),
                        );
                    });
                    ui.end_row();

                    ui.label(RichText::new("Resources").color(theme::TEXT_SECONDARY));
                    ui.vertical(|ui| {
                        for resource in &app.plan.resources {
                            let mut on = app.new_resources.contains(&resource.id);
                            let label =
                                format!("{}  {}", theme::kind_icon(resource.kind), resource.name);
                            if ui.checkbox(&mut on, label).changed() {
                                if on {
                                    app.new_resources.push(resource.id);
                                } else {
                                    app.new_resources.retain(|&id| id != resource.id);
                                }
                            }
                        }
                    });
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let create_btn = egui::Button::new(RichText::new("Create").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], create_btn).clicked() {
                    app.create_intervention_from_dialog();
                    should_close = true;
                }
                if ui
                    .add_sized([80.0, 28.0], egui::Button::new("Cancel"))
                    .clicked()
                {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_add_intervention = false;
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut PlannerApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 170.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Rental Planner").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("A resource-planning board for");
                ui.label("equipment rental, built with Rust and egui.");
                ui.add_space(14.0);
                if ui
                    .add_sized([100.0, 28.0], egui::Button::new("Close"))
                    .clicked()
                {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
