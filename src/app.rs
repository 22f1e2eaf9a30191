use chrono::{Datelike, Duration, NaiveDate};
use std::path::PathBuf;
use uuid::Uuid;

use crate::engine::Zoom;
use crate::io::Prefs;
use crate::model::{Intervention, InterventionStatus, Plan, Resource, ResourceKind};
use crate::ui;

/// First day (Monday) of the week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Main application state.
pub struct PlannerApp {
    pub plan: Plan,
    pub week_start: NaiveDate,
    pub zoom: Zoom,
    pub file_path: Option<PathBuf>,
    pub selected: Option<Uuid>,

    // Dialog state
    pub show_add_intervention: bool,
    pub show_about: bool,
    pub new_title: String,
    pub new_client: String,
    pub new_start_date: NaiveDate,
    pub new_start_hour: u32,
    pub new_end_date: NaiveDate,
    pub new_end_hour: u32,
    pub new_resources: Vec<Uuid>,

    // Resource panel state
    pub new_resource_name: String,
    pub new_resource_kind: ResourceKind,

    // Status message
    pub status_message: String,

    // Persisted preferences
    pub prefs: Prefs,
}

impl PlannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let prefs = Prefs::load();
        let mut zoom = Zoom::default();
        if let Some(minutes) = prefs.minutes_per_cell {
            // A stale prefs file may hold a scale we no longer support.
            let _ = zoom.set_minutes_per_cell(minutes);
        }

        let (plan, file_path, status_message) = match prefs.last_plan.as_ref() {
            Some(path) if path.exists() => match crate::io::load_plan(path) {
                Ok(plan) => (plan, Some(path.clone()), "Plan loaded".to_string()),
                Err(e) => (
                    Self::sample_plan(),
                    None,
                    format!("Could not reload last plan: {}", e),
                ),
            },
            _ => (Self::sample_plan(), None, "Ready".to_string()),
        };

        let today = chrono::Local::now().date_naive();
        Self {
            plan,
            week_start: monday_of(today),
            zoom,
            file_path,
            selected: None,
            show_add_intervention: false,
            show_about: false,
            new_title: String::new(),
            new_client: String::new(),
            new_start_date: today,
            new_start_hour: 8,
            new_end_date: today,
            new_end_hour: 12,
            new_resources: Vec::new(),
            new_resource_name: String::new(),
            new_resource_kind: ResourceKind::Crane,
            status_message,
            prefs,
        }
    }

    /// Generate a sample plan for demonstration.
    fn sample_plan() -> Plan {
        let monday = monday_of(chrono::Local::now().date_naive());
        let at = |day: i64, hour: u32| {
            (monday + Duration::days(day))
                .and_hms_opt(hour, 0, 0)
                .expect("valid sample time")
        };

        let mut plan = Plan::new("Sample Plan");
        let crane1 = Resource::new("LTM 1060", ResourceKind::Crane);
        let crane2 = Resource::new("GMK 4100", ResourceKind::Crane);
        let truck1 = Resource::new("Scania R500", ResourceKind::Truck);
        let truck2 = Resource::new("MAN TGX", ResourceKind::Truck);
        let driver1 = Resource::new("J. Moreau", ResourceKind::Driver);
        let driver2 = Resource::new("A. Petit", ResourceKind::Driver);
        let crew = Resource::new("Rigging Crew A", ResourceKind::Crew);

        plan.add_intervention(
            Intervention::new("Bridge beam lift", at(0, 8), at(0, 14))
                .with_client("Vinci BTP")
                .with_status(InterventionStatus::Confirmed)
                .with_resource(crane1.id)
                .with_resource(driver1.id)
                .with_resource(crew.id),
        );
        // Deliberately double-books the first crane so the conflict
        // warning has something to show out of the box.
        plan.add_intervention(
            Intervention::new("Silo panel lift", at(0, 12), at(0, 17))
                .with_client("AgriStock")
                .with_resource(crane1.id)
                .with_resource(driver2.id),
        );
        plan.add_intervention(
            Intervention::new("Generator transport", at(1, 7), at(1, 11))
                .with_client("EDF")
                .with_status(InterventionStatus::Confirmed)
                .with_resource(truck1.id)
                .with_resource(driver1.id),
        );
        plan.add_intervention(
            Intervention::new("Container relocation", at(2, 9), at(2, 16))
                .with_client("Port Authority")
                .with_resource(crane2.id)
                .with_resource(truck2.id)
                .with_resource(crew.id),
        );
        plan.add_intervention(
            Intervention::new("Roof truss placement", at(3, 8), at(4, 18))
                .with_client("Bouygues")
                .with_resource(crane2.id)
                .with_resource(driver2.id),
        );
        let mut pending = Intervention::draft("Warehouse move (quote)").with_client("LogiPlus");
        pending.resources.push(truck2.id);
        plan.add_intervention(pending);

        plan.resources = vec![crane1, crane2, truck1, truck2, driver1, driver2, crew];
        plan
    }

    fn remember_path(&mut self, path: Option<PathBuf>) {
        self.prefs.last_plan = path;
        let _ = self.prefs.save();
    }

    // --- File operations ---

    pub fn new_plan(&mut self) {
        self.plan = Plan::default();
        self.file_path = None;
        self.selected = None;
        self.remember_path(None);
        self.status_message = "New plan created".to_string();
    }

    pub fn open_plan(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Plan", &["plan.json", "json"])
            .pick_file()
        {
            match crate::io::load_plan(&path) {
                Ok(plan) => {
                    self.plan = plan;
                    self.file_path = Some(path.clone());
                    self.selected = None;
                    self.remember_path(Some(path));
                    self.status_message = "Plan loaded".to_string();
                }
                Err(e) => {
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_plan(&mut self) {
        if let Some(ref path) = self.file_path.clone() {
            self.plan.touch();
            match crate::io::save_plan(&self.plan, path) {
                Ok(()) => self.status_message = "Plan saved".to_string(),
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        } else {
            self.save_plan_as();
        }
    }

    pub fn save_plan_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Plan", &["plan.json", "json"])
            .set_file_name(format!("{}.plan.json", self.plan.name))
            .save_file()
        {
            self.file_path = Some(path.clone());
            self.plan.touch();
            match crate::io::save_plan(&self.plan, &path) {
                Ok(()) => {
                    self.remember_path(Some(path));
                    self.status_message = "Plan saved".to_string();
                }
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        }
    }

    pub fn import_csv(&mut self) {
        // Guard: importing appends bookings against the current resource
        // pool, so confirm when the plan already has interventions.
        if !self.plan.interventions.is_empty() {
            let confirm = rfd::MessageDialog::new()
                .set_title("Import CSV")
                .set_description("Imported interventions will be added to the current plan. Continue?")
                .set_buttons(rfd::MessageButtons::YesNo)
                .show();
            if confirm != rfd::MessageDialogResult::Yes {
                return;
            }
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            match crate::io::csv_import::import_csv(&path, &self.plan.resources) {
                Ok((interventions, skipped)) => {
                    let count = interventions.len();
                    for iv in interventions {
                        self.plan.add_intervention(iv);
                    }
                    self.plan.touch();
                    if skipped > 0 {
                        self.status_message =
                            format!("Imported {} interventions ({} rows skipped)", count, skipped);
                    } else {
                        self.status_message = format!("Imported {} interventions", count);
                    }
                }
                Err(e) => {
                    self.status_message = format!("CSV import failed: {}", e);
                }
            }
        }
    }

    pub fn export_csv(&mut self) {
        if self.plan.interventions.is_empty() {
            self.status_message = "Nothing to export: plan has no interventions".to_string();
            return;
        }

        let default_name = format!("{}.csv", self.plan.name);
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&default_name)
            .save_file()
        {
            match crate::io::csv_export::export_csv(&self.plan, &path) {
                Ok(count) => {
                    self.status_message = format!("Exported {} interventions to CSV", count);
                }
                Err(e) => {
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }

    // --- View operations ---

    pub fn set_scale(&mut self, minutes_per_cell: u32) {
        match self.zoom.set_minutes_per_cell(minutes_per_cell) {
            Ok(()) => {
                self.prefs.minutes_per_cell = Some(minutes_per_cell);
                let _ = self.prefs.save();
            }
            Err(e) => {
                self.status_message = e.to_string();
            }
        }
    }

    pub fn previous_week(&mut self) {
        self.week_start -= Duration::days(7);
    }

    pub fn next_week(&mut self) {
        self.week_start += Duration::days(7);
    }

    pub fn goto_today(&mut self) {
        self.week_start = monday_of(chrono::Local::now().date_naive());
    }

    // --- Intervention operations ---

    pub fn create_intervention_from_dialog(&mut self) {
        let title = if self.new_title.trim().is_empty() {
            "New Intervention".to_string()
        } else {
            self.new_title.trim().to_string()
        };

        let mut iv = Intervention::draft(title).with_client(self.new_client.trim());
        iv.start = self.new_start_date.and_hms_opt(self.new_start_hour, 0, 0);
        iv.end = self.new_end_date.and_hms_opt(self.new_end_hour, 0, 0);
        for &id in &self.new_resources {
            iv = iv.with_resource(id);
        }

        let id = self.plan.add_intervention(iv);
        self.plan.touch();
        self.selected = Some(id);
        self.reset_dialog_fields();
        self.status_message = "Intervention added".to_string();
    }

    pub fn delete_intervention(&mut self, id: Uuid) {
        self.plan.remove_intervention(id);
        self.plan.touch();
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.status_message = "Intervention deleted".to_string();
    }

    fn reset_dialog_fields(&mut self) {
        let today = chrono::Local::now().date_naive();
        self.new_title = String::new();
        self.new_client = String::new();
        self.new_start_date = today;
        self.new_start_hour = 8;
        self.new_end_date = today;
        self.new_end_hour = 12;
        self.new_resources.clear();
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Keyboard shortcuts, handled outside panel closures.
        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        let should_add = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::N));
        if should_save {
            self.save_plan();
        }
        if should_add {
            self.show_add_intervention = true;
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Interventions: {}",
                                self.plan.interventions.len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(" · ")
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(format!(
                                "Scale: {} min",
                                self.zoom.minutes_per_cell()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: intervention editor + resource list
        let mut editor_action = ui::editor::EditorAction::None;
        let mut panel_action = ui::resource_panel::ResourcePanelAction::None;
        egui::SidePanel::left("side_panel")
            .default_width(260.0)
            .min_width(220.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                if let Some(sel_id) = self.selected {
                    let interventions_snapshot = self.plan.interventions.clone();
                    let resources_snapshot = self.plan.resources.clone();
                    if let Some(iv) = self.plan.intervention_mut(sel_id) {
                        editor_action = ui::editor::show_editor(
                            iv,
                            &resources_snapshot,
                            &interventions_snapshot,
                            ui,
                        );
                    }
                    ui.add_space(4.0);
                    ui.separator();
                    ui.add_space(2.0);
                }

                let add_btn = egui::Button::new(
                    egui::RichText::new("＋  Add Intervention")
                        .color(egui::Color32::WHITE)
                        .size(12.0),
                )
                .fill(ui::theme::ACCENT)
                .rounding(egui::Rounding::same(5.0));
                if ui.add_sized([ui.available_width(), 30.0], add_btn).clicked() {
                    self.show_add_intervention = true;
                }
                ui.add_space(6.0);

                panel_action = ui::resource_panel::show_resource_panel(
                    &self.plan.resources,
                    &mut self.new_resource_name,
                    &mut self.new_resource_kind,
                    ui,
                );
            });

        match editor_action {
            ui::editor::EditorAction::Changed => {
                self.plan.touch();
                self.status_message = "Intervention updated".to_string();
            }
            ui::editor::EditorAction::Delete(id) => {
                self.delete_intervention(id);
            }
            ui::editor::EditorAction::None => {}
        }

        match panel_action {
            ui::resource_panel::ResourcePanelAction::Add(name, kind) => {
                self.plan.resources.push(crate::model::Resource::new(&name, kind));
                self.plan.sort_resources_grouped();
                self.plan.touch();
                self.status_message = format!("Added resource '{}'", name);
            }
            ui::resource_panel::ResourcePanelAction::Delete(id) => {
                let name = self
                    .plan
                    .resource(id)
                    .map(|r| r.name.clone())
                    .unwrap_or_default();
                let confirm = rfd::MessageDialog::new()
                    .set_title("Delete Resource")
                    .set_description(format!(
                        "Delete '{}' and detach it from all interventions?",
                        name
                    ))
                    .set_buttons(rfd::MessageButtons::YesNo)
                    .show();
                if confirm == rfd::MessageDialogResult::Yes {
                    self.plan.remove_resource(id);
                    self.plan.touch();
                    self.status_message = format!("Deleted resource '{}'", name);
                }
            }
            ui::resource_panel::ResourcePanelAction::None => {}
        }

        // Central panel: planning board
        let board_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(board_frame).show(ctx, |ui| {
            let interaction = ui::board::show_board(
                &mut self.plan,
                self.week_start,
                &mut self.zoom,
                &mut self.selected,
                ui,
            );
            if interaction.changed {
                self.plan.touch();
                if let Some(sel) = self.selected.and_then(|id| self.plan.intervention(id)) {
                    if let Some((start, end)) = sel.span() {
                        self.status_message = format!(
                            "Moved '{}' ({} → {})",
                            sel.title,
                            start.format("%d/%m %H:%M"),
                            end.format("%d/%m %H:%M")
                        );
                    }
                } else {
                    self.status_message = "Board updated".to_string();
                }
            }
        });

        // Dialogs
        if self.show_add_intervention {
            ui::dialogs::show_add_intervention_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine;

    #[test]
    fn test_monday_of_snaps_to_week_start() {
        let wed = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert_eq!(monday_of(wed), monday);
        assert_eq!(monday_of(monday), monday);
    }

    #[test]
    fn test_sample_plan_contains_its_advertised_conflict() {
        let plan = PlannerApp::sample_plan();
        let flagged = plan
            .interventions
            .iter()
            .filter(|iv| engine::has_conflict(iv, &plan.interventions))
            .count();
        // The two overlapping crane bookings flag each other.
        assert_eq!(flagged, 2);
    }

    #[test]
    fn test_sample_plan_resources_resolve() {
        let plan = PlannerApp::sample_plan();
        for iv in &plan.interventions {
            for &rid in &iv.resources {
                assert!(plan.resource(rid).is_some(), "dangling resource in sample");
            }
        }
    }
}
