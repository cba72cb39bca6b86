use campaign_planner::model::ViewMode;
use campaign_planner::settings::WeekStart;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

use crate::app::PlannerApp;
use crate::ui::theme;

/// Render the menu bar.
pub fn show_toolbar(app: &mut PlannerApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  New Workspace").clicked() {
                app.new_workspace();
                ui.close_menu();
            }
            if ui.button("  Open...").clicked() {
                app.open_workspace();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save          Ctrl+S").clicked() {
                app.save_workspace();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_workspace_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Export Events CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            ui.label(RichText::new("Layout").small().weak());
            let is_month = app.view.mode == ViewMode::Month;
            if ui.radio(is_month, "Month").clicked() {
                app.set_view_mode(ViewMode::Month);
                ui.close_menu();
            }
            if ui.radio(!is_month, "Continuous").clicked() {
                app.set_view_mode(ViewMode::Continuous {
                    months: app.settings.continuous_months,
                });
                ui.close_menu();
            }
            ui.separator();

            ui.label(RichText::new("Show").small().weak());
            let filter = &mut app.view_state.filter;
            let mut changed = false;
            changed |= ui.checkbox(&mut filter.show_projects, "Projects").changed();
            changed |= ui.checkbox(&mut filter.show_campaigns, "Campaigns").changed();
            changed |= ui.checkbox(&mut filter.show_tasks, "Tasks").changed();
            changed |= ui.checkbox(&mut filter.show_stages, "Stages").changed();
            changed |= ui.checkbox(&mut filter.hide_completed, "Hide completed").changed();
            if changed {
                app.settings.filter = app.view_state.filter;
                app.save_settings();
            }
            ui.separator();

            ui.label(RichText::new("Week starts on").small().weak());
            for (week_start, label) in [(WeekStart::Monday, "Monday"), (WeekStart::Sunday, "Sunday")] {
                if ui.radio(app.settings.week_start == week_start, label).clicked() {
                    app.set_week_start(week_start);
                    ui.close_menu();
                }
            }
            ui.separator();

            if ui.checkbox(&mut app.settings.clamp_cascade, "Keep dependents inside containers").changed() {
                app.save_settings();
            }
            if ui.button("  Collapse All Rows").clicked() {
                app.view_state.collapse_all();
                ui.close_menu();
            }
            if ui.button("  Open Settings Folder").clicked() {
                let dir = campaign_planner::Settings::config_dir();
                if let Err(err) = open::that(&dir) {
                    tracing::warn!(dir = %dir.display(), %err, "could not open settings folder");
                }
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned workspace name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let modified = if app.file_path.is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!("{}{}", app.workspace.name, modified))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}

/// Render the navigation row above the grid.
pub fn show_navigation(app: &mut PlannerApp, ui: &mut Ui) {
    ui.horizontal(|ui| {
        if ui
            .button(RichText::new(icons::CARET_LEFT).size(14.0))
            .on_hover_text("Previous month")
            .clicked()
        {
            app.view.prev();
        }
        if ui.button("Today").clicked() {
            app.view.go_to(chrono::Local::now().date_naive());
        }
        if ui
            .button(RichText::new(icons::CARET_RIGHT).size(14.0))
            .on_hover_text("Next month")
            .clicked()
        {
            app.view.next();
        }
        ui.add_space(8.0);
        ui.label(
            RichText::new(app.view.title())
                .strong()
                .size(16.0)
                .color(theme::TEXT_PRIMARY),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let picker = ui.add(
                egui_extras::DatePickerButton::new(&mut app.go_to_date)
                    .id_salt("nav_go_to")
                    .calendar_week(true),
            );
            if picker.changed() {
                app.view.go_to(app.go_to_date);
            }
            ui.label(RichText::new(icons::CALENDAR).color(theme::TEXT_SECONDARY));
        });
    });
}
