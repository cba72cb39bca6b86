use std::path::PathBuf;

use campaign_planner::calendar::{
    execute_plan, normalize, plan_change, CalendarEvent, CalendarViewState, DateChangeIntent,
    InteractionController, SchedulePlan,
};
use campaign_planner::model::{CalendarView, Campaign, Project, StageDate, Task, ViewMode, Workspace};
use campaign_planner::settings::WeekStart;
use campaign_planner::Settings;
use chrono::NaiveDate;

use crate::ui;

/// A change waiting for the user to confirm its cascade.
pub struct PendingCascade {
    pub plan: SchedulePlan,
    pub clamp: bool,
}

/// Main application state.
pub struct PlannerApp {
    pub workspace: Workspace,
    pub file_path: Option<PathBuf>,
    pub view: CalendarView,
    pub view_state: CalendarViewState,
    pub controller: InteractionController,
    pub settings: Settings,
    settings_path: PathBuf,

    pub selected_event: Option<String>,
    pub pending_cascade: Option<PendingCascade>,
    pub go_to_date: NaiveDate,

    // Dialog state
    pub show_about: bool,

    // Status message
    pub status_message: String,
}

impl PlannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let settings_path = Settings::default_path();
        let settings = Settings::load(&settings_path);
        let today = chrono::Local::now().date_naive();

        let mut app = Self {
            workspace: Self::sample_workspace(today),
            file_path: None,
            view: CalendarView::new(today, settings.default_view, settings.week_start.weekday()),
            view_state: CalendarViewState::with_filter(settings.filter),
            controller: InteractionController::new(settings.drag_threshold),
            settings,
            settings_path,
            selected_event: None,
            pending_cascade: None,
            go_to_date: today,
            show_about: false,
            status_message: "Ready".to_string(),
        };

        if let Some(path) = app.settings.last_file.clone() {
            if path.exists() {
                app.load_from(path);
            }
        }
        app
    }

    /// Generate a sample workspace for demonstration.
    fn sample_workspace(today: NaiveDate) -> Workspace {
        let day = |offset: i64| today + chrono::Duration::days(offset);
        let mut workspace = Workspace::new("Sample Workspace");

        let mut launch = Project::new("Product Launch").scheduled(day(-10), day(40));
        launch.stage_dates = vec![
            StageDate::new("Kickoff", day(-10)),
            StageDate::new("Go live", day(30)),
        ];
        launch.stage_dates[0].completed = true;

        let mut teaser = Campaign::new("Teaser Campaign")
            .in_project(launch.id)
            .scheduled(day(-5), day(9));
        teaser.stage_dates = vec![StageDate::new("Creative review", day(2))];
        let social = Campaign::new("Social Push")
            .in_project(launch.id)
            .scheduled(day(10), day(28));
        let press = Campaign::new("Press Outreach").in_project(launch.id);

        let mut brief = Task::new("Write brief").in_campaign(teaser.id).scheduled(day(-5), day(-3));
        brief.completed = true;
        let visuals = Task::new("Design visuals").in_campaign(teaser.id).scheduled(day(-2), day(3));
        let copy = Task::new("Draft copy").in_campaign(teaser.id).scheduled(day(0), day(2));
        let schedule = Task::new("Schedule posts").in_campaign(social.id).scheduled(day(10), day(11));
        let report = Task::new("Weekly report").in_campaign(social.id).scheduled(day(17), day(17));
        let pitch = Task::new("Pitch journalists").in_campaign(press.id);
        let retro = Task::new("Retrospective");

        let mut archive = Project::new("Website Refresh").scheduled(day(-40), day(-12));
        archive.actual_end_date = Some(day(-8));

        workspace.projects = vec![launch, archive];
        workspace.campaigns = vec![teaser, social, press];
        workspace.tasks = vec![brief, visuals, copy, schedule, report, pitch, retro];
        workspace
    }

    /// Events currently visible under the active filter.
    pub fn visible_events(&self) -> Vec<CalendarEvent> {
        let events = normalize(
            &self.workspace.tasks,
            &self.workspace.campaigns,
            &self.workspace.projects,
        );
        self.view_state.filter.apply(events)
    }

    // --- File operations ---

    pub fn new_workspace(&mut self) {
        self.workspace = Workspace::default();
        self.file_path = None;
        self.reset_interaction();
        self.status_message = "New workspace created".to_string();
    }

    pub fn open_workspace(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Planner Workspace", &["planner.json", "json"])
            .pick_file()
        {
            self.load_from(path);
        }
    }

    fn load_from(&mut self, path: PathBuf) {
        match campaign_planner::io::load_workspace(&path) {
            Ok(workspace) => {
                tracing::info!(path = %path.display(), "workspace loaded");
                self.workspace = workspace;
                self.remember_file(path);
                self.reset_interaction();
                self.status_message = "Workspace loaded".to_string();
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), err = %e, "failed to load workspace");
                self.status_message = format!("Error loading: {}", e);
            }
        }
    }

    pub fn save_workspace(&mut self) {
        if let Some(path) = self.file_path.clone() {
            self.write_to(path);
        } else {
            self.save_workspace_as();
        }
    }

    pub fn save_workspace_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Planner Workspace", &["planner.json", "json"])
            .set_file_name(format!("{}.planner.json", self.workspace.name))
            .save_file()
        {
            self.write_to(path);
        }
    }

    fn write_to(&mut self, path: PathBuf) {
        self.workspace.touch();
        match campaign_planner::io::save_workspace(&self.workspace, &path) {
            Ok(()) => {
                self.remember_file(path);
                self.status_message = "Workspace saved".to_string();
            }
            Err(e) => self.status_message = format!("Error saving: {}", e),
        }
    }

    fn remember_file(&mut self, path: PathBuf) {
        self.file_path = Some(path.clone());
        self.settings.last_file = Some(path);
        self.save_settings();
    }

    pub fn export_csv(&mut self) {
        let events = self.visible_events();
        if events.is_empty() {
            self.status_message = "Nothing to export, no scheduled events are visible".to_string();
            return;
        }

        let default_name = format!("{}.csv", self.workspace.name);
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&default_name)
            .save_file()
        {
            match campaign_planner::io::export_events(&events, &path) {
                Ok(count) => {
                    self.status_message = format!("Exported {} events to CSV", count);
                }
                Err(e) => {
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }

    // --- Settings ---

    pub fn save_settings(&mut self) {
        if let Err(err) = self.settings.save(&self.settings_path) {
            tracing::warn!(path = %self.settings_path.display(), %err, "could not save settings");
        }
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view.mode = mode;
        self.view_state.collapse_all();
        self.settings.default_view = mode;
        self.save_settings();
    }

    pub fn set_week_start(&mut self, week_start: WeekStart) {
        self.settings.week_start = week_start;
        self.view.week_start = week_start.weekday();
        self.view_state.collapse_all();
        self.save_settings();
    }

    // --- Scheduling ---

    /// Validate a requested date change; ask first if it moves other records.
    pub fn apply_intent(&mut self, intent: DateChangeIntent) {
        let clamp = self.settings.clamp_cascade;
        match plan_change(&self.workspace, &intent, clamp) {
            Ok(plan) if plan.has_cascade() => {
                self.status_message = "Confirm the cascade to apply this change".to_string();
                self.pending_cascade = Some(PendingCascade { plan, clamp });
            }
            Ok(plan) => self.execute(plan),
            Err(e) => self.status_message = e.to_string(),
        }
    }

    /// Recompute the pending cascade with a different clamp choice.
    pub fn replan_cascade(&mut self, clamp: bool) {
        let Some(pending) = self.pending_cascade.take() else {
            return;
        };
        match plan_change(&self.workspace, &pending.plan.intent, clamp) {
            Ok(plan) => self.pending_cascade = Some(PendingCascade { plan, clamp }),
            Err(e) => self.status_message = e.to_string(),
        }
    }

    pub fn confirm_cascade(&mut self) {
        if let Some(pending) = self.pending_cascade.take() {
            self.execute(pending.plan);
        }
    }

    pub fn cancel_cascade(&mut self) {
        if self.pending_cascade.take().is_some() {
            self.status_message = "Change discarded".to_string();
        }
    }

    fn execute(&mut self, plan: SchedulePlan) {
        match execute_plan(plan, &mut self.workspace) {
            Ok(report) => self.status_message = report.summary(),
            Err(e) => self.status_message = e.to_string(),
        }
    }

    fn reset_interaction(&mut self) {
        self.controller.cancel();
        self.pending_cascade = None;
        self.selected_event = None;
        self.view_state.collapse_all();
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Handle keyboard shortcuts outside closures to avoid borrow issues
        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        if should_save {
            self.save_workspace();
        }
        if self.controller.is_busy() && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.controller.cancel();
            self.status_message = "Drag cancelled".to_string();
        }

        // Top panel: menu bar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        let events = self.visible_events();

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
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
                            egui::RichText::new(format!("Events: {}", events.len()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: unscheduled items + selection details
        egui::SidePanel::left("side_panel")
            .default_width(ui::theme::SIDE_PANEL_WIDTH)
            .min_width(200.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                ui::unscheduled_panel::show_unscheduled_panel(&self.workspace, ui);
                let selected = self
                    .selected_event
                    .as_deref()
                    .and_then(|id| events.iter().find(|e| e.id == id));
                if let Some(event) = selected {
                    ui.add_space(8.0);
                    ui.separator();
                    ui::unscheduled_panel::show_event_details(event, ui);
                }
            });

        // Central panel: calendar
        let window = self.view.window();
        let selected = self.selected_event.clone();
        let options = ui::calendar_grid::GridOptions {
            max_visible_layers: match self.view.mode {
                ViewMode::Month => None,
                ViewMode::Continuous { .. } => Some(self.settings.max_visible_layers),
            },
            focus_month: match self.view.mode {
                ViewMode::Month => Some(chrono::Datelike::month(&self.view.anchor)),
                ViewMode::Continuous { .. } => None,
            },
            selected: selected.as_deref(),
        };
        let mut grid = ui::calendar_grid::GridInteraction::default();
        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(ui::theme::BG_DARK).inner_margin(egui::Margin::same(6.0)))
            .show(ctx, |ui| {
                ui::toolbar::show_navigation(self, ui);
                ui.add_space(4.0);
                grid = ui::calendar_grid::show_calendar_grid(
                    &events,
                    &window,
                    &mut self.view_state,
                    &mut self.controller,
                    &options,
                    ui,
                );
            });

        if let Some(id) = grid.selected {
            self.selected_event = Some(id);
        } else if grid.cleared_selection {
            self.selected_event = None;
        }
        if let Some(intent) = grid.intent {
            self.apply_intent(intent);
        }

        // Dialogs
        if self.pending_cascade.is_some() {
            ui::dialogs::show_cascade_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
