use campaign_planner::calendar::{CalendarEvent, DropItem, EventColor, EventTarget};
use campaign_planner::model::Workspace;
use egui::{Color32, RichText, Ui};

use crate::ui::theme;

struct Entry {
    item: DropItem,
    kind: &'static str,
    color: EventColor,
}

fn unscheduled(workspace: &Workspace) -> Vec<Entry> {
    let projects = workspace
        .projects
        .iter()
        .filter(|p| p.date_range().is_none())
        .map(|p| Entry {
            item: DropItem {
                target: EventTarget::Project(p.id),
                title: p.name.clone(),
            },
            kind: "Project",
            color: EventColor::Purple,
        });
    let campaigns = workspace
        .campaigns
        .iter()
        .filter(|c| c.date_range().is_none())
        .map(|c| Entry {
            item: DropItem {
                target: EventTarget::Campaign(c.id),
                title: c.name.clone(),
            },
            kind: "Campaign",
            color: EventColor::Orange,
        });
    let tasks = workspace
        .tasks
        .iter()
        .filter(|t| !t.is_scheduled())
        .map(|t| Entry {
            item: DropItem {
                target: EventTarget::Task(t.id),
                title: t.name.clone(),
            },
            kind: "Task",
            color: EventColor::Blue,
        });
    projects.chain(campaigns).chain(tasks).collect()
}

/// Render the list of records without dates. Rows can be dragged onto the grid.
pub fn show_unscheduled_panel(workspace: &Workspace, ui: &mut Ui) {
    let entries = unscheduled(workspace);

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Unscheduled")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", entries.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.label(
        RichText::new("Drag an item onto a day to schedule it.")
            .size(10.0)
            .color(theme::TEXT_DIM),
    );
    ui.add_space(4.0);
    ui.separator();

    if entries.is_empty() {
        ui.add_space(6.0);
        ui.label(RichText::new("Everything has dates.").italics().color(theme::TEXT_SECONDARY));
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt("unscheduled_scroll")
        .auto_shrink([false, true])
        .max_height(ui.available_height() * 0.6)
        .show(ui, |ui| {
            for (i, entry) in entries.into_iter().enumerate() {
                let row_bg = if i % 2 == 0 { theme::BG_PANEL } else { theme::BG_DARK };
                let id = egui::Id::new(("unscheduled", entry.item.target));
                let title = entry.item.title.clone();
                ui.dnd_drag_source(id, entry.item, |ui| {
                    egui::Frame::none()
                        .fill(row_bg)
                        .rounding(egui::Rounding::same(4.0))
                        .inner_margin(egui::Margin::symmetric(6.0, 4.0))
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.horizontal(|ui| {
                                let (dot, _) =
                                    ui.allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
                                ui.painter()
                                    .circle_filled(dot.center(), 3.0, theme::event_color(entry.color));
                                ui.add(
                                    egui::Label::new(RichText::new(title).size(12.0).color(theme::TEXT_PRIMARY))
                                        .truncate(),
                                );
                                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                    ui.label(RichText::new(entry.kind).size(9.5).color(theme::TEXT_DIM));
                                });
                            });
                        });
                });
                ui.add_space(1.0);
            }
        });
}

/// Details of the selected calendar event.
pub fn show_event_details(event: &CalendarEvent, ui: &mut Ui) {
    ui.add_space(4.0);
    ui.horizontal(|ui| {
        let (dot, _) = ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
        ui.painter()
            .circle_filled(dot.center(), 4.0, theme::event_color(event.color));
        ui.label(RichText::new(&event.title).strong().size(13.0).color(Color32::WHITE));
    });
    egui::Grid::new("event_details")
        .num_columns(2)
        .spacing([10.0, 4.0])
        .show(ui, |ui| {
            ui.label(RichText::new("Kind").color(theme::TEXT_SECONDARY));
            ui.label(event.kind().label());
            ui.end_row();

            ui.label(RichText::new("Dates").color(theme::TEXT_SECONDARY));
            ui.label(format!(
                "{} {} {}",
                event.start.format("%d/%m/%Y"),
                egui_phosphor::regular::ARROW_RIGHT,
                event.end.format("%d/%m/%Y"),
            ));
            ui.end_row();

            ui.label(RichText::new("Length").color(theme::TEXT_SECONDARY));
            ui.label(format!("{} day(s)", event.duration_days() + 1));
            ui.end_row();

            if event.completed {
                ui.label(RichText::new("Status").color(theme::TEXT_SECONDARY));
                ui.label(format!("{} Completed", egui_phosphor::regular::CHECK));
                ui.end_row();
            }
        });
    if !event.description.is_empty() {
        ui.add_space(4.0);
        ui.label(RichText::new(&event.description).size(11.0).color(theme::TEXT_SECONDARY));
    }
}
