use egui::{Color32, Context, RichText, Window};

use crate::app::PlannerApp;
use crate::ui::theme;

const CASCADE_DIALOG_WIDTH: f32 = 380.0;
const MAX_LISTED_DEPENDENTS: usize = 8;

/// Ask before a change that moves dependent records.
pub fn show_cascade_dialog(app: &mut PlannerApp, ctx: &Context) {
    let Some(pending) = app.pending_cascade.as_ref() else {
        return;
    };
    let plan = &pending.plan;
    let mut clamp = pending.clamp;
    let mut confirm = false;
    let mut cancel = false;

    Window::new(RichText::new("Move dependent items?").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([CASCADE_DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label(
                RichText::new(format!(
                    "'{}' {} {} → {}",
                    plan.primary.label(),
                    egui_phosphor::regular::ARROW_RIGHT,
                    plan.intent.start.format("%d/%m/%Y"),
                    plan.intent.end.format("%d/%m/%Y"),
                ))
                .color(theme::TEXT_PRIMARY),
            );
            if let Some(stats) = plan.stats {
                ui.label(RichText::new(stats.describe()).color(theme::TEXT_SECONDARY));
            }
            ui.add_space(4.0);

            for update in plan.dependents.iter().take(MAX_LISTED_DEPENDENTS) {
                ui.label(
                    RichText::new(format!("• {}", update.label()))
                        .size(11.0)
                        .color(theme::TEXT_SECONDARY),
                );
            }
            if plan.dependents.len() > MAX_LISTED_DEPENDENTS {
                ui.label(
                    RichText::new(format!(
                        "…and {} more",
                        plan.dependents.len() - MAX_LISTED_DEPENDENTS
                    ))
                    .size(11.0)
                    .color(theme::TEXT_DIM),
                );
            }

            ui.add_space(6.0);
            ui.checkbox(&mut clamp, "Keep dependents inside the new dates");
            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let apply_btn = egui::Button::new(RichText::new("Apply").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], apply_btn).clicked() {
                    confirm = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    cancel = true;
                }
            });
            ui.add_space(2.0);
        });

    if clamp != pending.clamp {
        app.replan_cascade(clamp);
    }
    if confirm {
        app.confirm_cascade();
    } else if cancel || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.cancel_cascade();
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut PlannerApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 180.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Campaign Planner").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Plan projects, campaigns and tasks");
                ui.label("on a drag-and-drop calendar.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
