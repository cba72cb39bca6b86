use std::collections::BTreeMap;

use campaign_planner::calendar::{
    layout_rows, layout_rows_bounded, schedule_drop, segment_all, CalendarEvent,
    CalendarViewState, DateAtPosition, DateChangeIntent, DropItem, EventKind, EventSegment,
    GestureMode, InteractionController, Layers, PointerPos, ReleaseOutcome, ResizeHandle,
};
use campaign_planner::model::CalendarWindow;
use chrono::{Datelike, NaiveDate};
use egui::{Color32, Pos2, Rect, Response, Rounding, Sense, Stroke, Ui, Vec2};

use crate::ui::theme;

/// Result details from interactions with the calendar grid.
#[derive(Debug, Default)]
pub struct GridInteraction {
    /// A date change requested by a finished drag or a drop.
    pub intent: Option<DateChangeIntent>,
    /// Event id of a plain click.
    pub selected: Option<String>,
    pub cleared_selection: bool,
}

/// Options for one render of the grid.
pub struct GridOptions<'a> {
    /// Layer cutoff per week row; `None` renders every layer.
    pub max_visible_layers: Option<usize>,
    /// Days outside this month are dimmed.
    pub focus_month: Option<u32>,
    pub selected: Option<&'a str>,
}

/// Pixel layout of the rendered grid, used to hit-test pointer positions.
#[derive(Debug, Clone)]
pub struct GridGeometry {
    window: CalendarWindow,
    left: f32,
    cell_width: f32,
    /// `(top, bottom)` of each week row in screen space.
    rows: Vec<(f32, f32)>,
}

impl GridGeometry {
    fn cell_rect(&self, row: usize, col: usize) -> Rect {
        let (top, bottom) = self.rows[row];
        let x = self.left + col as f32 * self.cell_width;
        Rect::from_min_max(Pos2::new(x, top), Pos2::new(x + self.cell_width, bottom))
    }

    fn cell_rect_of(&self, date: NaiveDate) -> Option<Rect> {
        let (row, col) = self.window.cell_of(date)?;
        Some(self.cell_rect(row, col))
    }
}

impl DateAtPosition for GridGeometry {
    fn resolve_date_at(&self, x: f32, y: f32) -> Option<NaiveDate> {
        let col = ((x - self.left) / self.cell_width).floor();
        if !(0.0..7.0).contains(&col) {
            return None;
        }
        let row = self
            .rows
            .iter()
            .position(|&(top, bottom)| y >= top && y < bottom)?;
        let date = self.window.cell_date(row, col as usize);
        self.window.contains(date).then_some(date)
    }
}

/// The layers one week row renders, plus its "+N more" counts.
struct RowPlan<'a> {
    layers: Layers<'a>,
    hidden_by_col: [usize; 7],
    collapsible: bool,
}

impl RowPlan<'_> {
    fn has_footer(&self) -> bool {
        self.collapsible || self.hidden_by_col.iter().any(|&n| n > 0)
    }

    fn height(&self) -> f32 {
        let lanes = self.layers.len() as f32 * (theme::LANE_HEIGHT + theme::LANE_GAP);
        let footer = if self.has_footer() { theme::MORE_HEIGHT } else { 0.0 };
        (theme::DAY_LABEL_HEIGHT + lanes + footer + 4.0).max(theme::MIN_ROW_HEIGHT)
    }
}

fn plan_rows<'a>(
    segments: &[EventSegment<'a>],
    window: &CalendarWindow,
    view_state: &CalendarViewState,
    max_visible_layers: Option<usize>,
) -> Vec<RowPlan<'a>> {
    let mut full = layout_rows(segments);
    let mut bounded = max_visible_layers
        .map(|max| layout_rows_bounded(segments, max))
        .unwrap_or_else(BTreeMap::new);

    (0..window.rows())
        .map(|row| {
            let all = full.remove(&row).unwrap_or_default();
            let expanded = view_state.is_expanded(window.row_start(row));
            match bounded.remove(&row) {
                Some(b) if !expanded => RowPlan {
                    layers: b.visible_layers,
                    hidden_by_col: b.hidden_by_col,
                    collapsible: false,
                },
                Some(b) => RowPlan {
                    layers: all,
                    hidden_by_col: [0; 7],
                    collapsible: b.has_hidden(),
                },
                None => RowPlan {
                    layers: all,
                    hidden_by_col: [0; 7],
                    collapsible: false,
                },
            }
        })
        .collect()
}

/// Render the calendar grid and drive the drag controller from pointer input.
pub fn show_calendar_grid(
    events: &[CalendarEvent],
    window: &CalendarWindow,
    view_state: &mut CalendarViewState,
    controller: &mut InteractionController,
    options: &GridOptions<'_>,
    ui: &mut Ui,
) -> GridInteraction {
    let mut interaction = GridInteraction::default();

    // The dragged event is drawn at its live dates.
    let shown: Vec<CalendarEvent> = events
        .iter()
        .cloned()
        .map(|mut event| {
            if let Some((start, end)) = controller.preview_for(&event.id) {
                event.start = start;
                event.end = end;
            }
            event
        })
        .collect();
    let segments = segment_all(&shown, window);
    let rows = plan_rows(&segments, window, view_state, options.max_visible_layers);

    let width = ui.available_width().max(7.0 * 40.0);
    let cell_width = width / 7.0;
    draw_weekday_header(ui, window, cell_width, width);

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let total_height: f32 = rows.iter().map(RowPlan::height).sum();
            let (response, painter) =
                ui.allocate_painter(Vec2::new(width, total_height), Sense::click());
            let origin = response.rect.min;

            let mut tops = Vec::with_capacity(rows.len());
            let mut y = origin.y;
            for plan in &rows {
                tops.push((y, y + plan.height()));
                y += plan.height();
            }
            let geometry = GridGeometry {
                window: *window,
                left: origin.x,
                cell_width,
                rows: tops,
            };

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);
            draw_cells(&painter, &geometry, options.focus_month);
            draw_targets(ui, &painter, &response, &geometry, controller);

            let mut consumed_click = false;
            for (row, plan) in rows.iter().enumerate() {
                let (top, _) = geometry.rows[row];
                for (lane, layer) in plan.layers.iter().enumerate() {
                    let lane_top = top
                        + theme::DAY_LABEL_HEIGHT
                        + lane as f32 * (theme::LANE_HEIGHT + theme::LANE_GAP);
                    for segment in layer {
                        let bar = bar_rect(&geometry, segment, lane_top);
                        let selected = options.selected == Some(segment.event.id.as_str());
                        draw_bar(&painter, segment, bar, selected, controller);
                        if handle_bar_input(ui, events, segment, bar, row, controller) {
                            consumed_click = true;
                        }
                    }
                }
                if plan.has_footer()
                    && draw_footer(ui, &painter, &geometry, row, plan, view_state)
                {
                    consumed_click = true;
                }
            }

            track_gesture(ui, &geometry, controller, &mut interaction);

            if let Some(item) = response.dnd_release_payload::<DropItem>() {
                let dropped_on = ui
                    .input(|i| i.pointer.interact_pos())
                    .and_then(|pos| geometry.resolve_date_at(pos.x, pos.y));
                if let Some(date) = dropped_on {
                    interaction.intent = Some(schedule_drop(&item, date));
                }
            }

            if response.clicked() && !consumed_click && !controller.is_busy() {
                interaction.cleared_selection = true;
            }
        });

    interaction
}

fn draw_weekday_header(ui: &mut Ui, window: &CalendarWindow, cell_width: f32, width: f32) {
    let (rect, _) = ui.allocate_exact_size(Vec2::new(width, theme::HEADER_HEIGHT), Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, theme::BG_HEADER);
    for col in 0..7 {
        let day = window.cell_date(0, col);
        let x = rect.left() + col as f32 * cell_width;
        painter.text(
            Pos2::new(x + cell_width / 2.0, rect.center().y),
            egui::Align2::CENTER_CENTER,
            day.format("%a").to_string(),
            theme::font_header(),
            theme::TEXT_SECONDARY,
        );
    }
    painter.line_segment(
        [rect.left_bottom(), rect.right_bottom()],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

fn draw_cells(painter: &egui::Painter, geometry: &GridGeometry, focus_month: Option<u32>) {
    let today = chrono::Local::now().date_naive();
    for row in 0..geometry.rows.len() {
        for col in 0..7 {
            let date = geometry.window.cell_date(row, col);
            let rect = geometry.cell_rect(row, col);
            let outside = focus_month.is_some_and(|m| date.month() != m);
            if outside {
                painter.rect_filled(rect, 0.0, theme::BG_OUT_OF_MONTH);
            }
            painter.rect_stroke(rect, 0.0, Stroke::new(0.5, theme::GRID_LINE));

            let label = if date.day() == 1 {
                date.format("%b %-d").to_string()
            } else {
                date.day().to_string()
            };
            let color = if date == today {
                theme::TODAY
            } else if outside {
                theme::TEXT_DIM
            } else {
                theme::TEXT_SECONDARY
            };
            painter.text(
                Pos2::new(rect.left() + 5.0, rect.top() + theme::DAY_LABEL_HEIGHT / 2.0),
                egui::Align2::LEFT_CENTER,
                label,
                theme::font_day(),
                color,
            );
        }
    }
}

/// Highlight the cell a drag or a sidebar drop would land on.
fn draw_targets(
    ui: &Ui,
    painter: &egui::Painter,
    response: &Response,
    geometry: &GridGeometry,
    controller: &InteractionController,
) {
    let hovered_drop = response
        .dnd_hover_payload::<DropItem>()
        .and_then(|_| ui.input(|i| i.pointer.hover_pos()))
        .and_then(|pos| geometry.resolve_date_at(pos.x, pos.y));
    let live_over = controller.session().and_then(|s| s.live_over_date);

    for date in [hovered_drop, live_over].into_iter().flatten() {
        if let Some(rect) = geometry.cell_rect_of(date) {
            painter.rect_filled(rect.shrink(1.0), 2.0, theme::BG_DROP_TARGET);
        }
    }
}

fn bar_rect(geometry: &GridGeometry, segment: &EventSegment<'_>, lane_top: f32) -> Rect {
    let x0 = geometry.left + segment.start_col as f32 * geometry.cell_width + theme::BAR_INSET;
    let x1 = geometry.left + (segment.end_col() + 1) as f32 * geometry.cell_width - theme::BAR_INSET;
    Rect::from_min_max(
        Pos2::new(x0, lane_top),
        Pos2::new(x1.max(x0 + 4.0), lane_top + theme::LANE_HEIGHT),
    )
}

fn draw_bar(
    painter: &egui::Painter,
    segment: &EventSegment<'_>,
    bar: Rect,
    selected: bool,
    controller: &InteractionController,
) {
    let event = segment.event;
    let r = theme::BAR_ROUNDING;
    let rounding = Rounding {
        nw: if segment.is_start { r } else { 0.0 },
        sw: if segment.is_start { r } else { 0.0 },
        ne: if segment.is_end { r } else { 0.0 },
        se: if segment.is_end { r } else { 0.0 },
    };
    let mut fill = theme::event_color(event.color);
    if event.completed {
        fill = fill.gamma_multiply(0.6);
    }
    painter.rect_filled(bar.translate(Vec2::new(1.0, 1.5)), rounding, Color32::from_black_alpha(35));
    painter.rect_filled(bar, rounding, fill);

    let dragging = controller.preview_for(&event.id).is_some();
    if selected || dragging {
        painter.rect_stroke(bar.expand(1.0), rounding, Stroke::new(2.0, theme::BORDER_ACCENT));
    }

    let title = if event.kind() == EventKind::Stage {
        format!("{} {}", egui_phosphor::regular::FLAG, event.title)
    } else {
        event.title.clone()
    };
    let galley = painter.layout_no_wrap(title, theme::font_bar(), theme::TEXT_ON_BAR);
    let text_y = bar.top() + (bar.height() - galley.size().y) / 2.0;
    painter
        .with_clip_rect(bar.shrink(1.0))
        .galley(Pos2::new(bar.left() + 6.0, text_y), galley, Color32::TRANSPARENT);

    if selected && event.is_resizable() {
        let handle_h = bar.height() * 0.55;
        let handle_y = bar.center().y - handle_h / 2.0;
        if segment.is_start {
            let lh = Rect::from_min_size(Pos2::new(bar.left() + 1.5, handle_y), Vec2::new(3.0, handle_h));
            painter.rect_filled(lh, Rounding::same(1.5), theme::HANDLE_COLOR);
        }
        if segment.is_end {
            let rh = Rect::from_min_size(Pos2::new(bar.right() - 4.5, handle_y), Vec2::new(3.0, handle_h));
            painter.rect_filled(rh, Rounding::same(1.5), theme::HANDLE_COLOR);
        }
    }
}

/// Register the bar and its resize handles; arm the controller on press.
///
/// Returns true when the pointer went down on this bar.
fn handle_bar_input(
    ui: &Ui,
    events: &[CalendarEvent],
    segment: &EventSegment<'_>,
    bar: Rect,
    row: usize,
    controller: &mut InteractionController,
) -> bool {
    let event = segment.event;
    let bar_response = ui.interact(
        bar,
        ui.make_persistent_id(("event-bar", &event.id, row)),
        Sense::click_and_drag(),
    );

    let mut handles = Vec::new();
    if event.is_resizable() {
        if segment.is_start {
            let rect = Rect::from_min_max(bar.left_top(), Pos2::new(bar.left() + theme::HANDLE_WIDTH, bar.bottom()));
            handles.push((ResizeHandle::Start, rect));
        }
        if segment.is_end {
            let rect = Rect::from_min_max(Pos2::new(bar.right() - theme::HANDLE_WIDTH, bar.top()), bar.right_bottom());
            handles.push((ResizeHandle::End, rect));
        }
    }
    let handle_responses: Vec<(ResizeHandle, Response)> = handles
        .into_iter()
        .map(|(handle, rect)| {
            let id = ui.make_persistent_id(("event-handle", &event.id, row, handle == ResizeHandle::Start));
            (handle, ui.interact(rect, id, Sense::drag()))
        })
        .collect();

    if controller.is_busy() {
        return false;
    }
    if handle_responses.iter().any(|(_, r)| r.hovered()) {
        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
    } else if bar_response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        show_event_tooltip(ui, event);
    }
    if egui::DragAndDrop::has_any_payload(ui.ctx()) {
        return false;
    }

    // Press on the unpreviewed event so the session starts from stored dates.
    let Some(original) = events.iter().find(|e| e.id == event.id) else {
        return false;
    };
    for (handle, response) in &handle_responses {
        if response.is_pointer_button_down_on() {
            if let Err(err) = controller.press_handle(original, *handle) {
                tracing::debug!(%err, "resize not started");
            }
            return true;
        }
    }
    if bar_response.is_pointer_button_down_on() {
        if let Some(pos) = bar_response.interact_pointer_pos() {
            if let Err(err) = controller.press(original, PointerPos::new(pos.x, pos.y)) {
                tracing::debug!(%err, "press ignored");
            }
        }
        return true;
    }
    false
}

fn show_event_tooltip(ui: &Ui, event: &CalendarEvent) {
    egui::show_tooltip_at_pointer(
        ui.ctx(),
        ui.layer_id(),
        egui::Id::new(("event-tip", &event.id)),
        |ui| {
            ui.strong(&event.title);
            ui.label(format!(
                "{} · {} → {}",
                event.kind().label(),
                event.start.format("%d/%m/%Y"),
                event.end.format("%d/%m/%Y"),
            ));
            if !event.description.is_empty() {
                ui.label(egui::RichText::new(&event.description).small());
            }
        },
    );
}

/// "+N more" badges, or a collapse toggle for an expanded row.
///
/// Returns true when a badge was clicked.
fn draw_footer(
    ui: &Ui,
    painter: &egui::Painter,
    geometry: &GridGeometry,
    row: usize,
    plan: &RowPlan<'_>,
    view_state: &mut CalendarViewState,
) -> bool {
    let (_, bottom) = geometry.rows[row];
    let row_key = geometry.window.row_start(row);
    let mut clicked = false;

    let mut badge = |col: usize, text: String, salt: usize| {
        let cell = geometry.cell_rect(row, col);
        let rect = Rect::from_min_max(
            Pos2::new(cell.left() + 2.0, bottom - theme::MORE_HEIGHT - 2.0),
            Pos2::new(cell.right() - 2.0, bottom - 2.0),
        );
        let response = ui.interact(rect, ui.make_persistent_id(("more", row_key, salt)), Sense::click());
        let color = if response.hovered() { theme::ACCENT } else { theme::TEXT_SECONDARY };
        painter.text(rect.left_center(), egui::Align2::LEFT_CENTER, text, theme::font_small(), color);
        if response.clicked() {
            clicked = true;
        }
    };

    if plan.collapsible {
        badge(0, "show less".to_string(), 7);
    } else {
        for (col, &hidden) in plan.hidden_by_col.iter().enumerate() {
            if hidden > 0 {
                badge(col, format!("+{hidden} more"), col);
            }
        }
    }

    if clicked {
        view_state.toggle_row(row_key);
    }
    clicked
}

/// Feed pointer motion and release to the controller while a press or
/// gesture is live.
fn track_gesture(
    ui: &Ui,
    geometry: &GridGeometry,
    controller: &mut InteractionController,
    interaction: &mut GridInteraction,
) {
    if !controller.is_busy() {
        return;
    }
    if let Some(pos) = ui.input(|i| i.pointer.latest_pos()) {
        controller.pointer_moved(PointerPos::new(pos.x, pos.y), geometry);
    }
    match controller.mode() {
        GestureMode::Moving => ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing),
        GestureMode::Resizing => ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal),
        GestureMode::Idle => {}
    }

    if ui.input(|i| i.pointer.primary_down()) {
        ui.ctx().request_repaint();
        return;
    }
    match controller.release() {
        ReleaseOutcome::Click { event_id } => interaction.selected = Some(event_id),
        ReleaseOutcome::Committed(intent) => interaction.intent = Some(intent),
        ReleaseOutcome::Cancelled | ReleaseOutcome::Idle => {}
    }
}
