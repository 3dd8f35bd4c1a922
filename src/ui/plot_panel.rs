use std::collections::HashMap;

use eframe::egui;
use egui_plot::{Legend, Line, Plot as PlotWidget, PlotBounds, PlotPoints, VLine};
use tsviewer::data::datetime::format_axis_value;
use tsviewer::state::{Action, AppState, Plot, PlotId, Theme};
use tsviewer::AxisRange;

/// Per-panel UI scratch state that is not part of the viewer state proper.
#[derive(Default)]
pub struct PanelMemory {
    /// Title text being edited; committed on focus loss.
    title_drafts: HashMap<PlotId, String>,
    /// Axis value where the current brush drag started.
    brush_origin: HashMap<PlotId, f64>,
    /// Last frame's outer rect of each panel, used as drop targets.
    rects: HashMap<PlotId, egui::Rect>,
}

impl PanelMemory {
    pub fn rect(&self, id: PlotId) -> Option<egui::Rect> {
        self.rects.get(&id).copied()
    }

    /// Drop scratch entries for plots that no longer exist.
    pub fn retain(&mut self, state: &AppState) {
        let alive = |id: &PlotId| state.plot(*id).is_some();
        self.title_drafts.retain(|id, _| alive(id));
        self.brush_origin.retain(|id, _| alive(id));
        self.rects.retain(|id, _| alive(id));
    }
}

fn toolbar_btn(ui: &mut egui::Ui, label: &str) -> egui::Response {
    ui.add(egui::Button::new(label).min_size(egui::vec2(0.0, 26.0)))
}

/// Render one plot panel and push the actions it produces.
#[allow(clippy::too_many_arguments)]
pub fn show_plot_panel(
    ui: &mut egui::Ui,
    state: &AppState,
    plot: &Plot,
    index: usize,
    theme: Theme,
    panel_height: f32,
    memory: &mut PanelMemory,
    actions: &mut Vec<Action>,
) {
    let id = plot.id();
    let focused = state.focused_plot().map(|p| p.id()) == Some(id);

    let mut frame = egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(10))
        .corner_radius(egui::CornerRadius::same(8));
    if focused {
        frame = frame.stroke(egui::Stroke::new(2.0, ui.visuals().selection.stroke.color));
    }

    let frame_resp = frame.show(ui, |ui| {
        ui.horizontal(|ui| {
            // Drag handle for reordering plots
            let (handle_rect, handle_resp) =
                ui.allocate_exact_size(egui::vec2(14.0, 26.0), egui::Sense::drag());
            let grip_color = if handle_resp.hovered() || handle_resp.dragged() {
                ui.visuals().text_color().gamma_multiply(0.7)
            } else {
                ui.visuals().text_color().gamma_multiply(0.3)
            };
            let cx = handle_rect.center().x;
            for dy in [-4.0_f32, 0.0, 4.0] {
                let y = handle_rect.center().y + dy;
                ui.painter().hline(
                    (cx - 5.0)..=(cx + 5.0),
                    y,
                    egui::Stroke::new(1.5, grip_color),
                );
            }
            handle_resp.dnd_set_drag_payload(index);

            show_title_edit(ui, plot, memory, actions);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let remove_btn = egui::Button::new(
                    egui::RichText::new("Remove").color(egui::Color32::from_rgb(220, 60, 60)),
                )
                .min_size(egui::vec2(0.0, 26.0));
                if ui.add(remove_btn).on_hover_text("Remove this plot").clicked() {
                    actions.push(Action::RemovePlot(id));
                }
                if !focused && toolbar_btn(ui, "Focus").clicked() {
                    actions.push(Action::SetFocusedPlot(Some(id)));
                }
            });
        });

        ui.add_space(2.0);

        ui.horizontal(|ui| {
            ui.label("X axis:");
            let mut selected = plot.axis_column().to_string();
            egui::ComboBox::from_id_salt(("axis_column", id))
                .selected_text(selected.clone())
                .show_ui(ui, |ui| {
                    for column in state.available_columns() {
                        ui.selectable_value(&mut selected, column.clone(), column);
                    }
                });
            if selected != plot.axis_column() {
                actions.push(Action::SetAxisColumn { plot: id, column: selected });
            }

            ui.separator();
            if toolbar_btn(ui, "Reset Zoom")
                .on_hover_text("Show the whole axis range (or double-click the chart)")
                .clicked()
            {
                actions.push(Action::ResetZoom);
            }
        });

        ui.add_space(4.0);
        let chart_height = (panel_height - 90.0).max(160.0);
        show_chart(ui, state, plot, theme, chart_height, memory, actions);
    });

    memory.rects.insert(id, frame_resp.response.rect);
}

fn show_title_edit(
    ui: &mut egui::Ui,
    plot: &Plot,
    memory: &mut PanelMemory,
    actions: &mut Vec<Action>,
) {
    let id = plot.id();
    let draft = memory
        .title_drafts
        .entry(id)
        .or_insert_with(|| plot.title().to_string());

    let response = ui.add(
        egui::TextEdit::singleline(draft)
            .font(egui::TextStyle::Heading)
            .desired_width((ui.available_width() - 160.0).max(80.0)),
    );

    if response.gained_focus() {
        actions.push(Action::SetFocusedPlot(Some(id)));
    }
    if response.lost_focus() {
        if draft.trim() != plot.title() {
            actions.push(Action::SetTitle {
                plot: id,
                title: draft.clone(),
            });
        }
        // A blank draft is rejected; resync with the stored title next frame.
        memory.title_drafts.remove(&id);
    } else if !response.has_focus() {
        *draft = plot.title().to_string();
    }
}

fn show_chart(
    ui: &mut egui::Ui,
    state: &AppState,
    plot: &Plot,
    theme: Theme,
    height: f32,
    memory: &mut PanelMemory,
    actions: &mut Vec<Action>,
) {
    let id = plot.id();
    let dataset = state.dataset();
    let axis = plot.axis_column().to_string();

    if plot.value_columns().is_empty() {
        ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui| {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new("Select channels in the side panel to plot them.").weak(),
                );
            });
        });
        return;
    }

    let x_bounds = chart_x_bounds(state.zoom_domain(), dataset.axis_extent(&axis));
    let selection = state.selection();
    let live_brush = memory.brush_origin.get(&id).copied();
    let brush_color = theme.brush_color();

    let tick_axis = axis.clone();
    let label_axis = axis.clone();
    let chart = PlotWidget::new(("chart", id))
        .height(height)
        .legend(Legend::default())
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .x_axis_label(axis.clone())
        .x_axis_formatter(move |mark, _range| format_axis_value(&tick_axis, mark.value))
        .label_formatter(move |name, value| {
            let x = format_axis_value(&label_axis, value.x);
            if name.is_empty() {
                format!("{x}\n{:.2}", value.y)
            } else {
                format!("{name}\n{x}\n{:.2}", value.y)
            }
        });

    let response = chart.show(ui, |plot_ui| {
        if let Some(range) = x_bounds {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [range.start, f64::NEG_INFINITY],
                [range.end, f64::INFINITY],
            ));
            plot_ui.set_auto_bounds(egui::Vec2b::new(false, true));
        }

        for column in plot.value_columns() {
            let points = dataset.series_points(&axis, column);
            let color = plot
                .color_for(column)
                .map(|c| c.color32())
                .unwrap_or(egui::Color32::GRAY);
            plot_ui.line(
                Line::new(column.as_str(), PlotPoints::from(points))
                    .color(color)
                    .width(2.0),
            );
        }

        if let Some(range) = selection {
            for x in [range.start, range.end] {
                plot_ui.vline(
                    VLine::new("selection", x)
                        .color(brush_color)
                        .width(1.5)
                        .style(egui_plot::LineStyle::dashed_loose()),
                );
            }
        }

        if let (Some(origin), Some(pointer)) = (live_brush, plot_ui.pointer_coordinate()) {
            for x in [origin, pointer.x] {
                plot_ui.vline(VLine::new("brush", x).color(brush_color).width(1.0));
            }
        }
    });

    let resp = &response.response;
    let pointer_x = resp
        .interact_pointer_pos()
        .map(|pos| response.transform.value_from_position(pos).x);

    if resp.double_clicked() {
        memory.brush_origin.remove(&id);
        actions.push(Action::ResetZoom);
        return;
    }
    if resp.clicked() {
        actions.push(Action::SetFocusedPlot(Some(id)));
    }

    if resp.drag_started_by(egui::PointerButton::Primary) {
        if let Some(x) = pointer_x {
            memory.brush_origin.insert(id, x);
            actions.push(Action::SetFocusedPlot(Some(id)));
        }
    }
    if resp.drag_stopped_by(egui::PointerButton::Primary) {
        if let (Some(origin), Some(x)) = (memory.brush_origin.remove(&id), pointer_x) {
            if let Some(range) = clamp_brush(AxisRange::new(origin, x), dataset.axis_extent(&axis))
            {
                actions.push(Action::SetBrush(range));
            }
        }
    }
}

/// Explicit x bounds: the zoom domain, or the full axis extent after a reset.
/// A zero-width extent (a single sample) is left to the plot's auto-fit.
fn chart_x_bounds(zoom: Option<AxisRange>, extent: Option<AxisRange>) -> Option<AxisRange> {
    zoom.or(extent).filter(|range| range.span() > 0.0)
}

/// Clamp a brushed range to the data extent. Degenerate brushes (a click
/// without movement, or a drag entirely outside the data) yield nothing.
fn clamp_brush(range: AxisRange, extent: Option<AxisRange>) -> Option<AxisRange> {
    let (start, end) = match extent {
        Some(extent) => (range.start.max(extent.start), range.end.min(extent.end)),
        None => (range.start, range.end),
    };
    (start < end).then(|| AxisRange::new(start, end))
}
