use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use eframe::egui;
use tsviewer::data::demo::generate_demo_data;
use tsviewer::data::{loader, LoadOptions};
use tsviewer::state::app_state::VERSION;
use tsviewer::state::{Action, AppState, Store, Theme};
use tsviewer::{Dataset, ViewerConfig, ViewerError};

use crate::ui::channel_list::show_channel_list;
use crate::ui::plot_panel::{show_plot_panel, PanelMemory};
use crate::ui::stats_panel::{range_label, show_stats_section};

/// Stamped on each load as its worker finishes.
static LOAD_COMPLETIONS: AtomicU64 = AtomicU64::new(0);

type LoadResult = Result<Dataset, ViewerError>;

/// Pending async file load result, tagged with its completion order.
struct PendingLoad {
    path: PathBuf,
    result: Arc<Mutex<Option<(u64, LoadResult)>>>,
}

/// Take every finished load out of `pending`, in the order the workers
/// completed rather than the order the loads were started.
fn take_finished(pending: &mut Vec<PendingLoad>) -> Vec<(PathBuf, LoadResult)> {
    let mut finished = Vec::new();
    pending.retain(|load| {
        let taken = load.result.lock().ok().and_then(|mut slot| slot.take());
        match taken {
            Some((seq, result)) => {
                finished.push((seq, load.path.clone(), result));
                false
            }
            None => true,
        }
    });
    finished.sort_by_key(|(seq, _, _)| *seq);
    finished
        .into_iter()
        .map(|(_, path, result)| (path, result))
        .collect()
}

/// Label for the header button that switches to the other theme.
fn theme_button_label(current: Theme) -> String {
    format!("{} Mode", current.toggle().label())
}

/// Message shown in the footer until dismissed.
struct Notification {
    title: String,
    message: String,
    is_error: bool,
}

pub struct ViewerApp {
    store: Store,
    theme: Theme,
    demo_rows: usize,
    load_options: LoadOptions,
    notification: Option<Notification>,
    /// Uploads still being read. Each one replaces the dataset when it
    /// completes, so the last to finish wins.
    pending_loads: Vec<PendingLoad>,
    panels: PanelMemory,
}

impl ViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ViewerConfig) -> Self {
        let ctx = &cc.egui_ctx;
        let mut style = (*ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::proportional(15.0),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::proportional(20.0),
        );
        style.spacing.button_padding = egui::vec2(10.0, 5.0);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        ctx.set_style(style);
        ctx.set_visuals(config.theme.visuals());

        let state = AppState::with_demo(&config);
        tracing::info!(
            "Starting with {} rows and {} plot(s)",
            state.rows().len(),
            state.plots().len()
        );

        let mut store = Store::new(state);
        store.subscribe(|change, state| {
            tracing::debug!("State changed ({change:?}): {} plot(s)", state.plots().len());
        });

        Self {
            store,
            theme: config.theme,
            demo_rows: config.demo_rows,
            load_options: config.load_options(),
            notification: None,
            pending_loads: Vec::new(),
            panels: PanelMemory::default(),
        }
    }

    fn open_file_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .add_filter("All Files", &["*"])
            .pick_file()
        {
            self.load_file(&path);
        }
    }

    /// Read and parse a file on a worker thread so the UI stays responsive.
    fn load_file(&mut self, path: &Path) {
        let path_buf = path.to_path_buf();
        let options = self.load_options;
        let result: Arc<Mutex<Option<(u64, LoadResult)>>> = Arc::new(Mutex::new(None));
        let result_clone = Arc::clone(&result);

        std::thread::spawn(move || {
            let loaded = loader::load_file(&path_buf, &options);
            if let Ok(mut slot) = result_clone.lock() {
                let seq = LOAD_COMPLETIONS.fetch_add(1, Ordering::Relaxed);
                *slot = Some((seq, loaded));
            }
        });

        self.pending_loads.push(PendingLoad {
            path: path.to_path_buf(),
            result,
        });
    }

    fn load_demo(&mut self) {
        let rows = self.store.replace_dataset(generate_demo_data(self.demo_rows));
        self.notify_info("Demo Data", format!("Generated {rows} demo rows"));
    }

    fn poll_pending_loads(&mut self) {
        for (path, result) in take_finished(&mut self.pending_loads) {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            match result {
                Ok(dataset) => {
                    let rows = self.store.replace_dataset(dataset);
                    tracing::info!("Loaded {rows} rows from {:?}", path);
                    self.notify_info("File Loaded", format!("{name}: {rows} rows"));
                }
                Err(e) => {
                    tracing::warn!("Rejected upload {:?}: {e}", path);
                    self.notification = Some(Notification {
                        title: e.title().to_string(),
                        message: e.user_message(),
                        is_error: true,
                    });
                }
            }
        }
    }

    fn notify_info(&mut self, title: &str, message: String) {
        self.notification = Some(Notification {
            title: title.to_string(),
            message,
            is_error: false,
        });
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        let mut open_file = false;
        let mut load_demo = false;
        let mut reset_zoom = false;

        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::side_top_panel(&ctx.style())
                    .inner_margin(egui::Margin::symmetric(16, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Time Series Viewer");
                    ui.separator();

                    if ui.button("Open CSV").on_hover_text("Load a CSV file").clicked() {
                        open_file = true;
                    }
                    if ui.button("Demo Data").clicked() {
                        load_demo = true;
                    }
                    let zoomed = self.store.zoom_domain().is_some() || self.store.selection().is_some();
                    if ui.add_enabled(zoomed, egui::Button::new("Reset Zoom")).clicked() {
                        reset_zoom = true;
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(theme_button_label(self.theme)).clicked() {
                            self.theme = self.theme.toggle();
                            ctx.set_visuals(self.theme.visuals());
                        }
                        ui.separator();
                        ui.small(format!("v{VERSION}"));
                        if !self.pending_loads.is_empty() {
                            ui.spinner();
                        }
                    });
                });
            });

        if open_file {
            self.open_file_dialog();
        }
        if load_demo {
            self.load_demo();
        }
        if reset_zoom {
            self.store.dispatch(Action::ResetZoom);
        }
    }

    fn show_footer(&mut self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        egui::TopBottomPanel::bottom("footer")
            .frame(
                egui::Frame::side_top_panel(&ctx.style())
                    .inner_margin(egui::Margin::symmetric(16, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let add_btn = egui::Button::new(egui::RichText::new("+ New Plot").strong())
                        .min_size(egui::vec2(120.0, 28.0));
                    if ui.add(add_btn).clicked() {
                        actions.push(Action::AddPlot);
                    }

                    ui.separator();
                    let count = self.store.plots().len();
                    let label = if count == 1 {
                        "1 plot".to_string()
                    } else {
                        format!("{count} plots")
                    };
                    ui.label(egui::RichText::new(label).weak());
                    ui.label(
                        egui::RichText::new(format!("{} rows", self.store.rows().len())).weak(),
                    );

                    let mut dismiss = false;
                    if let Some(note) = &self.notification {
                        ui.separator();
                        let color = if note.is_error {
                            egui::Color32::from_rgb(255, 80, 80)
                        } else {
                            ui.visuals().text_color()
                        };
                        ui.colored_label(color, format!("{}: {}", note.title, note.message));
                        if ui.small_button("dismiss").clicked() {
                            dismiss = true;
                        }
                    }
                    if dismiss {
                        self.notification = None;
                    }
                });
            });
    }

    fn show_side_panel(&self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        let state = self.store.state();
        egui::SidePanel::right("channels")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let Some(plot) = state.focused_plot() else {
                        ui.add_space(12.0);
                        ui.label(egui::RichText::new("Select a plot to edit its channels.").weak());
                        return;
                    };

                    ui.heading(plot.title());
                    ui.add_space(4.0);
                    ui.label(egui::RichText::new("Channels").strong());
                    show_channel_list(ui, state, plot, actions);

                    let colors = |column: &str| {
                        plot.color_for(column)
                            .map(|c| c.color32())
                            .unwrap_or(egui::Color32::GRAY)
                    };

                    ui.separator();
                    let global = state.global_stats(plot.id()).unwrap_or_default();
                    show_stats_section(ui, "Global Statistics", Some(global.as_slice()), colors);

                    ui.separator();
                    if let Some(range) = state.selection() {
                        ui.label(
                            egui::RichText::new(range_label(plot.axis_column(), range.start, range.end))
                                .small(),
                        );
                        if ui.small_button("Clear selection").clicked() {
                            actions.push(Action::SetSelection(None));
                        }
                    }
                    let range_stats = state.range_stats(plot.id());
                    show_stats_section(ui, "Range Statistics", range_stats.as_deref(), colors);
                });
            });
    }

    fn show_plots(&mut self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        let state = self.store.state();
        let theme = self.theme;
        let panels = &mut self.panels;

        egui::CentralPanel::default().show(ctx, |ui| {
            let viewport_height = ui.available_height();
            let plot_count = state.plots().len();
            let spacing = 10.0_f32;
            let panel_height = if plot_count <= 1 {
                viewport_height
            } else {
                ((viewport_height - spacing) / 2.0).max(300.0)
            };

            egui::ScrollArea::vertical().show(ui, |ui| {
                if plot_count == 0 {
                    ui.add_space(80.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("No plots");
                        ui.add_space(12.0);
                        ui.label(
                            egui::RichText::new(
                                "Click \"+ New Plot\" below, or drag-and-drop a CSV file to load data.",
                            )
                            .weak(),
                        );
                    });
                }

                for (idx, plot) in state.plots().iter().enumerate() {
                    ui.push_id(plot.id(), |ui| {
                        show_plot_panel(ui, state, plot, idx, theme, panel_height, panels, actions);
                    });
                    ui.add_space(spacing);
                }

                // DnD drop detection: each panel rect is a drop target
                if egui::DragAndDrop::has_any_payload(ui.ctx()) {
                    for (idx, plot) in state.plots().iter().enumerate() {
                        let Some(rect) = panels.rect(plot.id()) else {
                            continue;
                        };
                        let drop_resp = ui.interact(
                            rect,
                            egui::Id::new("plot_drop").with(idx),
                            egui::Sense::hover(),
                        );

                        let slot = if top_half_of(&drop_resp, rect) { idx } else { idx + 1 };

                        if let Some(payload) = drop_resp.dnd_hover_payload::<usize>() {
                            if reorder_target(*payload, slot).is_some() {
                                let y = if slot == idx { rect.top() } else { rect.bottom() };
                                ui.painter().hline(
                                    rect.x_range(),
                                    y,
                                    egui::Stroke::new(3.0, egui::Color32::from_rgb(80, 140, 255)),
                                );
                            }
                        }
                        if let Some(payload) = drop_resp.dnd_release_payload::<usize>() {
                            if let Some(to) = reorder_target(*payload, slot) {
                                actions.push(Action::Reorder { from: *payload, to });
                            }
                        }
                    }
                }
            });
        });
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        // The loader rejects non-CSV files with a notification.
        for path in dropped {
            self.load_file(&path);
        }
    }
}

fn top_half_of(resp: &egui::Response, rect: egui::Rect) -> bool {
    resp.hover_pos().is_some_and(|p| p.y < rect.center().y)
}

/// Final index for a panel dragged from `from` and dropped before slot
/// `slot`. Dropping just above or below itself changes nothing.
fn reorder_target(from: usize, slot: usize) -> Option<usize> {
    if slot == from || slot == from + 1 {
        None
    } else if slot > from {
        Some(slot - 1)
    } else {
        Some(slot)
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        self.poll_pending_loads();

        let mut actions: Vec<Action> = Vec::new();
        self.show_header(ctx);
        self.show_footer(ctx, &mut actions);
        self.show_side_panel(ctx, &mut actions);
        self.show_plots(ctx, &mut actions);

        for action in actions {
            self.store.dispatch(action);
        }
        self.panels.retain(self.store.state());

        if !self.pending_loads.is_empty() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reorder_target() {
        // dropped onto its own top or bottom edge
        assert_eq!(reorder_target(1, 1), None);
        assert_eq!(reorder_target(1, 2), None);
        assert_eq!(reorder_target(0, 3), Some(2));
        assert_eq!(reorder_target(2, 0), Some(0));
    }

    fn finished_load(name: &str, seq: Option<u64>, rows: usize) -> PendingLoad {
        let result = seq.map(|seq| (seq, Ok(generate_demo_data(rows))));
        PendingLoad {
            path: PathBuf::from(name),
            result: Arc::new(Mutex::new(result)),
        }
    }

    #[test]
    fn test_take_finished_in_completion_order() {
        // started a, b, c; c is still running, b finished before a
        let mut pending = vec![
            finished_load("a.csv", Some(7), 3),
            finished_load("b.csv", Some(4), 5),
            finished_load("c.csv", None, 1),
        ];

        let done = take_finished(&mut pending);
        let names: Vec<_> = done.iter().map(|(p, _)| p.clone()).collect();
        assert_eq!(names, vec![PathBuf::from("b.csv"), PathBuf::from("a.csv")]);

        // applying in that order leaves the last finisher's rows
        let mut store = Store::new(AppState::from_dataset(Dataset::empty(), 0));
        for (_, result) in done {
            store.replace_dataset(result.unwrap());
        }
        assert_eq!(store.rows().len(), 3);

        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].path, PathBuf::from("c.csv"));
        assert!(take_finished(&mut pending).is_empty());
    }

    #[test]
    fn test_theme_button_offers_other_theme() {
        assert_eq!(theme_button_label(Theme::Dark), "Light Mode");
        assert_eq!(theme_button_label(Theme::Light), "Dark Mode");
    }
}
