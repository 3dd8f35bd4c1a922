use eframe::egui;
use tsviewer::data::datetime::format_axis_value;
use tsviewer::{ColumnStats, Statistics};

fn stat_row(ui: &mut egui::Ui, label: &str, value: String) {
    ui.label(egui::RichText::new(label).weak());
    ui.monospace(value);
    ui.end_row();
}

fn stats_grid(ui: &mut egui::Ui, id: &str, stats: &Statistics) {
    egui::Grid::new(id)
        .num_columns(2)
        .spacing([16.0, 2.0])
        .show(ui, |ui| {
            stat_row(ui, "Count", stats.count.to_string());
            stat_row(ui, "Min", format!("{:.2}", stats.min));
            stat_row(ui, "Max", format!("{:.2}", stats.max));
            stat_row(ui, "Mean", format!("{:.2}", stats.mean));
            stat_row(ui, "Median", format!("{:.2}", stats.median));
            stat_row(ui, "Start", format!("{:.2}", stats.start));
            stat_row(ui, "End", format!("{:.2}", stats.end));
        });
}

/// One card per value column. `stats` is `None` for range statistics when
/// nothing is brushed.
pub fn show_stats_section(
    ui: &mut egui::Ui,
    heading: &str,
    stats: Option<&[ColumnStats]>,
    colors: impl Fn(&str) -> egui::Color32,
) {
    ui.label(egui::RichText::new(heading).strong());
    ui.add_space(4.0);

    let Some(stats) = stats else {
        ui.label(egui::RichText::new("Brush the chart to select a range").weak());
        return;
    };
    if stats.is_empty() {
        ui.label(egui::RichText::new("No channels selected").weak());
        return;
    }

    for entry in stats {
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(6))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                let name = ui.colored_label(colors(&entry.column), entry.column.as_str());
                match &entry.stats {
                    Some(s) => {
                        name.on_hover_text(s.report(&entry.column));
                        stats_grid(ui, &format!("{heading}_{}", entry.column), s);
                    }
                    None => {
                        ui.label(egui::RichText::new("No data in range").weak());
                    }
                }
            });
    }
}

/// Brushed range as axis-formatted text.
pub fn range_label(axis: &str, start: f64, end: f64) -> String {
    format!(
        "{} to {}",
        format_axis_value(axis, start),
        format_axis_value(axis, end)
    )
}
