use eframe::egui;
use tsviewer::state::{Action, AppState, Color, Plot};

/// Column checklist of the focused plot with a color swatch per selected
/// column. The axis column is not offered.
pub fn show_channel_list(ui: &mut egui::Ui, state: &AppState, plot: &Plot, actions: &mut Vec<Action>) {
    let id = plot.id();
    let columns: Vec<String> = state
        .available_columns()
        .into_iter()
        .filter(|c| c != plot.axis_column())
        .collect();

    if columns.is_empty() {
        ui.label(egui::RichText::new("No numeric columns loaded.").weak());
        return;
    }

    for column in columns {
        ui.horizontal(|ui| {
            let mut checked = plot.has_value_column(&column);
            if ui.checkbox(&mut checked, column.as_str()).changed() {
                let action = if checked {
                    Action::AddValueColumn { plot: id, column: column.clone() }
                } else {
                    Action::RemoveValueColumn { plot: id, column: column.clone() }
                };
                actions.push(action);
            }

            if let Some(color) = plot.color_for(&column) {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mut color32 = color.color32();
                    let resp = egui::color_picker::color_edit_button_srgba(
                        ui,
                        &mut color32,
                        egui::color_picker::Alpha::Opaque,
                    );
                    if resp.changed() {
                        actions.push(Action::SetColor {
                            plot: id,
                            column: column.clone(),
                            color: Color::from_color32(color32),
                        });
                    }
                });
            }
        });
    }
}
