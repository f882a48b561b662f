use std::path::PathBuf;

use eframe::egui::{self, CursorIcon, RichText, Sense, Ui, Vec2};
use log::error;

use crate::export;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Right side panel – clickable legend
// ---------------------------------------------------------------------------

/// Render the gram-stain legend. Clicking an entry toggles it in the selection.
pub fn legend_panel(ui: &mut Ui, state: &mut AppState) {
    let Some(channel) = state
        .chart
        .observation_layer()
        .and_then(|layer| layer.encoding.color.as_ref())
    else {
        return;
    };
    if let Some(title) = channel.legend_title.resolve(&channel.field) {
        ui.strong(title);
    }
    ui.add_space(4.0);

    let Some(color_map) = state.color_map.clone() else {
        return;
    };

    for (stain, color) in color_map.legend_entries() {
        let included = state.selection.includes(stain);
        let swatch = if included {
            color
        } else {
            color_map.faded(stain, state.opacity_for(stain))
        };

        let row = ui.horizontal(|ui: &mut Ui| {
            let (rect, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
            ui.painter().circle_filled(rect.center(), 5.0, swatch);
            let label = RichText::new(stain.to_string());
            ui.label(if included { label } else { label.weak() });
        });

        let response = row
            .response
            .interact(Sense::click())
            .on_hover_cursor(CursorIcon::PointingHand);
        if response.clicked() {
            state.toggle_legend(stain);
        }
    }

    if !state.selection.is_empty() {
        ui.add_space(6.0);
        if ui.small_button("Clear selection").clicked() {
            state.clear_selection();
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export Vega-Lite…").clicked() {
                export_vegalite_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export HTML page…").clicked() {
                export_html_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export data (CSV)…").clicked() {
                export_csv_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} observations, {} highlighted",
            state.rows.len(),
            state.highlighted_count()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).weak());
        }
    });
}

/// Heading shown above the chart.
pub fn heading(ui: &mut Ui, state: &AppState) {
    ui.add_space(6.0);
    ui.heading(&state.config.heading);
    ui.add_space(6.0);
}

/// Caption under the chart.
pub fn caption(ui: &mut Ui, state: &AppState) {
    ui.add_space(4.0);
    ui.label(RichText::new(&state.config.caption).small().weak());
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Export dialogs
// ---------------------------------------------------------------------------

fn save_dialog(file_name: &str, filter_name: &str, extensions: &[&str]) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(file_name)
        .add_filter(filter_name, extensions)
        .save_file()
}

fn report(state: &mut AppState, result: anyhow::Result<()>, path: &std::path::Path) {
    state.status_message = Some(match result {
        Ok(()) => format!("Saved {}", path.display()),
        Err(e) => {
            error!("{e:#}");
            format!("Error: {e:#}")
        }
    });
}

fn export_vegalite_dialog(state: &mut AppState) {
    if let Some(path) = save_dialog("antibiotic_story.vl.json", "Vega-Lite", &["json"]) {
        let result = export::write_vegalite(&path, &state.chart);
        report(state, result, &path);
    }
}

fn export_html_dialog(state: &mut AppState) {
    if let Some(path) = save_dialog("antibiotic_story.html", "HTML", &["html", "htm"]) {
        let result = export::write_html(&path, &state.config, &state.rows, &state.chart);
        report(state, result, &path);
    }
}

fn export_csv_dialog(state: &mut AppState) {
    if let Some(path) = save_dialog("antibiotic_mic.csv", "CSV", &["csv"]) {
        let result = export::write_csv(&path, &state.rows);
        report(state, result, &path);
    }
}
