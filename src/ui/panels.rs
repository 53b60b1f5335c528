use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::loader;
use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – navigation
// ---------------------------------------------------------------------------

/// Render the navigation menu.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Navigation");
    ui.separator();

    ui.label("Go to");
    for page in Page::ALL {
        ui.radio_value(&mut state.page, page, page.label());
    }

    ui.add_space(12.0);
    ui.separator();
    ui.small(format!(
        "{} rows, {} without a continent",
        state.dataset.len(),
        state.dataset.dropped_rows
    ));
    if let Some((min, max)) = state.year_bounds() {
        ui.small(format!("Years {min}–{max}"));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong("World Happiness Report Visualisation");
        ui.separator();
        ui.label(state.source.display().to_string());

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open happiness data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    let Some(path) = file else {
        return;
    };
    match loader::load_file(&path, &state.continents) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} rows from {} ({} dropped)",
                dataset.len(),
                path.display(),
                dataset.dropped_rows
            );
            state.set_dataset(dataset, path);
        }
        Err(e) => {
            let e = anyhow::Error::from(e);
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
