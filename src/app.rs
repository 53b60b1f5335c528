use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::DashboardConfig;
use crate::data::continent::ContinentTable;
use crate::data::loader;
use crate::state::{AppState, Page};
use crate::ui::{about, map, panels, plots};

// ---------------------------------------------------------------------------
// Session: either a loaded dashboard or a halted start-up
// ---------------------------------------------------------------------------

pub enum Session {
    Ready(Box<AppState>),
    /// The dataset could not be loaded; only the message is rendered.
    Halted { message: String },
}

impl Session {
    /// Load the dataset named by `config`, or halt with a user-facing error.
    pub fn start(config: &DashboardConfig) -> Self {
        match load_state(config) {
            Ok(state) => Session::Ready(Box::new(state)),
            Err(e) => {
                log::error!("Failed to start dashboard: {e:#}");
                Session::Halted {
                    message: format!("{e:#}"),
                }
            }
        }
    }
}

fn load_state(config: &DashboardConfig) -> Result<AppState> {
    let continents = ContinentTable::builtin().context("loading built-in continent table")?;
    log::debug!("Continent table covers {} countries", continents.len());

    let dataset = loader::load_file(&config.data_path, &continents)?;
    log::info!(
        "Loaded {} classified rows ({} dropped) from {}",
        dataset.len(),
        dataset.dropped_rows,
        config.data_path.display()
    );
    Ok(AppState::new(dataset, continents, config.data_path.clone()))
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HappinessApp {
    pub session: Session,
}

impl HappinessApp {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl eframe::App for HappinessApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = match &mut self.session {
            Session::Ready(state) => state,
            Session::Halted { message } => {
                egui::CentralPanel::default().show(ctx, |ui: &mut Ui| {
                    ui.heading("World Happiness Report Visualisation");
                    ui.add_space(8.0);
                    ui.label(RichText::new(message.as_str()).color(Color32::RED));
                });
                return;
            }
        };

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, state);
        });

        // ---- Left side panel: navigation ----
        egui::SidePanel::left("navigation")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, state);
            });

        // ---- Central panel: selected page ----
        egui::CentralPanel::default().show(ctx, |ui| match state.page {
            Page::WorldMap => map::world_happiness_page(ui, state),
            Page::FactorMap => map::factor_page(ui, state),
            Page::MorePlots => {
                egui::ScrollArea::vertical().show(ui, |ui: &mut Ui| {
                    state.carousel = plots::more_plots_page(ui, &state.dataset, state.carousel);
                });
            }
            Page::About => {
                egui::ScrollArea::both().show(ui, |ui: &mut Ui| {
                    about::about_page(ui, &state.dataset);
                });
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const HEADER: &str = "Country,Year,Happiness Rank,Happiness Score,\
                          GDP per capita,Life expectancy,Freedom,Trust,Generosity";

    #[test]
    fn test_missing_dataset_halts_session() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = DashboardConfig {
            data_path: dir.path().join("world_happiness_combined.csv"),
            verbose: false,
        };
        match Session::start(&config) {
            Session::Halted { message } => {
                assert!(message.contains("csv file not found"));
                assert!(message.contains("world_happiness_combined.csv"));
            }
            Session::Ready(_) => panic!("session should halt without a dataset"),
        }
    }

    #[test]
    fn test_missing_column_halts_session() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("world_happiness_combined.csv");
        std::fs::write(
            &path,
            "Country,Year,Happiness Rank,Happiness Score,GDP per capita,Freedom,Generosity\n\
             Switzerland,2015,1,7.587,1.39651,0.66557,0.29678\n",
        )
        .unwrap();
        let config = DashboardConfig {
            data_path: path,
            verbose: false,
        };
        match Session::start(&config) {
            Session::Halted { message } => {
                assert!(message.contains("missing required column"));
                assert!(message.contains("Life expectancy, Trust"));
            }
            Session::Ready(_) => panic!("session should halt on a missing column"),
        }
    }

    #[test]
    fn test_present_dataset_starts_session() {
        let dir = tempfile::TempDir::new().unwrap();
        let path: PathBuf = dir.path().join("happy.csv");
        std::fs::write(
            &path,
            format!(
                "{HEADER}\n\
                 Switzerland,2015,1,7.587,1.39651,0.94143,0.66557,0.41978,0.29678\n\
                 Atlantis,2015,2,7.5,1.0,1.0,1.0,1.0,1.0\n"
            ),
        )
        .unwrap();
        let config = DashboardConfig {
            data_path: path,
            verbose: false,
        };
        match Session::start(&config) {
            Session::Ready(state) => {
                assert_eq!(state.dataset.len(), 1);
                assert_eq!(state.dataset.dropped_rows, 1);
                assert_eq!(state.world_year, 2015);
            }
            Session::Halted { message } => panic!("unexpected halt: {message}"),
        }
    }
}
