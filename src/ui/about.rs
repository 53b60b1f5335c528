use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::{HappinessDataset, Metric};

/// Rows shown in the dataset preview.
const PREVIEW_ROWS: usize = 10;

pub fn about_page(ui: &mut Ui, dataset: &HappinessDataset) {
    ui.heading("About the World Happiness Dataset");
    ui.label(
        "The World Happiness Report is a landmark survey of the state of global happiness and \
         is based on happiness scores taken from individual self-reports, with other factors \
         collected including GDP per capita, social support (Family), healthy life expectancy, \
         freedom to make life choices, generosity, and perceptions of corruption (Trust).",
    );
    ui.add_space(4.0);
    ui.label("Data from 2015–2019 has been used for this visualization.");
    ui.add_space(8.0);

    if dataset.is_empty() {
        ui.label("The dataset has no rows with a known continent.");
        return;
    }
    ui.label("Here is a preview of the dataset:");
    preview_table(ui, dataset);
}

fn preview_table(ui: &mut Ui, dataset: &HappinessDataset) {
    let rows = &dataset.records[..dataset.len().min(PREVIEW_ROWS)];

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(140.0))
        .columns(Column::auto(), 2 + Metric::ALL.len() + 1)
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Country");
            });
            header.col(|ui| {
                ui.strong("Year");
            });
            header.col(|ui| {
                ui.strong("Happiness Rank");
            });
            for metric in Metric::ALL {
                header.col(|ui| {
                    ui.strong(metric.label());
                });
            }
            header.col(|ui| {
                ui.strong("Continent");
            });
        })
        .body(|mut body| {
            for r in rows {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&r.country);
                    });
                    row.col(|ui| {
                        ui.label(r.year.to_string());
                    });
                    row.col(|ui| {
                        ui.label(r.happiness_rank.to_string());
                    });
                    for metric in Metric::ALL {
                        row.col(|ui| {
                            ui.label(format!("{:.4}", metric.value(r)));
                        });
                    }
                    row.col(|ui| {
                        ui.label(r.continent.label());
                    });
                });
            }
        });
}
