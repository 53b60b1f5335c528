use eframe::egui::{self, Align2, FontId, RichText, ScrollArea, Sense, Ui, Vec2};

use crate::color::{continent_color, contrasting_text, ColorScale};
use crate::data::filter::{year_slice, YearSlice};
use crate::data::model::{Continent, Metric, Record};
use crate::state::AppState;

const TILE_SIZE: Vec2 = Vec2::new(112.0, 34.0);
const TILE_LABEL_CHARS: usize = 15;
const LEGEND_SIZE: Vec2 = Vec2::new(320.0, 14.0);
const LEGEND_STEPS: usize = 64;

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// "Map of World Happiness": happiness score per country for one year.
pub fn world_happiness_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading("World Happiness Report Visualisation");
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label("This app visualizes data from the");
        ui.hyperlink_to("World Happiness Report", "https://worldhappiness.report/");
        ui.label(
            "which collects happiness scores and six factors that might explain differences \
             in life satisfaction.",
        );
    });
    ui.add_space(6.0);

    year_slider(ui, &mut state.world_year, state.dataset.year_bounds());

    let slice = year_slice(&state.dataset, state.world_year, Metric::HappinessScore);
    ui.heading(format!("World Happiness Map for {}", slice.year));
    choropleth(ui, &slice, &Metric::ALL);
}

/// "Maps of Other Factors": one explanatory factor per country for one year.
pub fn factor_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Other Factors Compared to Happiness Scores");
    ui.label(
        "Select one of the other factors collected in the study to view how it compares to \
         happiness rates:",
    );
    ui.add_space(6.0);

    egui::ComboBox::from_label("Select a factor")
        .selected_text(state.factor.label())
        .show_ui(ui, |ui: &mut Ui| {
            for factor in Metric::FACTORS {
                ui.selectable_value(&mut state.factor, factor, factor.label());
            }
        });

    year_slider(ui, &mut state.factor_year, state.dataset.year_bounds());

    let slice = year_slice(&state.dataset, state.factor_year, state.factor);
    ui.heading(format!("Map of {} in {}", slice.metric, slice.year));
    choropleth(ui, &slice, &[slice.metric]);
}

fn year_slider(ui: &mut Ui, year: &mut i32, bounds: Option<(i32, i32)>) {
    let Some((min, max)) = bounds else {
        ui.label("The dataset has no years to select.");
        return;
    };
    ui.add(
        egui::Slider::new(year, min..=max)
            .text("Select Year")
            .step_by(1.0),
    );
}

// ---------------------------------------------------------------------------
// Choropleth
// ---------------------------------------------------------------------------

/// Countries drawn as colour-coded tiles grouped by continent.
///
/// egui has no geographic projection, so tiles stand in for map regions.
/// `hover` lists the metrics shown in each tile's tooltip besides the rank.
fn choropleth(ui: &mut Ui, slice: &YearSlice<'_>, hover: &[Metric]) {
    let scale = ColorScale::map();

    if slice.is_empty() {
        ui.label(format!("No countries reported for {}.", slice.year));
        return;
    }
    let Some(range) = slice.range else {
        ui.label(format!("No {} values for {}.", slice.metric, slice.year));
        return;
    };
    color_legend(ui, &scale, slice.metric, range);
    ui.add_space(6.0);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for continent in Continent::ALL {
                let mut rows: Vec<&Record> = slice
                    .rows
                    .iter()
                    .copied()
                    .filter(|r| r.continent == continent)
                    .collect();
                if rows.is_empty() {
                    continue;
                }
                rows.sort_by(|a, b| a.country.cmp(&b.country));

                ui.label(
                    RichText::new(format!("{continent}  ({})", rows.len()))
                        .strong()
                        .color(continent_color(continent)),
                );
                ui.horizontal_wrapped(|ui: &mut Ui| {
                    for r in rows {
                        country_tile(ui, slice, &scale, r, hover);
                    }
                });
                ui.add_space(8.0);
            }
        });
}

fn country_tile(
    ui: &mut Ui,
    slice: &YearSlice<'_>,
    scale: &ColorScale,
    record: &Record,
    hover: &[Metric],
) {
    let fill = slice
        .normalize(slice.metric.value(record))
        .map(|t| scale.at(t))
        .unwrap_or_else(|| scale.missing_color());

    let (rect, response) = ui.allocate_exact_size(TILE_SIZE, Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, 3.0, fill);
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        short_label(&record.country),
        FontId::proportional(11.0),
        contrasting_text(fill),
    );

    response.on_hover_ui(|ui: &mut Ui| {
        ui.strong(&record.country);
        ui.label(format!("Happiness Rank: {}", record.happiness_rank));
        for metric in hover {
            ui.label(format!("{metric}: {:.3}", metric.value(record)));
        }
    });
}

fn short_label(country: &str) -> String {
    if country.chars().count() <= TILE_LABEL_CHARS {
        return country.to_string();
    }
    let mut s: String = country.chars().take(TILE_LABEL_CHARS - 1).collect();
    s.push('…');
    s
}

/// Horizontal gradient bar with the range endpoints underneath.
fn color_legend(ui: &mut Ui, scale: &ColorScale, metric: Metric, (lo, hi): (f64, f64)) {
    ui.label(metric.label());
    let (rect, _) = ui.allocate_exact_size(LEGEND_SIZE, Sense::hover());
    let painter = ui.painter();
    let step = rect.width() / LEGEND_STEPS as f32;
    for i in 0..LEGEND_STEPS {
        let t = i as f64 / (LEGEND_STEPS - 1) as f64;
        let x0 = rect.left() + i as f32 * step;
        let cell = egui::Rect::from_min_size(
            egui::pos2(x0, rect.top()),
            egui::vec2(step + 0.5, rect.height()),
        );
        painter.rect_filled(cell, 0.0, scale.at(t));
    }
    ui.horizontal(|ui: &mut Ui| {
        ui.small(format!("{lo:.3}"));
        ui.add_space(LEGEND_SIZE.x - 90.0);
        ui.small(format!("{hi:.3}"));
    });
}
