use std::collections::BTreeMap;

use eframe::egui::{self, Align2, FontId, Sense, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::color::{continent_color, contrasting_text, ColorScale};
use crate::data::analysis::{
    continent_year_means, correlation_matrix, most_improved, ContinentYearMean, CorrelationMatrix,
    Improvement, BASELINE_YEAR, LATEST_YEAR, TOP_IMPROVED,
};
use crate::data::model::{Continent, HappinessDataset};
use crate::state::{MorePlot, PlotCarousel};

const HEATMAP_CELL: egui::Vec2 = egui::Vec2::new(96.0, 42.0);
const HEATMAP_LABEL_WIDTH: f32 = 120.0;
const HEATMAP_HEADER_HEIGHT: f32 = 24.0;

// ---------------------------------------------------------------------------
// More Plots page
// ---------------------------------------------------------------------------

/// Render the plot carousel and return the carousel after any button press.
pub fn more_plots_page(
    ui: &mut Ui,
    dataset: &HappinessDataset,
    carousel: PlotCarousel,
) -> PlotCarousel {
    ui.heading("More Plots");

    let mut carousel = carousel;
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("⏴ Previous").clicked() {
            carousel = carousel.previous();
        }
        ui.label(format!("{} / {}", carousel.index() + 1, MorePlot::ALL.len()));
        if ui.button("Next ⏵").clicked() {
            carousel = carousel.next();
        }
    });

    let current = carousel.current();
    ui.heading(current.title());
    match current {
        MorePlot::Correlation => {
            ui.label("Correlation of Happiness Score with Other Factors");
            correlation_heatmap(ui, &correlation_matrix(dataset));
        }
        MorePlot::ContinentTrend => {
            ui.label("Average Happiness Score per Continent Over Time");
            continent_trend(ui, &continent_year_means(dataset));
        }
        MorePlot::MostImproved => {
            ui.label(format!(
                "Top {TOP_IMPROVED} Most Improved Countries in Happiness Score \
                 ({BASELINE_YEAR}–{LATEST_YEAR})"
            ));
            let top = most_improved(dataset, BASELINE_YEAR, LATEST_YEAR, TOP_IMPROVED);
            improvement_chart(ui, &top);
        }
    }

    carousel
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Annotated heatmap; NaN cells keep the missing-data colour and read "NaN".
fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let scale = ColorScale::coolwarm();
    let n = matrix.metrics.len();
    let size = egui::vec2(
        HEATMAP_LABEL_WIDTH + n as f32 * HEATMAP_CELL.x,
        HEATMAP_HEADER_HEIGHT + n as f32 * HEATMAP_CELL.y,
    );
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter();
    let label_font = FontId::proportional(12.0);
    let text_color = ui.visuals().text_color();

    for (j, metric) in matrix.metrics.iter().enumerate() {
        let x = rect.left() + HEATMAP_LABEL_WIDTH + (j as f32 + 0.5) * HEATMAP_CELL.x;
        painter.text(
            egui::pos2(x, rect.top() + HEATMAP_HEADER_HEIGHT / 2.0),
            Align2::CENTER_CENTER,
            metric.label(),
            label_font.clone(),
            text_color,
        );
    }

    for (i, metric) in matrix.metrics.iter().enumerate() {
        let top = rect.top() + HEATMAP_HEADER_HEIGHT + i as f32 * HEATMAP_CELL.y;
        painter.text(
            egui::pos2(rect.left() + HEATMAP_LABEL_WIDTH - 6.0, top + HEATMAP_CELL.y / 2.0),
            Align2::RIGHT_CENTER,
            metric.label(),
            label_font.clone(),
            text_color,
        );

        for j in 0..n {
            let r = matrix.get(i, j);
            let cell = egui::Rect::from_min_size(
                egui::pos2(rect.left() + HEATMAP_LABEL_WIDTH + j as f32 * HEATMAP_CELL.x, top),
                HEATMAP_CELL,
            )
            .shrink(1.0);
            let fill = scale.at((r + 1.0) / 2.0);
            painter.rect_filled(cell, 2.0, fill);
            painter.text(
                cell.center(),
                Align2::CENTER_CENTER,
                annotation(r),
                FontId::monospace(13.0),
                contrasting_text(fill),
            );
        }
    }
}

fn annotation(r: f64) -> String {
    if r.is_nan() {
        "NaN".to_string()
    } else {
        format!("{r:.2}")
    }
}

// ---------------------------------------------------------------------------
// Continent time series
// ---------------------------------------------------------------------------

/// `[year, mean]` points per continent, year ascending. NaN means are left
/// out of the line.
fn series_by_continent(means: &[ContinentYearMean]) -> BTreeMap<Continent, Vec<[f64; 2]>> {
    let mut series: BTreeMap<Continent, Vec<[f64; 2]>> = BTreeMap::new();
    for m in means.iter().filter(|m| !m.mean_score.is_nan()) {
        series
            .entry(m.continent)
            .or_default()
            .push([m.year as f64, m.mean_score]);
    }
    for points in series.values_mut() {
        points.sort_by(|a, b| a[0].total_cmp(&b[0]));
    }
    series
}

fn continent_trend(ui: &mut Ui, means: &[ContinentYearMean]) {
    let series = series_by_continent(means);

    Plot::new("continent_trend")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Average Happiness Score")
        .height(480.0)
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(true)
        .show(ui, |plot_ui| {
            for (continent, points) in series {
                let color = continent_color(continent);
                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .name(continent.label())
                        .color(color)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(continent.label())
                        .color(color)
                        .radius(3.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Most improved bar chart
// ---------------------------------------------------------------------------

fn improvement_chart(ui: &mut Ui, top: &[Improvement]) {
    if top.is_empty() {
        ui.label(format!("No country has scores for both {BASELINE_YEAR} and {LATEST_YEAR}."));
        return;
    }

    let scale = ColorScale::blues();
    let finite = top.iter().map(|i| i.change).filter(|c| !c.is_nan());
    let lo = finite.clone().fold(f64::INFINITY, f64::min);
    let hi = finite.fold(f64::NEG_INFINITY, f64::max);

    let bars: Vec<Bar> = top
        .iter()
        .enumerate()
        .map(|(i, imp)| {
            let fill = if lo.is_finite() {
                scale.for_value(imp.change, (lo, hi))
            } else {
                scale.missing_color()
            };
            Bar::new(i as f64, imp.change)
                .name(&imp.country)
                .fill(fill)
                .width(0.7)
        })
        .collect();

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (i, imp) in top.iter().enumerate() {
            ui.small(format!("{i}: {}", imp.country));
        }
    });

    Plot::new("most_improved")
        .x_axis_label("Country")
        .y_axis_label("Change in Happiness Score")
        .height(360.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Score Change"));
        });

    egui::Grid::new("most_improved_table")
        .striped(true)
        .num_columns(4)
        .show(ui, |ui: &mut Ui| {
            ui.strong("Country");
            ui.strong(format!("{BASELINE_YEAR}"));
            ui.strong(format!("{LATEST_YEAR}"));
            ui.strong("Change");
            ui.end_row();
            for imp in top {
                ui.label(&imp.country);
                ui.label(format!("{:.3}", imp.score_from));
                ui.label(format!("{:.3}", imp.score_to));
                ui.label(format!("{:+.3}", imp.change));
                ui.end_row();
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mean(continent: Continent, year: i32, mean_score: f64, count: usize) -> ContinentYearMean {
        ContinentYearMean {
            continent,
            year,
            mean_score,
            count,
        }
    }

    #[test]
    fn test_series_by_continent_orders_years_and_skips_nan() {
        let means = vec![
            mean(Continent::Asia, 2017, 5.2, 3),
            mean(Continent::Asia, 2015, 5.0, 3),
            mean(Continent::Oceania, 2015, f64::NAN, 0),
            mean(Continent::Oceania, 2016, 7.3, 2),
        ];
        let series = series_by_continent(&means);
        assert_eq!(series[&Continent::Asia], vec![[2015.0, 5.0], [2017.0, 5.2]]);
        assert_eq!(series[&Continent::Oceania], vec![[2016.0, 7.3]]);
        assert!(!series.contains_key(&Continent::Europe));
    }

    #[test]
    fn test_annotation() {
        assert_eq!(annotation(1.0), "1.00");
        assert_eq!(annotation(-0.456), "-0.46");
        assert_eq!(annotation(f64::NAN), "NaN");
    }
}
