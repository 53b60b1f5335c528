use std::path::PathBuf;

use crate::data::continent::ContinentTable;
use crate::data::model::{HappinessDataset, Metric};

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// The four pages of the side menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    WorldMap,
    FactorMap,
    MorePlots,
    About,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::WorldMap, Page::FactorMap, Page::MorePlots, Page::About];

    pub fn label(self) -> &'static str {
        match self {
            Page::WorldMap => "Map of World Happiness",
            Page::FactorMap => "Maps of Other Factors",
            Page::MorePlots => "More Plots",
            Page::About => "About the Dataset",
        }
    }
}

// ---------------------------------------------------------------------------
// More Plots carousel
// ---------------------------------------------------------------------------

/// The plots cycled through on the "More Plots" page, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorePlot {
    Correlation,
    ContinentTrend,
    MostImproved,
}

impl MorePlot {
    pub const ALL: [MorePlot; 3] = [
        MorePlot::Correlation,
        MorePlot::ContinentTrend,
        MorePlot::MostImproved,
    ];

    pub fn title(self) -> &'static str {
        match self {
            MorePlot::Correlation => "Correlation Plot",
            MorePlot::ContinentTrend => "Average Happiness per Continent",
            MorePlot::MostImproved => "Top 10 Most Improved Countries",
        }
    }
}

/// Cyclic index over [`MorePlot::ALL`]. Lives for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlotCarousel {
    index: usize,
}

impl PlotCarousel {
    pub fn index(self) -> usize {
        self.index
    }

    pub fn current(self) -> MorePlot {
        MorePlot::ALL[self.index]
    }

    #[must_use]
    pub fn next(self) -> Self {
        PlotCarousel {
            index: (self.index + 1) % MorePlot::ALL.len(),
        }
    }

    #[must_use]
    pub fn previous(self) -> Self {
        let len = MorePlot::ALL.len();
        PlotCarousel {
            index: (self.index + len - 1) % len,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state of a loaded dashboard, independent of rendering.
pub struct AppState {
    /// Classified table for this session.
    pub dataset: HappinessDataset,

    /// Kept to classify datasets opened later from the File menu.
    pub continents: ContinentTable,

    /// Where `dataset` was read from.
    pub source: PathBuf,

    pub page: Page,

    /// Year shown on the world happiness map.
    pub world_year: i32,

    /// Year and factor shown on the factor map.
    pub factor_year: i32,
    pub factor: Metric,

    pub carousel: PlotCarousel,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: HappinessDataset, continents: ContinentTable, source: PathBuf) -> Self {
        let latest = dataset.year_bounds().map(|(_, max)| max).unwrap_or_default();
        Self {
            dataset,
            continents,
            source,
            page: Page::default(),
            world_year: latest,
            factor_year: latest,
            factor: Metric::FACTORS[0],
            carousel: PlotCarousel::default(),
            status_message: None,
        }
    }

    /// Swap in a newly loaded dataset. Year selections are clamped to the
    /// new bounds; the page and plot carousel are kept.
    pub fn set_dataset(&mut self, dataset: HappinessDataset, source: PathBuf) {
        if let Some((min, max)) = dataset.year_bounds() {
            self.world_year = self.world_year.clamp(min, max);
            self.factor_year = self.factor_year.clamp(min, max);
        }
        self.dataset = dataset;
        self.source = source;
        self.status_message = None;
    }

    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        self.dataset.year_bounds()
    }
}
