use std::fmt;

use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Continent – derived categorical attribute
// ---------------------------------------------------------------------------

/// The six continent labels a country can be classified into.
///
/// A country missing from the classification table has no continent and is
/// dropped before any view sees it, so there is no `Unknown` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum Continent {
    Europe,
    Asia,
    Africa,
    #[serde(rename = "North America")]
    NorthAmerica,
    #[serde(rename = "South America")]
    SouthAmerica,
    Oceania,
}

impl Continent {
    pub const ALL: [Continent; 6] = [
        Continent::Europe,
        Continent::Asia,
        Continent::Africa,
        Continent::NorthAmerica,
        Continent::SouthAmerica,
        Continent::Oceania,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Continent::Europe => "Europe",
            Continent::Asia => "Asia",
            Continent::Africa => "Africa",
            Continent::NorthAmerica => "North America",
            Continent::SouthAmerica => "South America",
            Continent::Oceania => "Oceania",
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Metric – the numeric columns a chart can target
// ---------------------------------------------------------------------------

/// A numeric column of the happiness table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    HappinessScore,
    GdpPerCapita,
    LifeExpectancy,
    Freedom,
    Trust,
    Generosity,
}

impl Metric {
    /// Happiness Score followed by the five explanatory factors, in the
    /// column order used by the correlation heatmap.
    pub const ALL: [Metric; 6] = [
        Metric::HappinessScore,
        Metric::GdpPerCapita,
        Metric::LifeExpectancy,
        Metric::Freedom,
        Metric::Trust,
        Metric::Generosity,
    ];

    /// The factors offered in the "Maps of Other Factors" dropdown.
    pub const FACTORS: [Metric; 5] = [
        Metric::GdpPerCapita,
        Metric::LifeExpectancy,
        Metric::Freedom,
        Metric::Trust,
        Metric::Generosity,
    ];

    /// Column header in the source CSV.
    pub fn label(self) -> &'static str {
        match self {
            Metric::HappinessScore => "Happiness Score",
            Metric::GdpPerCapita => "GDP per capita",
            Metric::LifeExpectancy => "Life expectancy",
            Metric::Freedom => "Freedom",
            Metric::Trust => "Trust",
            Metric::Generosity => "Generosity",
        }
    }

    pub fn value(self, record: &Record) -> f64 {
        match self {
            Metric::HappinessScore => record.happiness_score,
            Metric::GdpPerCapita => record.gdp_per_capita,
            Metric::LifeExpectancy => record.life_expectancy,
            Metric::Freedom => record.freedom,
            Metric::Trust => record.trust,
            Metric::Generosity => record.generosity,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// CsvRow / Record – one row of the source table
// ---------------------------------------------------------------------------

/// A row exactly as it appears in the CSV, before classification. Blank
/// metric cells become NaN.
#[derive(Debug, Clone, Deserialize)]
pub struct CsvRow {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Happiness Rank")]
    pub happiness_rank: u32,
    #[serde(rename = "Happiness Score", deserialize_with = "nan_if_empty")]
    pub happiness_score: f64,
    #[serde(rename = "GDP per capita", deserialize_with = "nan_if_empty")]
    pub gdp_per_capita: f64,
    #[serde(rename = "Life expectancy", deserialize_with = "nan_if_empty")]
    pub life_expectancy: f64,
    #[serde(rename = "Freedom", deserialize_with = "nan_if_empty")]
    pub freedom: f64,
    #[serde(rename = "Trust", deserialize_with = "nan_if_empty")]
    pub trust: f64,
    #[serde(rename = "Generosity", deserialize_with = "nan_if_empty")]
    pub generosity: f64,
}

/// A blank numeric cell reads as NaN; any other non-numeric text is still an
/// error.
fn nan_if_empty<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// A classified row. Only rows with a known continent exist as `Record`s.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub country: String,
    pub year: i32,
    pub happiness_rank: u32,
    pub happiness_score: f64,
    pub gdp_per_capita: f64,
    pub life_expectancy: f64,
    pub freedom: f64,
    pub trust: f64,
    pub generosity: f64,
    pub continent: Continent,
}

impl Record {
    pub fn from_row(row: CsvRow, continent: Continent) -> Self {
        Record {
            country: row.country,
            year: row.year,
            happiness_rank: row.happiness_rank,
            happiness_score: row.happiness_score,
            gdp_per_capita: row.gdp_per_capita,
            life_expectancy: row.life_expectancy,
            freedom: row.freedom,
            trust: row.trust,
            generosity: row.generosity,
            continent,
        }
    }
}

// ---------------------------------------------------------------------------
// HappinessDataset – the complete classified table
// ---------------------------------------------------------------------------

/// The classified table, immutable for the lifetime of a session.
#[derive(Debug, Clone, Default)]
pub struct HappinessDataset {
    /// Rows in file order, Unknown-continent rows already removed.
    pub records: Vec<Record>,
    /// Number of rows dropped because their country has no continent.
    pub dropped_rows: usize,
}

impl HappinessDataset {
    pub fn new(records: Vec<Record>, dropped_rows: usize) -> Self {
        HappinessDataset {
            records,
            dropped_rows,
        }
    }

    /// Number of classified rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Smallest and largest year observed, used to bound the year slider.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Build a record where every factor carries the same value as `score`
    /// unless overridden by the caller.
    pub fn record(country: &str, year: i32, continent: Continent, score: f64) -> Record {
        Record {
            country: country.to_string(),
            year,
            happiness_rank: 1,
            happiness_score: score,
            gdp_per_capita: score,
            life_expectancy: score,
            freedom: score,
            trust: score,
            generosity: score,
            continent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::record;
    use super::*;

    #[test]
    fn test_year_bounds() {
        let ds = HappinessDataset::new(
            vec![
                record("Norway", 2017, Continent::Europe, 7.5),
                record("Chile", 2015, Continent::SouthAmerica, 6.6),
                record("Japan", 2019, Continent::Asia, 5.9),
            ],
            0,
        );
        assert_eq!(ds.year_bounds(), Some((2015, 2019)));
        assert_eq!(HappinessDataset::default().year_bounds(), None);
    }

    #[test]
    fn test_metric_value_reads_matching_field() {
        let mut r = record("Kenya", 2018, Continent::Africa, 4.4);
        r.trust = 0.1;
        r.generosity = 0.3;
        assert_eq!(Metric::HappinessScore.value(&r), 4.4);
        assert_eq!(Metric::Trust.value(&r), 0.1);
        assert_eq!(Metric::Generosity.value(&r), 0.3);
        assert!(!Metric::FACTORS.contains(&Metric::HappinessScore));
    }
}
