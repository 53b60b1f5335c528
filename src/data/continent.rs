use std::collections::{BTreeSet, HashMap};

use log::{debug, info, warn};
use serde::Deserialize;

use super::error::DatasetError;
use super::model::{Continent, CsvRow, HappinessDataset, Record};

/// Ordered continent lists shipped with the binary.
const BUILTIN_TABLE: &str = include_str!("../../assets/continents.json");

#[derive(Debug, Deserialize)]
struct ContinentEntry {
    continent: Continent,
    countries: Vec<String>,
}

// ---------------------------------------------------------------------------
// ContinentTable – country name → continent
// ---------------------------------------------------------------------------

/// A strict `country → continent` mapping built once from ordered lists.
///
/// When a country is listed more than once the first-listed continent wins,
/// which matches a first-match scan over the lists in order.
#[derive(Debug, Clone, Default)]
pub struct ContinentTable {
    lookup: HashMap<String, Continent>,
}

impl ContinentTable {
    /// The table compiled into the binary from `assets/continents.json`.
    pub fn builtin() -> Result<Self, DatasetError> {
        Self::from_json(BUILTIN_TABLE)
    }

    /// Parse a JSON array of `{ "continent": ..., "countries": [...] }`.
    pub fn from_json(text: &str) -> Result<Self, DatasetError> {
        let entries: Vec<ContinentEntry> = serde_json::from_str(text)?;
        Ok(Self::from_lists(
            entries.into_iter().map(|e| (e.continent, e.countries)),
        ))
    }

    pub fn from_lists<I, S>(lists: I) -> Self
    where
        I: IntoIterator<Item = (Continent, Vec<S>)>,
        S: Into<String>,
    {
        let mut lookup: HashMap<String, Continent> = HashMap::new();
        for (continent, countries) in lists {
            for country in countries {
                let country = country.into();
                match lookup.get(&country) {
                    Some(&first) if first == continent => {
                        debug!("'{country}' listed twice under {continent}");
                    }
                    Some(&first) => {
                        warn!(
                            "'{country}' listed under both {first} and {continent}; keeping {first}"
                        );
                    }
                    None => {
                        lookup.insert(country, continent);
                    }
                }
            }
        }
        ContinentTable { lookup }
    }

    pub fn classify(&self, country: &str) -> Option<Continent> {
        self.lookup.get(country).copied()
    }

    /// Number of distinct countries in the table.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    /// Tag every row with its continent and drop the ones without one.
    /// Row order is preserved.
    pub fn classify_rows(&self, rows: Vec<CsvRow>) -> HappinessDataset {
        let total = rows.len();
        let mut unknown: BTreeSet<String> = BTreeSet::new();
        let mut records = Vec::with_capacity(total);

        for row in rows {
            match self.classify(&row.country) {
                Some(continent) => records.push(Record::from_row(row, continent)),
                None => {
                    unknown.insert(row.country);
                }
            }
        }

        let dropped = total - records.len();
        if dropped > 0 {
            info!(
                "Dropped {dropped} of {total} rows from {} countries without a continent",
                unknown.len()
            );
            debug!("Unclassified countries: {unknown:?}");
        }
        HappinessDataset::new(records, dropped)
    }
}
