use super::model::{HappinessDataset, Metric, Record};

// ---------------------------------------------------------------------------
// YearSlice – rows of one year plus the colour range of a target metric
// ---------------------------------------------------------------------------

/// The rows of a single year, ready for a choropleth of `metric`.
#[derive(Debug, Clone)]
pub struct YearSlice<'a> {
    pub year: i32,
    pub metric: Metric,
    pub rows: Vec<&'a Record>,
    /// `(min, max)` of `metric` over `rows`, ignoring NaN.
    /// `None` when no row has a finite value, e.g. for an empty year.
    pub range: Option<(f64, f64)>,
}

impl YearSlice<'_> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `value` inside the range, clamped to `[0, 1]`.
    ///
    /// A degenerate range (min == max) maps everything to the middle.
    pub fn normalize(&self, value: f64) -> Option<f64> {
        let (min, max) = self.range?;
        if value.is_nan() {
            return None;
        }
        let span = max - min;
        if span.abs() < f64::EPSILON {
            return Some(0.5);
        }
        Some(((value - min) / span).clamp(0.0, 1.0))
    }
}

/// Select the rows of `year` and compute the range of `metric` over them.
pub fn year_slice(dataset: &HappinessDataset, year: i32, metric: Metric) -> YearSlice<'_> {
    let rows: Vec<&Record> = dataset.records.iter().filter(|r| r.year == year).collect();
    let range = value_range(rows.iter().map(|r| metric.value(r)));
    YearSlice {
        year,
        metric,
        rows,
        range,
    }
}

fn value_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::record;
    use crate::data::model::Continent;

    fn trust_record(country: &str, year: i32, trust: f64) -> Record {
        let mut r = record(country, year, Continent::Europe, 5.0);
        r.trust = trust;
        r
    }

    #[test]
    fn test_year_slice_selects_exact_year() {
        let ds = HappinessDataset::new(
            vec![
                trust_record("CountryA", 2017, 0.2),
                trust_record("CountryB", 2017, 0.5),
                trust_record("CountryA", 2018, 0.9),
            ],
            0,
        );

        let slice = year_slice(&ds, 2017, Metric::Trust);
        let picked: Vec<(&str, f64)> = slice
            .rows
            .iter()
            .map(|r| (r.country.as_str(), r.trust))
            .collect();
        assert_eq!(picked, vec![("CountryA", 0.2), ("CountryB", 0.5)]);
        assert_eq!(slice.range, Some((0.2, 0.5)));
    }

    #[test]
    fn test_empty_year_has_no_range() {
        let ds = HappinessDataset::new(vec![trust_record("CountryA", 2017, 0.2)], 0);
        let slice = year_slice(&ds, 2030, Metric::Trust);
        assert!(slice.is_empty());
        assert_eq!(slice.range, None);
        assert_eq!(slice.normalize(0.3), None);
    }

    #[test]
    fn test_range_skips_nan() {
        let ds = HappinessDataset::new(
            vec![
                trust_record("CountryA", 2018, f64::NAN),
                trust_record("CountryB", 2018, 0.4),
                trust_record("CountryC", 2018, 0.1),
            ],
            0,
        );
        let slice = year_slice(&ds, 2018, Metric::Trust);
        assert_eq!(slice.rows.len(), 3);
        assert_eq!(slice.range, Some((0.1, 0.4)));
    }

    #[test]
    fn test_normalize_handles_degenerate_range() {
        let ds = HappinessDataset::new(vec![trust_record("CountryA", 2019, 0.3)], 0);
        let slice = year_slice(&ds, 2019, Metric::Trust);
        assert_eq!(slice.range, Some((0.3, 0.3)));
        assert_eq!(slice.normalize(0.3), Some(0.5));
    }
}
