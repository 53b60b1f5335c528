use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use super::model::{Continent, HappinessDataset, Metric};

/// First year of the improvement comparison.
pub const BASELINE_YEAR: i32 = 2015;
/// Last year of the improvement comparison.
pub const LATEST_YEAR: i32 = 2019;
/// Number of countries shown in the improvement ranking.
pub const TOP_IMPROVED: usize = 10;

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

/// Pairwise Pearson correlations between the six numeric metrics,
/// pooled over every year.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub metrics: Vec<Metric>,
    /// Row-major, `values[i][j]` correlates `metrics[i]` with `metrics[j]`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }
}

pub fn correlation_matrix(dataset: &HappinessDataset) -> CorrelationMatrix {
    let metrics = Metric::ALL.to_vec();
    let columns: Vec<Vec<f64>> = metrics
        .iter()
        .map(|m| dataset.records.iter().map(|r| m.value(r)).collect())
        .collect();

    let n = metrics.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in i..n {
            let mut r = pearson(&columns[i], &columns[j]);
            if i == j && !r.is_nan() {
                r = 1.0;
            }
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix { metrics, values }
}

/// Pearson coefficient over the positions where neither value is NaN.
///
/// Returns NaN when fewer than two pairs remain or either side has zero
/// variance.
fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .map(|(&a, &b)| (a, b))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let x_mean = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let y_mean = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut x_var = 0.0;
    let mut y_var = 0.0;
    for &(a, b) in &pairs {
        let dx = a - x_mean;
        let dy = b - y_mean;
        cov += dx * dy;
        x_var += dx * dx;
        y_var += dy * dy;
    }

    if x_var == 0.0 || y_var == 0.0 {
        return f64::NAN;
    }
    (cov / (x_var * y_var).sqrt()).clamp(-1.0, 1.0)
}

// ---------------------------------------------------------------------------
// Average happiness per continent and year
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ContinentYearMean {
    pub continent: Continent,
    pub year: i32,
    pub mean_score: f64,
    /// Rows that contributed to the mean.
    pub count: usize,
}

/// Mean Happiness Score for every (continent, year) pair present in the
/// data, ordered by continent and then by year ascending.
pub fn continent_year_means(dataset: &HappinessDataset) -> Vec<ContinentYearMean> {
    let mut groups: BTreeMap<(Continent, i32), (f64, usize)> = BTreeMap::new();
    for r in &dataset.records {
        let entry = groups.entry((r.continent, r.year)).or_insert((0.0, 0));
        if !r.happiness_score.is_nan() {
            entry.0 += r.happiness_score;
            entry.1 += 1;
        }
    }

    groups
        .into_iter()
        .map(|((continent, year), (sum, count))| ContinentYearMean {
            continent,
            year,
            mean_score: if count == 0 { f64::NAN } else { sum / count as f64 },
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Most improved countries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Improvement {
    pub country: String,
    pub score_from: f64,
    pub score_to: f64,
    /// `score_to - score_from`.
    pub change: f64,
}

/// Countries ranked by how much their Happiness Score grew between `from`
/// and `to`, keeping the first `limit`.
///
/// Only countries present in both years take part. Ties keep the order of
/// the `from` year rows; NaN changes sort last.
pub fn most_improved(
    dataset: &HappinessDataset,
    from: i32,
    to: i32,
    limit: usize,
) -> Vec<Improvement> {
    let mut later: HashMap<&str, Vec<f64>> = HashMap::new();
    for r in dataset.records.iter().filter(|r| r.year == to) {
        later.entry(r.country.as_str()).or_default().push(r.happiness_score);
    }

    let mut joined: Vec<Improvement> = Vec::new();
    for r in dataset.records.iter().filter(|r| r.year == from) {
        let Some(scores) = later.get(r.country.as_str()) else {
            continue;
        };
        for &score_to in scores {
            joined.push(Improvement {
                country: r.country.clone(),
                score_from: r.happiness_score,
                score_to,
                change: score_to - r.happiness_score,
            });
        }
    }

    // `sort_by` is stable, which keeps tied countries in join order.
    joined.sort_by(|a, b| descending_nan_last(a.change, b.change));
    joined.truncate(limit);
    joined
}

fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
