//! Writes a deterministic synthetic `world_happiness_combined.csv` so the
//! dashboard can be run without the real report data.
//!
//! Usage: `cargo run --bin generate_sample -- [OUTPUT] [--seed N]`

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};

const DEFAULT_OUTPUT: &str = "data/world_happiness_combined.csv";
const YEARS: std::ops::RangeInclusive<i32> = 2015..=2019;

/// Generate a synthetic World Happiness CSV.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Where to write the CSV
    #[arg(default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Seed for the random generator; the same seed gives the same file
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Countries that appear in the report but have no continent, so the
/// dashboard's drop path gets exercised.
const UNCLASSIFIED: [&str; 2] = ["Somaliland region", "Northern Cyprus"];

#[derive(Deserialize)]
struct ContinentEntry {
    countries: Vec<String>,
}

#[derive(Serialize)]
struct Row<'a> {
    #[serde(rename = "Country")]
    country: &'a str,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Happiness Rank")]
    rank: u32,
    #[serde(rename = "Happiness Score")]
    score: f64,
    #[serde(rename = "GDP per capita")]
    gdp: f64,
    #[serde(rename = "Life expectancy")]
    life_expectancy: f64,
    #[serde(rename = "Freedom")]
    freedom: f64,
    #[serde(rename = "Trust")]
    trust: f64,
    #[serde(rename = "Generosity")]
    generosity: f64,
}

/// Per-country baseline the yearly values drift around.
struct Profile {
    gdp: f64,
    life_expectancy: f64,
    freedom: f64,
    trust: f64,
    generosity: f64,
    residual: f64,
    trend: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn profile(rng: &mut SimpleRng) -> Profile {
    let wealth = rng.next_f64();
    Profile {
        gdp: 0.1 + 1.5 * wealth,
        life_expectancy: 0.2 + 0.8 * wealth + rng.gauss(0.0, 0.05),
        freedom: rng.uniform(0.1, 0.65),
        trust: rng.uniform(0.0, 0.45),
        generosity: rng.uniform(0.0, 0.5),
        residual: rng.gauss(0.0, 0.35),
        trend: rng.gauss(0.0, 0.12),
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

fn main() -> Result<()> {
    let Args { output, seed } = Args::parse();

    let entries: Vec<ContinentEntry> =
        serde_json::from_str(include_str!("../../assets/continents.json"))
            .context("parsing continent table")?;
    let mut countries: BTreeSet<&str> = entries
        .iter()
        .flat_map(|e| e.countries.iter().map(String::as_str))
        .collect();
    countries.extend(UNCLASSIFIED);

    let mut rng = SimpleRng::new(seed);
    let profiles: Vec<(&str, Profile)> = countries
        .into_iter()
        .map(|c| (c, profile(&mut rng)))
        .collect();

    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let mut writer = csv::Writer::from_path(&output)
        .with_context(|| format!("creating {}", output.display()))?;

    let mut written = 0usize;
    for year in YEARS {
        let t = (year - YEARS.start()) as f64;
        let mut rows: Vec<Row> = Vec::new();
        for &(country, ref p) in &profiles {
            // Roughly one country in thirty is missing from any given year.
            if rng.next_f64() < 0.03 {
                continue;
            }
            let gdp = (p.gdp + 0.02 * t + rng.gauss(0.0, 0.02)).max(0.0);
            let life_expectancy = (p.life_expectancy + rng.gauss(0.0, 0.02)).clamp(0.0, 1.1);
            let freedom = (p.freedom + rng.gauss(0.0, 0.03)).clamp(0.0, 0.7);
            let trust = (p.trust + rng.gauss(0.0, 0.02)).clamp(0.0, 0.5);
            let generosity = (p.generosity + rng.gauss(0.0, 0.03)).clamp(0.0, 0.6);
            let score = 2.2
                + 1.1 * gdp
                + 1.0 * life_expectancy
                + 1.4 * freedom
                + 0.9 * trust
                + 0.5 * generosity
                + p.residual
                + p.trend * t
                + rng.gauss(0.0, 0.05);

            rows.push(Row {
                country,
                year,
                rank: 0,
                score: round3(score.clamp(2.5, 8.0)),
                gdp: round3(gdp),
                life_expectancy: round3(life_expectancy),
                freedom: round3(freedom),
                trust: round3(trust),
                generosity: round3(generosity),
            });
        }

        rows.sort_by(|a, b| b.score.total_cmp(&a.score));
        for (i, row) in rows.iter_mut().enumerate() {
            row.rank = i as u32 + 1;
        }
        for row in &rows {
            writer.serialize(row).context("writing CSV row")?;
        }
        written += rows.len();
    }
    writer.flush().context("flushing CSV")?;

    println!(
        "Wrote {written} rows for {} countries to {}",
        profiles.len(),
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_output() {
        let args = Args::parse_from(["generate_sample"]);
        assert_eq!(args.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(args.seed, 42);
    }

    #[test]
    fn test_args_output_and_seed() {
        let args = Args::parse_from(["generate_sample", "/tmp/happy.csv", "--seed", "7"]);
        assert_eq!(args.output, PathBuf::from("/tmp/happy.csv"));
        assert_eq!(args.seed, 7);
    }

    #[test]
    fn test_help_is_not_an_output_path() {
        let err = Args::try_parse_from(["generate_sample", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_rng_is_deterministic() {
        let mut a = SimpleRng::new(7);
        let mut b = SimpleRng::new(7);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
        let x = a.uniform(2.0, 3.0);
        assert!((2.0..3.0).contains(&x));
    }
}
