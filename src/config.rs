use std::path::PathBuf;

use clap::Parser;

/// Dataset read at start-up unless `--data` says otherwise.
pub const DEFAULT_DATA_PATH: &str = "data/world_happiness_combined.csv";

/// Interactive World Happiness Report dashboard.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) Combined happiness CSV with one row per country and year.
    #[arg(short, long, default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Log at debug level when RUST_LOG is not set.
    #[arg(long)]
    pub verbose: bool,
}

/// Runtime settings resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub verbose: bool,
}

impl From<Args> for DashboardConfig {
    fn from(args: Args) -> Self {
        DashboardConfig {
            data_path: args.data,
            verbose: args.verbose,
        }
    }
}

impl DashboardConfig {
    pub fn from_args() -> Self {
        Args::parse().into()
    }

    /// Default filter for `env_logger` when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg: DashboardConfig = Args::parse_from(["happiness-dashboard"]).into();
        assert_eq!(cfg.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert!(!cfg.verbose);
        assert_eq!(cfg.default_log_filter(), "info");
    }

    #[test]
    fn test_overrides() {
        let cfg: DashboardConfig =
            Args::parse_from(["happiness-dashboard", "--data", "other.csv", "--verbose"]).into();
        assert_eq!(cfg.data_path, PathBuf::from("other.csv"));
        assert_eq!(cfg.default_log_filter(), "debug");
    }
}
