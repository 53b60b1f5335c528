/// Data layer: core types, loading, classification and chart transforms.
///
/// Architecture:
/// ```text
///  world_happiness_combined.csv        assets/continents.json
///        │                                    │
///        ▼                                    ▼
///   ┌──────────┐                      ┌────────────────┐
///   │  loader   │  parse + validate    │   continent     │  country → continent
///   └──────────┘                      └────────────────┘
///        │                                    │
///        └────────────────┬───────────────────┘
///                         ▼
///                ┌──────────────────┐
///                │ HappinessDataset  │  classified rows, Unknown dropped
///                └──────────────────┘
///                         │
///            ┌────────────┴────────────┐
///            ▼                         ▼
///      ┌──────────┐             ┌────────────┐
///      │  filter   │ year slice  │  analysis   │ correlation, continent
///      └──────────┘             └────────────┘ means, most improved
/// ```

pub mod analysis;
pub mod continent;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
