/// Data layer: core types, loading, filtering and export.
///
/// Architecture:
/// ```text
///  data/boys/2021.csv   data/girls/2021.csv   ...
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  discover + parse sources (in parallel) → NameDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ NameDataset  │  year → gender → name → rank, per-gender universes
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  search / year / plural / sort → Vec<NameItem>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  displayed list → rank,name CSV
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
