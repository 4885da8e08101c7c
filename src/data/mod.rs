/// Data layer: core types, loading, caching and filtering.
///
/// Architecture:
/// ```text
///  .parquet / .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  four arrays → Dataset (Vec<Reading>)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  lazy Arc<Dataset>, manual invalidation
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  inclusive date interval → FilteredView
///   └──────────┘
/// ```

pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
