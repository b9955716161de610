/// Data layer: core types, loading, filtering and per-view summaries.
///
/// Architecture:
/// ```text
///    data.json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  validate JSON → Dataset (cached per source)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  categories + date range → FilteredView (row indices)
///   └──────────┘
///        │
///        ├──────────────┬───────────────┐
///        ▼              ▼               ▼
///   ┌─────────┐   ┌───────────┐   ┌─────────────┐
///   │  trend  │   │ aggregate │   │ correlation │
///   └─────────┘   └───────────┘   └─────────────┘
/// ```

pub mod aggregate;
pub mod correlation;
pub mod dates;
pub mod filter;
pub mod loader;
pub mod model;
pub mod trend;
