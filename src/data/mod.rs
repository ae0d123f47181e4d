/// Data layer: source resolution, cleaning, filtering, and ad-hoc queries.
///
/// Architecture:
/// ```text
///  SQL store ──┐
///              ▼
///       ┌────────────┐   store preferred,
///       │   source    │   CSV fallback
///       └────────────┘
///              │
///              ▼
///       ┌────────────┐
///       │ normalize   │  rating / votes / duration → numeric fields
///       └────────────┘
///              │
///              ▼
///       ┌────────────┐
///       │ MovieDataset│  Vec<MovieRecord>, genre index
///       └────────────┘
///              │
///              ▼
///       ┌────────────┐
///       │   filter    │  FilterSpec → visible indices
///       └────────────┘
///              │
///              ▼
///       ┌────────────┐
///       │   stats     │  top-10, genre counts, histogram, scatter
///       └────────────┘
/// ```
///
/// The ad-hoc `query` module runs beside this pipeline: it talks to the SQL
/// store directly and feeds its own result table to the UI, bypassing
/// normalization and filtering.
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod query;
pub mod source;
pub mod stats;
