/// Data layer: core types, loading, reshaping, and legend filtering.
///
/// Architecture:
/// ```text
///   BURTIN raw rows (name, MICs, gram label)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate → Vec<Record>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ reshape   │  wide → long: Vec<TidyRow>, 3 per record
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  legend selection → per-row opacity
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod reshape;
pub mod validate;
