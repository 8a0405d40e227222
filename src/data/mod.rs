/// Data layer: core types, loading, normalization, and derived views.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → raw rows, schema check
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ normalize   │  clean the Price text, drop unparseable rows
///   └────────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ ListingTable  │  Vec<Listing>, column index, distinct values
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  views    │  membership/range filters, grouped price means
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod normalize;
pub mod views;
