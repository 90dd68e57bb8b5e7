/// Data layer: core types, loading, counting and summary statistics.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset  │  header-ordered columns, rows of CellValue
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │ summary  │   │  counts  │  preview / describe, value_counts
///   └──────────┘   └──────────┘
/// ```

pub mod counts;
pub mod loader;
pub mod model;
pub mod summary;
