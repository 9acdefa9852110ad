/// Data layer: core types, loading, and the pair transform.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Frame (ordered columns + typed cells)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ transform │  select n1, n2, jac → Record → PairTable
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ PairTable │  Vec<(pair, jac)>, input order
///   └───────────┘
/// ```

pub mod loader;
pub mod model;
pub mod transform;
