/// Data layer: loading, preparation, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .xlsx / .ods / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  first sheet → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ pipeline  │  normalize → dates → classify → restrict → validate
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ HiringDataset  │  Vec<HiringRecord>, filter domains (cached per path)
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐      ┌───────────┐
///   │  filter   │ ───▶ │ aggregate  │  KPIs, chart series, detail tables
///   └──────────┘      └───────────┘
/// ```

pub mod aggregate;
pub mod classify;
pub mod columns;
pub mod dates;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod pipeline;

pub use error::PipelineError;
pub use model::{CellValue, HiringDataset, HiringRecord, HiringType};
pub use pipeline::{clear_cache, load_cached, prepare};
