//! # Dataset Checker
//!
//! Finds lower-memory types for the columns of a polars [`DataFrame`] and
//! builds reduced copies.
//!
//! ## Two Phases
//!
//! ```no_run
//! use polars::prelude::*;
//! use slimframe::checker::DatasetChecker;
//! use slimframe::config::CheckerConfig;
//!
//! # fn example() -> anyhow::Result<()> {
//! let df = df!(
//!     "age" => &[23_i64, 45, 31],
//!     "city" => &["SYD", "MEL", "SYD"],
//! )?;
//!
//! let mut checker = DatasetChecker::new(df, CheckerConfig::new(10, 64)?)?;
//! checker.identify_possible_improvements()?;
//!
//! for (column, repr) in checker.get_possible_dtypes().iter() {
//!     println!("{column} -> {repr}");
//! }
//!
//! let reduced = checker.cast_dataset_to_lower_memory_version()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`analyzer`]: per-column narrowing rules
//! - [`dataset`]: the [`DatasetChecker`] that owns a dataset and its recommendations
//! - [`casting`]: building the reduced frame
//! - [`memory`]: before/after footprint
//! - [`io`]: reading and writing frames, including load-time type directives
//! - [`types`]: kinds, widths, representations
//!
//! [`DataFrame`]: polars::prelude::DataFrame

pub mod analyzer;
pub mod casting;
pub mod dataset;
pub mod io;
pub mod memory;
pub mod types;

pub use analyzer::{RepresentationAnalyzer, classify_column};
pub use casting::{apply_recommendations, cast_column};
pub use dataset::{CheckerState, DatasetChecker};
pub use memory::{ColumnFootprint, MemoryReport};
pub use types::{ColumnKind, FloatWidth, IntWidth, KindFamily, RecommendationSet, Representation};

#[cfg(test)]
mod tests;
