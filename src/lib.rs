//! # slimframe - Lower-Memory Column Types for Polars
//!
//! slimframe inspects a polars `DataFrame` and works out, column by column, the
//! smallest type that still holds every value. It can then build a reduced
//! copy of the frame with those types applied.
//!
//! ## Quick Start
//!
//! ```no_run
//! use slimframe::checker::DatasetChecker;
//! use slimframe::config::CheckerConfig;
//!
//! # fn example() -> anyhow::Result<()> {
//! let df = slimframe::checker::io::load_df("data.csv".as_ref())?;
//!
//! let mut checker = DatasetChecker::new(df, CheckerConfig::new(10, 32)?)?;
//! checker.identify_possible_improvements()?;
//!
//! let (reduced, report) = checker.cast_with_report()?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```
//!
//! ## What Gets Narrowed
//!
//! | Column kind | Rule |
//! |-------------|------|
//! | Integer     | narrowest of 8/16/32/64-bit signed that holds min and max |
//! | Float       | the configured width, if narrower (a precision policy, lossy) |
//! | Text        | categorical when distinct values <= `categorical_threshold` |
//! | Boolean     | never |
//!
//! Integer and categorical casts are lossless. Float narrowing trades precision
//! for memory, and only happens when the caller asks for it.
//!
//! ## Core Modules
//!
//! - [`checker`]: analysis, recommendations and casting
//! - [`config`]: checker tunables and config files
//! - [`error`]: error types and handling utilities
//! - [`logging`]: tracing setup for the binary

pub mod checker;
pub mod config;
pub mod error;
pub mod logging;
