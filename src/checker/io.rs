//! Reading and writing frames.
//!
//! [`load_df_with_dtypes`] applies a [`RecommendationSet`] while a CSV file is
//! being parsed, so narrow types are used from the start instead of after a
//! full-width load.

use super::casting::apply_recommendations;
use super::types::{RecommendationSet, Representation};
use anyhow::{Context as _, Result};
use polars::prelude::*;
use std::path::Path;
use std::sync::Arc;

const INFER_SCHEMA_ROWS: usize = 10_000;

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase()
}

pub fn load_df(path: &Path) -> Result<DataFrame> {
    let ext = extension(path);

    let df = match ext.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .with_has_header(true)
            .finish()?
            .collect()
            .context("Failed to read CSV")?,
        "parquet" => ParquetReader::new(std::fs::File::open(path)?)
            .finish()
            .context("Failed to read Parquet")?,
        "json" => JsonReader::new(std::fs::File::open(path)?)
            .finish()
            .context("Failed to read JSON")?,
        _ => return Err(anyhow::anyhow!("Unsupported file extension: {ext}")),
    };

    tracing::debug!(
        rows = df.height(),
        columns = df.width(),
        "Loaded {}",
        path.display()
    );
    Ok(df)
}

/// Loads a file with the recommended types applied.
///
/// CSV files are parsed straight into the target types. Other formats carry
/// their own schema, so they are loaded and then cast.
pub fn load_df_with_dtypes(path: &Path, recommendations: &RecommendationSet) -> Result<DataFrame> {
    if extension(path) != "csv" {
        let df = load_df(path)?;
        return apply_recommendations(&df, recommendations)
            .context("Failed to apply recommended types");
    }

    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .with_dtype_overwrite(Some(Arc::new(recommendations.to_schema())))
        .finish()?
        .collect()
        .context("Failed to read CSV with recommended types")?;

    // The parser has no half-precision type; round those columns after the read.
    let half: RecommendationSet = recommendations
        .iter()
        .filter(|(_, repr)| *repr == Representation::Float16)
        .map(|(name, repr)| (name.to_owned(), repr))
        .collect();
    if half.is_empty() {
        return Ok(df);
    }
    apply_recommendations(&df, &half).context("Failed to round half-precision columns")
}

pub fn save_df(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).context("Failed to create output directory")?;
    }

    if extension(path) == "parquet" {
        let file = std::fs::File::create(path).context("Failed to create Parquet file")?;
        ParquetWriter::new(file)
            .finish(df)
            .context("Failed to write Parquet file")?;
    } else {
        let file = std::fs::File::create(path).context("Failed to create CSV file")?;
        CsvWriter::new(file)
            .include_header(true)
            .finish(df)
            .context("Failed to write CSV file")?;
    }

    tracing::info!(rows = df.height(), "Saved dataset to {}", path.display());
    Ok(())
}
