//! Per-column narrowing rules.
//!
//! [`RepresentationAnalyzer`] looks at a single column and decides whether a
//! smaller representation can hold it:
//!
//! - Integers move to the narrowest signed width whose range covers the
//!   column's minimum and maximum.
//! - Floats move to the configured target width whenever its storage is
//!   narrower. This is a policy choice, not a guarantee: values are not checked
//!   for precision loss.
//! - Text becomes categorical when it has at most `categorical_threshold`
//!   distinct non-null values.
//! - Booleans are already minimal.
//!
//! Evaluation never touches the column it is given.

use super::types::{ColumnKind, FloatWidth, IntWidth, Representation};
use crate::config::CheckerConfig;
use crate::error::{Result, SlimError};
use polars::prelude::*;

/// Maps a column's polars type onto the kinds we know how to narrow.
///
/// Returns `Ok(None)` for types that are out of scope (temporal, nested,
/// already categorical); those are skipped rather than rejected. Unsigned
/// integers are rejected because their ranges have no narrowing rules.
pub fn classify_column(column: &Column) -> Result<Option<ColumnKind>> {
    let kind = match column.dtype() {
        DataType::Int8 => Some(ColumnKind::Integer(IntWidth::W8)),
        DataType::Int16 => Some(ColumnKind::Integer(IntWidth::W16)),
        DataType::Int32 => Some(ColumnKind::Integer(IntWidth::W32)),
        DataType::Int64 => Some(ColumnKind::Integer(IntWidth::W64)),
        DataType::Float32 => Some(ColumnKind::Float(FloatWidth::F32)),
        DataType::Float64 => Some(ColumnKind::Float(FloatWidth::F64)),
        DataType::Boolean => Some(ColumnKind::Boolean),
        DataType::String => Some(ColumnKind::Text),
        dtype if dtype.is_unsigned_integer() => {
            return Err(SlimError::UnsupportedColumn {
                column: column.name().to_string(),
                dtype: dtype.to_string(),
            });
        }
        _ => None,
    };
    Ok(kind)
}

/// Evaluates single columns against a [`CheckerConfig`].
#[derive(Clone, Copy, Debug)]
pub struct RepresentationAnalyzer<'a> {
    config: &'a CheckerConfig,
}

impl<'a> RepresentationAnalyzer<'a> {
    pub fn new(config: &'a CheckerConfig) -> Self {
        Self { config }
    }

    /// Classifies the column and runs the evaluator for its kind.
    pub fn evaluate(&self, column: &Column) -> Result<Option<Representation>> {
        match classify_column(column)? {
            Some(ColumnKind::Integer(_)) => self.evaluate_integer_column(column),
            Some(ColumnKind::Float(_)) => self.evaluate_float_column(column),
            Some(ColumnKind::Text) => self.evaluate_string_column(column),
            Some(ColumnKind::Boolean) => self.evaluate_boolean_column(column),
            None => {
                tracing::debug!(
                    column = %column.name(),
                    dtype = %column.dtype(),
                    "Skipping column with no narrowing rules"
                );
                Ok(None)
            }
        }
    }

    pub fn evaluate_integer_column(&self, column: &Column) -> Result<Option<Representation>> {
        let kind = classify_column(column)?;
        let Some(ColumnKind::Integer(current)) = kind else {
            return Err(kind_mismatch(column, "Integer", kind));
        };
        ensure_complete(column)?;

        let values = column.as_materialized_series().cast(&DataType::Int64)?;
        let values = values.i64()?;
        let (Some(min), Some(max)) = (values.min(), values.max()) else {
            return Ok(None);
        };

        let target = IntWidth::narrowest_for(min, max);
        tracing::debug!(
            column = %column.name(),
            min,
            max,
            current = current.bits(),
            target = target.bits(),
            "Evaluated integer column"
        );

        if target >= current {
            return Ok(None);
        }
        Ok(Some(target.into()))
    }

    pub fn evaluate_float_column(&self, column: &Column) -> Result<Option<Representation>> {
        let kind = classify_column(column)?;
        let Some(ColumnKind::Float(current)) = kind else {
            return Err(kind_mismatch(column, "Float", kind));
        };
        if !self.config.float_narrowing_enabled() {
            return Ok(None);
        }
        ensure_complete(column)?;

        let target = self.config.float_target_width;
        let repr = Representation::from(target);
        // Float16 is stored as Float32, so a Float32 column would only lose precision
        if target >= current || &repr.to_dtype() == column.dtype() {
            return Ok(None);
        }
        Ok(Some(repr))
    }

    pub fn evaluate_string_column(&self, column: &Column) -> Result<Option<Representation>> {
        let kind = classify_column(column)?;
        let Some(ColumnKind::Text) = kind else {
            return Err(kind_mismatch(column, "Text", kind));
        };

        let distinct = column.as_materialized_series().drop_nulls().n_unique()?;
        tracing::debug!(
            column = %column.name(),
            distinct,
            threshold = self.config.categorical_threshold,
            "Evaluated text column"
        );

        if distinct <= self.config.categorical_threshold {
            Ok(Some(Representation::Categorical))
        } else {
            Ok(None)
        }
    }

    pub fn evaluate_boolean_column(&self, column: &Column) -> Result<Option<Representation>> {
        let kind = classify_column(column)?;
        let Some(ColumnKind::Boolean) = kind else {
            return Err(kind_mismatch(column, "Boolean", kind));
        };
        Ok(None)
    }
}

fn kind_mismatch(
    column: &Column,
    expected: &'static str,
    actual: Option<ColumnKind>,
) -> SlimError {
    let actual = match actual {
        Some(kind) => kind.as_str().to_owned(),
        None => column.dtype().to_string(),
    };
    SlimError::ColumnKindMismatch {
        column: column.name().to_string(),
        expected,
        actual,
    }
}

fn ensure_complete(column: &Column) -> Result<()> {
    let nulls = column.null_count();
    if nulls > 0 {
        return Err(SlimError::MissingValues {
            column: column.name().to_string(),
            nulls,
        });
    }
    Ok(())
}
