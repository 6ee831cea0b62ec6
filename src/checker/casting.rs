//! Building reduced copies of a dataset.
//!
//! Casting never writes into the source frame. A recast column gets freshly
//! allocated buffers; a column without a recommendation is cloned, which in
//! polars shares the immutable, reference-counted buffers of the original.

use super::types::{RecommendationSet, Representation};
use crate::error::Result;
use half::f16;
use polars::prelude::*;

/// Re-encodes one column into `repr`.
///
/// Integer and categorical casts are strict: a value that does not survive the
/// cast is an error, never a silent null. Float casts round to the nearest
/// value of the target precision.
pub fn cast_column(column: &Column, repr: Representation) -> Result<Column> {
    let series = column.as_materialized_series();
    let cast = match repr {
        Representation::Float16 => quantise_to_half(series)?,
        Representation::Float32 | Representation::Float64 => series.cast(&repr.to_dtype())?,
        Representation::Int8
        | Representation::Int16
        | Representation::Int32
        | Representation::Int64
        | Representation::Categorical => series.strict_cast(&repr.to_dtype())?,
    };
    Ok(Column::from(cast))
}

/// Rounds every value to binary16 precision, stored as `Float32`.
fn quantise_to_half(series: &Series) -> Result<Series> {
    let values = series.cast(&DataType::Float64)?;
    let values = values.f64()?;
    let quantised: Float32Chunked = values
        .into_iter()
        .map(|v| v.map(|x| f16::from_f64(x).to_f32()))
        .collect();
    Ok(quantised.with_name(series.name().clone()).into_series())
}

/// Returns a new frame with every recommended column recast.
///
/// Column order is preserved. A recommendation naming a column that is not in
/// `df` is an error.
pub fn apply_recommendations(
    df: &DataFrame,
    recommendations: &RecommendationSet,
) -> Result<DataFrame> {
    for (name, _) in recommendations.iter() {
        df.column(name)?;
    }

    let columns = df
        .get_columns()
        .iter()
        .map(|col| match recommendations.get(col.name().as_str()) {
            Some(repr) => {
                tracing::debug!(
                    column = %col.name(),
                    from = %col.dtype(),
                    to = %repr,
                    "Casting column"
                );
                cast_column(col, repr)
            }
            None => Ok(col.clone()),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DataFrame::new(columns)?)
}
