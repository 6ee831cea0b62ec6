use polars::prelude::DataFrame;
use serde::Serialize;
use std::fmt;

/// Estimated heap footprint of one column before and after a cast.
#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct ColumnFootprint {
    pub name: String,
    pub original_bytes: usize,
    pub reduced_bytes: usize,
}

/// Estimated heap footprint of a dataset before and after a cast.
#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct MemoryReport {
    pub original_bytes: usize,
    pub reduced_bytes: usize,
    pub columns: Vec<ColumnFootprint>,
}

impl MemoryReport {
    /// Compares two frames column by column, matching columns by name.
    pub fn compare(original: &DataFrame, reduced: &DataFrame) -> Self {
        let columns = original
            .get_columns()
            .iter()
            .map(|col| {
                let original_bytes = col.as_materialized_series().estimated_size();
                let reduced_bytes = reduced
                    .column(col.name().as_str())
                    .map(|c| c.as_materialized_series().estimated_size())
                    .unwrap_or(0);
                ColumnFootprint {
                    name: col.name().to_string(),
                    original_bytes,
                    reduced_bytes,
                }
            })
            .collect();

        Self {
            original_bytes: original.estimated_size(),
            reduced_bytes: reduced.estimated_size(),
            columns,
        }
    }

    pub fn saved_bytes(&self) -> usize {
        self.original_bytes.saturating_sub(self.reduced_bytes)
    }

    /// Fraction of the original footprint that was saved, in `[0, 1]`.
    pub fn saved_ratio(&self) -> f64 {
        if self.original_bytes == 0 {
            0.0
        } else {
            self.saved_bytes() as f64 / self.original_bytes as f64
        }
    }
}

impl fmt::Display for MemoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Original: {}, New: {} ({:.1}% saved)",
            format_bytes(self.original_bytes),
            format_bytes(self.reduced_bytes),
            self.saved_ratio() * 100.0
        )
    }
}

pub fn format_bytes(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let bytes = bytes as f64;
    if bytes < KB {
        format!("{bytes:.0} B")
    } else if bytes < KB * KB {
        format!("{:.2} KB", bytes / KB)
    } else if bytes < KB * KB * KB {
        format!("{:.2} MB", bytes / (KB * KB))
    } else {
        format!("{:.2} GB", bytes / (KB * KB * KB))
    }
}
