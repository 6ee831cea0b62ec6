use crate::checker::types::FloatWidth;
use crate::error::{Result, ResultExt as _, SlimError};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CATEGORICAL_THRESHOLD: usize = 10;

/// Tunables for a [`crate::checker::DatasetChecker`]. Fixed once the checker is built.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct CheckerConfig {
    /// Largest distinct-value count (inclusive) for a text column to become categorical.
    pub categorical_threshold: usize,
    /// Width float columns are narrowed to.
    ///
    /// `64` doubles as the switch that turns float narrowing off: it is the
    /// native width, so no float column is ever recommended when it is chosen.
    pub float_target_width: FloatWidth,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            categorical_threshold: DEFAULT_CATEGORICAL_THRESHOLD,
            float_target_width: FloatWidth::F64,
        }
    }
}

impl CheckerConfig {
    pub fn new(categorical_threshold: usize, float_target_width: u32) -> Result<Self> {
        let config = Self {
            categorical_threshold,
            float_target_width: FloatWidth::try_from(float_target_width)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.categorical_threshold == 0 {
            return Err(SlimError::Config {
                field: "categorical_threshold",
                value: self.categorical_threshold.to_string(),
                expected: "a positive integer",
            });
        }
        Ok(())
    }

    /// Whether float columns take part in analysis at all.
    pub fn float_narrowing_enabled(&self) -> bool {
        self.float_target_width != FloatWidth::F64
    }
}

/// Reads a JSON config file. Missing fields fall back to their defaults.
pub fn load_config(path: &Path) -> Result<CheckerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: CheckerConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    config.validate()?;
    tracing::debug!(?config, "Loaded checker config from {}", path.display());
    Ok(config)
}

pub fn save_config(config: &CheckerConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
