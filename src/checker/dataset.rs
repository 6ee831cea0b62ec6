use super::analyzer::{RepresentationAnalyzer, classify_column};
use super::casting::apply_recommendations;
use super::memory::MemoryReport;
use super::types::{KindFamily, RecommendationSet};
use crate::config::CheckerConfig;
use crate::error::Result;
use polars::prelude::DataFrame;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Serialize, PartialEq, Eq, Debug)]
pub enum CheckerState {
    Unanalysed,
    Analysed,
}

/// Owns a dataset and the recommendations found for it.
///
/// Analysis and casting are separate steps: [`identify_possible_improvements`]
/// fills the recommendation set, and [`cast_dataset_to_lower_memory_version`]
/// builds a new frame from it. The held dataset is never modified.
///
/// [`identify_possible_improvements`]: Self::identify_possible_improvements
/// [`cast_dataset_to_lower_memory_version`]: Self::cast_dataset_to_lower_memory_version
#[derive(Clone, Debug)]
pub struct DatasetChecker {
    df: DataFrame,
    config: CheckerConfig,
    recommendations: RecommendationSet,
    state: CheckerState,
}

impl DatasetChecker {
    pub fn new(df: DataFrame, config: CheckerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::unanalysed(df, config))
    }

    /// Default config is always valid, so this cannot fail.
    pub fn with_defaults(df: DataFrame) -> Self {
        Self::unanalysed(df, CheckerConfig::default())
    }

    fn unanalysed(df: DataFrame, config: CheckerConfig) -> Self {
        Self {
            df,
            config,
            recommendations: RecommendationSet::new(),
            state: CheckerState::Unanalysed,
        }
    }

    pub fn dataset(&self) -> &DataFrame {
        &self.df
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    pub fn state(&self) -> CheckerState {
        self.state
    }

    pub fn is_analysed(&self) -> bool {
        self.state == CheckerState::Analysed
    }

    /// Names of the columns that could shrink, grouped by family in dataset order.
    ///
    /// Boolean columns and types without narrowing rules are left out.
    pub fn columns_by_kind(&self) -> Result<BTreeMap<KindFamily, Vec<String>>> {
        let mut groups: BTreeMap<KindFamily, Vec<String>> = BTreeMap::new();
        for col in self.df.get_columns() {
            let Some(kind) = classify_column(col)? else {
                continue;
            };
            let family = kind.family();
            if family == KindFamily::Boolean {
                continue;
            }
            groups.entry(family).or_default().push(col.name().to_string());
        }
        Ok(groups)
    }

    /// Evaluates every column and replaces the recommendation set.
    ///
    /// On error the previous recommendations and state are kept.
    pub fn identify_possible_improvements(&mut self) -> Result<()> {
        let start_time = std::time::Instant::now();
        let mut recommendations = RecommendationSet::new();

        if self.df.width() == 0 || self.df.height() == 0 {
            tracing::info!(
                rows = self.df.height(),
                columns = self.df.width(),
                "Dataset is empty, nothing to analyse"
            );
        } else {
            let analyzer = RepresentationAnalyzer::new(&self.config);
            for col in self.df.get_columns() {
                if let Some(repr) = analyzer.evaluate(col)? {
                    recommendations.insert(col.name().as_str(), repr);
                }
            }
        }

        tracing::info!(
            columns = self.df.width(),
            improvements = recommendations.len(),
            elapsed = ?start_time.elapsed(),
            "Analysis complete"
        );

        self.recommendations = recommendations;
        self.state = CheckerState::Analysed;
        Ok(())
    }

    /// Snapshot of the current recommendations. Empty before analysis.
    pub fn get_possible_dtypes(&self) -> RecommendationSet {
        self.recommendations.clone()
    }

    /// Builds a new frame with the recommendations applied.
    ///
    /// Before analysis this returns an unchanged copy.
    pub fn cast_dataset_to_lower_memory_version(&self) -> Result<DataFrame> {
        self.cast_with_report().map(|(df, _)| df)
    }

    pub fn cast_with_report(&self) -> Result<(DataFrame, MemoryReport)> {
        if !self.is_analysed() {
            tracing::warn!("Casting before analysis; the dataset will be copied unchanged");
        }

        let reduced = apply_recommendations(&self.df, &self.recommendations)?;
        let report = self.memory_report(&reduced);
        tracing::info!(
            original_bytes = report.original_bytes,
            reduced_bytes = report.reduced_bytes,
            "{report}"
        );
        Ok((reduced, report))
    }

    pub fn memory_report(&self, reduced: &DataFrame) -> MemoryReport {
        MemoryReport::compare(&self.df, reduced)
    }
}
