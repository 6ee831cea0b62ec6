use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use slimframe::checker::DatasetChecker;
use slimframe::checker::io::{load_df, save_df};
use slimframe::checker::memory::format_bytes;
use slimframe::config::{CheckerConfig, load_config, save_config};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "slimframe", about = "Find lower-memory column types for tabular data")]
pub struct Cli {
    /// Log the decision made for every column
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the recommended type for each column that can shrink
    Analyse {
        /// Input file (CSV, Parquet, JSON)
        file: PathBuf,

        #[command(flatten)]
        checker: CheckerArgs,

        /// Print the recommendations as JSON, ready to use as a dtype mapping
        #[arg(long)]
        json: bool,
    },
    /// Apply the recommendations and write the reduced dataset
    Shrink {
        /// Input file (CSV, Parquet, JSON)
        file: PathBuf,

        /// Output file. Use `.parquet` to keep the narrowed types on disk.
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        checker: CheckerArgs,
    },
}

#[derive(Args)]
pub struct CheckerArgs {
    /// Path to a JSON checker configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum distinct values for a text column to become categorical
    #[arg(short, long, env = "SLIMFRAME_CATEGORICAL_THRESHOLD")]
    threshold: Option<usize>,

    /// Target float width: 16, 32, or 64 (64 disables float narrowing)
    #[arg(short, long, env = "SLIMFRAME_FLOAT_WIDTH")]
    float_width: Option<u32>,

    /// Write the effective configuration to this JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,
}

impl CheckerArgs {
    /// Config file values, overridden by any flags given.
    fn resolve(&self) -> Result<CheckerConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => CheckerConfig::default(),
        };
        if let Some(threshold) = self.threshold {
            config.categorical_threshold = threshold;
        }
        if let Some(bits) = self.float_width {
            config.float_target_width = bits.try_into()?;
        }
        config.validate()?;
        if let Some(path) = &self.save_config {
            save_config(&config, path)
                .with_context(|| format!("Failed to save config to {}", path.display()))?;
            tracing::info!("Saved checker config to {}", path.display());
        }
        Ok(config)
    }
}

pub fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Analyse {
            file,
            checker,
            json,
        } => handle_analyse(&file, &checker, json),
        Commands::Shrink {
            file,
            output,
            checker,
        } => handle_shrink(&file, &output, &checker),
    }
}

fn analysed_checker(file: &Path, args: &CheckerArgs) -> Result<DatasetChecker> {
    let config = args.resolve()?;
    let df = load_df(file).with_context(|| format!("Failed to load {}", file.display()))?;
    let mut checker = DatasetChecker::new(df, config)?;
    checker
        .identify_possible_improvements()
        .with_context(|| format!("Failed to analyse {}", file.display()))?;
    Ok(checker)
}

fn handle_analyse(file: &Path, args: &CheckerArgs, json: bool) -> Result<()> {
    let checker = analysed_checker(file, args)?;
    let recommendations = checker.get_possible_dtypes();

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
        return Ok(());
    }

    if recommendations.is_empty() {
        println!("No possible improvements found in {}", file.display());
        return Ok(());
    }

    let width = recommendations
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);
    for (name, repr) in recommendations.iter() {
        let current = checker
            .dataset()
            .column(name)
            .map(|c| c.dtype().to_string())
            .unwrap_or_default();
        println!("{name:<width$}  {current} -> {repr}");
    }
    Ok(())
}

fn handle_shrink(file: &Path, output: &Path, args: &CheckerArgs) -> Result<()> {
    let checker = analysed_checker(file, args)?;
    let (mut reduced, report) = checker.cast_with_report()?;

    for column in report
        .columns
        .iter()
        .filter(|c| c.reduced_bytes != c.original_bytes)
    {
        println!(
            "{}: {} -> {}",
            column.name,
            format_bytes(column.original_bytes),
            format_bytes(column.reduced_bytes)
        );
    }
    println!("{report}");

    save_df(&mut reduced, output)?;
    println!("Saved to {}", output.display());
    Ok(())
}
