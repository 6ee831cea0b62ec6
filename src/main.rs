//! # slimframe command line
//!
//! ```text
//! main()
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Initialise logging (console + rotating file)
//!   └─> Run the subcommand
//!         ├─> analyse: print recommended types
//!         └─> shrink:  cast and write the reduced dataset
//! ```
//!
//! ```bash
//! slimframe analyse data.csv --threshold 15 --float-width 32
//! slimframe analyse data.csv --json > dtypes.json
//! slimframe shrink data.csv --output data.parquet
//! ```

#![expect(clippy::print_stdout)] // Results are the program's output

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    if let Err(e) = slimframe::logging::init_with(cli.verbose) {
        eprintln!("Logging disabled: {e:#}");
    }

    cli::run_command(cli.command).inspect_err(|e| tracing::error!("{e:#}"))
}
