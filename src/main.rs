//! Clasificar CLI
//!
//! Data-preparation entry point for the clasificar library.
//!
//! # Usage
//!
//! ```bash
//! # Build a vocabulary from a corpus
//! clasificar vocab train.csv --output vocab.txt --max-size 20000
//!
//! # Split and batch a corpus, printing pipeline statistics
//! clasificar inspect train.csv --vocab vocab.txt --val-ratio 0.2
//!
//! # Same, driven by a YAML config
//! clasificar inspect train.csv --vocab vocab.txt --config pipeline.yaml
//! ```

use clap::Parser;
use clasificar::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
