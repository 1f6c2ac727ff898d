//! CLI command implementations

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use super::logging::{log, LogLevel};
use crate::collate::{BatchLoader, CommentCollator};
use crate::config::PipelineConfig;
use crate::data::produce_datasets_from_files;
use crate::tokenize::WhitespaceTokenizer;
use crate::vocab::{VocabBuilder, VocabConfig};

/// Data preparation for multi-label comment classification
#[derive(Debug, Parser)]
#[command(name = "clasificar", version, about)]
pub struct Cli {
    /// Print additional details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a vocabulary from a labeled corpus and save it
    Vocab(VocabArgs),
    /// Load, split, and batch a corpus, printing pipeline statistics
    Inspect(InspectArgs),
}

/// Arguments for `vocab`
#[derive(Debug, clap::Args)]
pub struct VocabArgs {
    /// Corpus CSV file (header row, id/text/label columns)
    pub corpus: PathBuf,

    /// Destination vocabulary file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Total vocabulary budget, reserved slots included
    #[arg(long)]
    pub max_size: Option<usize>,

    /// Minimum token occurrence count
    #[arg(long, default_value_t = 1)]
    pub min_frequency: usize,

    /// Keep the original casing instead of folding to lowercase
    #[arg(long)]
    pub no_lowercase: bool,

    /// Number of label columns after the text column
    #[arg(long, default_value_t = 6)]
    pub num_classes: usize,
}

/// Arguments for `inspect`
#[derive(Debug, clap::Args)]
pub struct InspectArgs {
    /// Corpus CSV file
    pub corpus: PathBuf,

    /// Vocabulary file produced by `vocab`
    #[arg(long)]
    pub vocab: PathBuf,

    /// Pipeline configuration YAML; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Fraction of rows routed to validation
    #[arg(long)]
    pub val_ratio: Option<f64>,

    /// Examples per batch
    #[arg(long)]
    pub batch_size: Option<usize>,
}

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let level = LogLevel::from_flags(cli.quiet, cli.verbose);
    match cli.command {
        Command::Vocab(args) => run_vocab(&args, level),
        Command::Inspect(args) => run_inspect(&args, level),
    }
    .map_err(|e| e.to_string())
}

fn run_vocab(args: &VocabArgs, level: LogLevel) -> crate::Result<()> {
    let config = VocabConfig {
        max_size: args.max_size,
        min_frequency: args.min_frequency,
        lowercase: !args.no_lowercase,
        ..VocabConfig::default()
    };

    log(
        level,
        LogLevel::Normal,
        &format!("Reading corpus '{}'...", args.corpus.display()),
    );
    let rows = crate::data::read_rows(&args.corpus, args.num_classes)?;
    log(level, LogLevel::Verbose, &format!("  {} rows", rows.len()));

    let texts = rows.iter().map(|row| row.text.as_str());
    let vocabulary =
        VocabBuilder::new(config).build_to_file(texts, &WhitespaceTokenizer, &args.output)?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Saved {} entries to '{}'",
            vocabulary.len(),
            args.output.display()
        ),
    );
    Ok(())
}

fn run_inspect(args: &InspectArgs, level: LogLevel) -> crate::Result<()> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_yaml(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(ratio) = args.val_ratio {
        config = config.with_val_ratio(ratio);
    }
    if let Some(size) = args.batch_size {
        config = config.with_batch_size(size);
    }
    config.validate()?;

    log(
        level,
        LogLevel::Normal,
        &format!("Loading corpus '{}'...", args.corpus.display()),
    );
    let (train, val) = produce_datasets_from_files(
        &args.corpus,
        &args.vocab,
        Arc::new(WhitespaceTokenizer),
        &config,
    )?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Vocabulary: {} entries\nTrain: {} examples\nValidation: {} examples",
            train.vocab().len(),
            train.len(),
            val.len()
        ),
    );

    let collator = CommentCollator::new(train.vocab().pad_index());
    let loader = BatchLoader::new(&train, collator, config.batch_size, config.shuffle, config.seed)?;
    let batches = loader.batches(0)?;
    let longest = batches.iter().map(|b| b.max_seq_len()).max().unwrap_or(0);

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Batches per epoch: {} (batch size {})",
            batches.len(),
            config.batch_size
        ),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!("Longest padded sequence: {longest}"),
    );
    Ok(())
}
