//! # clasificar
//!
//! Data preparation and batching for multi-label comment classification.
//!
//! The pipeline turns a delimited labeled corpus into padded, length-tracked
//! batches a sequence model can consume:
//!
//! 1. [`vocab`] — build a bounded vocabulary by token frequency, with the
//!    padding token at index 0 and the unknown token at index 1, persisted
//!    as plain text.
//! 2. [`data`] — load the corpus (header skipped), split it into
//!    train/validation partitions by ratio without shuffling, and encode
//!    each example through the vocabulary with unknown-token fallback.
//! 3. [`collate`] — sort each batch by descending sequence length, pad to a
//!    rectangle, and keep per-example true lengths alongside; a seeded
//!    loader produces one epoch of batches at a time.
//!
//! The model, optimizer, and training loop are external consumers: they see
//! only `(padded token ids, lengths) -> per-class probabilities`.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use clasificar::collate::{BatchLoader, CommentCollator};
//! use clasificar::config::PipelineConfig;
//! use clasificar::data::produce_datasets_from_files;
//! use clasificar::tokenize::WhitespaceTokenizer;
//!
//! # fn main() -> clasificar::Result<()> {
//! let config = PipelineConfig::default().with_batch_size(32);
//! let (train, _val) = produce_datasets_from_files(
//!     "train.csv",
//!     "vocab.txt",
//!     Arc::new(WhitespaceTokenizer),
//!     &config,
//! )?;
//!
//! let collator = CommentCollator::new(train.vocab().pad_index());
//! let loader = BatchLoader::new(&train, collator, config.batch_size, true, config.seed)?;
//! for batch in loader.batches(0)? {
//!     // forward(batch.token_ids, &batch.lengths) ...
//!     let _ = batch.batch_size();
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod collate;
pub mod config;
pub mod data;
pub mod error;
pub mod tokenize;
pub mod vocab;

pub use config::PipelineConfig;
pub use error::{Error, Result};
