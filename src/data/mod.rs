//! Corpus loading, train/validation splitting, and per-example encoding.
//!
//! [`read_rows`] loads a comma-separated labeled corpus (header skipped),
//! [`split_rows`] partitions it by ratio without shuffling, and
//! [`CommentDataset`] exposes tokenized, vocabulary-encoded examples to the
//! batching layer.

mod corpus;
mod dataset;

pub use corpus::{read_rows, split_rows, CommentRow};
pub use dataset::{
    produce_datasets, produce_datasets_from_files, CommentDataset, EncodedExample,
};
