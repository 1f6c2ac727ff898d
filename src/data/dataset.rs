//! Comment dataset: per-example token encoding over a fixed vocabulary.

use std::path::Path;
use std::sync::Arc;

use super::corpus::{read_rows, split_rows, CommentRow};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::tokenize::Tokenize;
use crate::vocab::{TokenId, Vocabulary};

/// One encoded example: variable-length token ids plus the fixed-width label
/// vector
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedExample {
    /// Token indices into the vocabulary
    pub token_ids: Vec<TokenId>,
    /// Per-class indicator values
    pub labels: Vec<f32>,
}

/// A labeled comment corpus partition bound to a vocabulary.
///
/// Rows, vocabulary, and tokenizer are immutable after construction, so
/// [`get`](CommentDataset::get) is safe to call concurrently from prefetch
/// workers.
pub struct CommentDataset {
    rows: Vec<CommentRow>,
    vocab: Arc<Vocabulary>,
    tokenizer: Arc<dyn Tokenize>,
    lowercase: bool,
}

impl CommentDataset {
    /// Bind rows to a vocabulary and tokenizer
    #[must_use]
    pub fn new(
        rows: Vec<CommentRow>,
        vocab: Arc<Vocabulary>,
        tokenizer: Arc<dyn Tokenize>,
        lowercase: bool,
    ) -> Self {
        Self {
            rows,
            vocab,
            tokenizer,
            lowercase,
        }
    }

    /// Number of examples
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the partition is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The bound vocabulary
    #[must_use]
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Raw row access
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&CommentRow> {
        self.rows.get(index)
    }

    /// Tokenize and encode the example at `index`.
    ///
    /// Tokens absent from the vocabulary encode to the unknown index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<EncodedExample> {
        let row = self.rows.get(index)?;
        let tokens = if self.lowercase {
            self.tokenizer.tokenize(&row.text.to_lowercase())
        } else {
            self.tokenizer.tokenize(&row.text)
        };
        let token_ids = tokens
            .iter()
            .map(|token| self.vocab.encode_token(token))
            .collect();
        Some(EncodedExample {
            token_ids,
            labels: row.labels.clone(),
        })
    }
}

/// Load a corpus, split it by `config.val_ratio`, and bind both partitions to
/// the shared vocabulary.
pub fn produce_datasets(
    corpus_path: impl AsRef<Path>,
    vocab: Arc<Vocabulary>,
    tokenizer: Arc<dyn Tokenize>,
    config: &PipelineConfig,
) -> Result<(CommentDataset, CommentDataset)> {
    config.validate()?;
    let rows = read_rows(corpus_path, config.num_classes)?;
    let (train_rows, val_rows) = split_rows(rows, config.val_ratio)?;
    let lowercase = config.vocab.lowercase;
    let train = CommentDataset::new(train_rows, Arc::clone(&vocab), Arc::clone(&tokenizer), lowercase);
    let val = CommentDataset::new(val_rows, vocab, tokenizer, lowercase);
    Ok((train, val))
}

/// [`produce_datasets`] with the vocabulary loaded from disk first
pub fn produce_datasets_from_files(
    corpus_path: impl AsRef<Path>,
    vocab_path: impl AsRef<Path>,
    tokenizer: Arc<dyn Tokenize>,
    config: &PipelineConfig,
) -> Result<(CommentDataset, CommentDataset)> {
    let special = config.vocab.special_tokens.clone();
    let vocab = Arc::new(Vocabulary::load(vocab_path, special)?);
    produce_datasets(corpus_path, vocab, tokenizer, config)
}
