//! Pipeline configuration.
//!
//! One explicit structure carries every knob the pipeline reads, passed into
//! the entry points instead of living as process-wide constants. Loadable
//! from YAML for declarative runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::vocab::{VocabConfig, RESERVED_SLOTS};

/// Configuration for corpus loading, splitting, and batching
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Vocabulary construction options
    pub vocab: VocabConfig,
    /// Fraction of rows routed to the validation partition
    pub val_ratio: f64,
    /// Examples per batch
    pub batch_size: usize,
    /// Width of the per-class label vector
    pub num_classes: usize,
    /// Shuffle example order each training epoch
    pub shuffle: bool,
    /// Seed for the per-epoch permutation
    pub seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            vocab: VocabConfig::default(),
            val_ratio: 0.2,
            batch_size: 32,
            num_classes: 6,
            shuffle: true,
            seed: 42,
        }
    }
}

impl PipelineConfig {
    /// Set the vocabulary options
    #[must_use]
    pub fn with_vocab(mut self, vocab: VocabConfig) -> Self {
        self.vocab = vocab;
        self
    }

    /// Set the validation ratio
    #[must_use]
    pub fn with_val_ratio(mut self, ratio: f64) -> Self {
        self.val_ratio = ratio;
        self
    }

    /// Set the batch size
    #[must_use]
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Set the label vector width
    #[must_use]
    pub fn with_num_classes(mut self, n: usize) -> Self {
        self.num_classes = n;
        self
    }

    /// Enable or disable per-epoch shuffling
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Set the shuffle seed
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Load a configuration from a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every invariant the pipeline relies on, up front
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.val_ratio) {
            return Err(Error::InvalidRatio {
                ratio: self.val_ratio,
            });
        }
        if self.batch_size == 0 {
            return Err(Error::InvalidBatchSize);
        }
        if let Some(size) = self.vocab.max_size {
            if size < RESERVED_SLOTS {
                return Err(Error::VocabTooSmall {
                    requested: size,
                    reserved: RESERVED_SLOTS,
                });
            }
        }
        Ok(())
    }
}
