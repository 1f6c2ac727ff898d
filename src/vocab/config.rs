//! Vocabulary configuration types.

use serde::{Deserialize, Serialize};

/// Reserved control tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialTokens {
    /// Padding token, pinned to index 0
    pub pad: String,
    /// Unknown token, pinned to index 1
    pub unk: String,
}

impl Default for SpecialTokens {
    fn default() -> Self {
        Self {
            pad: "<PAD>".to_string(),
            unk: "<UNK>".to_string(),
        }
    }
}

/// Vocabulary builder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabConfig {
    /// Total vocabulary budget including the two reserved slots
    /// (`None` keeps every distinct token)
    pub max_size: Option<usize>,
    /// Minimum token occurrence count for inclusion
    pub min_frequency: usize,
    /// Whether to case-fold text before tokenization
    pub lowercase: bool,
    /// Reserved tokens
    pub special_tokens: SpecialTokens,
}

impl Default for VocabConfig {
    fn default() -> Self {
        Self {
            max_size: None,
            min_frequency: 1,
            lowercase: true,
            special_tokens: SpecialTokens::default(),
        }
    }
}

impl VocabConfig {
    /// Cap the vocabulary at `size` entries (reserved slots included)
    #[must_use]
    pub fn with_max_size(mut self, size: usize) -> Self {
        self.max_size = Some(size);
        self
    }

    /// Set the minimum occurrence count
    #[must_use]
    pub fn with_min_frequency(mut self, freq: usize) -> Self {
        self.min_frequency = freq;
        self
    }

    /// Enable or disable case-folding
    #[must_use]
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Override the reserved tokens
    #[must_use]
    pub fn with_special_tokens(mut self, special_tokens: SpecialTokens) -> Self {
        self.special_tokens = special_tokens;
        self
    }
}
