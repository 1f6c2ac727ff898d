//! Vocabulary construction from a corpus.

use std::collections::HashMap;
use std::path::Path;

use super::config::VocabConfig;
use super::label_map::LabelIndexMap;
use super::vocabulary::{Vocabulary, PAD_INDEX, UNK_INDEX};
use crate::error::{Error, Result};
use crate::tokenize::Tokenize;

/// Slots reserved for the padding and unknown tokens
pub const RESERVED_SLOTS: usize = 2;

/// Builds a [`Vocabulary`] by counting token occurrences across a corpus and
/// keeping the most frequent tokens
#[derive(Debug, Clone)]
pub struct VocabBuilder {
    config: VocabConfig,
}

impl VocabBuilder {
    /// Create a builder with the given configuration
    #[must_use]
    pub fn new(config: VocabConfig) -> Self {
        Self { config }
    }

    /// Builder configuration
    #[must_use]
    pub fn config(&self) -> &VocabConfig {
        &self.config
    }

    /// Count token occurrences, select the top `max_size - 2` by frequency
    /// (frequency descending, ties lexicographic ascending), and construct
    /// the vocabulary with the reserved tokens at indices 0 and 1.
    pub fn build<'a, I>(&self, texts: I, tokenizer: &dyn Tokenize) -> Result<Vocabulary>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let budget = match self.config.max_size {
            Some(size) if size < RESERVED_SLOTS => {
                return Err(Error::VocabTooSmall {
                    requested: size,
                    reserved: RESERVED_SLOTS,
                });
            }
            Some(size) => Some(size - RESERVED_SLOTS),
            None => None,
        };

        let mut occurrences: HashMap<String, usize> = HashMap::new();
        for text in texts {
            let tokens = if self.config.lowercase {
                tokenizer.tokenize(&text.to_lowercase())
            } else {
                tokenizer.tokenize(text)
            };
            for token in tokens {
                *occurrences.entry(token).or_insert(0) += 1;
            }
        }

        let special = &self.config.special_tokens;
        let mut ranked: Vec<(String, usize)> = occurrences
            .into_iter()
            .filter(|(token, count)| {
                *count >= self.config.min_frequency
                    && token != &special.pad
                    && token != &special.unk
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        if let Some(budget) = budget {
            ranked.truncate(budget);
        }

        let mut labels = Vec::with_capacity(ranked.len() + RESERVED_SLOTS);
        labels.push(special.pad.clone());
        labels.push(special.unk.clone());
        labels.extend(ranked.into_iter().map(|(token, _)| token));

        let required = vec![
            (special.pad.clone(), PAD_INDEX),
            (special.unk.clone(), UNK_INDEX),
        ];
        let map = LabelIndexMap::with_required(labels, &required)?;
        Vocabulary::from_map(map, special.clone())
    }

    /// Build the vocabulary and persist it to `path`
    pub fn build_to_file<'a, I>(
        &self,
        texts: I,
        tokenizer: &dyn Tokenize,
        path: impl AsRef<Path>,
    ) -> Result<Vocabulary>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let vocabulary = self.build(texts, tokenizer)?;
        vocabulary.save(path)?;
        Ok(vocabulary)
    }
}
