//! Token vocabulary with reserved control slots.

use std::path::Path;

use super::config::SpecialTokens;
use super::label_map::LabelIndexMap;
use crate::error::{Error, Result};

/// Token ID type
pub type TokenId = u32;

/// Index of the padding token
pub const PAD_INDEX: usize = 0;
/// Index of the unknown token
pub const UNK_INDEX: usize = 1;

/// A [`LabelIndexMap`] over text tokens with the padding token at index 0
/// and the unknown token at index 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    map: LabelIndexMap<String>,
    special_tokens: SpecialTokens,
}

impl Vocabulary {
    /// Wrap a map whose reserved slots are already in place.
    ///
    /// Fails if the padding or unknown token is missing from its fixed index.
    pub fn from_map(map: LabelIndexMap<String>, special_tokens: SpecialTokens) -> Result<Self> {
        for (token, index) in [
            (&special_tokens.pad, PAD_INDEX),
            (&special_tokens.unk, UNK_INDEX),
        ] {
            if map.label_of(index) != Some(token) {
                return Err(Error::MissingReservedToken {
                    token: token.clone(),
                    index,
                });
            }
        }
        Ok(Self {
            map,
            special_tokens,
        })
    }

    /// Padding token index (always 0)
    #[must_use]
    pub fn pad_index(&self) -> TokenId {
        PAD_INDEX as TokenId
    }

    /// Unknown token index (always 1)
    #[must_use]
    pub fn unk_index(&self) -> TokenId {
        UNK_INDEX as TokenId
    }

    /// Reserved tokens
    #[must_use]
    pub fn special_tokens(&self) -> &SpecialTokens {
        &self.special_tokens
    }

    /// Number of entries, reserved slots included
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// A vocabulary always holds its two reserved tokens
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Look up a token's index
    #[must_use]
    pub fn get(&self, token: &str) -> Option<TokenId> {
        self.map.get_str(token).map(|i| i as TokenId)
    }

    /// Index of a token, failing if absent
    pub fn index_of(&self, token: &str) -> Result<TokenId> {
        self.get(token).ok_or_else(|| Error::KeyNotFound {
            label: token.to_string(),
        })
    }

    /// Encode a token, substituting the unknown index for tokens outside
    /// the vocabulary. The only silent fallback in the pipeline.
    #[must_use]
    pub fn encode_token(&self, token: &str) -> TokenId {
        self.get(token).unwrap_or_else(|| self.unk_index())
    }

    /// Token at an index
    #[must_use]
    pub fn token_of(&self, index: TokenId) -> Option<&str> {
        self.map.label_of(index as usize).map(String::as_str)
    }

    /// Iterate `(token, index)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (&String, usize)> {
        self.map.iter()
    }

    /// Persist as `token<TAB>index` lines in index order
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.map.save(path)
    }

    /// Load a vocabulary saved by [`save`](Self::save), verifying the
    /// reserved slots
    pub fn load(path: impl AsRef<Path>, special_tokens: SpecialTokens) -> Result<Self> {
        let map = LabelIndexMap::load(path)?;
        Self::from_map(map, special_tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn small_vocab() -> Vocabulary {
        let special = SpecialTokens::default();
        let labels = vec![
            special.pad.clone(),
            special.unk.clone(),
            "hello".to_string(),
            "world".to_string(),
        ];
        let required = vec![(special.pad.clone(), PAD_INDEX), (special.unk.clone(), UNK_INDEX)];
        let map = LabelIndexMap::with_required(labels, &required).unwrap();
        Vocabulary::from_map(map, special).unwrap()
    }

    #[test]
    fn test_reserved_indices() {
        let vocab = small_vocab();
        assert_eq!(vocab.pad_index(), 0);
        assert_eq!(vocab.unk_index(), 1);
        assert_eq!(vocab.get("<PAD>"), Some(0));
        assert_eq!(vocab.get("<UNK>"), Some(1));
    }

    #[test]
    fn test_encode_known_token() {
        let vocab = small_vocab();
        assert_eq!(vocab.encode_token("hello"), 2);
        assert_eq!(vocab.encode_token("world"), 3);
    }

    #[test]
    fn test_encode_unknown_falls_back() {
        let vocab = small_vocab();
        assert_eq!(vocab.encode_token("never-seen"), vocab.unk_index());
    }

    #[test]
    fn test_index_of_errors_without_fallback() {
        let vocab = small_vocab();
        assert!(vocab.index_of("never-seen").is_err());
        assert_eq!(vocab.index_of("hello").unwrap(), 2);
    }

    #[test]
    fn test_from_map_rejects_misplaced_reserved() {
        let labels = vec!["hello".to_string(), "<PAD>".to_string(), "<UNK>".to_string()];
        let map = LabelIndexMap::new(labels);
        let err = Vocabulary::from_map(map, SpecialTokens::default()).unwrap_err();
        assert!(matches!(err, Error::MissingReservedToken { index: 0, .. }));
    }

    #[test]
    fn test_save_load_round_trip() {
        let vocab = small_vocab();
        let file = NamedTempFile::new().unwrap();
        vocab.save(file.path()).unwrap();
        let restored = Vocabulary::load(file.path(), SpecialTokens::default()).unwrap();
        assert_eq!(vocab, restored);
    }

    #[test]
    fn test_token_of() {
        let vocab = small_vocab();
        assert_eq!(vocab.token_of(2), Some("hello"));
        assert_eq!(vocab.token_of(99), None);
    }
}
