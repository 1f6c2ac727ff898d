//! Vocabulary Module
//!
//! Maps free-form text tokens to a stable contiguous index space.
//!
//! A [`LabelIndexMap`] is the general mechanism: a bijection between N
//! arbitrary labels and the range `[0, N-1]`, with optional pinned positions.
//! A [`Vocabulary`] specializes it to tokens, reserving index 0 for the
//! padding token and index 1 for the unknown token. [`VocabBuilder`] derives
//! a vocabulary from a corpus by frequency.
//!
//! # Example
//!
//! ```
//! use clasificar::tokenize::WhitespaceTokenizer;
//! use clasificar::vocab::{VocabBuilder, VocabConfig};
//!
//! # fn main() -> clasificar::Result<()> {
//! let config = VocabConfig::default().with_max_size(100);
//! let vocab = VocabBuilder::new(config)
//!     .build(["you are great", "you all are"], &WhitespaceTokenizer)?;
//!
//! assert_eq!(vocab.get("<PAD>"), Some(0));
//! assert_eq!(vocab.get("<UNK>"), Some(1));
//! assert_eq!(vocab.encode_token("never-seen"), vocab.unk_index());
//! # Ok(())
//! # }
//! ```

mod builder;
mod config;
mod label_map;
mod vocabulary;

pub use builder::{VocabBuilder, RESERVED_SLOTS};
pub use config::{SpecialTokens, VocabConfig};
pub use label_map::LabelIndexMap;
pub use vocabulary::{TokenId, Vocabulary, PAD_INDEX, UNK_INDEX};
