//! Pluggable text tokenizers.
//!
//! Vocabulary building and dataset encoding both go through the [`Tokenize`]
//! trait, so the token stream is identical on both sides of the pipeline.

/// Splits text into tokens
pub trait Tokenize: Send + Sync {
    /// Tokenize text into owned tokens
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Whitespace tokenizer (the default)
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenize for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

/// Word tokenizer: whitespace split with leading/trailing punctuation runs
/// emitted as their own tokens, so `"hello!"` becomes `hello` + `!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    fn split_word(word: &str, out: &mut Vec<String>) {
        let core_start = word
            .find(|c: char| c.is_alphanumeric())
            .unwrap_or(word.len());
        let core_end = word
            .rfind(|c: char| c.is_alphanumeric())
            .map_or(core_start, |i| i + word[i..].chars().next().map_or(1, char::len_utf8));

        if core_start > 0 {
            out.push(word[..core_start].to_string());
        }
        if core_end > core_start {
            out.push(word[core_start..core_end].to_string());
        }
        if core_end < word.len() {
            out.push(word[core_end..].to_string());
        }
    }
}

impl Tokenize for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for word in text.split_whitespace() {
            Self::split_word(word, &mut tokens);
        }
        tokens
    }
}
