//! Domain batch for the comment classifier.

use ndarray::Array2;

use crate::data::EncodedExample;
use crate::error::{Error, Result};
use crate::vocab::TokenId;

/// A padded batch of encoded comments ready for the model forward pass
#[derive(Debug, Clone, PartialEq)]
pub struct CommentBatch {
    /// Token ids, `(batch_size, max_seq_len)`, pad-filled
    pub token_ids: Array2<TokenId>,
    /// Per-class targets, `(batch_size, num_classes)`
    pub labels: Array2<f32>,
    /// True (pre-padding) sequence lengths in row order
    pub lengths: Vec<usize>,
}

impl CommentBatch {
    /// Number of examples in the batch
    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.token_ids.nrows()
    }

    /// Padded sequence length
    #[must_use]
    pub fn max_seq_len(&self) -> usize {
        self.token_ids.ncols()
    }
}

/// Collates encoded examples into a [`CommentBatch`].
///
/// Examples are reordered by descending token-sequence length (stable on
/// ties) and the label rows follow the same permutation, so consumers must
/// read lengths from the batch rather than assume input order.
#[derive(Debug, Clone, Copy)]
pub struct CommentCollator {
    /// Padding token id, normally the vocabulary's pad index
    pub pad_id: TokenId,
}

impl CommentCollator {
    /// Create a collator padding with `pad_id`
    #[must_use]
    pub fn new(pad_id: TokenId) -> Self {
        Self { pad_id }
    }

    /// Collate a batch of encoded examples
    pub fn collate(&self, examples: &[EncodedExample]) -> Result<CommentBatch> {
        if examples.is_empty() {
            return Ok(CommentBatch {
                token_ids: Array2::from_elem((0, 0), self.pad_id),
                labels: Array2::zeros((0, 0)),
                lengths: Vec::new(),
            });
        }

        let num_classes = examples[0].labels.len();
        for (index, example) in examples.iter().enumerate() {
            if example.labels.len() != num_classes {
                return Err(Error::LabelWidthMismatch {
                    index,
                    expected: num_classes,
                    actual: example.labels.len(),
                });
            }
        }

        let mut order: Vec<usize> = (0..examples.len()).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(examples[i].token_ids.len()));

        let batch_size = examples.len();
        let max_len = order
            .iter()
            .map(|&i| examples[i].token_ids.len())
            .max()
            .unwrap_or(0);

        let mut token_ids = Array2::from_elem((batch_size, max_len), self.pad_id);
        let mut labels = Array2::zeros((batch_size, num_classes));
        let mut lengths = Vec::with_capacity(batch_size);

        for (row, &example) in order.iter().enumerate() {
            let example = &examples[example];
            lengths.push(example.token_ids.len());
            for (col, &id) in example.token_ids.iter().enumerate() {
                token_ids[[row, col]] = id;
            }
            for (col, &value) in example.labels.iter().enumerate() {
                labels[[row, col]] = value;
            }
        }

        Ok(CommentBatch {
            token_ids,
            labels,
            lengths,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(token_ids: Vec<TokenId>, labels: Vec<f32>) -> EncodedExample {
        EncodedExample { token_ids, labels }
    }

    #[test]
    fn test_collate_sorts_and_pads() {
        let examples = vec![
            example(vec![2, 3], vec![1.0, 0.0]),
            example(vec![4, 5, 6], vec![0.0, 1.0]),
        ];
        let batch = CommentCollator::new(0).collate(&examples).unwrap();

        assert_eq!(batch.batch_size(), 2);
        assert_eq!(batch.max_seq_len(), 3);
        assert_eq!(batch.lengths, vec![3, 2]);
        // Longest example first; shorter row padded with the pad id
        assert_eq!(batch.token_ids[[0, 0]], 4);
        assert_eq!(batch.token_ids[[1, 0]], 2);
        assert_eq!(batch.token_ids[[1, 2]], 0);
        // Labels follow the same permutation
        assert_eq!(batch.labels[[0, 1]], 1.0);
        assert_eq!(batch.labels[[1, 0]], 1.0);
    }

    #[test]
    fn test_collate_empty() {
        let batch = CommentCollator::new(0).collate(&[]).unwrap();
        assert_eq!(batch.batch_size(), 0);
        assert!(batch.lengths.is_empty());
    }

    #[test]
    fn test_collate_nonzero_pad_id() {
        let examples = vec![
            example(vec![5], vec![0.0]),
            example(vec![6, 7], vec![1.0]),
        ];
        let batch = CommentCollator::new(9).collate(&examples).unwrap();
        assert_eq!(batch.token_ids[[1, 1]], 9);
    }

    #[test]
    fn test_collate_label_width_mismatch() {
        let examples = vec![
            example(vec![1], vec![0.0, 1.0]),
            example(vec![2], vec![0.0]),
        ];
        let err = CommentCollator::new(0).collate(&examples).unwrap_err();
        assert!(matches!(
            err,
            Error::LabelWidthMismatch { index: 1, expected: 2, actual: 1 }
        ));
    }

    #[test]
    fn test_collate_empty_token_sequence() {
        let examples = vec![
            example(vec![], vec![1.0]),
            example(vec![2, 3], vec![0.0]),
        ];
        let batch = CommentCollator::new(0).collate(&examples).unwrap();
        assert_eq!(batch.lengths, vec![2, 0]);
        // The empty example's row is entirely padding
        assert_eq!(batch.token_ids[[1, 0]], 0);
        assert_eq!(batch.token_ids[[1, 1]], 0);
    }
}
