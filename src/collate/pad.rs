//! General padded collation of grouped variable-length sequences.

use ndarray::Array2;

use crate::error::{Error, Result};

/// Result of collating G parallel groups across a batch
#[derive(Debug, Clone, PartialEq)]
pub struct CollatedGroups<T> {
    /// One `(batch_size, max_len_g)` array per group, pad-filled past each
    /// example's true length
    pub groups: Vec<Array2<T>>,
    /// One pre-padding length vector per group, in post-sort example order
    pub lengths: Vec<Vec<usize>>,
}

impl<T> CollatedGroups<T> {
    /// Number of examples in the batch
    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.groups.first().map_or(0, |group| group.nrows())
    }

    /// Number of parallel groups
    #[must_use]
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }
}

/// Collates batches of grouped variable-length sequences into padded
/// rectangular arrays plus per-example true lengths.
///
/// Each example holds the same number of parallel sequences ("groups"), e.g.
/// group 0 token ids and group 1 part-of-speech tags. Examples are reordered
/// by descending length of group 0 and the same permutation is applied to
/// every group, so downstream consumers must use the returned length vectors
/// rather than the original batch order.
#[derive(Debug, Clone, Copy)]
pub struct PadCollator<T> {
    /// Fill value for positions past an example's true length
    pub pad_value: T,
}

impl<T: Copy> PadCollator<T> {
    /// Create a collator with the given padding value
    #[must_use]
    pub fn new(pad_value: T) -> Self {
        Self { pad_value }
    }

    /// Collate a batch; example `i` contributes `batch[i][g]` to group `g`.
    ///
    /// Every variable-length group must carry the same per-example length
    /// profile as group 0 — sorting by group 0 would silently misalign it
    /// otherwise, so the mismatch is an error here. Groups whose sequences
    /// all share one length (a fixed-width label group) are exempt.
    pub fn collate(&self, batch: &[Vec<Vec<T>>]) -> Result<CollatedGroups<T>> {
        if batch.is_empty() {
            return Ok(CollatedGroups {
                groups: Vec::new(),
                lengths: Vec::new(),
            });
        }

        let num_groups = batch[0].len();
        for (index, example) in batch.iter().enumerate() {
            if example.len() != num_groups {
                return Err(Error::GroupCountMismatch {
                    index,
                    expected: num_groups,
                    actual: example.len(),
                });
            }
        }

        // Descending length of group 0; stable, so ties keep original order.
        let mut order: Vec<usize> = (0..batch.len()).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(batch[i][0].len()));

        for group in 1..num_groups {
            let uniform = batch
                .windows(2)
                .all(|w| w[0][group].len() == w[1][group].len());
            if uniform {
                continue;
            }
            for (index, example) in batch.iter().enumerate() {
                let expected = example[0].len();
                let actual = example[group].len();
                if actual != expected {
                    return Err(Error::LengthProfileMismatch {
                        group,
                        index,
                        expected,
                        actual,
                    });
                }
            }
        }

        let batch_size = batch.len();
        let mut groups = Vec::with_capacity(num_groups);
        let mut lengths = Vec::with_capacity(num_groups);
        for group in 0..num_groups {
            let max_len = order
                .iter()
                .map(|&i| batch[i][group].len())
                .max()
                .unwrap_or(0);
            let mut padded = Array2::from_elem((batch_size, max_len), self.pad_value);
            let mut group_lengths = Vec::with_capacity(batch_size);
            for (row, &example) in order.iter().enumerate() {
                let sequence = &batch[example][group];
                group_lengths.push(sequence.len());
                for (col, &value) in sequence.iter().enumerate() {
                    padded[[row, col]] = value;
                }
            }
            groups.push(padded);
            lengths.push(group_lengths);
        }

        Ok(CollatedGroups { groups, lengths })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_group(lengths: &[usize]) -> Vec<Vec<Vec<i64>>> {
        lengths
            .iter()
            .enumerate()
            .map(|(i, &len)| vec![(0..len as i64).map(|v| v + 10 * i as i64).collect()])
            .collect()
    }

    #[test]
    fn test_shape_and_order_law() {
        // Group-0 lengths [5, 2, 8] -> shape (3, 8), rows by descending length
        let batch = single_group(&[5, 2, 8]);
        let out = PadCollator::new(0i64).collate(&batch).unwrap();

        assert_eq!(out.groups[0].dim(), (3, 8));
        assert_eq!(out.lengths[0], vec![8, 5, 2]);
        // Row 0 is the original example 2 (length 8)
        assert_eq!(out.groups[0][[0, 0]], 20);
        // Row 1 is the original example 0 (length 5)
        assert_eq!(out.groups[0][[1, 0]], 0);
        // Positions past the true length hold the pad value
        assert_eq!(out.groups[0][[1, 5]], 0);
        assert_eq!(out.groups[0][[2, 2]], 0);
    }

    #[test]
    fn test_pad_value_fills_tail() {
        let batch = single_group(&[3, 1]);
        let out = PadCollator::new(-1i64).collate(&batch).unwrap();
        assert_eq!(out.groups[0][[1, 1]], -1);
        assert_eq!(out.groups[0][[1, 2]], -1);
    }

    #[test]
    fn test_stable_tie_order() {
        let batch = vec![
            vec![vec![1i64, 1]],
            vec![vec![2i64, 2]],
            vec![vec![3i64, 3, 3]],
        ];
        let out = PadCollator::new(0i64).collate(&batch).unwrap();
        // The two length-2 examples keep their original relative order
        assert_eq!(out.groups[0][[1, 0]], 1);
        assert_eq!(out.groups[0][[2, 0]], 2);
    }

    #[test]
    fn test_empty_batch() {
        let out = PadCollator::new(0i64).collate(&[]).unwrap();
        assert_eq!(out.batch_size(), 0);
        assert_eq!(out.num_groups(), 0);
    }

    #[test]
    fn test_two_variable_groups_consistent() {
        let batch = vec![
            vec![vec![1i64, 2, 3], vec![7i64, 8, 9]],
            vec![vec![4i64], vec![5i64]],
        ];
        let out = PadCollator::new(0i64).collate(&batch).unwrap();
        assert_eq!(out.num_groups(), 2);
        assert_eq!(out.lengths[0], vec![3, 1]);
        assert_eq!(out.lengths[1], vec![3, 1]);
        // The permutation from group 0 carries over to group 1
        assert_eq!(out.groups[1][[0, 0]], 7);
        assert_eq!(out.groups[1][[1, 0]], 5);
    }

    #[test]
    fn test_fixed_width_group_exempt() {
        // Group 1 is a fixed-width label group; its length never matches
        // group 0 and must not be forced to
        let batch = vec![
            vec![vec![1i64, 2, 3], vec![1i64, 0]],
            vec![vec![4i64], vec![0i64, 1]],
        ];
        let out = PadCollator::new(0i64).collate(&batch).unwrap();
        assert_eq!(out.lengths[1], vec![2, 2]);
    }

    #[test]
    fn test_inconsistent_variable_group_rejected() {
        let batch = vec![
            vec![vec![1i64, 2, 3], vec![7i64]],
            vec![vec![4i64], vec![5i64, 6]],
        ];
        let err = PadCollator::new(0i64).collate(&batch).unwrap_err();
        assert!(matches!(err, Error::LengthProfileMismatch { group: 1, .. }));
    }

    #[test]
    fn test_group_count_mismatch_rejected() {
        let batch = vec![vec![vec![1i64]], vec![vec![2i64], vec![3i64]]];
        let err = PadCollator::new(0i64).collate(&batch).unwrap_err();
        assert!(matches!(
            err,
            Error::GroupCountMismatch { index: 1, expected: 1, actual: 2 }
        ));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_shapes_and_lengths(
            lengths in proptest::collection::vec(0usize..16, 1..12),
        ) {
            let batch: Vec<Vec<Vec<i64>>> = lengths
                .iter()
                .map(|&len| vec![vec![1i64; len]])
                .collect();
            let out = PadCollator::new(0i64).collate(&batch).unwrap();

            let max_len = lengths.iter().copied().max().unwrap_or(0);
            prop_assert_eq!(out.groups[0].dim(), (lengths.len(), max_len));

            // Lengths come back sorted descending and are a permutation of
            // the inputs
            let mut expected = lengths.clone();
            expected.sort_unstable_by(|a, b| b.cmp(a));
            prop_assert_eq!(&out.lengths[0], &expected);

            // Every row: ones up to its length, pad after
            for (row, &len) in out.lengths[0].iter().enumerate() {
                for col in 0..max_len {
                    let expected = i64::from(col < len);
                    prop_assert_eq!(out.groups[0][[row, col]], expected);
                }
            }
        }
    }
}
