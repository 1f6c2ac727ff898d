//! Per-epoch batch production.

use rand::prelude::*;

use super::batch::{CommentBatch, CommentCollator};
use crate::data::CommentDataset;
use crate::error::{Error, Result};

/// Produces one epoch of padded batches from a dataset.
///
/// With `shuffle` set, the example order is a fresh seeded permutation per
/// epoch (train loader); otherwise corpus order is kept (validation loader).
/// The dataset itself is never reordered.
pub struct BatchLoader<'a> {
    dataset: &'a CommentDataset,
    collator: CommentCollator,
    batch_size: usize,
    shuffle: bool,
    seed: u64,
}

impl std::fmt::Debug for BatchLoader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchLoader")
            .field("batch_size", &self.batch_size)
            .field("shuffle", &self.shuffle)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl<'a> BatchLoader<'a> {
    /// Create a loader over `dataset`
    pub fn new(
        dataset: &'a CommentDataset,
        collator: CommentCollator,
        batch_size: usize,
        shuffle: bool,
        seed: u64,
    ) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::InvalidBatchSize);
        }
        Ok(Self {
            dataset,
            collator,
            batch_size,
            shuffle,
            seed,
        })
    }

    /// Number of batches per epoch (last batch may be short)
    #[must_use]
    pub fn num_batches(&self) -> usize {
        self.dataset.len().div_ceil(self.batch_size)
    }

    /// Collate one epoch of batches.
    ///
    /// The permutation depends only on `(seed, epoch)`, so an epoch can be
    /// reproduced exactly.
    pub fn batches(&self, epoch: u64) -> Result<Vec<CommentBatch>> {
        let mut indices: Vec<usize> = (0..self.dataset.len()).collect();
        if self.shuffle {
            let mut rng = StdRng::seed_from_u64(self.seed ^ epoch);
            indices.shuffle(&mut rng);
        }

        let mut batches = Vec::with_capacity(self.num_batches());
        for chunk in indices.chunks(self.batch_size) {
            let examples: Vec<_> = chunk
                .iter()
                .map(|&i| {
                    self.dataset
                        .get(i)
                        .expect("index within dataset bounds")
                })
                .collect();
            batches.push(self.collator.collate(&examples)?);
        }
        Ok(batches)
    }
}
