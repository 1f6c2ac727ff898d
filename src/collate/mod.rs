//! Batch Collation Module
//!
//! Turns variable-length encoded examples into fixed-rectangular padded
//! batches plus per-example true-length vectors.
//!
//! [`PadCollator`] is the general mechanism: G parallel sequence groups per
//! example, reordered together by descending length of group 0.
//! [`CommentCollator`] is the domain instance the training loop consumes —
//! token ids padded into one array, label rows stacked into another.
//! [`BatchLoader`] chunks a dataset into one epoch of batches, optionally
//! under a seeded shuffle.
//!
//! # Example
//!
//! ```
//! use clasificar::collate::PadCollator;
//!
//! # fn main() -> clasificar::Result<()> {
//! let batch = vec![
//!     vec![vec![7i64, 8]],
//!     vec![vec![1i64, 2, 3]],
//! ];
//! let out = PadCollator::new(0i64).collate(&batch)?;
//!
//! // Longest first, shorter rows padded
//! assert_eq!(out.groups[0].dim(), (2, 3));
//! assert_eq!(out.lengths[0], vec![3, 2]);
//! # Ok(())
//! # }
//! ```

mod batch;
mod loader;
mod pad;

pub use batch::{CommentBatch, CommentCollator};
pub use loader::BatchLoader;
pub use pad::{CollatedGroups, PadCollator};
