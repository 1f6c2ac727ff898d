//! Corpus loading and partitioning.
//!
//! The corpus is a comma-separated file with a header row. Column 0 carries a
//! record id, column 1 the comment text, and the following `num_classes`
//! columns the per-class binary indicators.

use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{Error, Result};

/// One labeled example: raw text plus per-class indicator values
#[derive(Debug, Clone, PartialEq)]
pub struct CommentRow {
    /// Free-form comment text
    pub text: String,
    /// Per-class indicators, `num_classes` wide
    pub labels: Vec<f32>,
}

/// Read all rows from a corpus file, skipping the header.
///
/// A record with fewer than `2 + num_classes` fields or an unparsable label
/// field fails the whole load; a silently incomplete corpus is worse than no
/// corpus.
pub fn read_rows(path: impl AsRef<Path>, num_classes: usize) -> Result<Vec<CommentRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for (record_no, record) in reader.records().enumerate() {
        let record = record?;
        let expected_fields = 2 + num_classes;
        if record.len() < expected_fields {
            return Err(Error::MalformedRecord {
                record: record_no,
                expected: num_classes,
                found: record.len(),
            });
        }

        let text = record[1].to_string();
        let mut labels = Vec::with_capacity(num_classes);
        for field in record.iter().skip(2).take(num_classes) {
            let value = field.parse::<f32>().map_err(|_| Error::InvalidLabelValue {
                record: record_no,
                value: field.to_string(),
            })?;
            labels.push(value);
        }
        rows.push(CommentRow { text, labels });
    }
    Ok(rows)
}

/// Split rows into train and validation partitions.
///
/// `train_len = floor((1 - val_ratio) * len)`; the first `train_len` rows go
/// to train, the remainder to validation. No shuffling happens here — file
/// order determines membership, and per-epoch shuffling is the loader's job.
pub fn split_rows<T>(mut rows: Vec<T>, val_ratio: f64) -> Result<(Vec<T>, Vec<T>)> {
    if !(0.0..1.0).contains(&val_ratio) {
        return Err(Error::InvalidRatio { ratio: val_ratio });
    }
    let train_len = ((1.0 - val_ratio) * rows.len() as f64) as usize;
    let val = rows.split_off(train_len);
    Ok((rows, val))
}
