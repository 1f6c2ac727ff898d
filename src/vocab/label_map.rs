//! Contiguous label-index mapping.
//!
//! [`LabelIndexMap`] remaps N arbitrary labels to the contiguous range
//! `[0, N-1]` and back. Indices have no gaps and no duplicates; the inverse
//! direction is exact. Specific labels can be pinned to specific indices at
//! construction time, which is how the vocabulary keeps its reserved tokens
//! at fixed slots.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::hash::Hash;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};

/// Bijection between labels and the contiguous index range `[0, N-1]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelIndexMap<L: Eq + Hash> {
    /// Index order; position i holds the label mapped to i
    labels: Vec<L>,
    indices: HashMap<L, usize>,
}

impl<L: Eq + Hash + Clone> LabelIndexMap<L> {
    /// Build a map over the deduplicated labels, indexed in first-seen order.
    ///
    /// First-seen order makes two runs over identical input produce identical
    /// maps, so saved vocabularies are reproducible byte for byte.
    pub fn new<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
    {
        let mut unique = Vec::new();
        let mut indices = HashMap::new();
        for label in labels {
            if !indices.contains_key(&label) {
                indices.insert(label.clone(), unique.len());
                unique.push(label);
            }
        }
        Self {
            labels: unique,
            indices,
        }
    }

    /// Build a map with labels indexed in ascending `Ord` order
    pub fn sorted<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Ord,
    {
        let mut map = Self::new(labels);
        map.labels.sort();
        map.indices = map
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();
        map
    }

    /// Build a map where every `(label, position)` pair in `required` is
    /// honored exactly; remaining labels fill the free slots in first-seen
    /// order.
    ///
    /// Fails if a position is out of range, if two distinct labels claim the
    /// same position, or if a required label is not in the label set.
    pub fn with_required<I>(labels: I, required: &[(L, usize)]) -> Result<Self>
    where
        I: IntoIterator<Item = L>,
        L: fmt::Display,
    {
        let unordered = Self::new(labels);
        let n = unordered.len();

        let mut claimed: HashMap<usize, &L> = HashMap::new();
        let mut pinned: HashMap<&L, usize> = HashMap::new();
        for (label, position) in required {
            if *position >= n {
                return Err(Error::PositionOutOfRange {
                    position: *position,
                    len: n,
                });
            }
            if !unordered.indices.contains_key(label) {
                return Err(Error::UnknownRequiredLabel {
                    label: label.to_string(),
                });
            }
            if let Some(&previous) = pinned.get(label) {
                if previous != *position {
                    return Err(Error::DuplicateRequiredLabel {
                        label: label.to_string(),
                        first: previous,
                        second: *position,
                    });
                }
                continue;
            }
            if let Some(&holder) = claimed.get(position) {
                if holder != label {
                    return Err(Error::ConflictingRequirement {
                        first: holder.to_string(),
                        second: label.to_string(),
                        position: *position,
                    });
                }
            }
            claimed.insert(*position, label);
            pinned.insert(label, *position);
        }

        // Place required labels, then fill the free slots in first-seen order.
        let mut slots: Vec<Option<L>> = vec![None; n];
        for (&position, &label) in &claimed {
            slots[position] = Some(label.clone());
        }
        let free_slots: Vec<usize> = slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.is_none().then_some(i))
            .collect();
        let mut free = free_slots.into_iter();
        for label in &unordered.labels {
            if !pinned.contains_key(label) {
                let slot = free.next().expect("free slot per unpinned label");
                slots[slot] = Some(label.clone());
            }
        }

        let labels: Vec<L> = slots.into_iter().map(|s| s.expect("every slot filled")).collect();
        let indices = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();
        Ok(Self { labels, indices })
    }

    /// Number of labels in the map
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the map is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Check membership
    #[must_use]
    pub fn contains(&self, label: &L) -> bool {
        self.indices.contains_key(label)
    }

    /// Look up the index of a label
    #[must_use]
    pub fn get(&self, label: &L) -> Option<usize> {
        self.indices.get(label).copied()
    }

    /// Index of a label, failing if absent.
    ///
    /// Callers that want a fallback (the dataset's unknown-token path) use
    /// [`get`](Self::get) and substitute their own default.
    pub fn index_of(&self, label: &L) -> Result<usize>
    where
        L: fmt::Display,
    {
        self.get(label).ok_or_else(|| Error::KeyNotFound {
            label: label.to_string(),
        })
    }

    /// Label at an index
    #[must_use]
    pub fn label_of(&self, index: usize) -> Option<&L> {
        self.labels.get(index)
    }

    /// Iterate `(label, index)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (&L, usize)> {
        self.labels.iter().enumerate().map(|(i, label)| (label, i))
    }
}

impl LabelIndexMap<String> {
    /// Borrowed-key lookup for string maps
    #[must_use]
    pub fn get_str(&self, label: &str) -> Option<usize> {
        self.indices.get(label).copied()
    }

    /// Write the map as `label<TAB>index` lines in index order
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        for (label, index) in self.iter() {
            writeln!(writer, "{label}\t{index}")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Read a map saved by [`save`](Self::save).
    ///
    /// Fields are split on any whitespace, so the legacy space-separated
    /// format parses too. A line without exactly two fields, or with an
    /// unparsable index, fails the whole load. Reconstruction pins every
    /// entry to its saved position, so the loaded map is index-identical to
    /// the saved one.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut entries: Vec<(String, usize)> = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let malformed = || Error::MalformedVocabLine {
                path: path.to_path_buf(),
                line: line_no + 1,
                content: line.clone(),
            };
            let mut fields = line.split_whitespace();
            let label = fields.next().ok_or_else(malformed)?;
            let index = fields
                .next()
                .and_then(|f| f.parse::<usize>().ok())
                .ok_or_else(malformed)?;
            if fields.next().is_some() {
                return Err(malformed());
            }
            entries.push((label.to_string(), index));
        }

        let labels: Vec<String> = entries.iter().map(|(label, _)| label.clone()).collect();
        Self::with_required(labels, &entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_first_seen_order() {
        let map = LabelIndexMap::new(labels(&["c", "a", "b"]));
        assert_eq!(map.get(&"c".to_string()), Some(0));
        assert_eq!(map.get(&"a".to_string()), Some(1));
        assert_eq!(map.get(&"b".to_string()), Some(2));
    }

    #[test]
    fn test_new_dedupes() {
        let map = LabelIndexMap::new(labels(&["a", "b", "a", "a", "b"]));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"a".to_string()), Some(0));
        assert_eq!(map.get(&"b".to_string()), Some(1));
    }

    #[test]
    fn test_sorted_order() {
        let map = LabelIndexMap::sorted(labels(&["c", "a", "b"]));
        assert_eq!(map.get(&"a".to_string()), Some(0));
        assert_eq!(map.get(&"b".to_string()), Some(1));
        assert_eq!(map.get(&"c".to_string()), Some(2));
    }

    #[test]
    fn test_with_required_places_labels() {
        let required = vec![("x".to_string(), 0), ("y".to_string(), 2)];
        let map = LabelIndexMap::with_required(labels(&["a", "x", "b", "y"]), &required).unwrap();
        assert_eq!(map.get(&"x".to_string()), Some(0));
        assert_eq!(map.get(&"y".to_string()), Some(2));
        // Remaining labels keep first-seen order in the free slots
        assert_eq!(map.get(&"a".to_string()), Some(1));
        assert_eq!(map.get(&"b".to_string()), Some(3));
    }

    #[test]
    fn test_with_required_position_out_of_range() {
        let required = vec![("a".to_string(), 3)];
        let err = LabelIndexMap::with_required(labels(&["a", "b"]), &required).unwrap_err();
        assert!(matches!(err, Error::PositionOutOfRange { position: 3, len: 2 }));
    }

    #[test]
    fn test_with_required_conflicting_positions() {
        let required = vec![("a".to_string(), 0), ("b".to_string(), 0)];
        let err = LabelIndexMap::with_required(labels(&["a", "b"]), &required).unwrap_err();
        assert!(matches!(err, Error::ConflictingRequirement { position: 0, .. }));
    }

    #[test]
    fn test_with_required_duplicate_pair_is_fine() {
        let required = vec![("a".to_string(), 1), ("a".to_string(), 1)];
        let map = LabelIndexMap::with_required(labels(&["a", "b"]), &required).unwrap();
        assert_eq!(map.get(&"a".to_string()), Some(1));
        assert_eq!(map.get(&"b".to_string()), Some(0));
    }

    #[test]
    fn test_with_required_unknown_label() {
        let required = vec![("z".to_string(), 0)];
        let err = LabelIndexMap::with_required(labels(&["a", "b"]), &required).unwrap_err();
        assert!(matches!(err, Error::UnknownRequiredLabel { .. }));
    }

    #[test]
    fn test_index_of_missing_label() {
        let map = LabelIndexMap::new(labels(&["a"]));
        let err = map.index_of(&"missing".to_string()).unwrap_err();
        assert!(matches!(err, Error::KeyNotFound { .. }));
    }

    #[test]
    fn test_label_of_inverse() {
        let map = LabelIndexMap::new(labels(&["a", "b", "c"]));
        for (label, index) in map.iter() {
            assert_eq!(map.label_of(index), Some(label));
        }
        assert_eq!(map.label_of(3), None);
    }

    #[test]
    fn test_save_load_round_trip() {
        let required = vec![("p".to_string(), 0), ("u".to_string(), 1)];
        let map =
            LabelIndexMap::with_required(labels(&["p", "u", "hello", "world"]), &required).unwrap();

        let file = NamedTempFile::new().unwrap();
        map.save(file.path()).unwrap();
        let restored = LabelIndexMap::load(file.path()).unwrap();

        assert_eq!(map, restored);
    }

    #[test]
    fn test_load_accepts_space_separated() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "a 0\nb 1\n").unwrap();
        let map = LabelIndexMap::load(file.path()).unwrap();
        assert_eq!(map.get(&"a".to_string()), Some(0));
        assert_eq!(map.get(&"b".to_string()), Some(1));
    }

    #[test]
    fn test_load_rejects_malformed_line() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "a\t0\njust-a-label\n").unwrap();
        let err = LabelIndexMap::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::MalformedVocabLine { line: 2, .. }));
    }

    #[test]
    fn test_load_rejects_non_numeric_index() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "a\tzero\n").unwrap();
        let err = LabelIndexMap::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::MalformedVocabLine { line: 1, .. }));
    }
}
