//! Label file access for directory-backed datasets.
//!
//! A dataset directory holds a `Labels.txt` file (one class label per
//! line) plus one numbered subdirectory per line; the line index is the
//! directory index holding that sample's files. Labels are carried as
//! [`Sample`] values pairing the label string with its origin index, so
//! later stages never have to recover an index by label value. Duplicate
//! label strings are legal.

use std::fs;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::utils::error::{FoldError, Result};

/// Name of the label file inside every dataset directory.
pub const LABEL_FILE: &str = "Labels.txt";

/// One dataset sample: its class label and the index of the directory
/// holding its files in the origin dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub label: String,
    pub origin_index: usize,
}

impl Sample {
    pub fn new(label: impl Into<String>, origin_index: usize) -> Self {
        Self {
            label: label.into(),
            origin_index,
        }
    }
}

/// Ordered sequence of samples as read from a label file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    samples: Vec<Sample>,
}

impl LabelSet {
    /// Builds a set from labels in line order; position becomes the
    /// origin index.
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let samples = labels
            .into_iter()
            .enumerate()
            .map(|(origin_index, label)| Sample::new(label, origin_index))
            .collect();
        Self { samples }
    }

    /// Builds a set from already-indexed samples (a permutation or a
    /// subset of another set).
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    /// Label strings in set order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.samples.iter().map(|s| s.label.as_str())
    }
}

/// Reads the label file from `dir`: one label per line with trailing
/// whitespace stripped, line order preserved.
pub fn read_labels(dir: &Path) -> Result<LabelSet> {
    let path = dir.join(LABEL_FILE);
    if !path.is_file() {
        return Err(FoldError::MissingLabelFile(dir.to_path_buf()));
    }

    let file = File::open(&path)?;
    let mut labels = Vec::new();
    for line in BufReader::new(file).lines() {
        labels.push(line?.trim_end().to_string());
    }

    Ok(LabelSet::from_labels(labels))
}

/// Writes one label per line to `dir/Labels.txt`, creating `dir` if
/// needed and overwriting any existing file.
///
/// Must be called with the final ordering for that directory: the order
/// written here is the index-to-label mapping readers will use.
pub fn write_labels<'a, I>(labels: I, dir: &Path) -> Result<()>
where
    I: IntoIterator<Item = &'a Sample>,
{
    fs::create_dir_all(dir)?;

    let mut contents = String::new();
    for sample in labels {
        contents.push_str(&sample.label);
        contents.push('\n');
    }

    fs::write(dir.join(LABEL_FILE), contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_label_file(dir: &Path, contents: &str) {
        fs::write(dir.join(LABEL_FILE), contents).unwrap();
    }

    #[test]
    fn test_read_preserves_line_order() {
        let temp = TempDir::new().unwrap();
        write_label_file(temp.path(), "cat\ndog\nbird\n");

        let set = read_labels(temp.path()).unwrap();
        let labels: Vec<_> = set.labels().collect();
        assert_eq!(labels, vec!["cat", "dog", "bird"]);
    }

    #[test]
    fn test_read_assigns_origin_indices_from_line_order() {
        let temp = TempDir::new().unwrap();
        write_label_file(temp.path(), "cat\ndog\ncat\n");

        let set = read_labels(temp.path()).unwrap();
        assert_eq!(set.samples()[0], Sample::new("cat", 0));
        assert_eq!(set.samples()[1], Sample::new("dog", 1));
        assert_eq!(set.samples()[2], Sample::new("cat", 2));
    }

    #[test]
    fn test_read_strips_trailing_whitespace() {
        let temp = TempDir::new().unwrap();
        write_label_file(temp.path(), "cat  \ndog\t\r\n");

        let set = read_labels(temp.path()).unwrap();
        let labels: Vec<_> = set.labels().collect();
        assert_eq!(labels, vec!["cat", "dog"]);
    }

    #[test]
    fn test_read_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = read_labels(temp.path()).unwrap_err();
        assert!(matches!(err, FoldError::MissingLabelFile(_)));
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let temp = TempDir::new().unwrap();
        let set = LabelSet::from_labels(["dog", "bird", "cat", "cat"]);

        write_labels(set.samples(), temp.path()).unwrap();
        let read_back = read_labels(temp.path()).unwrap();

        assert_eq!(read_back, set);
    }

    #[test]
    fn test_write_produces_one_line_per_label() {
        let temp = TempDir::new().unwrap();
        let set = LabelSet::from_labels(["a", "b", "c"]);

        write_labels(set.samples(), temp.path()).unwrap();
        let contents = fs::read_to_string(temp.path().join(LABEL_FILE)).unwrap();

        assert_eq!(contents, "a\nb\nc\n");
    }

    #[test]
    fn test_write_creates_directory() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("out").join("train");
        let set = LabelSet::from_labels(["a"]);

        write_labels(set.samples(), &nested).unwrap();
        assert!(nested.join(LABEL_FILE).is_file());
    }

    #[test]
    fn test_empty_file_round_trip() {
        let temp = TempDir::new().unwrap();
        let empty = LabelSet::default();

        write_labels(empty.samples(), temp.path()).unwrap();
        let read_back = read_labels(temp.path()).unwrap();

        assert!(read_back.is_empty());
    }
}
