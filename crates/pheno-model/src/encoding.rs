//! Code-to-label encodings and bin label construction.
//!
//! Each categorical field carries a dictionary mapping integer answer codes
//! to human-readable labels. Negative codes are bookkeeping sentinels
//! ("prefer not to answer", "do not know") and are never binarized, with
//! one exception: `-7`, "none of the above", is a meaningful answer for
//! multi-choice fields.

use std::collections::BTreeMap;

/// The one negative code that carries meaning for multi-choice fields.
pub const NONE_OF_THE_ABOVE: i64 = -7;

/// Collapses internal whitespace in a label to single dashes.
///
/// `"Most days"` becomes `"Most-days"`. Used verbatim for direct two-way
/// bin labels; one-hot and multi-code bin labels additionally strip commas
/// first (see [`sanitize_label`]).
pub fn collapse_whitespace(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Strips commas from a label, then collapses whitespace to dashes.
///
/// `"Yes, on most days"` becomes `"Yes-on-most-days"`.
pub fn sanitize_label(label: &str) -> String {
    collapse_whitespace(&label.replace(',', ""))
}

/// Code-to-label dictionary for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldEncoding {
    labels: BTreeMap<i64, String>,
}

impl FieldEncoding {
    pub fn new(labels: BTreeMap<i64, String>) -> Self {
        Self { labels }
    }

    /// Build an encoding from `(code, label)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        Self {
            labels: pairs
                .into_iter()
                .map(|(code, label)| (code, label.into()))
                .collect(),
        }
    }

    /// The codes eligible for binarization: all non-negative codes in
    /// ascending order.
    pub fn relevant_codes(&self) -> Vec<i64> {
        self.labels.keys().copied().filter(|code| *code >= 0).collect()
    }

    /// The codes eligible for one-hot expansion: the relevant codes, then
    /// `-7` appended last when the dictionary defines it.
    pub fn one_hot_codes(&self) -> Vec<i64> {
        let mut codes = self.relevant_codes();
        if self.labels.contains_key(&NONE_OF_THE_ABOVE) {
            codes.push(NONE_OF_THE_ABOVE);
        }
        codes
    }

    /// Raw label for a code, if the dictionary defines one.
    pub fn label(&self, code: i64) -> Option<&str> {
        self.labels.get(&code).map(String::as_str)
    }

    /// Label for a direct two-way bin: whitespace collapsed, commas kept.
    pub fn two_way_label(&self, code: i64) -> Option<String> {
        self.label(code).map(collapse_whitespace)
    }

    /// Label for a one-hot column: commas stripped, whitespace collapsed.
    pub fn one_hot_label(&self, code: i64) -> Option<String> {
        self.label(code).map(sanitize_label)
    }

    /// Label for a multi-code bin: each member label sanitized, joined
    /// with `|` in the order given.
    pub fn bin_label(&self, codes: &[i64]) -> String {
        codes
            .iter()
            .filter_map(|code| self.one_hot_label(*code))
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Inverted sanitized-label-to-code map, for resolving a binarized
    /// column name back to the code it represents.
    pub fn inverted(&self) -> BTreeMap<String, i64> {
        self.labels
            .iter()
            .map(|(code, label)| (sanitize_label(label), *code))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
