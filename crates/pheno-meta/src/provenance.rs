//! Old-to-new column name provenance across the meta table.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use crate::error::Result;
use crate::rename::RenamePair;

/// One provenance row: a binarized column and its meta table name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRename {
    pub old: String,
    pub new: String,
}

/// Ordered record of every rename performed while assembling the meta
/// table. Row order follows field processing order, never a sort.
#[derive(Debug, Clone, Default)]
pub struct ProvenanceTable {
    records: Vec<ColumnRename>,
}

impl ProvenanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, old: impl Into<String>, new: impl Into<String>) {
        self.records.push(ColumnRename {
            old: old.into(),
            new: new.into(),
        });
    }

    /// Appends one field's rename pairs, preserving their order.
    pub fn extend_from_pairs(&mut self, pairs: &[RenamePair]) {
        for (old, new) in pairs {
            self.push(old.clone(), new.clone());
        }
    }

    pub fn records(&self) -> &[ColumnRename] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Renders the table as a two-column dataframe for storage.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let old: Vec<String> = self.records.iter().map(|r| r.old.clone()).collect();
        let new: Vec<String> = self.records.iter().map(|r| r.new.clone()).collect();
        let cols: Vec<Column> = vec![
            Series::new("old".into(), old).into_column(),
            Series::new("new".into(), new).into_column(),
        ];
        Ok(DataFrame::new(cols)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut provenance = ProvenanceTable::new();
        provenance.push("binarized_Yes_high", "Input_2_high");
        provenance.push("binarized_No_low", "Input_2_low");
        let olds: Vec<&str> = provenance
            .records()
            .iter()
            .map(|r| r.old.as_str())
            .collect();
        assert_eq!(olds, vec!["binarized_Yes_high", "binarized_No_low"]);
    }

    #[test]
    fn renders_two_columns() {
        let mut provenance = ProvenanceTable::new();
        provenance.push("a", "b");
        let frame = provenance.to_frame().unwrap();
        assert_eq!(frame.height(), 1);
        assert_eq!(frame.width(), 2);
    }
}
