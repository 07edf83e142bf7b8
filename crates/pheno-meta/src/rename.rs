//! Deterministic renaming of binarized columns for the meta table.
//!
//! Every column entering the meta table is renamed to
//! `Input_<fieldId>_<suffix>`. Which suffix is used depends on the
//! field's type and ordinality:
//!
//! 1. **Plain suffix** — the trailing token of the binarized name
//!    (`low`/`high`), for numerical and ordinal single-choice fields.
//! 2. **Encoding lookup** — the answer code recovered by resolving the
//!    embedded label through the inverted label-to-code dictionary, for
//!    one-hot and multi-choice fields.
//! 3. **Mixed split** — one-hot columns through strategy 2 (using the
//!    "ohe" dictionary) first, then the `low`/`high` columns through
//!    strategy 1, preserving relative order within each group.

use pheno_model::{FieldEncoding, FieldId, FieldType, Ordinality};

use pheno_binarize::BINARIZED_PREFIX;

/// One old-name/new-name pair, in meta column order.
pub type RenamePair = (String, String);

/// The renaming strategy a field resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameStrategy {
    PlainSuffix,
    EncodingLookup,
    MixedSplit,
}

impl RenameStrategy {
    pub fn for_field(field_type: FieldType, ordinality: Ordinality) -> Self {
        match field_type {
            FieldType::Integer | FieldType::Continuous => RenameStrategy::PlainSuffix,
            FieldType::CategoricalMultiple => RenameStrategy::EncodingLookup,
            FieldType::CategoricalSingle => match ordinality {
                Ordinality::Ordinal => RenameStrategy::PlainSuffix,
                Ordinality::OneHot => RenameStrategy::EncodingLookup,
                Ordinality::Mixed => RenameStrategy::MixedSplit,
            },
        }
    }
}

fn trailing_token(name: &str) -> &str {
    name.rsplit('_').next().unwrap_or(name)
}

fn embedded_label(name: &str) -> &str {
    name.strip_prefix(BINARIZED_PREFIX).unwrap_or(name)
}

/// Strategy 1: `binarized_<...>_low` becomes `Input_<fieldId>_low`.
pub fn rename_plain_suffix(field_id: FieldId, columns: &[String]) -> Vec<RenamePair> {
    columns
        .iter()
        .map(|old| {
            let suffix = trailing_token(old);
            (old.clone(), format!("Input_{field_id}_{suffix}"))
        })
        .collect()
}

/// Strategy 2: `binarized_<label>` becomes `Input_<fieldId>_<code>` by
/// resolving the label through the inverted dictionary.
///
/// A label the dictionary cannot resolve returns `Err` with the label so
/// the caller can skip the field with a diagnostic.
pub fn rename_by_encoding(
    field_id: FieldId,
    columns: &[String],
    encoding: &FieldEncoding,
) -> std::result::Result<Vec<RenamePair>, String> {
    let inverted = encoding.inverted();
    columns
        .iter()
        .map(|old| {
            let label = embedded_label(old);
            match inverted.get(label) {
                Some(code) => Ok((old.clone(), format!("Input_{field_id}_{code}"))),
                None => Err(label.to_string()),
            }
        })
        .collect()
}

/// Strategy 3: split a mixed field's columns into the `low`/`high`
/// subset (strategy 1) and the one-hot remainder (strategy 2 with the
/// "ohe" dictionary); one-hot columns come first in the result.
pub fn rename_mixed(
    field_id: FieldId,
    columns: &[String],
    one_hot_encoding: &FieldEncoding,
) -> std::result::Result<Vec<RenamePair>, String> {
    let (ordinal, one_hot): (Vec<String>, Vec<String>) = columns
        .iter()
        .cloned()
        .partition(|name| matches!(trailing_token(name), "low" | "high"));
    let mut pairs = rename_by_encoding(field_id, &one_hot, one_hot_encoding)?;
    pairs.extend(rename_plain_suffix(field_id, &ordinal));
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_selection_follows_type_and_ordinality() {
        assert_eq!(
            RenameStrategy::for_field(FieldType::Continuous, Ordinality::Ordinal),
            RenameStrategy::PlainSuffix
        );
        assert_eq!(
            RenameStrategy::for_field(FieldType::CategoricalSingle, Ordinality::Ordinal),
            RenameStrategy::PlainSuffix
        );
        assert_eq!(
            RenameStrategy::for_field(FieldType::CategoricalSingle, Ordinality::OneHot),
            RenameStrategy::EncodingLookup
        );
        assert_eq!(
            RenameStrategy::for_field(FieldType::CategoricalSingle, Ordinality::Mixed),
            RenameStrategy::MixedSplit
        );
        assert_eq!(
            RenameStrategy::for_field(FieldType::CategoricalMultiple, Ordinality::Ordinal),
            RenameStrategy::EncodingLookup
        );
    }

    #[test]
    fn plain_suffix_uses_trailing_token() {
        let columns = vec![
            "binarized_3.5_low".to_string(),
            "binarized_none|mild_high".to_string(),
        ];
        assert_eq!(
            rename_plain_suffix(50, &columns),
            vec![
                ("binarized_3.5_low".to_string(), "Input_50_low".to_string()),
                (
                    "binarized_none|mild_high".to_string(),
                    "Input_50_high".to_string()
                ),
            ]
        );
    }

    #[test]
    fn encoding_lookup_recovers_the_code() {
        let encoding = FieldEncoding::from_pairs([
            (1, "A"),
            (2, "B"),
            (-7, "None of the above"),
        ]);
        let columns = vec![
            "binarized_A".to_string(),
            "binarized_None-of-the-above".to_string(),
        ];
        let pairs = rename_by_encoding(6145, &columns, &encoding).unwrap();
        assert_eq!(pairs[0].1, "Input_6145_1");
        assert_eq!(pairs[1].1, "Input_6145_-7");
    }

    #[test]
    fn encoding_lookup_round_trips() {
        let encoding = FieldEncoding::from_pairs([(3, "Severe pain")]);
        let columns = vec!["binarized_Severe-pain".to_string()];
        let pairs = rename_by_encoding(120, &columns, &encoding).unwrap();
        let code: i64 = pairs[0].1.rsplit('_').next().unwrap().parse().unwrap();
        // Inverting the rename through the same dictionary recovers the
        // original binarized column name.
        let recovered = format!("binarized_{}", encoding.one_hot_label(code).unwrap());
        assert_eq!(recovered, columns[0]);
    }

    #[test]
    fn unresolved_label_is_reported() {
        let encoding = FieldEncoding::from_pairs([(1, "A")]);
        let columns = vec!["binarized_Mystery".to_string()];
        assert_eq!(
            rename_by_encoding(9, &columns, &encoding),
            Err("Mystery".to_string())
        );
    }

    #[test]
    fn mixed_split_puts_one_hot_before_ordinal() {
        let encoding = FieldEncoding::from_pairs([(1, "Happy"), (3, "Unhappy")]);
        let columns = vec![
            "binarized_Happy".to_string(),
            "binarized_Unhappy".to_string(),
            "binarized_Happy_low".to_string(),
            "binarized_Unhappy_high".to_string(),
        ];
        let pairs = rename_mixed(4537, &columns, &encoding).unwrap();
        let new_names: Vec<&str> = pairs.iter().map(|(_, new)| new.as_str()).collect();
        assert_eq!(
            new_names,
            vec![
                "Input_4537_1",
                "Input_4537_3",
                "Input_4537_low",
                "Input_4537_high"
            ]
        );
    }
}
