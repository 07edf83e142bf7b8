//! Structured per-field diagnostic events.
//!
//! Binarization never aborts a batch over one field's data. Conditions that
//! the operator must be able to audit afterwards are reported as
//! [`Diagnostic`] values returned alongside the field's result; the CLI is
//! the only place that turns them into log lines.

use std::fmt;

use crate::field::FieldId;

/// What happened to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// The low bin could not reach the minimum-support threshold.
    LowSupportLowBin,
    /// The high bin could not reach the minimum-support threshold.
    LowSupportHighBin,
    /// The encoding dictionary is missing or not a code-to-label mapping.
    MalformedEncoding,
    /// Binarization produced fewer than two indicator columns.
    TooFewBinarizedColumns,
    /// No rows survived filtering and merging.
    EmptyTable,
    /// A binarized column label could not be resolved to a code.
    UnresolvedLabel,
}

impl DiagnosticKind {
    /// Advisory diagnostics leave the field in the output; the rest
    /// exclude it from the meta table.
    pub fn is_advisory(&self) -> bool {
        matches!(
            self,
            DiagnosticKind::LowSupportLowBin | DiagnosticKind::LowSupportHighBin
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::LowSupportLowBin => "low bin below minimum support",
            DiagnosticKind::LowSupportHighBin => "high bin below minimum support",
            DiagnosticKind::MalformedEncoding => "malformed encoding",
            DiagnosticKind::TooFewBinarizedColumns => "fewer than two binarized columns",
            DiagnosticKind::EmptyTable => "no rows after filter and merge",
            DiagnosticKind::UnresolvedLabel => "unresolved column label",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One diagnostic event for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub field_id: FieldId,
    pub kind: DiagnosticKind,
    /// Free-text detail naming the count or threshold that triggered the
    /// event, e.g. "low bin holds 112 samples (4.1% < 10%)".
    pub detail: String,
}

impl Diagnostic {
    pub fn new(field_id: FieldId, kind: DiagnosticKind, detail: impl Into<String>) -> Self {
        Self {
            field_id,
            kind,
            detail: detail.into(),
        }
    }

    pub fn is_advisory(&self) -> bool {
        self.kind.is_advisory()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field {}: {}: {}", self.field_id, self.kind, self.detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advisory_split() {
        assert!(DiagnosticKind::LowSupportLowBin.is_advisory());
        assert!(DiagnosticKind::LowSupportHighBin.is_advisory());
        assert!(!DiagnosticKind::MalformedEncoding.is_advisory());
        assert!(!DiagnosticKind::TooFewBinarizedColumns.is_advisory());
    }

    #[test]
    fn display_names_the_field() {
        let diagnostic = Diagnostic::new(
            4537,
            DiagnosticKind::LowSupportHighBin,
            "high bin holds 87 samples",
        );
        let rendered = diagnostic.to_string();
        assert!(rendered.contains("4537"));
        assert!(rendered.contains("87"));
    }
}
