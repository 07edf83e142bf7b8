//! Adaptive low/high bin search over ordered category codes.

/// Minimum fraction of samples a low or high bin should hold.
pub const MIN_BIN_SUPPORT: f64 = 0.10;

/// Result of the adaptive bin search.
#[derive(Debug, Clone, PartialEq)]
pub struct BinSelection {
    /// Codes claimed by the low bin (a prefix of the sorted code range).
    pub low_codes: Vec<i64>,
    /// Codes claimed by the high bin (a suffix, disjoint from the low bin).
    pub high_codes: Vec<i64>,
    /// Fraction of samples falling in the low bin.
    pub low_support: f64,
    /// Fraction of samples falling in the high bin.
    pub high_support: f64,
}

/// Finds the smallest prefix and suffix of `codes` whose sample support
/// strictly exceeds `min_support`.
///
/// The low search grows a prefix one code at a time, stopping before it
/// would swallow the full range. The high search then shrinks from the
/// top down, never entering codes the low bin claimed. When a search
/// exhausts its range without crossing the threshold, the largest
/// available prefix/suffix is kept; the caller inspects the achieved
/// support and reports the shortfall.
///
/// `support` maps a candidate code subset to the fraction of samples
/// whose value falls in it; the function itself never touches a table,
/// which keeps it unit-testable in isolation.
pub fn select_bins<F>(codes: &[i64], support: F, min_support: f64) -> BinSelection
where
    F: Fn(&[i64]) -> f64,
{
    let mut low_len = 1;
    let mut low_support = 0.0;
    for len in 1..codes.len() {
        low_len = len;
        low_support = support(&codes[..len]);
        if low_support > min_support {
            break;
        }
    }

    let mut high_start = codes.len() - 1;
    let mut high_support = 0.0;
    for start in (low_len..codes.len()).rev() {
        high_start = start;
        high_support = support(&codes[start..]);
        if high_support > min_support {
            break;
        }
    }

    BinSelection {
        low_codes: codes[..low_len].to_vec(),
        high_codes: codes[high_start..].to_vec(),
        low_support,
        high_support,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Support function backed by a fixed per-code sample distribution.
    fn distribution(weights: &[(i64, f64)]) -> impl Fn(&[i64]) -> f64 + '_ {
        move |codes: &[i64]| {
            weights
                .iter()
                .filter(|(code, _)| codes.contains(code))
                .map(|(_, weight)| weight)
                .sum()
        }
    }

    #[test]
    fn grows_low_bin_until_support_crosses_threshold() {
        // Code 0 alone is under 10%; {0, 1} together clear it.
        let weights = [(0, 0.04), (1, 0.11), (2, 0.55), (3, 0.20), (4, 0.10)];
        let selection = select_bins(&[0, 1, 2, 3, 4], distribution(&weights), MIN_BIN_SUPPORT);
        assert_eq!(selection.low_codes, vec![0, 1]);
        assert_eq!(selection.high_codes, vec![3, 4]);
        assert!(selection.low_support > MIN_BIN_SUPPORT);
        assert!(selection.high_support > MIN_BIN_SUPPORT);
    }

    #[test]
    fn single_code_bins_when_support_is_ample() {
        let weights = [(1, 0.30), (2, 0.40), (3, 0.30)];
        let selection = select_bins(&[1, 2, 3], distribution(&weights), MIN_BIN_SUPPORT);
        assert_eq!(selection.low_codes, vec![1]);
        assert_eq!(selection.high_codes, vec![3]);
    }

    #[test]
    fn high_bin_never_enters_low_bin_codes() {
        // The low bin must grow to {0, 1, 2}; the high search may then
        // only consider suffixes starting at code 3.
        let weights = [(0, 0.01), (1, 0.05), (2, 0.06), (3, 0.88)];
        let selection = select_bins(&[0, 1, 2, 3], distribution(&weights), MIN_BIN_SUPPORT);
        assert_eq!(selection.low_codes, vec![0, 1, 2]);
        assert_eq!(selection.high_codes, vec![3]);
    }

    #[test]
    fn exhausted_search_keeps_largest_available_bins() {
        // No suffix ever reaches 10%: the high bin degrades to the whole
        // range left over by the low bin.
        let weights = [(0, 0.95), (1, 0.02), (2, 0.02), (3, 0.01)];
        let selection = select_bins(&[0, 1, 2, 3], distribution(&weights), MIN_BIN_SUPPORT);
        assert_eq!(selection.low_codes, vec![0]);
        assert_eq!(selection.high_codes, vec![1, 2, 3]);
        assert!(selection.high_support < MIN_BIN_SUPPORT);
    }

    #[test]
    fn support_exactly_at_threshold_does_not_stop_the_search() {
        let weights = [(0, 0.10), (1, 0.10), (2, 0.80)];
        let selection = select_bins(&[0, 1, 2], distribution(&weights), MIN_BIN_SUPPORT);
        // 0.10 is not strictly greater than the threshold, so the prefix
        // keeps growing.
        assert_eq!(selection.low_codes, vec![0, 1]);
    }
}
