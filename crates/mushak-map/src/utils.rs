//! Utility functions for header comparison.

/// Canonical comparison form of a raw header.
///
/// Trims, uppercases and drops whitespace, `-` and `_`, so `"HS Code"`,
/// `"hs_code"` and `"HS-CODE"` all become `"HSCODE"`.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .to_uppercase()
        .chars()
        .filter(|ch| !ch.is_whitespace() && !matches!(ch, '-' | '_'))
        .collect()
}

/// [`normalize_header`] for possibly-absent input; `None` normalizes to `""`.
pub fn normalize_header_opt(raw: Option<&str>) -> String {
    raw.map(normalize_header).unwrap_or_default()
}

/// True when two headers name the same concept.
pub fn same_header(a: &str, b: &str) -> bool {
    normalize_header(a) == normalize_header(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_case_whitespace_and_separators() {
        assert_eq!(normalize_header("  HS Code "), "HSCODE");
        assert_eq!(normalize_header("hs_code"), "HSCODE");
        assert_eq!(normalize_header("HS-CODE"), "HSCODE");
        assert_eq!(normalize_header("Total\tTax  Incidence"), "TOTALTAXINCIDENCE");
    }

    #[test]
    fn absent_input_is_empty() {
        assert_eq!(normalize_header_opt(None), "");
        assert_eq!(normalize_header_opt(Some(" vat ")), "VAT");
    }

    #[test]
    fn compares_headers_by_concept() {
        assert!(same_header("Description", "DESCRIPTION"));
        assert!(!same_header("VAT", "VATT"));
    }
}
