//! Clause segmentation
//!
//! A clause starts at a heading-like line: a numbered or lettered marker
//! (`1.`, `2.3`, `A.`, `(b)`), an all-caps title (`TERM AND TERMINATION`) or a
//! `Section N` / `Article N` line. The heading stays with the text it
//! introduces. Documents without any heading are split on blank lines.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HEADING: Regex = Regex::new(
        r"(?x)
        ^[\ \t]*(?:
            (?:\d+\.(?:\d+\.?)*|[A-Z]\.|\(?[a-z]\))(?:[\ \t]+\S.*)?   # 1. / 2.3 / A. / (b)
          | [A-Z][A-Z0-9\ \t&,_-]{3,}                                  # ALL CAPS TITLE
          | (?i:section|article|clause)[\ \t]+\d+(?:\.\d+)*\b.*         # Section 4.1
        )[\ \t]*\r?$"
    )
    .unwrap();
    static ref BLANK_LINES: Regex = Regex::new(r"\n\s*\n").unwrap();
}

fn is_heading(line: &str) -> bool {
    HEADING.is_match(line)
}

/// Split a document into ordered, trimmed, non-empty clauses
pub fn extract_clauses(text: &str) -> Vec<String> {
    let mut starts = Vec::new();
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if is_heading(line.trim_end_matches('\n')) {
            starts.push(offset);
        }
        offset += line.len();
    }

    let chunks: Vec<&str> = if starts.is_empty() {
        BLANK_LINES.split(text).collect()
    } else {
        let mut bounds = starts;
        if bounds[0] != 0 {
            bounds.insert(0, 0);
        }
        bounds.push(text.len());
        bounds.windows(2).map(|w| &text[w[0]..w[1]]).collect()
    };

    chunks
        .into_iter()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_recognises_heading_forms() {
        assert!(is_heading("1."));
        assert!(is_heading("2.3 Payment Terms"));
        assert!(is_heading("A. Definitions"));
        assert!(is_heading("(b) the Premises"));
        assert!(is_heading("TERM AND TERMINATION"));
        assert!(is_heading("Section 4"));
        assert!(is_heading("ARTICLE 7.2 - Indemnity"));
        assert!(!is_heading("The tenant pays rent."));
        assert!(!is_heading("2024 was a good year"));
        assert!(!is_heading("OK"));
    }

    #[test]
    fn test_splits_on_numbered_headings() {
        let text = "Preamble text.\n1. Rent\nTenant pays $500.\n2. Term\nTwelve months.\n";
        assert_eq!(
            extract_clauses(text),
            vec![
                "Preamble text.",
                "1. Rent\nTenant pays $500.",
                "2. Term\nTwelve months.",
            ]
        );
    }

    #[test]
    fn test_splits_on_caps_and_section_headings() {
        let text = "DEFINITIONS\nWords mean things.\n\nSection 2\nThe Vendor delivers.";
        assert_eq!(
            extract_clauses(text),
            vec![
                "DEFINITIONS\nWords mean things.",
                "Section 2\nThe Vendor delivers.",
            ]
        );
    }

    #[test]
    fn test_falls_back_to_paragraphs() {
        let text = "First paragraph\ncontinues here.\n\n  \nSecond paragraph.\n\nThird.";
        assert_eq!(
            extract_clauses(text),
            vec!["First paragraph\ncontinues here.", "Second paragraph.", "Third."]
        );
    }

    #[test]
    fn test_empty_text_has_no_clauses() {
        assert!(extract_clauses("").is_empty());
        assert!(extract_clauses("\n\n   \n").is_empty());
    }
}
