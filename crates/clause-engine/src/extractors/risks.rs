//! Risk phrase detection
//!
//! Each catalog entry is tested independently against the whole text. A label
//! is reported once no matter how often its pattern matches.

use lazy_static::lazy_static;
use regex::Regex;

pub const AUTO_RENEWAL: &str = "Auto-renewal present";
pub const BROAD_INDEMNITY: &str = "Broad indemnity risk";
pub const EXCLUSIVE_VENUE: &str = "Exclusive venue/jurisdiction";
pub const UNCAPPED_LIABILITY: &str = "Uncapped liability";
pub const NON_COMPETE: &str = "Non-compete restriction";

lazy_static! {
    static ref RISK_CATALOG: Vec<(Regex, &'static str)> = vec![
        (
            Regex::new(r"(?i)auto[-\s]?renew|automatic(?:ally)? renew").unwrap(),
            AUTO_RENEWAL,
        ),
        (
            Regex::new(r"(?i)indemnif(?:y|ies|ied|ication)\b").unwrap(),
            BROAD_INDEMNITY,
        ),
        (
            Regex::new(r"(?i)exclusive jurisdiction|\bvenue\b").unwrap(),
            EXCLUSIVE_VENUE,
        ),
        (
            Regex::new(r"(?i)unlimited liability|liability.*(?:unlimited|without limit)").unwrap(),
            UNCAPPED_LIABILITY,
        ),
        (
            Regex::new(r"(?i)non[-\s]?compete|restraint of trade").unwrap(),
            NON_COMPETE,
        ),
    ];
}

/// Labels of every risk pattern present in `text`, in catalog order
pub fn detect_risks(text: &str) -> Vec<String> {
    RISK_CATALOG
        .iter()
        .filter(|(pattern, _)| pattern.is_match(text))
        .map(|(_, label)| label.to_string())
        .collect()
}
