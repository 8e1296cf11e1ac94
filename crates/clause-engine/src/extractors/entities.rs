// Regex-driven entity extraction: dates, money amounts and durations
use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::EntityBundle;

lazy_static! {
    /// Numeric (`15/01/2024`), spelled (`January 5, 2024`) and ISO (`2024-01-15`) dates
    pub static ref DATE: Regex = Regex::new(
        r"(?x)
        \b(?:
            \d{1,2}[-/.\ ]\d{1,2}[-/.\ ]\d{2,4}
          | (?i:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?
               |aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)
            \.?\ \d{1,2},\ \d{4}
          | \d{4}-\d{2}-\d{2}
        )\b"
    )
    .unwrap();

    /// Currency code or symbol followed by an amount
    pub static ref MONEY: Regex =
        Regex::new(r"(?:\b(?:USD|INR)|\bRs\.?|₹|\$)\s?\d(?:[\d,]*\d)?(?:\.\d+)?").unwrap();

    /// `<integer> day(s)/month(s)/year(s)`
    pub static ref DURATION: Regex = Regex::new(r"(?i)\b\d+\s?(?:days?|months?|years?)\b").unwrap();
}

/// Collect every match of `pattern`, dropping repeats but keeping first-seen order
pub fn unique_matches(pattern: &Regex, text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    pattern
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|s| seen.insert(*s))
        .map(str::to_string)
        .collect()
}

/// Run the date, money and duration passes over the full text
pub fn find_entities(text: &str) -> EntityBundle {
    EntityBundle {
        dates: unique_matches(&DATE, text),
        money: unique_matches(&MONEY, text),
        durations: unique_matches(&DURATION, text),
    }
}
