//! Keyword catalogs and shared text-window helpers

/// English stopwords, including the contract boilerplate adverbs
pub const STOPWORDS_EN: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is",
    "it", "its", "of", "on", "that", "the", "to", "was", "were", "will", "with", "this",
    "these", "those", "you", "your", "yours", "we", "our", "us", "not", "or", "nor", "if",
    "else", "then", "than", "also", "shall", "may", "must", "can", "hereunder", "hereof",
    "thereof", "therefrom", "thereon",
];

/// Hindi stopwords
pub const STOPWORDS_HI: &[&str] = &[
    "और", "है", "हैं", "था", "थी", "थे", "को", "के", "का", "की", "एक", "यह", "वह", "होंगे",
    "हेतु", "तक", "लिए", "साथ", "करें", "किया", "जिससे", "द्वारा", "पर", "में", "नहीं", "या",
    "यदि", "तब", "तो", "तथा", "जबकि", "करना", "चाहिए", "होगा", "सकते",
];

/// Telugu stopwords
pub const STOPWORDS_TE: &[&str] = &[
    "మరియు", "ఉంది", "ఉన్నాయి", "ఒక", "ఇది", "అవి", "మీరు", "వారు", "నుండి", "కు", "కోసం",
    "తో", "లో", "కాదు", "లేదా", "అయితే", "అలాగే", "ఉండాలి", "ఉంటుంది",
];

/// Lease-related keywords
pub const LEASE_KEYWORDS: &[&str] = &["lease", "tenant", "landlord", "premises"];

/// Confidentiality keywords
pub const NDA_KEYWORDS: &[&str] = &["non-disclosure", "confidential", "nda"];

/// Employment keywords
pub const EMPLOYMENT_KEYWORDS: &[&str] =
    &["employee", "employer", "salary", "benefits", "termination"];

/// Service/vendor keywords
pub const SERVICE_KEYWORDS: &[&str] = &["service level", "sla", "vendor", "client"];

/// Check if lowercased text contains any keyword of a group
pub fn contains_any(text_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text_lower.contains(keyword))
}

/// Take up to `radius` characters on each side of the byte span `start..end`
///
/// Offsets are counted in characters so the window never splits a code point.
pub fn context_window(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let from = text[..start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map_or(start, |(idx, _)| idx);
    let to = text[end..]
        .char_indices()
        .nth(radius)
        .map_or(text.len(), |(idx, _)| end + idx);
    &text[from..to]
}

/// Truncate to at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
