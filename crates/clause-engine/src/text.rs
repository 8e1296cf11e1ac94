//! Sentence segmentation, word normalization and stopword lookup

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::patterns::{STOPWORDS_EN, STOPWORDS_HI, STOPWORDS_TE};

lazy_static! {
    // A terminator (Latin or Devanagari danda) followed by whitespace, or a newline run.
    static ref SENTENCE_BREAK: Regex = Regex::new(r"([.!?।])\s+|\n+").unwrap();
    static ref WORD: Regex = Regex::new(r"[\w']+").unwrap();
    static ref EN: HashSet<&'static str> = STOPWORDS_EN.iter().copied().collect();
    static ref HI: HashSet<&'static str> = STOPWORDS_HI.iter().copied().collect();
    static ref TE: HashSet<&'static str> = STOPWORDS_TE.iter().copied().collect();
}

/// Stopword set for a language code; unknown codes use English
pub fn stopwords(lang: &str) -> &'static HashSet<&'static str> {
    match lang {
        "hi" => &HI,
        "te" => &TE,
        _ => &EN,
    }
}

/// Split text into trimmed, non-empty sentences
///
/// Terminators stay attached to the sentence they end.
pub fn sentence_tokenize(text: &str) -> Vec<String> {
    let text = text.trim();
    let mut sentences = Vec::new();
    let mut last = 0;

    for caps in SENTENCE_BREAK.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let cut = caps.get(1).map_or(whole.start(), |term| term.end());
        sentences.push(&text[last..cut]);
        last = whole.end();
    }
    sentences.push(&text[last..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lowercased word tokens in document order, duplicates kept
pub fn normalize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Whether a normalized token carries content: not a stopword and longer than two characters
pub fn is_content_token(token: &str, stop: &HashSet<&'static str>) -> bool {
    token.chars().count() > 2 && !stop.contains(token)
}
