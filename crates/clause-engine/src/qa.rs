//! Keyword-overlap question answering

use crate::text::{normalize, sentence_tokenize};

pub const QUESTION_TOO_SHORT: &str = "Question too short.";
pub const ANSWER_NOT_FOUND: &str = "Answer not found in document.";

/// Return the sentence containing the most question keywords
///
/// Keywords are the question's normalized tokens longer than two characters,
/// matched as case-insensitive substrings. Ties keep the earliest sentence.
pub fn keyword_qa(text: &str, question: &str) -> String {
    let keywords: Vec<String> = normalize(question)
        .into_iter()
        .filter(|w| w.chars().count() > 2)
        .collect();
    if keywords.is_empty() {
        return QUESTION_TOO_SHORT.to_string();
    }

    let mut best: Option<(usize, String)> = None;
    for sentence in sentence_tokenize(text) {
        let lowered = sentence.to_lowercase();
        let score = keywords.iter().filter(|k| lowered.contains(k.as_str())).count();
        if score > best.as_ref().map_or(0, |(s, _)| *s) {
            best = Some((score, sentence));
        }
    }

    best.map_or_else(|| ANSWER_NOT_FOUND.to_string(), |(_, sentence)| sentence)
}
