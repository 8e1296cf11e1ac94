//! Frequency-scored extractive summarization
//!
//! Sentences are scored by the average global frequency of their content
//! tokens; the best `max_sentences` are returned in document order.

use std::collections::{HashMap, HashSet};

use crate::language::detect_language;
use crate::text::{is_content_token, normalize, sentence_tokenize, stopwords};

/// Build an extractive summary of at most `max_sentences` sentences
pub fn summarize_extract(text: &str, max_sentences: usize) -> String {
    summarize_sentences(&sentence_tokenize(text), &detect_language(text), max_sentences)
}

/// Summarize already-split sentences under the stopword list for `lang`
pub fn summarize_sentences(sentences: &[String], lang: &str, max_sentences: usize) -> String {
    let stop = stopwords(lang);
    if sentences.is_empty() {
        return String::new();
    }

    let tokenized: Vec<Vec<String>> = sentences.iter().map(|s| normalize(s)).collect();

    let mut freqs: HashMap<&str, usize> = HashMap::new();
    for token in tokenized.iter().flatten() {
        if is_content_token(token, stop) {
            *freqs.entry(token.as_str()).or_insert(0) += 1;
        }
    }

    if freqs.is_empty() {
        return sentences
            .iter()
            .take(max_sentences)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
    }

    let mut scores: Vec<(f64, usize)> = Vec::new();
    for (idx, tokens) in tokenized.iter().enumerate() {
        let counts: Vec<usize> = tokens
            .iter()
            .filter_map(|t| freqs.get(t.as_str()).copied())
            .collect();
        if counts.is_empty() {
            continue;
        }
        let score = counts.iter().sum::<usize>() as f64 / (counts.len() + 1) as f64;
        scores.push((score, idx));
    }

    // Stable sort keeps earlier sentences ahead on equal scores.
    scores.sort_by(|a, b| b.0.total_cmp(&a.0));
    let top: HashSet<usize> = scores
        .into_iter()
        .take(max_sentences)
        .map(|(_, idx)| idx)
        .collect();

    sentences
        .iter()
        .enumerate()
        .filter(|(idx, _)| top.contains(idx))
        .map(|(_, s)| s.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
