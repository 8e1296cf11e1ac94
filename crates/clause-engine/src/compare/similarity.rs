//! Bag-of-words similarity measures

use std::collections::{HashMap, HashSet};

use crate::text::{is_content_token, normalize, stopwords};

/// Content-token counts of `text` under the stopword list for `lang`
pub fn bow(text: &str, lang: &str) -> HashMap<String, usize> {
    let stop = stopwords(lang);
    let mut counts = HashMap::new();
    for token in normalize(text) {
        if is_content_token(&token, stop) {
            *counts.entry(token).or_insert(0) += 1;
        }
    }
    counts
}

/// Cosine similarity of two count vectors, 0.0 when either is all-zero
pub fn cosine_sim(a: &HashMap<String, usize>, b: &HashMap<String, usize>) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(word, &ca)| b.get(word).map(|&cb| (ca * cb) as f64))
        .sum();
    let norm = |v: &HashMap<String, usize>| {
        v.values().map(|&c| (c * c) as f64).sum::<f64>().sqrt()
    };
    let (na, nb) = (norm(a), norm(b));
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na * nb)
}

/// Jaccard similarity of two sets; two empty sets count as identical
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

/// Normalized token set of a clause, stopwords included
pub fn token_set(text: &str) -> HashSet<String> {
    normalize(text).into_iter().collect()
}

/// Round to three decimal places
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
