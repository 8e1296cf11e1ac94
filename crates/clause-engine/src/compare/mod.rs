//! Two-document comparison
//!
//! Whole-document cosine similarity, a unified line diff of the raw texts,
//! and a best-match Jaccard alignment of A's clauses onto B's.

pub mod diff;
pub mod similarity;

use shared_types::{ClauseOverlap, ComparisonResult};
use tracing::debug;

use crate::clauses::extract_clauses;
use crate::language::detect_language;

pub use diff::unified_diff;
pub use similarity::{bow, cosine_sim, jaccard, round3, token_set};

/// Overlap records kept in a comparison result
pub const MAX_OVERLAPS: usize = 50;

/// Best clause of `clauses_b` for each clause of `clauses_a`
///
/// Only strictly better scores replace the running best, so ties keep the
/// earliest B clause and a clause sharing nothing with B has no match.
pub fn align_clauses(
    clauses_a: &[String],
    clauses_b: &[String],
    limit: usize,
) -> Vec<ClauseOverlap> {
    let sets_b: Vec<_> = clauses_b.iter().map(|c| token_set(c)).collect();

    clauses_a
        .iter()
        .take(limit)
        .enumerate()
        .map(|(ia, clause)| {
            let set_a = token_set(clause);
            let mut best = (0.0, None);
            for (ib, set_b) in sets_b.iter().enumerate() {
                let score = jaccard(&set_a, set_b);
                if score > best.0 {
                    best = (score, Some(ib));
                }
            }
            ClauseOverlap {
                clause_a_index: ia,
                best_b_index: best.1,
                similarity: round3(best.0),
            }
        })
        .collect()
}

/// Compare two contracts, keeping at most `max_overlaps` clause records
pub fn compare_contracts_with_limit(
    text_a: &str,
    text_b: &str,
    max_overlaps: usize,
) -> ComparisonResult {
    let lang_a = detect_language(text_a);
    let lang_b = detect_language(text_b);

    let clauses_a = extract_clauses(text_a);
    let clauses_b = extract_clauses(text_b);
    debug!(
        "Comparing {} clauses ({}) against {} clauses ({})",
        clauses_a.len(),
        lang_a,
        clauses_b.len(),
        lang_b
    );

    // Same text, or nothing on either side, is a perfect match even when
    // every token is a stopword.
    let cosine = if text_a == text_b || (text_a.trim().is_empty() && text_b.trim().is_empty()) {
        1.0
    } else {
        cosine_sim(&bow(text_a, &lang_a), &bow(text_b, &lang_b))
    };
    let diff = unified_diff(text_a, text_b, "A", "B");
    let overlaps = align_clauses(&clauses_a, &clauses_b, max_overlaps);

    ComparisonResult {
        lang_a,
        lang_b,
        cosine_similarity: round3(cosine),
        diff,
        overlaps,
    }
}

/// Compare two contracts with the default overlap cap
pub fn compare_contracts(text_a: &str, text_b: &str) -> ComparisonResult {
    compare_contracts_with_limit(text_a, text_b, MAX_OVERLAPS)
}
