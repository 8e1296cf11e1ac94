//! Unified line diff
//!
//! Lines are aligned with Myers' O((N+M)D) shortest edit script, searched
//! from both ends so memory stays linear, then grouped into hunks with
//! three lines of context in the familiar `--- / +++ / @@` layout.

use std::collections::{HashMap, HashSet};
use std::ops::{Index, IndexMut, Range};

/// Context lines kept around each change
const CONTEXT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiffOp {
    /// Line `left` equals line `right`
    Equal(usize, usize),
    /// Line `right` was inserted
    Insert(usize),
    /// Line `left` was deleted
    Delete(usize),
}

impl DiffOp {
    fn is_change(self) -> bool {
        !matches!(self, DiffOp::Equal(..))
    }
}

/// Furthest-reaching x per diagonal k, for k in `-max..=max`
struct Frontier {
    offset: isize,
    xs: Vec<usize>,
}

impl Frontier {
    fn new(max_d: usize) -> Self {
        Self {
            offset: max_d as isize,
            xs: vec![0; 2 * max_d + 1],
        }
    }
}

impl Index<isize> for Frontier {
    type Output = usize;

    fn index(&self, k: isize) -> &usize {
        &self.xs[(k + self.offset) as usize]
    }
}

impl IndexMut<isize> for Frontier {
    fn index_mut(&mut self, k: isize) -> &mut usize {
        &mut self.xs[(k + self.offset) as usize]
    }
}

fn max_d(n: usize, m: usize) -> usize {
    (n + m + 1) / 2 + 1
}

fn common_prefix(a: &[usize], b: &[usize]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix(a: &[usize], b: &[usize]) -> usize {
    a.iter().rev().zip(b.iter().rev()).take_while(|(x, y)| x == y).count()
}

/// Point on an optimal edit path splitting `a[ra] / b[rb]` in two
fn middle_snake(
    a: &[usize],
    ra: Range<usize>,
    b: &[usize],
    rb: Range<usize>,
    forward: &mut Frontier,
    backward: &mut Frontier,
) -> Option<(usize, usize)> {
    let n = ra.len();
    let m = rb.len();
    let delta = n as isize - m as isize;
    let odd = delta & 1 == 1;

    forward[1] = 0;
    backward[1] = 0;

    for d in 0..max_d(n, m) as isize {
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && forward[k - 1] < forward[k + 1]) {
                forward[k + 1]
            } else {
                forward[k - 1] + 1
            };
            let y = (x as isize - k) as usize;
            let (x0, y0) = (x, y);
            if x < n && y < m {
                x += common_prefix(&a[ra.start + x..ra.end], &b[rb.start + y..rb.end]);
            }
            forward[k] = x;

            if odd && (k - delta).abs() <= d - 1 && forward[k] + backward[-(k - delta)] >= n {
                return Some((ra.start + x0, rb.start + y0));
            }
        }

        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && backward[k - 1] < backward[k + 1]) {
                backward[k + 1]
            } else {
                backward[k - 1] + 1
            };
            let mut y = (x as isize - k) as usize;
            if x < n && y < m {
                let run = common_suffix(
                    &a[ra.start..ra.start + n - x],
                    &b[rb.start..rb.start + m - y],
                );
                x += run;
                y += run;
            }
            backward[k] = x;

            if !odd && (k - delta).abs() <= d && backward[k] + forward[-(k - delta)] >= n {
                return Some((ra.start + n - x, rb.start + m - y));
            }
        }
    }
    None
}

/// Collect matched index pairs of `a[ra]` and `b[rb]` in order
fn conquer(
    a: &[usize],
    mut ra: Range<usize>,
    b: &[usize],
    mut rb: Range<usize>,
    forward: &mut Frontier,
    backward: &mut Frontier,
    matches: &mut Vec<(usize, usize)>,
) {
    let prefix = common_prefix(&a[ra.clone()], &b[rb.clone()]);
    matches.extend((0..prefix).map(|i| (ra.start + i, rb.start + i)));
    ra.start += prefix;
    rb.start += prefix;

    let suffix = common_suffix(&a[ra.clone()], &b[rb.clone()]);
    ra.end -= suffix;
    rb.end -= suffix;
    let (tail_a, tail_b) = (ra.end, rb.end);

    if !ra.is_empty() && !rb.is_empty() {
        if let Some((x, y)) = middle_snake(a, ra.clone(), b, rb.clone(), forward, backward) {
            conquer(a, ra.start..x, b, rb.start..y, forward, backward, matches);
            conquer(a, x..ra.end, b, y..rb.end, forward, backward, matches);
        }
    }

    matches.extend((0..suffix).map(|i| (tail_a + i, tail_b + i)));
}

/// Align two line sequences along a longest common subsequence.
///
/// Lines that occur on only one side can never match, so they are dropped
/// before the search. Within a change, deletions come before insertions.
fn line_ops(left: &[&str], right: &[&str]) -> Vec<DiffOp> {
    let head = left.iter().zip(right).take_while(|(x, y)| x == y).count();
    let tail = left[head..]
        .iter()
        .rev()
        .zip(right[head..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    let mid_left = &left[head..left.len() - tail];
    let mid_right = &right[head..right.len() - tail];

    let mut ids: HashMap<&str, usize> = HashMap::new();
    let mut intern = |line| {
        let next = ids.len();
        *ids.entry(line).or_insert(next)
    };
    let left_ids: Vec<usize> = mid_left.iter().map(|l| intern(*l)).collect();
    let right_ids: Vec<usize> = mid_right.iter().map(|l| intern(*l)).collect();

    let in_left: HashSet<usize> = left_ids.iter().copied().collect();
    let in_right: HashSet<usize> = right_ids.iter().copied().collect();
    let (keep_a, a): (Vec<usize>, Vec<usize>) = left_ids
        .iter()
        .enumerate()
        .filter(|(_, id)| in_right.contains(*id))
        .map(|(i, &id)| (head + i, id))
        .unzip();
    let (keep_b, b): (Vec<usize>, Vec<usize>) = right_ids
        .iter()
        .enumerate()
        .filter(|(_, id)| in_left.contains(*id))
        .map(|(j, &id)| (head + j, id))
        .unzip();

    let mut matches: Vec<(usize, usize)> = (0..head).map(|i| (i, i)).collect();
    let limit = max_d(a.len(), b.len());
    let mut forward = Frontier::new(limit);
    let mut backward = Frontier::new(limit);
    let mut inner = Vec::new();
    conquer(&a, 0..a.len(), &b, 0..b.len(), &mut forward, &mut backward, &mut inner);
    matches.extend(inner.into_iter().map(|(i, j)| (keep_a[i], keep_b[j])));
    let (left_tail, right_tail) = (left.len() - tail, right.len() - tail);
    matches.extend((0..tail).map(|i| (left_tail + i, right_tail + i)));

    let mut ops = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);
    for (mi, mj) in matches {
        ops.extend((i..mi).map(DiffOp::Delete));
        ops.extend((j..mj).map(DiffOp::Insert));
        ops.push(DiffOp::Equal(mi, mj));
        i = mi + 1;
        j = mj + 1;
    }
    ops.extend((i..left.len()).map(DiffOp::Delete));
    ops.extend((j..right.len()).map(DiffOp::Insert));
    ops
}

fn format_range(start: usize, len: usize) -> String {
    match len {
        0 => format!("{},0", start),
        1 => format!("{}", start + 1),
        _ => format!("{},{}", start + 1, len),
    }
}

/// Unified diff of two texts, newline-joined, empty when their lines are identical
pub fn unified_diff(text_a: &str, text_b: &str, label_a: &str, label_b: &str) -> String {
    let left: Vec<&str> = text_a.lines().collect();
    let right: Vec<&str> = text_b.lines().collect();
    let ops = line_ops(&left, &right);

    let changes: Vec<usize> = ops
        .iter()
        .enumerate()
        .filter(|(_, op)| op.is_change())
        .map(|(idx, _)| idx)
        .collect();
    if changes.is_empty() {
        return String::new();
    }

    // Group changes whose separating run of equal lines fits in shared context.
    let mut groups: Vec<(usize, usize)> = Vec::new();
    for &idx in &changes {
        match groups.last_mut() {
            Some((_, last)) if idx - *last <= 2 * CONTEXT + 1 => *last = idx,
            _ => groups.push((idx, idx)),
        }
    }

    // Line positions in A and B before each op.
    let mut positions = Vec::with_capacity(ops.len() + 1);
    let (mut a_pos, mut b_pos) = (0, 0);
    for op in &ops {
        positions.push((a_pos, b_pos));
        match op {
            DiffOp::Equal(..) => {
                a_pos += 1;
                b_pos += 1;
            }
            DiffOp::Delete(_) => a_pos += 1,
            DiffOp::Insert(_) => b_pos += 1,
        }
    }

    let mut out = vec![format!("--- {}", label_a), format!("+++ {}", label_b)];
    for (first, last) in groups {
        let lo = first.saturating_sub(CONTEXT);
        let hi = (last + CONTEXT + 1).min(ops.len());
        let hunk = &ops[lo..hi];

        let a_len = hunk.iter().filter(|op| !matches!(op, DiffOp::Insert(_))).count();
        let b_len = hunk.iter().filter(|op| !matches!(op, DiffOp::Delete(_))).count();
        let (a_start, b_start) = positions[lo];
        out.push(format!(
            "@@ -{} +{} @@",
            format_range(a_start, a_len),
            format_range(b_start, b_len)
        ));

        for op in hunk {
            out.push(match *op {
                DiffOp::Equal(i, _) => format!(" {}", left[i]),
                DiffOp::Delete(i) => format!("-{}", left[i]),
                DiffOp::Insert(j) => format!("+{}", right[j]),
            });
        }
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_identical_texts_have_empty_diff() {
        let text = "1. Rent\nTenant pays monthly.\n";
        assert_eq!(unified_diff(text, text, "A", "B"), "");
        assert_eq!(unified_diff("", "", "A", "B"), "");
    }

    #[test]
    fn test_single_line_replacement() {
        let a = "one\ntwo\nthree";
        let b = "one\nTWO\nthree";
        assert_eq!(
            unified_diff(a, b, "A", "B"),
            "--- A\n+++ B\n@@ -1,3 +1,3 @@\n one\n-two\n+TWO\n three"
        );
    }

    #[test]
    fn test_insertion_into_empty_text() {
        assert_eq!(
            unified_diff("", "new clause", "A", "B"),
            "--- A\n+++ B\n@@ -0,0 +1 @@\n+new clause"
        );
    }

    #[test]
    fn test_distant_changes_form_separate_hunks() {
        let a: Vec<String> = (1..=20).map(|n| format!("line {}", n)).collect();
        let mut b = a.clone();
        b[1] = "changed 2".to_string();
        b[17] = "changed 18".to_string();
        let diff = unified_diff(&a.join("\n"), &b.join("\n"), "A", "B");

        let headers: Vec<&str> = diff.lines().filter(|l| l.starts_with("@@")).collect();
        assert_eq!(headers, vec!["@@ -1,5 +1,5 @@", "@@ -15,6 +15,6 @@"]);
    }

    #[test]
    fn test_nearby_changes_share_a_hunk() {
        let a = "a\nb\nc\nd\ne\nf\ng\nh";
        let b = "a\nB\nc\nd\ne\nf\nG\nh";
        let diff = unified_diff(a, b, "A", "B");
        assert_eq!(diff.matches("@@ -").count(), 1);
        assert!(diff.contains("@@ -1,8 +1,8 @@"));
    }

    fn equal_count(ops: &[DiffOp]) -> usize {
        ops.iter().filter(|op| !op.is_change()).count()
    }

    #[test]
    fn test_alignment_finds_longest_common_subsequence() {
        let left = ["a", "b", "c", "a", "b", "b", "a"];
        let right = ["c", "b", "a", "b", "a", "c"];
        let ops = line_ops(&left, &right);
        assert_eq!(equal_count(&ops), 4);
        assert_eq!(ops.len(), 4 + 3 + 2);
    }

    #[test]
    fn test_large_distinct_texts_diff_quickly() {
        let a: Vec<String> = (0..20_000).map(|n| format!("left {}", n)).collect();
        let b: Vec<String> = (0..20_000).map(|n| format!("right {}", n)).collect();
        let diff = unified_diff(&a.join("\n"), &b.join("\n"), "A", "B");

        let headers: Vec<&str> = diff.lines().filter(|l| l.starts_with("@@")).collect();
        assert_eq!(headers, vec!["@@ -1,20000 +1,20000 @@"]);
        assert_eq!(diff.lines().filter(|l| l.starts_with("-left")).count(), 20_000);
    }

    #[test]
    fn test_large_shifted_text_keeps_common_lines() {
        let a: Vec<String> = (0..10_000).map(|n| format!("clause {}", n)).collect();
        let mut b = a.clone();
        b.insert(5_000, "inserted clause".to_string());
        b.remove(0);
        let left: Vec<&str> = a.iter().map(String::as_str).collect();
        let right: Vec<&str> = b.iter().map(String::as_str).collect();
        assert_eq!(equal_count(&line_ops(&left, &right)), 9_999);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn lcs_len(left: &[&str], right: &[&str]) -> usize {
            let mut dp = vec![vec![0usize; right.len() + 1]; left.len() + 1];
            for i in 0..left.len() {
                for j in 0..right.len() {
                    dp[i + 1][j + 1] = if left[i] == right[j] {
                        dp[i][j] + 1
                    } else {
                        dp[i][j + 1].max(dp[i + 1][j])
                    };
                }
            }
            dp[left.len()][right.len()]
        }

        proptest! {
            #[test]
            fn alignment_is_minimal_and_consistent(
                left in prop::collection::vec("[abc]", 0..24),
                right in prop::collection::vec("[abc]", 0..24),
            ) {
                let left: Vec<&str> = left.iter().map(String::as_str).collect();
                let right: Vec<&str> = right.iter().map(String::as_str).collect();
                let ops = line_ops(&left, &right);

                prop_assert_eq!(equal_count(&ops), lcs_len(&left, &right));

                let mut rebuilt_left = Vec::new();
                let mut rebuilt_right = Vec::new();
                for op in &ops {
                    match *op {
                        DiffOp::Equal(i, j) => {
                            prop_assert_eq!(left[i], right[j]);
                            rebuilt_left.push(left[i]);
                            rebuilt_right.push(right[j]);
                        }
                        DiffOp::Delete(i) => rebuilt_left.push(left[i]),
                        DiffOp::Insert(j) => rebuilt_right.push(right[j]),
                    }
                }
                prop_assert_eq!(rebuilt_left, left);
                prop_assert_eq!(rebuilt_right, right);
            }
        }
    }
}
