//! Fuzzy string matching.
//!
//! Similarity is a longest-common-subsequence ratio over characters:
//! `2 * lcs(a, b) / (|a| + |b|)`, in `[0.0, 1.0]`. This tolerates minor
//! wording differences against stored questions without any tokenization.

/// Similarity between two strings, `0.0` (disjoint) to `1.0` (identical).
///
/// Callers are expected to lowercase both sides first; this function is
/// case-sensitive by itself.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let total = a_chars.len() + b_chars.len();
    if total == 0 {
        return 1.0;
    }
    let lcs = lcs_len(&a_chars, &b_chars);
    (2 * lcs) as f64 / total as f64
}

/// Longest-common-subsequence length, two-row dynamic programming.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
