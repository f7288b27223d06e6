use std::fmt;

/// Distance threshold on a 0..=1 scale (0 is an exact hit).
pub const DEFAULT_THRESHOLD: f64 = 0.35;

/// Decides whether a folded query matches a folded field value.
pub trait Matcher: fmt::Debug + Send + Sync {
    /// Returns the match distance in `0.0..=1.0` (lower is better), or `None`
    /// when `text` does not match `pattern` at all.
    fn distance(&self, pattern: &str, text: &str) -> Option<f64>;
}

/// Approximate substring matcher: the query may appear anywhere in the field
/// with up to `threshold * query_len` character edits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatcher {
    pub threshold: f64,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl FuzzyMatcher {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }
}

impl Matcher for FuzzyMatcher {
    fn distance(&self, pattern: &str, text: &str) -> Option<f64> {
        if text.contains(pattern) {
            return Some(0.0);
        }

        let pattern_len = pattern.chars().count();
        if pattern_len == 0 {
            return Some(0.0);
        }

        let score = substring_distance(pattern, text) as f64 / pattern_len as f64;
        (score <= self.threshold).then_some(score.min(1.0))
    }
}

/// Plain case-sensitive containment. Callers fold both sides first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubstringMatcher;

impl Matcher for SubstringMatcher {
    fn distance(&self, pattern: &str, text: &str) -> Option<f64> {
        text.contains(pattern).then_some(0.0)
    }
}

/// Fewest edits turning `pattern` into some substring of `text`.
///
/// Two-row Levenshtein where the first row is all zeros, so a match may start
/// at any position in `text`, and the answer is the minimum of the last row.
pub fn substring_distance(pattern: &str, text: &str) -> usize {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();

    if p.is_empty() {
        return 0;
    }
    if t.is_empty() {
        return p.len();
    }

    let mut prev = vec![0usize; t.len() + 1];
    let mut curr = vec![0usize; t.len() + 1];

    for i in 1..=p.len() {
        curr[0] = i;
        for j in 1..=t.len() {
            let cost = usize::from(p[i - 1] != t[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev.into_iter().min().unwrap_or(p.len())
}
