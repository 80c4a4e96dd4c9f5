//! Approximate string matching.
//!
//! Similarity is the Ratcliff/Obershelp "gestalt" ratio: find the longest
//! common contiguous block, recurse into the pieces to its left and right,
//! and score `2 * matched / (len(a) + len(b))`. A misspelling such as
//! `"aparel"` against `"apparel"` scores `12 / 13 ≈ 0.92`.
//!
//! All lengths are measured in `char`s, not bytes.

use std::collections::HashMap;

use thiserror::Error;

/// Errors raised when building a similarity cutoff.
#[derive(Debug, Error, PartialEq)]
pub enum SimilarityError {
    /// Cutoff outside `[0.0, 1.0]` (or NaN).
    #[error("cutoff must be within [0.0, 1.0], got {0}")]
    CutoffOutOfRange(f64),
}

/// Minimum similarity a candidate must reach to count as a match.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Cutoff(f64);

impl Cutoff {
    /// Cutoff used when inferring a category or branch from a shop query.
    pub const SEARCH: Self = Self(0.7);

    /// Create a cutoff.
    ///
    /// # Errors
    ///
    /// Returns [`SimilarityError::CutoffOutOfRange`] unless `0.0 <= value <= 1.0`.
    pub fn new(value: f64) -> Result<Self, SimilarityError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SimilarityError::CutoffOutOfRange(value))
        }
    }

    /// The raw threshold.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

/// Similarity of two strings in `[0.0, 1.0]`.
///
/// Two empty strings are identical (1.0).
#[must_use]
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    score(matched_chars(&a, &b), a.len() + b.len())
}

/// Best candidate scoring at least `cutoff` against `word`.
///
/// When several candidates tie on score, the lexically greatest wins.
/// Candidates may repeat; duplicates do not change the result.
#[must_use]
pub fn close_match<'a, I>(word: &str, candidates: I, cutoff: Cutoff) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let word_chars: Vec<char> = word.chars().collect();
    let word_counts = char_counts(&word_chars);

    let mut best: Option<(f64, &'a str)> = None;
    for candidate in candidates {
        let cand_chars: Vec<char> = candidate.chars().collect();
        let total = cand_chars.len() + word_chars.len();

        // Cheap upper bounds first; most candidates fail one of them.
        let length_bound = score(cand_chars.len().min(word_chars.len()), total);
        if length_bound < cutoff.0 {
            continue;
        }
        if score(shared_chars(&word_counts, &cand_chars), total) < cutoff.0 {
            continue;
        }

        let similarity = score(matched_chars(&cand_chars, &word_chars), total);
        if similarity < cutoff.0 {
            continue;
        }

        let better = best.is_none_or(|(best_score, best_candidate)| {
            similarity > best_score || (similarity == best_score && candidate > best_candidate)
        });
        if better {
            best = Some((similarity, candidate));
        }
    }

    best.map(|(_, candidate)| candidate)
}

#[allow(clippy::cast_precision_loss)] // Query and catalog strings are short
fn score(matched: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        2.0 * matched as f64 / total as f64
    }
}

fn char_counts(chars: &[char]) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for &c in chars {
        *counts.entry(c).or_insert(0) += 1;
    }
    counts
}

/// Size of the multiset intersection of `counts` and `chars`.
fn shared_chars(counts: &HashMap<char, usize>, chars: &[char]) -> usize {
    let mut available = counts.clone();
    let mut shared = 0;
    for c in chars {
        match available.get_mut(c) {
            Some(n) if *n > 0 => {
                *n -= 1;
                shared += 1;
            }
            _ => {}
        }
    }
    shared
}

/// Total size of the matching blocks between `a` and `b`.
fn matched_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_block(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Returns `(i, j, size)`. Ties go to the block starting earliest in `a`,
/// then earliest in `b`.
fn longest_block(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

    // run[k] = length of the common suffix ending at a[i-1], b[blo + k - 1]
    let width = bhi - blo;
    let mut prev = vec![0usize; width + 1];
    let mut curr = vec![0usize; width + 1];

    for (i, ac) in a.iter().enumerate().take(ahi).skip(alo) {
        for (k, bc) in b.iter().enumerate().take(bhi).skip(blo).map(|(j, c)| (j - blo, c)) {
            let run = if ac == bc {
                prev.get(k).copied().unwrap_or(0) + 1
            } else {
                0
            };
            if let Some(slot) = curr.get_mut(k + 1) {
                *slot = run;
            }
            if run > best_size {
                best_i = i + 1 - run;
                best_j = blo + k + 1 - run;
                best_size = run;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    (best_i, best_j, best_size)
}
