//! Counting, filtering and normalizing token frequencies.
//!
//! Every function takes its input by reference and returns a fresh map.

use std::collections::HashMap;

use thai_script::{has_thai_letter, is_lone_mark};
use thiserror::Error;

/// Token to occurrence count.
pub type FrequencyMap = HashMap<String, u64>;

/// Token to relative frequency; values sum to 1.
pub type ProbabilityMap = HashMap<String, f64>;

/// Tokens seen fewer times than this are pruned by default.
pub const DEFAULT_MIN_FREQ: u64 = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("cannot normalize frequencies with a total count of zero")]
    EmptyFrequencies,
}

/// Count occurrences of each distinct token.
pub fn count<I>(tokens: I) -> FrequencyMap
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut freq = FrequencyMap::new();
    for token in tokens {
        let token = token.as_ref();
        if let Some(n) = freq.get_mut(token) {
            *n += 1;
        } else {
            freq.insert(token.to_string(), 1);
        }
    }
    freq
}

/// Add the counts of `other` into `target`.
pub fn merge_into(target: &mut FrequencyMap, other: FrequencyMap) {
    for (token, n) in other {
        *target.entry(token).or_insert(0) += n;
    }
}

/// Drop tokens that carry no Thai letter, fold repeated-character tokens to a
/// single character, drop lone marks, then prune keys below `min_freq`.
///
/// Folded keys merge their counts before pruning. `min_freq == 0` keeps
/// everything that passes the character checks.
pub fn filter(freq: &FrequencyMap, min_freq: u64) -> FrequencyMap {
    let mut out = FrequencyMap::new();
    for (token, &n) in freq {
        if let Some(key) = retained_key(token) {
            *out.entry(key).or_insert(0) += n;
        }
    }
    if min_freq > 0 {
        out.retain(|_, n| *n >= min_freq);
    }
    out
}

fn retained_key(token: &str) -> Option<String> {
    if !has_thai_letter(token) {
        return None;
    }
    let mut chars = token.chars();
    let first = chars.next()?;
    if chars.all(|c| c == first) {
        // Covers single-character tokens too.
        return (!is_lone_mark(first)).then(|| first.to_string());
    }
    Some(token.to_string())
}

/// Convert counts into relative frequencies.
///
/// Keys with a zero count are left out so every value lies in `(0, 1]`.
pub fn normalize(freq: &FrequencyMap) -> Result<ProbabilityMap, NormalizeError> {
    let total: u64 = freq.values().sum();
    if total == 0 {
        return Err(NormalizeError::EmptyFrequencies);
    }
    let total = total as f64;
    Ok(freq
        .iter()
        .filter(|(_, n)| **n > 0)
        .map(|(token, &n)| (token.clone(), n as f64 / total))
        .collect())
}

/// Entries ordered by count (descending), ties broken by token.
pub fn ranked(freq: &FrequencyMap) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> = freq.iter().map(|(t, &n)| (t.as_str(), n)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
}
