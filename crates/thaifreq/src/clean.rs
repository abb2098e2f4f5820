//! Character-level cleaning of raw text before segmentation.
//!
//! A [`Cleaner`] keeps only the characters its [`CleanerConfig`] allows,
//! optionally folds numbers into a single placeholder token, and collapses
//! whitespace. Cleaning is total and idempotent: `clean(clean(s)) == clean(s)`.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::{Captures, NoExpand, Regex};
use thai_script::{THAI_DIGITS, THAI_LETTERS};
use thiserror::Error;

/// Placeholder substituted for every number when numerals are kept.
pub const NUM_TOKEN: &str = "<NUM>";

/// Sentence terminator kept by the Thai cleaner.
pub const SENTENCE_MARK: char = '.';

/// Decimal and thousands separators allowed inside a number.
pub const NUMERAL_SEPARATORS: [char; 2] = ['.', ','];

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static THAI_CLEANER: LazyLock<Cleaner> =
    LazyLock::new(|| Cleaner::new(CleanerConfig::thai(false)).unwrap());

static THAI_NUMERAL_CLEANER: LazyLock<Cleaner> =
    LazyLock::new(|| Cleaner::new(CleanerConfig::thai(true)).unwrap());

#[derive(Debug, Error)]
pub enum CleanerError {
    #[error("character range {start:?}..={end:?} is empty")]
    EmptyRange { start: char, end: char },
    #[error("invalid cleaner pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Which characters survive cleaning and how numbers are handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanerConfig {
    pub letters: Vec<RangeInclusive<char>>,
    pub punctuation: Vec<char>,
    pub keep_numerals: bool,
    pub digits: Vec<RangeInclusive<char>>,
    pub separators: Vec<char>,
    pub sentinel: String,
}

impl CleanerConfig {
    /// Thai letters and the full stop; ASCII and Thai digits plus separators
    /// when `keep_numerals` is set.
    pub fn thai(keep_numerals: bool) -> Self {
        Self {
            letters: THAI_LETTERS.to_vec(),
            punctuation: vec![SENTENCE_MARK],
            keep_numerals,
            digits: vec!['0'..='9', THAI_DIGITS],
            separators: NUMERAL_SEPARATORS.to_vec(),
            sentinel: NUM_TOKEN.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cleaner {
    config: CleanerConfig,
    disallowed: Regex,
    numerals: Option<Regex>,
}

impl Cleaner {
    pub fn new(config: CleanerConfig) -> Result<Self, CleanerError> {
        let mut allowed = class_items(&config.letters)?;
        allowed.push_str(&char_items(&config.punctuation));

        let numerals = if config.keep_numerals {
            let digits = class_items(&config.digits)?;
            let separators = char_items(&config.separators);
            allowed.push_str(&digits);
            allowed.push_str(&separators);
            Some(Regex::new(&format!("[{digits}][{digits}{separators}]*"))?)
        } else {
            None
        };

        // With numerals kept, an existing sentinel must survive the first pass.
        let disallowed = if config.keep_numerals && !config.sentinel.is_empty() {
            Regex::new(&format!(
                "(?P<sentinel>{})|[^{allowed}]",
                regex::escape(&config.sentinel)
            ))?
        } else {
            Regex::new(&format!("[^{allowed}]"))?
        };

        Ok(Self {
            config,
            disallowed,
            numerals,
        })
    }

    /// Shared Thai cleaner, built once per numeral mode.
    pub fn thai(keep_numerals: bool) -> &'static Cleaner {
        if keep_numerals {
            &THAI_NUMERAL_CLEANER
        } else {
            &THAI_CLEANER
        }
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    /// True when `c` may appear in cleaned output (apart from the sentinel).
    pub fn allows(&self, c: char) -> bool {
        let config = &self.config;
        let in_ranges = |ranges: &[RangeInclusive<char>]| ranges.iter().any(|r| r.contains(&c));
        in_ranges(config.letters.as_slice())
            || config.punctuation.contains(&c)
            || (config.keep_numerals
                && (in_ranges(config.digits.as_slice()) || config.separators.contains(&c)))
    }

    pub fn clean(&self, text: &str) -> String {
        let kept = self.disallowed.replace_all(text, |caps: &Captures| {
            if caps.name("sentinel").is_some() {
                caps[0].to_string()
            } else {
                " ".to_string()
            }
        });
        let folded = match &self.numerals {
            Some(re) => re
                .replace_all(&kept, NoExpand(&self.config.sentinel))
                .into_owned(),
            None => kept.into_owned(),
        };
        WHITESPACE.replace_all(&folded, " ").trim().to_string()
    }
}

/// Clean `text` with the Thai alphabet.
pub fn clean(text: &str, keep_numerals: bool) -> String {
    Cleaner::thai(keep_numerals).clean(text)
}

fn class_items(ranges: &[RangeInclusive<char>]) -> Result<String, CleanerError> {
    let mut out = String::new();
    for range in ranges {
        let (start, end) = (*range.start(), *range.end());
        if start > end {
            return Err(CleanerError::EmptyRange { start, end });
        }
        out.push_str(&format!("\\x{{{:X}}}-\\x{{{:X}}}", start as u32, end as u32));
    }
    Ok(out)
}

fn char_items(chars: &[char]) -> String {
    chars
        .iter()
        .map(|c| format!("\\x{{{:X}}}", *c as u32))
        .collect()
}
