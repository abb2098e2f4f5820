use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

/// Word list bundled with the crate, one word per line.
pub const EMBEDDED_WORDS: &str = include_str!("../data/words_th.txt");

/// Set of known words plus the longest word length in characters.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashSet<String>,
    max_word_len: usize,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dictionary built from [`EMBEDDED_WORDS`].
    pub fn embedded() -> Result<Self> {
        Self::from_str_content(EMBEDDED_WORDS).context("parse embedded word list")
    }

    /// Load a word list from disk (UTF-8, one word per line).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("read dictionary {}", path.display()))?;
        let dict = Self::from_str_content(&content)
            .with_context(|| format!("parse dictionary {}", path.display()))?;
        info!("loaded {} words from {}", dict.len(), path.display());
        Ok(dict)
    }

    /// Parse a word list. Blank lines and `#` comments are skipped; a list
    /// without any word is rejected.
    pub fn from_str_content(content: &str) -> Result<Self> {
        let mut dict = Self::new();
        for line in content.lines() {
            let word = line.trim();
            if !word.is_empty() && !word.starts_with('#') {
                dict.add_word(word);
            }
        }
        if dict.is_empty() {
            bail!("dictionary is empty");
        }
        Ok(dict)
    }

    pub fn add_word(&mut self, word: &str) {
        self.max_word_len = self.max_word_len.max(word.chars().count());
        self.words.insert(word.to_string());
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Longest word length in characters.
    pub fn max_word_len(&self) -> usize {
        self.max_word_len
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
