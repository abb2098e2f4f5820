//! Thai word segmentation behind a pluggable [`Segmenter`] trait.
//!
//! Thai is written without spaces between words, so counting words first
//! needs a segmenter. Callers depend only on the trait: given a string and an
//! engine name it returns the ordered tokens, never whitespace. The bundled
//! [`DictionarySegmenter`] implements it with dictionary matching over
//! character-cluster boundaries; any closure with the right signature works
//! too, which keeps the frequency pipeline ignorant of the backend.
//!
//! # Engines
//! - `newmm` (default): maximal matching. Picks the segmentation with the
//!   fewest characters outside the dictionary, then the fewest tokens.
//! - `longest`: greedy longest match from left to right.
//! - `whitespace`: splits on whitespace only.
//!
//! # Example
//! ```
//! use thai_segment::{DEFAULT_ENGINE, DictionarySegmenter, Segmenter};
//!
//! # fn main() -> anyhow::Result<()> {
//! let segmenter = DictionarySegmenter::embedded()?;
//! let tokens = segmenter.segment("สวัสดีครับ", DEFAULT_ENGINE)?;
//! assert_eq!(tokens, vec!["สวัสดี", "ครับ"]);
//! # Ok(()) }
//! ```

mod dictionary;
mod matching;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use dictionary::{Dictionary, EMBEDDED_WORDS};
pub use matching::DictionarySegmenter;

/// Engine used when the caller does not pick one.
pub const DEFAULT_ENGINE: &str = "newmm";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SegmentError {
    #[error("unknown segmentation engine {0:?} (expected newmm, longest or whitespace)")]
    UnknownEngine(String),
    #[error("segmentation backend failed: {0}")]
    Backend(String),
}

/// Splits text into word tokens.
///
/// Implementations must return tokens in input order, never return whitespace
/// or empty strings, and be deterministic for a fixed `engine` and `text`.
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str, engine: &str) -> Result<Vec<String>, SegmentError>;
}

impl<F> Segmenter for F
where
    F: Fn(&str, &str) -> Result<Vec<String>, SegmentError> + Send + Sync,
{
    fn segment(&self, text: &str, engine: &str) -> Result<Vec<String>, SegmentError> {
        self(text, engine)
    }
}

/// Segmentation algorithms offered by [`DictionarySegmenter`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Engine {
    #[default]
    Newmm,
    Longest,
    Whitespace,
}

impl Engine {
    pub const ALL: [Engine; 3] = [Engine::Newmm, Engine::Longest, Engine::Whitespace];

    /// Name accepted by [`FromStr`] and reported back to callers.
    pub fn name(self) -> &'static str {
        match self {
            Engine::Newmm => "newmm",
            Engine::Longest => "longest",
            Engine::Whitespace => "whitespace",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Engine {
    type Err = SegmentError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Engine::ALL
            .into_iter()
            .find(|engine| engine.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SegmentError::UnknownEngine(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_engine_names() {
        assert_eq!("newmm".parse::<Engine>(), Ok(Engine::Newmm));
        assert_eq!(" Longest ".parse::<Engine>(), Ok(Engine::Longest));
        assert_eq!("WHITESPACE".parse::<Engine>(), Ok(Engine::Whitespace));
        assert_eq!(
            "deepcut".parse::<Engine>(),
            Err(SegmentError::UnknownEngine("deepcut".into()))
        );
        assert_eq!(DEFAULT_ENGINE.parse::<Engine>(), Ok(Engine::default()));
    }

    #[test]
    fn closures_act_as_segmenters() {
        let split = |text: &str, _engine: &str| -> Result<Vec<String>, SegmentError> {
            Ok(text.split_whitespace().map(str::to_string).collect())
        };
        let seg: &dyn Segmenter = &split;
        assert_eq!(
            seg.segment("ก ข  ค", DEFAULT_ENGINE).unwrap(),
            vec!["ก", "ข", "ค"]
        );
    }
}
