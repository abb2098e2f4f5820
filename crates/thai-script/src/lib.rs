//! Code-point ranges and character classes for Thai script.
//!
//! Everything downstream (cleaning, segmentation, frequency filtering) agrees
//! on what a Thai letter is through this crate. The ranges mirror the Unicode
//! Thai block (U+0E00–U+0E7F): consonants, vowels that are written before or
//! after the consonant they belong to, tone marks and other diacritics, and the
//! Thai digits.
//!
//! Use [`CharClass::of`] to classify a single character, the predicates such as
//! [`is_thai_letter`] and [`is_lone_mark`] for filtering, and
//! [`can_break_between`] to find positions where a word boundary may fall
//! without splitting a character cluster.
//!
//! ```rust
//! use thai_script::{CharClass, can_break_between, has_thai_letter};
//!
//! assert_eq!(CharClass::of('ก'), CharClass::Consonant);
//! assert_eq!(CharClass::of('เ'), CharClass::LeadingVowel);
//! assert!(!can_break_between('ก', '่'));
//! assert!(has_thai_letter("abc ไทย"));
//! ```

use std::fmt;
use std::ops::RangeInclusive;

/// Letter ranges of the Thai block: consonants, vowels, tone marks and signs.
pub const THAI_LETTERS: [RangeInclusive<char>; 2] =
    ['\u{0E01}'..='\u{0E3A}', '\u{0E40}'..='\u{0E4E}'];

/// Thai digits ๐–๙.
pub const THAI_DIGITS: RangeInclusive<char> = '\u{0E50}'..='\u{0E59}';

/// Letters that carry no meaning on their own: every letter that is not a
/// consonant (paiyannoi, vowels, tone marks and diacritics).
pub const LONE_MARKS: [RangeInclusive<char>; 2] =
    ['\u{0E2F}'..='\u{0E3A}', '\u{0E40}'..='\u{0E4E}'];

/// Whole Thai Unicode block.
pub const THAI_BLOCK: RangeInclusive<char> = '\u{0E00}'..='\u{0E7F}';

/// Orthographic role of a character within Thai text.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CharClass {
    Consonant,
    /// Vowels written before the consonant they follow in speech (เ แ โ ใ ไ).
    LeadingVowel,
    /// Vowels written after, above or below their consonant.
    FollowingVowel,
    ToneMark,
    /// Maitaikhu, thanthakhat, nikhahit and yamakkan.
    Diacritic,
    /// Standalone signs such as paiyannoi (ฯ) and mai yamok (ๆ).
    Sign,
    /// ASCII or Thai digit.
    Digit,
    Other,
}

impl CharClass {
    /// Classify a single character.
    pub fn of(c: char) -> Self {
        match c {
            '\u{0E01}'..='\u{0E2E}' => CharClass::Consonant,
            '\u{0E2F}' | '\u{0E46}' | '\u{0E4F}' | '\u{0E5A}' | '\u{0E5B}' => CharClass::Sign,
            '\u{0E30}'..='\u{0E3A}' | '\u{0E45}' => CharClass::FollowingVowel,
            '\u{0E40}'..='\u{0E44}' => CharClass::LeadingVowel,
            '\u{0E47}' | '\u{0E4C}'..='\u{0E4E}' => CharClass::Diacritic,
            '\u{0E48}'..='\u{0E4B}' => CharClass::ToneMark,
            '0'..='9' | '\u{0E50}'..='\u{0E59}' => CharClass::Digit,
            _ => CharClass::Other,
        }
    }

    /// True for classes that attach to the preceding character.
    pub fn is_combining(self) -> bool {
        matches!(
            self,
            CharClass::FollowingVowel | CharClass::ToneMark | CharClass::Diacritic
        )
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CharClass::Consonant => "consonant",
            CharClass::LeadingVowel => "leading vowel",
            CharClass::FollowingVowel => "following vowel",
            CharClass::ToneMark => "tone mark",
            CharClass::Diacritic => "diacritic",
            CharClass::Sign => "sign",
            CharClass::Digit => "digit",
            CharClass::Other => "other",
        })
    }
}

/// True when `c` falls in one of the [`THAI_LETTERS`] ranges.
pub fn is_thai_letter(c: char) -> bool {
    THAI_LETTERS.iter().any(|range| range.contains(&c))
}

/// True for any character of the Thai block, letters or not.
pub fn is_thai(c: char) -> bool {
    THAI_BLOCK.contains(&c)
}

/// ASCII digits and Thai digits.
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || THAI_DIGITS.contains(&c)
}

/// True when `c` may not stand alone as a token.
pub fn is_lone_mark(c: char) -> bool {
    LONE_MARKS.iter().any(|range| range.contains(&c))
}

/// True when at least one character of `text` is a Thai letter.
pub fn has_thai_letter(text: &str) -> bool {
    text.chars().any(is_thai_letter)
}

/// Whether a word boundary may fall between `prev` and `next`.
///
/// Vowels, tone marks and diacritics that attach to the preceding consonant
/// are never separated from it, and a leading vowel always stays with the
/// consonant that follows.
pub fn can_break_between(prev: char, next: char) -> bool {
    !(CharClass::of(next).is_combining() || CharClass::of(prev) == CharClass::LeadingVowel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_thai_block() {
        assert_eq!(CharClass::of('ก'), CharClass::Consonant);
        assert_eq!(CharClass::of('ฮ'), CharClass::Consonant);
        assert_eq!(CharClass::of('ฯ'), CharClass::Sign);
        assert_eq!(CharClass::of('ๆ'), CharClass::Sign);
        assert_eq!(CharClass::of('า'), CharClass::FollowingVowel);
        assert_eq!(CharClass::of('ั'), CharClass::FollowingVowel);
        assert_eq!(CharClass::of('ไ'), CharClass::LeadingVowel);
        assert_eq!(CharClass::of('่'), CharClass::ToneMark);
        assert_eq!(CharClass::of('์'), CharClass::Diacritic);
        assert_eq!(CharClass::of('๕'), CharClass::Digit);
        assert_eq!(CharClass::of('7'), CharClass::Digit);
        assert_eq!(CharClass::of('฿'), CharClass::Other);
        assert_eq!(CharClass::of('a'), CharClass::Other);
    }

    #[test]
    fn letters_exclude_digits_and_symbols() {
        assert!(is_thai_letter('ก'));
        assert!(is_thai_letter('ฯ'));
        assert!(is_thai_letter('ๆ'));
        assert!(!is_thai_letter('๑'));
        assert!(!is_thai_letter('฿'));
        assert!(!is_thai_letter('.'));
        assert!(is_thai('๑'));
        assert!(is_digit('๑'));
        assert!(is_digit('3'));
    }

    #[test]
    fn lone_marks_cover_everything_but_consonants() {
        assert!(is_lone_mark('ฯ'));
        assert!(is_lone_mark('ะ'));
        assert!(is_lone_mark('เ'));
        assert!(is_lone_mark('้'));
        assert!(!is_lone_mark('ก'));
        assert!(!is_lone_mark('ฮ'));
        for c in ['\u{0E01}', '\u{0E2E}'] {
            assert!(is_thai_letter(c) && !is_lone_mark(c));
        }
    }

    #[test]
    fn cluster_boundaries() {
        assert!(can_break_between('น', 'ก'));
        assert!(!can_break_between('ก', 'า'));
        assert!(!can_break_between('ก', '่'));
        assert!(!can_break_between('เ', 'ก'));
        assert!(can_break_between('า', 'เ'));
    }

    #[test]
    fn detects_thai_letters_in_mixed_text() {
        assert!(has_thai_letter("<NUM>ปี"));
        assert!(!has_thai_letter("<NUM>"));
        assert!(!has_thai_letter("๑๒๓"));
        assert!(!has_thai_letter(""));
    }
}
