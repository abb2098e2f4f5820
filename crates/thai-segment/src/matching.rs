use anyhow::Result;
use thai_script::{can_break_between, is_thai};
use tracing::trace;

use crate::dictionary::Dictionary;
use crate::{Engine, SegmentError, Segmenter};

/// Dictionary-driven segmenter implementing every [`Engine`].
#[derive(Debug, Clone)]
pub struct DictionarySegmenter {
    dict: Dictionary,
}

/// One segment of a Thai run: `chars[start..end]`, in the dictionary or not.
#[derive(Clone, Copy, Debug)]
struct Piece {
    start: usize,
    end: usize,
    known: bool,
}

impl DictionarySegmenter {
    pub fn new(dict: Dictionary) -> Self {
        Self { dict }
    }

    /// Segmenter over the bundled word list.
    pub fn embedded() -> Result<Self> {
        Ok(Self::new(Dictionary::embedded()?))
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// Segment with an already parsed engine.
    pub fn segment_with(&self, text: &str, engine: Engine) -> Vec<String> {
        let mut out = Vec::new();
        for chunk in text.split_whitespace() {
            if engine == Engine::Whitespace {
                out.push(chunk.to_string());
                continue;
            }
            for (thai, run) in script_runs(chunk) {
                if thai {
                    self.segment_thai(run, engine, &mut out);
                } else {
                    split_other(run, &mut out);
                }
            }
        }
        out
    }

    fn segment_thai(&self, run: &str, engine: Engine, out: &mut Vec<String>) {
        let chars: Vec<char> = run.chars().collect();
        let breaks = break_positions(&chars);
        let pieces = match engine {
            Engine::Longest => self.longest_match(&chars, &breaks),
            _ => self.maximal_match(&chars, &breaks),
        };
        trace!(run, pieces = pieces.len(), "segmented thai run");
        emit(&chars, &pieces, out);
    }

    /// Dynamic programme over break positions minimising
    /// `(unknown characters, token count)`.
    fn maximal_match(&self, chars: &[char], breaks: &[bool]) -> Vec<Piece> {
        let n = chars.len();
        let mut best: Vec<Option<(usize, usize)>> = vec![None; n + 1];
        let mut back: Vec<Option<Piece>> = vec![None; n + 1];
        best[0] = Some((0, 0));

        for start in 0..n {
            let Some((unknown, tokens)) = best[start] else {
                continue;
            };
            let mut relax = |piece: Piece, cost: (usize, usize)| {
                if best[piece.end].is_none_or(|current| cost < current) {
                    best[piece.end] = Some(cost);
                    back[piece.end] = Some(piece);
                }
            };

            let limit = (start + self.dict.max_word_len()).min(n);
            let mut candidate = String::new();
            for end in start + 1..=limit {
                candidate.push(chars[end - 1]);
                if breaks[end] && self.dict.contains(&candidate) {
                    relax(
                        Piece {
                            start,
                            end,
                            known: true,
                        },
                        (unknown, tokens + 1),
                    );
                }
            }

            let end = next_break(breaks, start);
            relax(
                Piece {
                    start,
                    end,
                    known: false,
                },
                (unknown + (end - start), tokens + 1),
            );
        }

        let mut pieces = Vec::new();
        let mut at = n;
        while at > 0 {
            let Some(piece) = back[at] else {
                break;
            };
            pieces.push(piece);
            at = piece.start;
        }
        pieces.reverse();
        pieces
    }

    fn longest_match(&self, chars: &[char], breaks: &[bool]) -> Vec<Piece> {
        let n = chars.len();
        let mut pieces = Vec::new();
        let mut start = 0;
        while start < n {
            let limit = (start + self.dict.max_word_len()).min(n);
            let mut candidate = String::new();
            let mut matched = None;
            for end in start + 1..=limit {
                candidate.push(chars[end - 1]);
                if breaks[end] && self.dict.contains(&candidate) {
                    matched = Some(end);
                }
            }
            let piece = match matched {
                Some(end) => Piece {
                    start,
                    end,
                    known: true,
                },
                None => Piece {
                    start,
                    end: next_break(breaks, start),
                    known: false,
                },
            };
            pieces.push(piece);
            start = piece.end;
        }
        pieces
    }
}

impl Segmenter for DictionarySegmenter {
    fn segment(&self, text: &str, engine: &str) -> Result<Vec<String>, SegmentError> {
        let engine: Engine = engine.parse()?;
        Ok(self.segment_with(text, engine))
    }
}

/// `breaks[k]` is true when a token may start at character `k`.
fn break_positions(chars: &[char]) -> Vec<bool> {
    let mut breaks = vec![true; chars.len() + 1];
    for k in 1..chars.len() {
        breaks[k] = can_break_between(chars[k - 1], chars[k]);
    }
    breaks
}

fn next_break(breaks: &[bool], start: usize) -> usize {
    (start + 1..breaks.len())
        .find(|&k| breaks[k])
        .unwrap_or(breaks.len() - 1)
}

/// Push pieces as tokens, gluing consecutive unknown pieces together.
fn emit(chars: &[char], pieces: &[Piece], out: &mut Vec<String>) {
    let mut pending: Option<String> = None;
    for piece in pieces {
        let text: String = chars[piece.start..piece.end].iter().collect();
        if piece.known {
            if let Some(unknown) = pending.take() {
                out.push(unknown);
            }
            out.push(text);
        } else {
            pending.get_or_insert_with(String::new).push_str(&text);
        }
    }
    if let Some(unknown) = pending {
        out.push(unknown);
    }
}

/// Split a whitespace-free chunk into maximal Thai and non-Thai runs.
fn script_runs(chunk: &str) -> Vec<(bool, &str)> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;
    for (idx, c) in chunk.char_indices() {
        let thai = is_thai(c);
        match current {
            Some(prev) if prev != thai => {
                runs.push((prev, &chunk[start..idx]));
                start = idx;
            }
            _ => {}
        }
        current = Some(thai);
    }
    if let Some(thai) = current {
        runs.push((thai, &chunk[start..]));
    }
    runs
}

/// Tokens for non-Thai text: `<TAG>` placeholders and alphanumeric runs stay
/// whole, any other symbol stands alone.
fn split_other(run: &str, out: &mut Vec<String>) {
    let mut rest = run;
    while let Some(c) = rest.chars().next() {
        let len = if c == '<' {
            tag_len(rest).unwrap_or(c.len_utf8())
        } else if c.is_alphanumeric() {
            rest.find(|ch: char| !ch.is_alphanumeric())
                .unwrap_or(rest.len())
        } else {
            c.len_utf8()
        };
        out.push(rest[..len].to_string());
        rest = &rest[len..];
    }
}

fn tag_len(text: &str) -> Option<usize> {
    let close = text.find('>')?;
    let inner = &text[1..close];
    let valid = !inner.is_empty()
        && inner
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then_some(close + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter(words: &str) -> DictionarySegmenter {
        DictionarySegmenter::new(Dictionary::from_str_content(words).unwrap())
    }

    #[test]
    fn prefers_fewest_tokens() {
        let seg = segmenter("ไป\nโรง\nเรียน\nโรงเรียน\n");
        assert_eq!(
            seg.segment_with("ไปโรงเรียน", Engine::Newmm),
            vec!["ไป", "โรงเรียน"]
        );
    }

    #[test]
    fn maximal_matching_beats_greedy_on_overlaps() {
        // Greedy takes "ตาก" and strands "ลม"; maximal matching finds a
        // fully known split.
        let seg = segmenter("ตา\nตาก\nกลม\n");
        assert_eq!(seg.segment_with("ตากลม", Engine::Newmm), vec!["ตา", "กลม"]);
        assert_eq!(seg.segment_with("ตากลม", Engine::Longest), vec!["ตาก", "ลม"]);
    }

    #[test]
    fn glues_unknown_clusters() {
        let seg = segmenter("ฉัน\nชอบ\n");
        assert_eq!(
            seg.segment_with("ฉันชอบกะเพรา", Engine::Newmm),
            vec!["ฉัน", "ชอบ", "กะเพรา"]
        );
    }

    #[test]
    fn never_splits_clusters() {
        // "ก" is known but ending a word there would strand the tone mark.
        let seg = segmenter("ก\n");
        let tokens = seg.segment_with("ก่า", Engine::Newmm);
        assert_eq!(tokens, vec!["ก่า"]);
    }

    #[test]
    fn handles_mixed_scripts_and_placeholders() {
        let seg = segmenter("อายุ\nปี\n");
        assert_eq!(
            seg.segment_with("อายุ<NUM>ปี abc12!", Engine::Newmm),
            vec!["อายุ", "<NUM>", "ปี", "abc12", "!"]
        );
        assert_eq!(
            seg.segment_with("a<b", Engine::Newmm),
            vec!["a", "<", "b"]
        );
    }

    #[test]
    fn whitespace_engine_only_splits_on_spaces() {
        let seg = segmenter("ไป\n");
        assert_eq!(
            seg.segment_with(" ไปไป  ไป\n", Engine::Whitespace),
            vec!["ไปไป", "ไป"]
        );
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        let seg = segmenter("ไป\n");
        for engine in Engine::ALL {
            assert!(seg.segment_with("", engine).is_empty());
            assert!(seg.segment_with("   \t\n", engine).is_empty());
        }
    }

    #[test]
    fn rejects_unknown_engine_names() {
        let seg = segmenter("ไป\n");
        let err = seg.segment("ไป", "attacut").unwrap_err();
        assert_eq!(err, SegmentError::UnknownEngine("attacut".into()));
    }
}
