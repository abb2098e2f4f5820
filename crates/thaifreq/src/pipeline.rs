//! Clean → segment → count → filter → normalize, over one or more documents.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use thai_segment::{DEFAULT_ENGINE, SegmentError, Segmenter};
use tracing::{debug, info, warn};

use crate::clean::Cleaner;
use crate::freq::{self, DEFAULT_MIN_FREQ, FrequencyMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOptions {
    pub keep_numerals: bool,
    pub engine: String,
    pub min_freq: u64,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            keep_numerals: false,
            engine: DEFAULT_ENGINE.to_string(),
            min_freq: DEFAULT_MIN_FREQ,
        }
    }
}

/// One ranked row of a [`FrequencyReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub token: String,
    pub count: u64,
    pub probability: f64,
}

/// Result of a pipeline run, ranked by count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyReport {
    pub engine: String,
    pub keep_numerals: bool,
    pub min_freq: u64,
    pub documents: usize,
    /// Tokens produced by the segmenter before filtering.
    pub total_tokens: u64,
    /// Tokens that survived filtering; the denominator of every probability.
    pub retained_tokens: u64,
    pub entries: Vec<FrequencyEntry>,
}

impl FrequencyReport {
    /// Retained counts as a map.
    pub fn counts(&self) -> FrequencyMap {
        self.entries
            .iter()
            .map(|e| (e.token.clone(), e.count))
            .collect()
    }

    /// `token<TAB>count<TAB>probability` lines in rank order.
    pub fn write_tsv<W: Write>(&self, mut out: W) -> io::Result<()> {
        for entry in &self.entries {
            writeln!(out, "{}\t{}\t{}", entry.token, entry.count, entry.probability)?;
        }
        out.flush()
    }
}

pub struct Pipeline<'a> {
    segmenter: &'a dyn Segmenter,
    cleaner: Cleaner,
    options: PipelineOptions,
}

impl<'a> Pipeline<'a> {
    /// Pipeline using the Thai cleaner matching `options.keep_numerals`.
    pub fn new(segmenter: &'a dyn Segmenter, options: PipelineOptions) -> Self {
        let cleaner = Cleaner::thai(options.keep_numerals).clone();
        Self {
            segmenter,
            cleaner,
            options,
        }
    }

    /// Replace the cleaner, e.g. one built from a custom alphabet.
    pub fn with_cleaner(mut self, cleaner: Cleaner) -> Self {
        self.cleaner = cleaner;
        self
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn clean(&self, text: &str) -> String {
        self.cleaner.clean(text)
    }

    /// Clean `text` and segment it with the configured engine.
    pub fn tokenize(&self, text: &str) -> Result<Vec<String>, SegmentError> {
        let cleaned = self.clean(text);
        self.segmenter.segment(&cleaned, &self.options.engine)
    }

    /// Raw counts over every document.
    pub fn count_documents<I, T>(&self, documents: I) -> Result<(FrequencyMap, usize), SegmentError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut total = FrequencyMap::new();
        let mut seen = 0usize;
        for doc in documents {
            let tokens = self.tokenize(doc.as_ref())?;
            debug!(document = seen, tokens = tokens.len(), "segmented document");
            freq::merge_into(&mut total, freq::count(&tokens));
            seen += 1;
        }
        Ok((total, seen))
    }

    /// Full run: counts, filtering and normalization into a ranked report.
    ///
    /// When nothing survives filtering the report has no entries rather than
    /// attempting to normalize an empty table.
    pub fn run<I, T>(&self, documents: I) -> Result<FrequencyReport, SegmentError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let (counts, documents) = self.count_documents(documents)?;
        let total_tokens: u64 = counts.values().sum();
        let filtered = freq::filter(&counts, self.options.min_freq);
        let retained_tokens: u64 = filtered.values().sum();

        let entries = match freq::normalize(&filtered) {
            Ok(probs) => freq::ranked(&filtered)
                .into_iter()
                .map(|(token, count)| FrequencyEntry {
                    token: token.to_string(),
                    count,
                    probability: probs[token],
                })
                .collect(),
            Err(err) => {
                warn!(min_freq = self.options.min_freq, "no tokens retained: {err}");
                Vec::new()
            }
        };

        info!(
            documents,
            total_tokens,
            vocabulary = counts.len(),
            retained = entries.len(),
            "built frequency table"
        );

        Ok(FrequencyReport {
            engine: self.options.engine.clone(),
            keep_numerals: self.options.keep_numerals,
            min_freq: self.options.min_freq,
            documents,
            total_tokens,
            retained_tokens,
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn whitespace(text: &str, engine: &str) -> Result<Vec<String>, SegmentError> {
        if engine != DEFAULT_ENGINE {
            return Err(SegmentError::UnknownEngine(engine.to_string()));
        }
        Ok(text.split_whitespace().map(str::to_string).collect())
    }

    #[test]
    fn tokenizes_cleaned_text() {
        let pipeline = Pipeline::new(&whitespace, PipelineOptions::default());
        assert_eq!(
            pipeline.tokenize("สวัสดี123ครับ!").unwrap(),
            vec!["สวัสดี", "ครับ"]
        );
    }

    #[test]
    fn runs_whole_pipeline() {
        let options = PipelineOptions {
            min_freq: 2,
            ..PipelineOptions::default()
        };
        let pipeline = Pipeline::new(&whitespace, options);
        let report = pipeline
            .run(["ไป มา ไป hello", "ไป มา ดี", "ฯ ฯ ฯ"])
            .unwrap();

        assert_eq!(report.documents, 3);
        assert_eq!(report.total_tokens, 9);
        assert_eq!(report.retained_tokens, 5);
        let tokens: Vec<&str> = report.entries.iter().map(|e| e.token.as_str()).collect();
        assert_eq!(tokens, vec!["ไป", "มา"]);
        assert_eq!(report.entries[0].probability, 0.6);
        let sum: f64 = report.entries.iter().map(|e| e.probability).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_result_skips_normalization() {
        let pipeline = Pipeline::new(&whitespace, PipelineOptions::default());
        let report = pipeline.run(["hello world", ""]).unwrap();
        assert!(report.entries.is_empty());
        assert_eq!(report.retained_tokens, 0);
    }

    #[test]
    fn segmenter_errors_propagate() {
        let options = PipelineOptions {
            engine: "mystery".into(),
            ..PipelineOptions::default()
        };
        let pipeline = Pipeline::new(&whitespace, options);
        assert_eq!(
            pipeline.run(["ไป"]).unwrap_err(),
            SegmentError::UnknownEngine("mystery".into())
        );
    }

    #[test]
    fn writes_tsv_rows() {
        let report = FrequencyReport {
            engine: DEFAULT_ENGINE.into(),
            keep_numerals: false,
            min_freq: 0,
            documents: 1,
            total_tokens: 4,
            retained_tokens: 4,
            entries: vec![
                FrequencyEntry {
                    token: "ไป".into(),
                    count: 3,
                    probability: 0.75,
                },
                FrequencyEntry {
                    token: "มา".into(),
                    count: 1,
                    probability: 0.25,
                },
            ],
        };
        let mut buf = Vec::new();
        report.write_tsv(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "ไป\t3\t0.75\nมา\t1\t0.25\n");
        assert_eq!(report.counts().len(), 2);
    }
}
