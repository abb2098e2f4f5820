use std::collections::HashMap;

use thai_segment::{DictionarySegmenter, Engine};
use thaifreq::{FrequencyMap, Pipeline, PipelineOptions, clean, count, filter, normalize};

fn freq(entries: &[(&str, u64)]) -> FrequencyMap {
    entries.iter().map(|(t, n)| (t.to_string(), *n)).collect()
}

#[test]
fn documented_scenarios_hold() {
    assert_eq!(clean("สวัสดี123ครับ!", false), "สวัสดี ครับ");
    assert_eq!(clean("อายุ 25 ปี", true), "อายุ <NUM> ปี");
    assert_eq!(
        filter(&freq(&[("กกกก", 5), ("ฯ", 10), ("บ้าน", 2)]), 3),
        freq(&[("ก", 5)])
    );
    let probs = normalize(&freq(&[("a", 1), ("b", 3)])).unwrap();
    assert_eq!(probs, HashMap::from([("a".to_string(), 0.25), ("b".to_string(), 0.75)]));
}

#[test]
fn stages_compose_over_a_corpus_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corpus.txt");
    std::fs::write(
        &path,
        "วันนี้ฉันไปโรงเรียน 2 ครั้ง!\nพรุ่งนี้ฉันไปโรงเรียนอีก\nฉันชอบโรงเรียน... ไป\n",
    )
    .unwrap();
    let text = std::fs::read_to_string(&path).unwrap();

    let segmenter = DictionarySegmenter::embedded().unwrap();
    let pipeline = Pipeline::new(&segmenter, PipelineOptions::default());

    let tokens = pipeline.tokenize(&text).unwrap();
    let counts = count(&tokens);
    assert_eq!(counts.values().sum::<u64>(), tokens.len() as u64);
    assert_eq!(counts["ฉัน"], 3);
    assert_eq!(counts["โรงเรียน"], 3);

    let report = pipeline.run([text.as_str()]).unwrap();
    let retained: Vec<&str> = report.entries.iter().map(|e| e.token.as_str()).collect();
    assert_eq!(retained, vec!["ฉัน", "โรงเรียน", "ไป"]);
    assert!(report.entries.iter().all(|e| e.count >= 3));
    assert_eq!(report.retained_tokens, 9);
}

#[test]
fn numerals_never_survive_filtering() {
    let segmenter = DictionarySegmenter::embedded().unwrap();
    let options = PipelineOptions {
        keep_numerals: true,
        min_freq: 0,
        ..PipelineOptions::default()
    };
    let pipeline = Pipeline::new(&segmenter, options);

    let tokens = pipeline.tokenize("อายุ 25 ปี ราคา 1,000.50").unwrap();
    assert!(tokens.iter().any(|t| t == "<NUM>"));

    let report = pipeline.run(["อายุ 25 ปี ราคา 1,000.50"]).unwrap();
    assert!(report.entries.iter().all(|e| e.token != "<NUM>"));
}

#[test]
fn engines_agree_on_unambiguous_text() {
    let segmenter = DictionarySegmenter::embedded().unwrap();
    for engine in [Engine::Newmm, Engine::Longest] {
        let options = PipelineOptions {
            engine: engine.name().to_string(),
            ..PipelineOptions::default()
        };
        let pipeline = Pipeline::new(&segmenter, options);
        assert_eq!(
            pipeline.tokenize("สวัสดีครับ ขอบคุณครับ").unwrap(),
            vec!["สวัสดี", "ครับ", "ขอบคุณ", "ครับ"]
        );
    }
}
