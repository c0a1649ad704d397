// tests/pipeline_properties.rs
//
// Pipeline properties, exercised two ways:
// - with stub oracles injected into DreamAnalyzer (boundaries, failures, stage inputs)
// - with the bundled oracles over seeded random sentences

use std::sync::Arc;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use dream_journal_analyzer::analyze::SymbolEntry;
use dream_journal_analyzer::nlp::{
    EntityRecognizer, Lemmatizer, Oracles, PosTagger, SentimentOracle, SentimentScores,
    StopWordSet, StopWords, Tokenizer,
};
use dream_journal_analyzer::{
    AnalyzeError, AnalyzerConfig, DreamAnalyzer, NamedEntity, OracleError, SentimentLabel,
    Session, SymbolDictionary,
};

// ---- stub oracles ----

struct Whitespace;
impl Tokenizer for Whitespace {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, OracleError> {
        Ok(text.split_whitespace().map(str::to_string).collect())
    }
}

struct NoStopWords;
impl StopWords for NoStopWords {
    fn is_stop_word(&self, _token: &str) -> bool {
        false
    }
}

struct Identity;
impl Lemmatizer for Identity {
    fn lemmatize(&self, token: &str) -> String {
        token.to_string()
    }
}

struct AllNouns;
impl PosTagger for AllNouns {
    fn tag(&self, tokens: &[String]) -> Result<Vec<String>, OracleError> {
        Ok(vec!["NN".to_string(); tokens.len()])
    }
}

struct BrokenTagger;
impl PosTagger for BrokenTagger {
    fn tag(&self, _tokens: &[String]) -> Result<Vec<String>, OracleError> {
        Err(OracleError::new("pos-tagger", "model not loaded"))
    }
}

struct ShortTagger;
impl PosTagger for ShortTagger {
    fn tag(&self, tokens: &[String]) -> Result<Vec<String>, OracleError> {
        Ok(vec!["NN".to_string(); tokens.len().saturating_sub(1)])
    }
}

struct Fixed(f64);
impl SentimentOracle for Fixed {
    fn score(&self, _text: &str) -> Result<SentimentScores, OracleError> {
        Ok(SentimentScores {
            polarity: self.0,
            subjectivity: 0.5,
        })
    }
}

/// Only recognises "Paris" when it still has its capital letter.
struct CapitalParis;
impl EntityRecognizer for CapitalParis {
    fn recognize(&self, text: &str) -> Result<Vec<NamedEntity>, OracleError> {
        Ok(text
            .contains("Paris")
            .then(|| NamedEntity::new("Paris", "GPE"))
            .into_iter()
            .collect())
    }
}

fn stub_oracles(polarity: f64) -> Oracles {
    Oracles {
        tokenizer: Arc::new(Whitespace),
        stop_words: Arc::new(NoStopWords),
        lemmatizer: Arc::new(Identity),
        tagger: Arc::new(AllNouns),
        sentiment: Arc::new(Fixed(polarity)),
        recognizer: Arc::new(CapitalParis),
    }
}

fn stub_analyzer(oracles: Oracles) -> DreamAnalyzer {
    DreamAnalyzer::new(
        oracles,
        SymbolDictionary::builtin(),
        &AnalyzerConfig::default(),
    )
}

fn label_for(polarity: f64) -> SentimentLabel {
    stub_analyzer(stub_oracles(polarity))
        .analyze("a dream", Utc::now())
        .expect("stub analysis")
        .sentiment_label()
}

#[test]
fn thresholds_are_exclusive() {
    assert_eq!(label_for(0.10), SentimentLabel::Neutral);
    assert_eq!(label_for(-0.10), SentimentLabel::Neutral);
    assert_eq!(label_for(0.0), SentimentLabel::Neutral);
    assert_eq!(label_for(0.1001), SentimentLabel::Positive);
    assert_eq!(label_for(-0.1001), SentimentLabel::Negative);
    assert_eq!(label_for(1.0), SentimentLabel::Positive);
    assert_eq!(label_for(-1.0), SentimentLabel::Negative);
}

#[test]
fn entities_see_raw_text_symbols_see_normalized_text() {
    let e = stub_analyzer(stub_oracles(0.0))
        .analyze("Flying over Paris", Utc::now())
        .unwrap();
    assert_eq!(e.normalized_text(), "flying over paris");
    assert_eq!(e.entities(), &[NamedEntity::new("Paris", "GPE")]);
    assert_eq!(e.symbol_keys(), vec!["flying"]);
}

#[test]
fn keywords_come_from_normalized_tokens() {
    let e = stub_analyzer(stub_oracles(0.0))
        .analyze("Dog dog CAT dog bird cat fish eel", Utc::now())
        .unwrap();
    let pairs: Vec<(&str, usize)> = e
        .keywords()
        .iter()
        .map(|k| (k.word.as_str(), k.count))
        .collect();
    assert_eq!(
        pairs,
        vec![("dog", 3), ("cat", 2), ("bird", 1), ("fish", 1), ("eel", 1)]
    );
}

#[test]
fn failing_oracle_aborts_and_leaves_journal_unchanged() {
    let mut oracles = stub_oracles(0.0);
    oracles.tagger = Arc::new(BrokenTagger);
    let mut session = Session::new(Arc::new(stub_analyzer(oracles)));

    let err = session.analyze("water everywhere").unwrap_err();
    match err {
        AnalyzeError::OracleUnavailable { oracle, .. } => assert_eq!(oracle, "pos-tagger"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(session.journal().is_empty());
}

#[test]
fn tag_count_mismatch_is_an_oracle_failure() {
    let mut oracles = stub_oracles(0.0);
    oracles.tagger = Arc::new(ShortTagger);
    let res = stub_analyzer(oracles).analyze("two words", Utc::now());
    assert!(matches!(res, Err(AnalyzeError::OracleUnavailable { .. })));
}

#[test]
fn custom_dictionary_keeps_its_own_order() {
    let dict = SymbolDictionary::from_entries(vec![
        SymbolEntry {
            key: "moon".into(),
            meanings: vec!["intuition".into()],
        },
        SymbolEntry {
            key: "sun".into(),
            meanings: vec!["vitality".into()],
        },
    ])
    .unwrap();
    let a = DreamAnalyzer::new(stub_oracles(0.0), dict, &AnalyzerConfig::default());
    let e = a.analyze("sun then moon", Utc::now()).unwrap();
    assert_eq!(e.symbol_keys(), vec!["moon", "sun"]);
    assert_eq!(e.symbols()[0].meanings, vec!["intuition"]);
}

// ---- bundled oracles over random sentences ----

const CONTENT: &[&str] = &[
    "water", "dogs", "flying", "houses", "teeth", "road", "school", "fire", "sky", "money",
    "garden", "stranger", "Paris", "mirror", "ocean",
];
const PUNCT: &[&str] = &[",", ".", "!", "?", ";", "...", "-", "(", ")"];

fn random_sentence(rng: &mut StdRng, stop: &[&'static str]) -> String {
    let n = rng.random_range(1..20);
    let mut words: Vec<String> = Vec::with_capacity(n);
    for _ in 0..n {
        let w = match rng.random_range(0..3) {
            0 => *stop.choose(rng).unwrap(),
            1 => *CONTENT.choose(rng).unwrap(),
            _ => *PUNCT.choose(rng).unwrap(),
        };
        if rng.random_bool(0.2) {
            let mut c = w.chars();
            let cap: String = c
                .next()
                .map(|f| f.to_uppercase().chain(c).collect())
                .unwrap_or_default();
            words.push(cap);
        } else {
            words.push(w.to_string());
        }
    }
    words.join(" ")
}

#[test]
fn normalized_text_never_holds_stop_words_or_punctuation() {
    let stop_set = StopWordSet::english();
    // contracted forms split into pieces that are not all stop words themselves
    let stop: Vec<&'static str> = stop_set.iter().filter(|w| !w.contains('\'')).collect();
    let analyzer = DreamAnalyzer::from_config(&AnalyzerConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(0xD4EA);

    for _ in 0..200 {
        let text = random_sentence(&mut rng, &stop);
        if text.trim().is_empty() {
            continue;
        }
        let e = analyzer.analyze(&text, Utc::now()).unwrap();
        let norm = e.normalized_text();
        assert_eq!(norm, norm.to_lowercase(), "input: {text}");
        for tok in norm.split(' ').filter(|t| !t.is_empty()) {
            assert!(!stop_set.is_stop_word(tok), "stop word {tok:?} from {text:?}");
            assert!(
                tok.chars().all(char::is_alphanumeric),
                "punctuation {tok:?} from {text:?}"
            );
        }
    }
}

#[test]
fn matched_symbols_are_substrings_in_dictionary_order() {
    let analyzer = DreamAnalyzer::from_config(&AnalyzerConfig::default()).unwrap();
    let keys: Vec<String> = analyzer
        .symbols()
        .entries()
        .iter()
        .map(|e| e.key.clone())
        .collect();
    let stop: Vec<&'static str> = StopWordSet::english().iter().collect();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        let text = random_sentence(&mut rng, &stop);
        let Ok(e) = analyzer.analyze(&text, Utc::now()) else {
            continue;
        };
        let mut last = None;
        for s in e.symbols() {
            assert!(e.normalized_text().contains(&s.symbol));
            let pos = keys.iter().position(|k| *k == s.symbol).unwrap();
            assert!(last.map_or(true, |l| l < pos), "out of order in {text:?}");
            last = Some(pos);
        }
        assert!(e.keywords().len() <= 5);
        assert!(e
            .keywords()
            .windows(2)
            .all(|w| w[0].count >= w[1].count));
    }
}
