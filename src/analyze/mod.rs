// src/analyze/mod.rs
//! Dream analysis pipeline: turns one raw text into a `DreamEntry`.
//! Order:
//! 1) Lexical normalization (raw → normalized)
//! 2) Keyword tagging over the normalized text → top-N frequency table
//! 3) Sentiment scoring over the normalized text
//! 4) Entity recognition over the raw text
//! 5) Symbol matching over the normalized text

pub mod entities;
pub mod keywords;
pub mod normalize;
pub mod sentiment;
pub mod symbols;

use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::AnalyzerConfig;
use crate::entry::{DreamEntry, EntryParts};
use crate::error::AnalyzeError;
use crate::metrics::{ORACLE_FAILURES, REJECTED};
use crate::nlp::Oracles;

// Re-export convenient types.
pub use crate::analyze::keywords::{extract_keywords, top_keywords};
pub use crate::analyze::normalize::normalize;
pub use crate::analyze::sentiment::{classify, SentimentReading, Thresholds};
pub use crate::analyze::symbols::{SymbolDictionary, SymbolEntry};

/// Stateless pipeline over injected oracles. Cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct DreamAnalyzer {
    oracles: Oracles,
    symbols: Arc<SymbolDictionary>,
    thresholds: Thresholds,
    keyword_top_n: usize,
}

impl DreamAnalyzer {
    pub fn new(oracles: Oracles, symbols: SymbolDictionary, cfg: &AnalyzerConfig) -> Self {
        Self {
            oracles,
            symbols: Arc::new(symbols),
            thresholds: Thresholds::from(cfg),
            keyword_top_n: cfg.keyword_top_n.max(1),
        }
    }

    /// Bundled oracles plus the configured (or embedded) symbol dictionary.
    pub fn from_config(cfg: &AnalyzerConfig) -> anyhow::Result<Self> {
        let oracles = Oracles::bundled(cfg)?;
        let symbols = match cfg.symbols_path() {
            Some(path) => SymbolDictionary::load_from_file(&path)
                .with_context(|| format!("loading symbols from {}", path.display()))?,
            None => SymbolDictionary::builtin(),
        };
        info!(
            symbols = symbols.len(),
            lemmatizer = ?cfg.lemmatizer,
            top_n = cfg.keyword_top_n,
            "dream analyzer ready"
        );
        Ok(Self::new(oracles, symbols, cfg))
    }

    pub fn symbols(&self) -> &SymbolDictionary {
        &self.symbols
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Run the whole pipeline. Blank input is rejected before any oracle runs;
    /// any oracle failure aborts the run with nothing produced.
    pub fn analyze(&self, raw_text: &str, at: DateTime<Utc>) -> Result<DreamEntry, AnalyzeError> {
        if raw_text.trim().is_empty() {
            metrics::counter!(REJECTED).increment(1);
            debug!("blank dream text rejected");
            return Err(AnalyzeError::BlankInput);
        }

        let id = anon_hash(raw_text);
        match self.run(raw_text) {
            Ok(parts) => {
                info!(
                    %id,
                    label = %parts.sentiment_label,
                    polarity = parts.sentiment_polarity,
                    keywords = parts.keywords.len(),
                    entities = parts.entities.len(),
                    symbols = parts.symbols.len(),
                    "dream analysed"
                );
                Ok(DreamEntry::new(at, parts))
            }
            Err(err) => {
                metrics::counter!(ORACLE_FAILURES).increment(1);
                warn!(%id, error = %err, "dream analysis failed");
                Err(err)
            }
        }
    }

    fn run(&self, raw_text: &str) -> Result<EntryParts, AnalyzeError> {
        let o = &self.oracles;

        let normalized_text = normalize(
            raw_text,
            o.tokenizer.as_ref(),
            o.stop_words.as_ref(),
            o.lemmatizer.as_ref(),
        )?;

        let kw = extract_keywords(&normalized_text, o.tokenizer.as_ref(), o.tagger.as_ref())?;
        let keywords = top_keywords(&kw, self.keyword_top_n);

        let sentiment =
            sentiment::score_sentiment(&normalized_text, o.sentiment.as_ref(), &self.thresholds)?;

        let entities = entities::recognize_entities(raw_text, o.recognizer.as_ref())?;

        let symbols = self.symbols.match_symbols(&normalized_text);

        Ok(EntryParts {
            raw_text: raw_text.to_string(),
            normalized_text,
            sentiment_label: sentiment.label,
            sentiment_polarity: sentiment.polarity,
            sentiment_subjectivity: sentiment.subjectivity,
            keywords,
            entities,
            symbols,
        })
    }
}

/// Short anonymised id for log lines; raw dream text is never logged.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::SentimentLabel;

    fn analyzer() -> DreamAnalyzer {
        DreamAnalyzer::from_config(&AnalyzerConfig::default()).unwrap()
    }

    #[test]
    fn flying_over_water_end_to_end() {
        let e = analyzer()
            .analyze("I was flying over water and felt free", Utc::now())
            .unwrap();
        assert_eq!(e.normalized_text(), "flying water felt free");
        for stop in ["i", "was", "over", "and"] {
            assert!(!e.normalized_text().split(' ').any(|w| w == stop));
        }
        assert_eq!(e.symbol_keys(), vec!["water", "flying"]);
        assert!(e.sentiment_polarity() > 0.0);
        assert_eq!(e.sentiment_label(), SentimentLabel::Positive);
        assert!(e.entities().is_empty());
        assert_eq!(e.raw_text(), "I was flying over water and felt free");
    }

    #[test]
    fn blank_input_is_rejected() {
        let a = analyzer();
        assert!(matches!(a.analyze("", Utc::now()), Err(AnalyzeError::BlankInput)));
        assert!(matches!(a.analyze(" \n\t", Utc::now()), Err(AnalyzeError::BlankInput)));
    }

    #[test]
    fn stop_word_only_text_still_yields_an_entry() {
        let e = analyzer().analyze("It was there, and then...", Utc::now()).unwrap();
        assert_eq!(e.normalized_text(), "");
        assert!(e.keywords().is_empty());
        assert!(e.symbols().is_empty());
        assert_eq!(e.sentiment_label(), SentimentLabel::Neutral);
    }

    #[test]
    fn anon_hash_is_short_and_stable() {
        let a = anon_hash("dream");
        assert_eq!(a.len(), 12);
        assert_eq!(a, anon_hash("dream"));
        assert_ne!(a, anon_hash("dreams"));
    }
}
