// src/nlp/mod.rs
//! Linguistic oracles: narrow capabilities the pipeline is built on.
//!
//! The analysis pipeline never calls a concrete NLP implementation directly.
//! Each capability is a trait; `Oracles` bundles one implementation of each and
//! is injected into `DreamAnalyzer`. The bundled defaults are deterministic and
//! need no model downloads, so any real NLP backend can replace them one by one.

pub mod lemma;
pub mod ner;
pub mod pos;
pub mod sentiment;
pub mod stopwords;
pub mod tokenize;

use std::sync::Arc;

use anyhow::Context;

use crate::config::{AnalyzerConfig, LemmatizerKind};
use crate::entry::NamedEntity;
use crate::error::OracleError;

// Re-export the bundled implementations.
pub use lemma::{MorphyLemmatizer, SnowballLemmatizer};
pub use ner::PatternRecognizer;
pub use pos::RuleTagger;
pub use sentiment::LexiconSentiment;
pub use stopwords::StopWordSet;
pub use tokenize::WordTokenizer;

/// Text → ordered word tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, OracleError>;
}

/// Membership test against a language's stop-word set.
pub trait StopWords: Send + Sync {
    fn is_stop_word(&self, token: &str) -> bool;
}

/// Token → dictionary base form (noun reading).
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, token: &str) -> String;
}

/// Tokens → parallel Penn-Treebank tags.
pub trait PosTagger: Send + Sync {
    fn tag(&self, tokens: &[String]) -> Result<Vec<String>, OracleError>;
}

/// Raw sentiment scores as produced by an oracle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SentimentScores {
    /// Valence in [-1, 1].
    pub polarity: f64,
    /// Objective (0) to subjective (1).
    pub subjectivity: f64,
}

pub trait SentimentOracle: Send + Sync {
    fn score(&self, text: &str) -> Result<SentimentScores, OracleError>;
}

/// Raw text → entity spans in order of appearance.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Result<Vec<NamedEntity>, OracleError>;
}

/// One implementation of every capability the pipeline needs.
#[derive(Clone)]
pub struct Oracles {
    pub tokenizer: Arc<dyn Tokenizer>,
    pub stop_words: Arc<dyn StopWords>,
    pub lemmatizer: Arc<dyn Lemmatizer>,
    pub tagger: Arc<dyn PosTagger>,
    pub sentiment: Arc<dyn SentimentOracle>,
    pub recognizer: Arc<dyn EntityRecognizer>,
}

impl Oracles {
    /// Build the bundled deterministic oracles according to `cfg`.
    ///
    /// Fails when an asset cannot be prepared (unknown stop-word language,
    /// unreadable NER pattern directory). That is an operator precondition,
    /// surfaced before any request is served.
    pub fn bundled(cfg: &AnalyzerConfig) -> anyhow::Result<Self> {
        let stop_words = StopWordSet::for_language(&cfg.language)
            .with_context(|| format!("loading stop words for '{}'", cfg.language))?;

        let lemmatizer: Arc<dyn Lemmatizer> = match cfg.lemmatizer {
            LemmatizerKind::Morphy => Arc::new(MorphyLemmatizer::new()),
            LemmatizerKind::Snowball => Arc::new(SnowballLemmatizer::english()),
        };

        let recognizer = match cfg.ner_patterns_dir() {
            Some(dir) => PatternRecognizer::from_dir(&dir)
                .with_context(|| format!("loading NER patterns from {}", dir.display()))?,
            None => PatternRecognizer::builtin(),
        };

        Ok(Self {
            tokenizer: Arc::new(WordTokenizer::new()),
            stop_words: Arc::new(stop_words),
            lemmatizer,
            tagger: Arc::new(RuleTagger::new()),
            sentiment: Arc::new(LexiconSentiment::new()),
            recognizer: Arc::new(recognizer),
        })
    }
}

impl std::fmt::Debug for Oracles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Oracles").finish_non_exhaustive()
    }
}
