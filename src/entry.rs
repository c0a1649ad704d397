//! entry.rs — one analysed dream and the value types it is made of.
//!
//! A `DreamEntry` is produced once, by `DreamAnalyzer`, from a single input
//! text. Its fields are private and only readable afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Three-way sentiment classification of a dream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }

    /// Style hook for presentation layers.
    pub fn css_class(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A keyword and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub word: String,
    pub count: usize,
}

/// A recognised span of the raw text and its category, e.g. ("Paris", "GPE").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    pub text: String,
    pub label: String,
}

impl NamedEntity {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// A dictionary symbol found in the dream, with its possible meanings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedSymbol {
    pub symbol: String,
    pub meanings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DreamEntry {
    timestamp: DateTime<Utc>,
    raw_text: String,
    normalized_text: String,
    sentiment_label: SentimentLabel,
    sentiment_polarity: f64,
    sentiment_subjectivity: f64,
    keywords: Vec<KeywordCount>,
    entities: Vec<NamedEntity>,
    symbols: Vec<MatchedSymbol>,
}

/// Everything the pipeline derives from one text, minus the timestamp.
#[derive(Debug, Clone)]
pub(crate) struct EntryParts {
    pub raw_text: String,
    pub normalized_text: String,
    pub sentiment_label: SentimentLabel,
    pub sentiment_polarity: f64,
    pub sentiment_subjectivity: f64,
    pub keywords: Vec<KeywordCount>,
    pub entities: Vec<NamedEntity>,
    pub symbols: Vec<MatchedSymbol>,
}

impl DreamEntry {
    pub(crate) fn new(timestamp: DateTime<Utc>, parts: EntryParts) -> Self {
        Self {
            timestamp,
            raw_text: parts.raw_text,
            normalized_text: parts.normalized_text,
            sentiment_label: parts.sentiment_label,
            sentiment_polarity: parts.sentiment_polarity,
            sentiment_subjectivity: parts.sentiment_subjectivity,
            keywords: parts.keywords,
            entities: parts.entities,
            symbols: parts.symbols,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }
    pub fn normalized_text(&self) -> &str {
        &self.normalized_text
    }
    pub fn sentiment_label(&self) -> SentimentLabel {
        self.sentiment_label
    }
    pub fn sentiment_polarity(&self) -> f64 {
        self.sentiment_polarity
    }
    pub fn sentiment_subjectivity(&self) -> f64 {
        self.sentiment_subjectivity
    }
    pub fn keywords(&self) -> &[KeywordCount] {
        &self.keywords
    }
    pub fn entities(&self) -> &[NamedEntity] {
        &self.entities
    }
    pub fn symbols(&self) -> &[MatchedSymbol] {
        &self.symbols
    }

    /// Symbol keys only, in dictionary order.
    pub fn symbol_keys(&self) -> Vec<&str> {
        self.symbols.iter().map(|s| s.symbol.as_str()).collect()
    }

    /// Key themes for display: entities as "text (LABEL)" when there are any,
    /// otherwise keywords as "word (count)".
    pub fn themes(&self) -> Vec<String> {
        if !self.entities.is_empty() {
            return self
                .entities
                .iter()
                .map(|e| format!("{} ({})", e.text, e.label))
                .collect();
        }
        self.keywords
            .iter()
            .map(|k| format!("{} ({})", k.word, k.count))
            .collect()
    }

    /// One-line human summary of the analysis.
    pub fn summary(&self) -> String {
        let mentioned = if self.keywords.is_empty() {
            "No Keywords".to_string()
        } else {
            self.keywords
                .iter()
                .map(|k| k.word.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!(
            "This dream had a {} sentiment and frequently mentioned: {}",
            self.sentiment_label, mentioned
        )
    }
}
