// src/nlp/stopwords.rs
//! Stop-word sets, embedded per language.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use super::StopWords;
use crate::error::OracleError;

static ENGLISH: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    include_str!("../../data/stopwords_english.txt")
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
});

#[derive(Debug, Clone)]
pub struct StopWordSet {
    words: &'static HashSet<&'static str>,
}

impl StopWordSet {
    /// Resolve the set for a language code ("english" / "en").
    pub fn for_language(lang: &str) -> Result<Self, OracleError> {
        match lang.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Self { words: &ENGLISH }),
            other => Err(OracleError::new(
                "stop-words",
                format!("no stop-word list for language '{other}'"),
            )),
        }
    }

    pub fn english() -> Self {
        Self { words: &ENGLISH }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.words.iter().copied()
    }
}

impl StopWords for StopWordSet {
    fn is_stop_word(&self, token: &str) -> bool {
        self.words.contains(token)
    }
}
