// src/nlp/lemma.rs
//! Lemmatizers.
//!
//! `MorphyLemmatizer` reads every token as a noun, like a dictionary lemmatizer
//! called without a part of speech: irregular plurals come from an exception
//! table, regular plurals lose their inflection, everything else is returned
//! unchanged. Verb forms such as "flying" or "felt" are therefore kept.
//!
//! `SnowballLemmatizer` trades dictionary forms for Porter2 stems.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use rust_stemmers::{Algorithm, Stemmer};

use super::Lemmatizer;

static NOUN_EXCEPTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("children", "child"),
        ("men", "man"),
        ("women", "woman"),
        ("teeth", "tooth"),
        ("feet", "foot"),
        ("geese", "goose"),
        ("mice", "mouse"),
        ("lice", "louse"),
        ("oxen", "ox"),
        ("wolves", "wolf"),
        ("knives", "knife"),
        ("wives", "wife"),
        ("lives", "life"),
        ("leaves", "leaf"),
        ("halves", "half"),
        ("selves", "self"),
        ("shelves", "shelf"),
        ("thieves", "thief"),
        ("loaves", "loaf"),
        ("calves", "calf"),
        ("criteria", "criterion"),
        ("phenomena", "phenomenon"),
        ("cacti", "cactus"),
        ("fungi", "fungus"),
        ("octopi", "octopus"),
        ("dice", "die"),
        ("data", "datum"),
    ])
});

/// Endings that look plural but are not (glass, virus, crisis, news ...).
const PLURAL_LOOKALIKES: &[&str] = &["ss", "us", "is", "ous", "news"];

/// Words that end in `s` without being plurals.
const UNINFLECTED: &[&str] = &[
    "always", "perhaps", "sometimes", "afterwards", "towards", "whereas", "species",
    "series", "clothes", "stairs", "scissors", "pants", "jeans",
];

/// Noun detachment rules, first match wins: (suffix, replacement).
const NOUN_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("zes", "z"),
    ("ies", "y"),
    ("men", "man"),
    ("s", ""),
];

#[derive(Debug, Clone, Default)]
pub struct MorphyLemmatizer;

impl MorphyLemmatizer {
    pub fn new() -> Self {
        Self
    }

    fn noun_lemma(word: &str) -> String {
        if let Some(lemma) = NOUN_EXCEPTIONS.get(word) {
            return (*lemma).to_string();
        }
        // Too short to carry an inflection ("was", "bus", "gas").
        if word.chars().count() <= 3 || !word.chars().all(char::is_alphabetic) {
            return word.to_string();
        }
        if UNINFLECTED.contains(&word) || PLURAL_LOOKALIKES.iter().any(|s| word.ends_with(s)) {
            return word.to_string();
        }
        for (suffix, repl) in NOUN_RULES {
            if let Some(stem) = word.strip_suffix(suffix) {
                if stem.chars().count() >= 2 {
                    return format!("{stem}{repl}");
                }
            }
        }
        word.to_string()
    }
}

impl Lemmatizer for MorphyLemmatizer {
    fn lemmatize(&self, token: &str) -> String {
        Self::noun_lemma(token)
    }
}

pub struct SnowballLemmatizer {
    stemmer: Stemmer,
}

impl SnowballLemmatizer {
    pub fn english() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }
}

impl std::fmt::Debug for SnowballLemmatizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SnowballLemmatizer(english)")
    }
}

impl Lemmatizer for SnowballLemmatizer {
    fn lemmatize(&self, token: &str) -> String {
        self.stemmer.stem(token).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_plurals_are_reduced() {
        let l = MorphyLemmatizer::new();
        assert_eq!(l.lemmatize("dreams"), "dream");
        assert_eq!(l.lemmatize("churches"), "church");
        assert_eq!(l.lemmatize("boxes"), "box");
        assert_eq!(l.lemmatize("stories"), "story");
        assert_eq!(l.lemmatize("firemen"), "fireman");
    }

    #[test]
    fn irregular_plurals_use_the_exception_table() {
        let l = MorphyLemmatizer::new();
        assert_eq!(l.lemmatize("teeth"), "tooth");
        assert_eq!(l.lemmatize("wolves"), "wolf");
        assert_eq!(l.lemmatize("children"), "child");
    }

    #[test]
    fn verb_forms_and_lookalikes_are_kept() {
        let l = MorphyLemmatizer::new();
        for w in ["flying", "felt", "water", "free", "glass", "virus", "crisis", "was", "3"] {
            assert_eq!(l.lemmatize(w), w, "{w} should be stable");
        }
    }

    #[test]
    fn lemmas_are_fixed_points() {
        let l = MorphyLemmatizer::new();
        for w in ["dreams", "teeth", "stories", "houses", "flying"] {
            let once = l.lemmatize(w);
            assert_eq!(l.lemmatize(&once), once);
        }
    }

    #[test]
    fn snowball_stems() {
        let l = SnowballLemmatizer::english();
        assert_eq!(l.lemmatize("running"), "run");
        assert_eq!(l.lemmatize("dreams"), "dream");
    }
}
