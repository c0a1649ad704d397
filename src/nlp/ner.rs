// src/nlp/ner.rs
//! Pattern-based named-entity recognition over raw text.
//!
//! Three sources of candidate spans, in priority order:
//! 1. Gazetteer files: every `*.json` in a pattern directory, each holding a
//!    list of `{ "regex": ..., "label": ... }` patterns. `label` is optional and
//!    defaults to the upper-cased file stem (`gpe.json` → `GPE`).
//! 2. Built-in patterns for DATE, TIME, ORDINAL and CARDINAL expressions.
//! 3. Runs of capitalised words that do not open a sentence (→ PERSON).
//!
//! Overlaps are resolved left to right: the earliest span wins, then the
//! longest, then the higher-priority source.
//!
//! Notes:
//! - Regexes must be compatible with the `regex` crate (no lookarounds).
//! - A file that cannot be read or parsed is skipped with a warning.

use std::fs;
use std::path::Path;

use anyhow::Context;
use regex::Regex;
use serde::Deserialize;
use tracing::warn;

use super::EntityRecognizer;
use crate::entry::NamedEntity;
use crate::error::OracleError;

#[derive(Debug, Deserialize)]
struct Pattern {
    /// Regex string (compatible with the `regex` crate).
    regex: String,
    /// Entity category; falls back to the file stem.
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PatternFile {
    #[serde(default)]
    patterns: Vec<Pattern>,
}

#[derive(Debug, Clone)]
struct Rule {
    re: Regex,
    label: String,
    priority: u8,
}

const BUILTIN: &[(&str, &str)] = &[
    (
        "DATE",
        r"\b(?:January|February|March|April|May|June|July|August|September|October|November|December)(?: \d{1,2}(?:st|nd|rd|th)?)?(?:,? \d{4})?\b",
    ),
    (
        "DATE",
        r"\b(?:Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)s?\b",
    ),
    ("DATE", r"(?i)\b(?:yesterday|today|tomorrow|last (?:week|month|year))\b"),
    (
        "TIME",
        r"(?i)\b(?:\d{1,2}(?::\d{2})? ?(?:am|pm)|last night|midnight|noon|tonight|this (?:morning|evening))\b",
    ),
    (
        "ORDINAL",
        r"(?i)\b(?:first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth|\d+(?:st|nd|rd|th))\b",
    ),
    (
        "CARDINAL",
        r"(?i)\b(?:\d+(?:[.,]\d+)*|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|hundred|thousand|million)\b",
    ),
];

const PROPER_RUN: &str = r"\b[A-Z][a-z]+(?:[ -][A-Z][a-z]+)*\b";

/// Capitalised words that open sentences or address the reader, never names.
const NOT_NAMES: &[&str] = &["I", "Then", "Suddenly", "When", "The", "It", "We", "My"];

#[derive(Debug, Clone)]
pub struct PatternRecognizer {
    rules: Vec<Rule>,
    proper_run: Regex,
}

impl PatternRecognizer {
    /// Built-in patterns only.
    pub fn builtin() -> Self {
        let rules = BUILTIN
            .iter()
            .map(|(label, pat)| Rule {
                re: Regex::new(pat).expect("built-in NER regex"),
                label: (*label).to_string(),
                priority: 1,
            })
            .collect();
        Self {
            rules,
            proper_run: Regex::new(PROPER_RUN).expect("proper-noun regex"),
        }
    }

    /// Built-in patterns plus every `*.json` gazetteer in `dir`.
    pub fn from_dir(dir: &Path) -> anyhow::Result<Self> {
        let mut me = Self::builtin();
        let read_dir =
            fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))?;

        let mut paths: Vec<_> = read_dir
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
            .collect();
        paths.sort();

        for path in paths {
            let category = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("misc")
                .to_ascii_uppercase();

            let parsed = fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|s| serde_json::from_str::<PatternFile>(&s).map_err(|e| e.to_string()));
            let file = match parsed {
                Ok(f) => f,
                Err(error) => {
                    warn!(path = %path.display(), %error, "skipping NER pattern file");
                    continue;
                }
            };

            for pat in file.patterns {
                match Regex::new(&pat.regex) {
                    Ok(re) => me.rules.push(Rule {
                        re,
                        label: pat.label.unwrap_or_else(|| category.clone()),
                        priority: 0,
                    }),
                    Err(error) => {
                        warn!(path = %path.display(), %error, "skipping invalid NER regex")
                    }
                }
            }
        }
        Ok(me)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Infallible core used by the trait impl and by tests.
    pub fn extract(&self, text: &str) -> Vec<NamedEntity> {
        // (start, end, priority, label)
        let mut candidates: Vec<(usize, usize, u8, &str)> = Vec::new();

        for rule in &self.rules {
            for m in rule.re.find_iter(text) {
                candidates.push((m.start(), m.end(), rule.priority, rule.label.as_str()));
            }
        }

        for m in self.proper_run.find_iter(text) {
            // A sentence-opening word is capitalised anyway; only what follows counts.
            let (start, run) = if opens_sentence(text, m.start()) {
                match m.as_str().find([' ', '-']) {
                    Some(i) => (m.start() + i + 1, &m.as_str()[i + 1..]),
                    None => continue,
                }
            } else {
                (m.start(), m.as_str())
            };
            if NOT_NAMES.contains(&run) {
                continue;
            }
            candidates.push((start, m.end(), 2, "PERSON"));
        }

        candidates.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| (b.1 - b.0).cmp(&(a.1 - a.0)))
                .then_with(|| a.2.cmp(&b.2))
        });

        let mut out = Vec::new();
        let mut last_end = 0usize;
        for (start, end, _, label) in candidates {
            if start < last_end {
                continue;
            }
            out.push(NamedEntity::new(&text[start..end], label));
            last_end = end;
        }
        out
    }
}

impl EntityRecognizer for PatternRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<NamedEntity>, OracleError> {
        Ok(self.extract(text))
    }
}

/// True when only whitespace and quotes separate `at` from the text start or a
/// sentence terminator.
fn opens_sentence(text: &str, at: usize) -> bool {
    for c in text[..at].chars().rev() {
        if c.is_whitespace() || matches!(c, '"' | '\'' | '\u{201c}' | '(') {
            continue;
        }
        return matches!(c, '.' | '!' | '?');
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(out: &[NamedEntity]) -> Vec<(String, String)> {
        out.iter()
            .map(|e| (e.text.clone(), e.label.clone()))
            .collect()
    }

    #[test]
    fn builtin_finds_dates_times_and_numbers() {
        let r = PatternRecognizer::builtin();
        let out = r.extract("On Monday at 3 am I saw two owls for the first time.");
        assert_eq!(
            labels(&out),
            vec![
                ("Monday".into(), "DATE".into()),
                ("3 am".into(), "TIME".into()),
                ("two".into(), "CARDINAL".into()),
                ("first".into(), "ORDINAL".into()),
            ]
        );
    }

    #[test]
    fn capitalised_runs_mid_sentence_are_people() {
        let r = PatternRecognizer::builtin();
        let out = r.extract("I was walking with Anna Weber. Suddenly the sky turned red.");
        assert_eq!(labels(&out), vec![("Anna Weber".into(), "PERSON".into())]);
    }

    #[test]
    fn no_entities_is_not_an_error() {
        let r = PatternRecognizer::builtin();
        assert!(r.recognize("i was flying over water").unwrap().is_empty());
        assert!(r.recognize("").unwrap().is_empty());
    }

    #[test]
    fn gazetteer_dir_labels_from_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("gpe.json"),
            r#"{"patterns":[{"regex":"\\bParis\\b"},{"regex":"\\bSeine\\b","label":"LOC"},{"regex":"(unclosed"}]}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        let r = PatternRecognizer::from_dir(dir.path()).unwrap();
        // broken file and invalid regex are skipped
        assert_eq!(r.rule_count(), PatternRecognizer::builtin().rule_count() + 2);
        let out = r.extract("We swam in the Seine near Paris.");
        assert_eq!(
            labels(&out),
            vec![("Seine".into(), "LOC".into()), ("Paris".into(), "GPE".into())]
        );
    }

    #[test]
    fn missing_dir_is_an_error() {
        assert!(PatternRecognizer::from_dir(Path::new("__ner_dir_should_not_exist__")).is_err());
    }
}
