use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::{SentimentOracle, SentimentScores};
use crate::error::OracleError;

/// word → [polarity, subjectivity]
static LEXICON: Lazy<Result<HashMap<String, [f64; 2]>, String>> = Lazy::new(|| {
    let raw = include_str!("../../data/sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, [f64; 2]>>(raw).map_err(|e| e.to_string())
});

/// Lexicon-averaging sentiment scorer.
///
/// Polarity and subjectivity are the means over every lexicon word in the
/// text. A negator within the previous three tokens flips and halves a word's
/// polarity; an intensifier right before a word scales it up.
#[derive(Debug, Clone, Default)]
pub struct LexiconSentiment;

impl LexiconSentiment {
    pub fn new() -> Self {
        Self
    }

    fn lexicon(&self) -> Result<&'static HashMap<String, [f64; 2]>, OracleError> {
        LEXICON
            .as_ref()
            .map_err(|e| OracleError::new("sentiment", format!("invalid lexicon: {e}")))
    }

    /// Returns (polarity, subjectivity) for already-tokenized lower-case text.
    pub fn score_tokens(&self, tokens: &[String]) -> Result<SentimentScores, OracleError> {
        let lexicon = self.lexicon()?;
        let mut pol_sum = 0.0;
        let mut subj_sum = 0.0;
        let mut n = 0usize;

        for (i, w) in tokens.iter().enumerate() {
            let Some([pol, subj]) = lexicon.get(w.as_str()).copied() else {
                continue;
            };

            let intensity = if i >= 1 && is_intensifier(&tokens[i - 1]) {
                1.3
            } else {
                1.0
            };
            let negated = (1..=3).any(|k| i >= k && is_negator(&tokens[i - k]));

            let mut p = (pol * intensity).clamp(-1.0, 1.0);
            if negated {
                p *= -0.5;
            }
            pol_sum += p;
            subj_sum += (subj * intensity).clamp(0.0, 1.0);
            n += 1;
        }

        if n == 0 {
            return Ok(SentimentScores::default());
        }
        Ok(SentimentScores {
            polarity: (pol_sum / n as f64).clamp(-1.0, 1.0),
            subjectivity: (subj_sum / n as f64).clamp(0.0, 1.0),
        })
    }
}

impl SentimentOracle for LexiconSentiment {
    fn score(&self, text: &str) -> Result<SentimentScores, OracleError> {
        let tokens: Vec<String> = tokenize(text).collect();
        self.score_tokens(&tokens)
    }
}

/// Alphanumeric runs (apostrophes kept), lower-case.
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "not" | "no" | "never" | "n't" | "isn't" | "wasn't" | "aren't" | "won't" | "can't"
            | "cannot" | "without" | "nothing"
    )
}

fn is_intensifier(tok: &str) -> bool {
    matches!(
        tok,
        "very" | "really" | "extremely" | "so" | "too" | "incredibly" | "totally"
    )
}
