//! Sentiment scoring: delegate to the oracle, then classify polarity.

use crate::config::AnalyzerConfig;
use crate::entry::SentimentLabel;
use crate::error::OracleError;
use crate::nlp::SentimentOracle;

/// Polarity cut-offs. Both bounds are exclusive: a polarity equal to either
/// threshold is Neutral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub positive: f64,
    pub negative: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            positive: 0.10,
            negative: -0.10,
        }
    }
}

impl From<&AnalyzerConfig> for Thresholds {
    fn from(cfg: &AnalyzerConfig) -> Self {
        Self {
            positive: cfg.positive_threshold,
            negative: cfg.negative_threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentReading {
    pub label: SentimentLabel,
    pub polarity: f64,
    pub subjectivity: f64,
}

pub fn classify(polarity: f64, t: &Thresholds) -> SentimentLabel {
    if polarity > t.positive {
        SentimentLabel::Positive
    } else if polarity < t.negative {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

pub fn score_sentiment(
    text: &str,
    oracle: &dyn SentimentOracle,
    thresholds: &Thresholds,
) -> Result<SentimentReading, OracleError> {
    let scores = oracle.score(text)?;
    Ok(SentimentReading {
        label: classify(scores.polarity, thresholds),
        polarity: scores.polarity,
        subjectivity: scores.subjectivity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::LexiconSentiment;

    #[test]
    fn thresholds_are_exclusive() {
        let t = Thresholds::default();
        assert_eq!(classify(0.10, &t), SentimentLabel::Neutral);
        assert_eq!(classify(-0.10, &t), SentimentLabel::Neutral);
        assert_eq!(classify(0.11, &t), SentimentLabel::Positive);
        assert_eq!(classify(-0.11, &t), SentimentLabel::Negative);
        assert_eq!(classify(0.0, &t), SentimentLabel::Neutral);
        assert_eq!(classify(f64::NAN, &t), SentimentLabel::Neutral);
    }

    #[test]
    fn empty_text_reads_neutral() {
        let r = score_sentiment("", &LexiconSentiment::new(), &Thresholds::default()).unwrap();
        assert_eq!(r.label, SentimentLabel::Neutral);
        assert_eq!(r.polarity, 0.0);
        assert_eq!(r.subjectivity, 0.0);
    }
}
