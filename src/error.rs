// src/error.rs
//! Error taxonomy for the dream analysis pipeline.
//!
//! `AnalyzeError` is what callers of `Session::analyze` see. A blank input is a
//! user-facing warning; an oracle failure is an operator-facing failure of that
//! single request. Neither touches the journal.

use thiserror::Error;

/// Failure reported by one of the linguistic oracles (tokenizer, tagger, ...).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{oracle} oracle failed: {message}")]
pub struct OracleError {
    pub oracle: &'static str,
    pub message: String,
}

impl OracleError {
    pub fn new(oracle: &'static str, message: impl Into<String>) -> Self {
        Self {
            oracle,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Input was empty or whitespace-only; nothing ran.
    #[error("dream text is blank")]
    BlankInput,

    #[error("linguistic oracle '{oracle}' is unavailable")]
    OracleUnavailable {
        oracle: &'static str,
        #[source]
        source: OracleError,
    },
}

impl AnalyzeError {
    /// Stable machine-readable code used by the HTTP layer.
    pub fn code(&self) -> &'static str {
        match self {
            AnalyzeError::BlankInput => "blank_input",
            AnalyzeError::OracleUnavailable { .. } => "oracle_unavailable",
        }
    }
}

impl From<OracleError> for AnalyzeError {
    fn from(source: OracleError) -> Self {
        AnalyzeError::OracleUnavailable {
            oracle: source.oracle,
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv_async::Error),

    #[error("flushing export buffer failed: {0}")]
    Io(#[from] std::io::Error),
}
