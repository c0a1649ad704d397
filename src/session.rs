//! session.rs — one user's sitting: an analyzer plus the journal it feeds.
//!
//! Analyses run one at a time and append in call order. A failed analysis
//! leaves the journal exactly as it was.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::analyze::DreamAnalyzer;
use crate::entry::DreamEntry;
use crate::error::{AnalyzeError, ExportError};
use crate::journal::{Journal, JournalExport};
use crate::metrics::{ANALYSES, JOURNAL_ENTRIES};

#[derive(Debug, Clone)]
pub struct Session {
    analyzer: Arc<DreamAnalyzer>,
    journal: Journal,
}

impl Session {
    pub fn new(analyzer: Arc<DreamAnalyzer>) -> Self {
        Self {
            analyzer,
            journal: Journal::new(),
        }
    }

    pub fn analyzer(&self) -> &Arc<DreamAnalyzer> {
        &self.analyzer
    }

    /// Analyse `raw_text` and append the result. Returns the appended entry.
    pub fn analyze(&mut self, raw_text: &str) -> Result<DreamEntry, AnalyzeError> {
        let at = self.journal.next_timestamp(Utc::now());
        let entry = self.analyzer.analyze(raw_text, at)?;
        self.journal.append(entry.clone());

        metrics::counter!(ANALYSES).increment(1);
        metrics::gauge!(JOURNAL_ENTRIES).set(self.journal.len() as f64);
        debug!(entries = self.journal.len(), "journal appended");

        Ok(entry)
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn journal_snapshot(&self) -> Vec<DreamEntry> {
        self.journal.all()
    }

    pub async fn export_journal(&self) -> Result<JournalExport, ExportError> {
        self.journal.export_tabular().await
    }
}
