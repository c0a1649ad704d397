//! journal.rs — in-memory, append-only log of analysed dreams.
//!
//! Lives as long as the session that owns it; the only way out of the process
//! is the on-demand CSV export.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::entry::DreamEntry;
use crate::error::ExportError;

pub const EXPORT_FILENAME: &str = "dream_journal.csv";
pub const EXPORT_MIME: &str = "text/csv";

/// Header row of the CSV export, one column per `DreamEntry` field.
pub const EXPORT_COLUMNS: [&str; 9] = [
    "timestamp",
    "raw_text",
    "normalized_text",
    "sentiment_label",
    "sentiment_polarity",
    "sentiment_subjectivity",
    "keywords",
    "entities",
    "symbols",
];

/// A finished export: bytes plus what a download should be called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalExport {
    pub bytes: Vec<u8>,
    pub filename: &'static str,
    pub mime_type: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Vec<DreamEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: DreamEntry) {
        self.entries.push(entry);
    }

    /// Snapshot of every entry, in append order.
    pub fn all(&self) -> Vec<DreamEntry> {
        self.entries.clone()
    }

    pub fn entries(&self) -> &[DreamEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&DreamEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `now`, or the newest entry's timestamp if the clock went backwards,
    /// so timestamps never decrease along the journal.
    pub fn next_timestamp(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self.entries.last() {
            Some(last) if last.timestamp() > now => last.timestamp(),
            _ => now,
        }
    }

    /// CSV export: UTF-8, header row, one row per entry. An empty journal
    /// exports the header alone.
    pub async fn export_tabular(&self) -> Result<JournalExport, ExportError> {
        let mut buf: Vec<u8> = Vec::new();
        {
            let mut w = csv_async::AsyncWriter::from_writer(&mut buf);
            w.write_record(EXPORT_COLUMNS).await?;
            for e in &self.entries {
                w.write_record(&row(e)).await?;
            }
            w.flush().await?;
        }
        Ok(JournalExport {
            bytes: buf,
            filename: EXPORT_FILENAME,
            mime_type: EXPORT_MIME,
        })
    }
}

fn row(e: &DreamEntry) -> [String; 9] {
    [
        e.timestamp().to_rfc3339_opts(SecondsFormat::Secs, true),
        e.raw_text().to_string(),
        e.normalized_text().to_string(),
        e.sentiment_label().to_string(),
        format!("{:.4}", e.sentiment_polarity()),
        format!("{:.4}", e.sentiment_subjectivity()),
        e.keywords()
            .iter()
            .map(|k| format!("{} ({})", k.word, k.count))
            .collect::<Vec<_>>()
            .join("; "),
        e.entities()
            .iter()
            .map(|n| format!("{} ({})", n.text, n.label))
            .collect::<Vec<_>>()
            .join("; "),
        e.symbol_keys().join("; "),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{EntryParts, KeywordCount, MatchedSymbol, NamedEntity, SentimentLabel};
    use chrono::{Duration, TimeZone};

    fn entry(at: DateTime<Utc>, raw: &str) -> DreamEntry {
        DreamEntry::new(
            at,
            EntryParts {
                raw_text: raw.into(),
                normalized_text: "dog chased road".into(),
                sentiment_label: SentimentLabel::Negative,
                sentiment_polarity: -0.2,
                sentiment_subjectivity: 0.4,
                keywords: vec![
                    KeywordCount {
                        word: "dog".into(),
                        count: 2,
                    },
                    KeywordCount {
                        word: "road".into(),
                        count: 1,
                    },
                ],
                entities: vec![NamedEntity::new("Tuesday", "DATE")],
                symbols: vec![MatchedSymbol {
                    symbol: "road".into(),
                    meanings: vec!["journey".into()],
                }],
            },
        )
    }

    #[tokio::test]
    async fn empty_journal_exports_header_only() {
        let j = Journal::new();
        assert!(j.is_empty());
        let out = j.export_tabular().await.unwrap();
        let text = String::from_utf8(out.bytes).unwrap();
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec!["timestamp,raw_text,normalized_text,sentiment_label,sentiment_polarity,sentiment_subjectivity,keywords,entities,symbols"]
        );
        assert_eq!(out.filename, "dream_journal.csv");
        assert_eq!(out.mime_type, "text/csv");
    }

    #[tokio::test]
    async fn rows_flatten_lists_and_quote_commas() {
        let mut j = Journal::new();
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        j.append(entry(at, "On Tuesday, a dog chased me down the road"));
        let text = String::from_utf8(j.export_tabular().await.unwrap().bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "2025-01-02T03:04:05Z,\"On Tuesday, a dog chased me down the road\",dog chased road,Negative,-0.2000,0.4000,dog (2); road (1),Tuesday (DATE),road"
        );
    }

    #[test]
    fn timestamps_never_go_backwards() {
        let mut j = Journal::new();
        let t0 = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(j.next_timestamp(t0), t0);
        j.append(entry(t0, "a"));
        let earlier = t0 - Duration::seconds(30);
        assert_eq!(j.next_timestamp(earlier), t0);
        let later = t0 + Duration::seconds(30);
        assert_eq!(j.next_timestamp(later), later);
    }

    #[test]
    fn append_preserves_order() {
        let mut j = Journal::new();
        let t0 = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        j.append(entry(t0, "first"));
        j.append(entry(t0, "second"));
        let raws: Vec<String> = j.all().iter().map(|e| e.raw_text().to_string()).collect();
        assert_eq!(raws, vec!["first", "second"]);
        assert_eq!(j.last().unwrap().raw_text(), "second");
    }
}
