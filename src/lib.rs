// src/lib.rs
// Public library surface for the service binary, the CLI and integration tests.

pub mod analyze;
pub mod api;
pub mod config;
pub mod entry;
pub mod error;
pub mod journal;
pub mod metrics;
pub mod nlp;
pub mod session;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{DreamAnalyzer, SymbolDictionary};
pub use crate::api::{create_router, router, AppState};
pub use crate::config::AnalyzerConfig;
pub use crate::entry::{DreamEntry, KeywordCount, MatchedSymbol, NamedEntity, SentimentLabel};
pub use crate::error::{AnalyzeError, ExportError, OracleError};
pub use crate::journal::{Journal, JournalExport};
pub use crate::session::Session;

use axum::Router;
use tracing::info;

/// Build the full in-process app from the resolved config: API routes only,
/// no metrics recorder. The binary merges `/metrics` on top.
pub async fn app() -> anyhow::Result<Router> {
    let cfg = AnalyzerConfig::load_default()?;
    let state = AppState::from_config(&cfg)?;
    info!(language = %cfg.language, "dream journal app built");
    Ok(create_router(state))
}
