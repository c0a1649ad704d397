//! Local CLI: analyse dreams into a fresh session and print each entry as JSON.
//!
//! Usage:
//!   dream-cli [--config <analyzer.toml>] [--export <journal.csv>] [TEXT ...]
//! Without TEXT arguments, each non-empty stdin line is one dream.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use dream_journal_analyzer::{AnalyzeError, AnalyzerConfig, DreamAnalyzer, Session};

#[derive(Debug, Parser)]
#[command(name = "dream-cli")]
#[command(bin_name = "dream-cli")]
#[command(about = "Analyse dream descriptions into a journal", long_about = None)]
struct Args {
    /// Analyzer config TOML; defaults to the usual resolution order.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the journal as CSV to this path when done.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Dreams to analyse; read from stdin lines when empty.
    texts: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let cfg = match &args.config {
        Some(p) => AnalyzerConfig::load_from_file(p)?,
        None => AnalyzerConfig::load_default()?,
    };
    let mut session = Session::new(Arc::new(DreamAnalyzer::from_config(&cfg)?));

    let texts = if args.texts.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .context("reading dreams from stdin")?
            .into_iter()
            .filter(|l| !l.trim().is_empty())
            .collect()
    } else {
        args.texts
    };

    for text in &texts {
        match session.analyze(text) {
            Ok(entry) => {
                println!("{}", serde_json::to_string(&entry)?);
                info!("{}", entry.summary());
            }
            Err(AnalyzeError::BlankInput) => warn!("please enter a dream to analyze"),
            Err(e) => warn!(error = %e, "analysis failed; entry skipped"),
        }
    }

    if let Some(path) = args.export {
        let out = session.export_journal().await?;
        tokio::fs::write(&path, &out.bytes)
            .await
            .with_context(|| format!("writing journal export to {}", path.display()))?;
        info!(
            entries = session.journal().len(),
            path = %path.display(),
            "journal exported"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_and_texts_in_any_order() {
        let args = Args::try_parse_from([
            "dream-cli",
            "I lost my teeth",
            "--export",
            "out.csv",
            "A dog chased me",
            "--config",
            "analyzer.toml",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("analyzer.toml")));
        assert_eq!(args.export, Some(PathBuf::from("out.csv")));
        assert_eq!(args.texts, vec!["I lost my teeth", "A dog chased me"]);
    }

    #[test]
    fn flag_without_value_is_rejected() {
        assert!(Args::try_parse_from(["dream-cli", "--export"]).is_err());
    }
}
