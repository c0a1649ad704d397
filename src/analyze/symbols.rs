//! Dream symbol dictionary and matcher.
//!
//! TOML shape (order is significant, it is the match order):
//! ```toml
//! [[symbol]]
//! key = "water"
//! meanings = ["emotions", "the unconscious"]
//! ```
//!
//! Matching is plain substring containment on the normalized text, so "cat"
//! also matches inside "category".

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::entry::MatchedSymbol;

static BUILTIN: Lazy<SymbolDictionary> = Lazy::new(|| {
    SymbolDictionary::from_toml_str(include_str!("../../data/dream_symbols.toml"))
        .expect("valid built-in symbol dictionary")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub key: String,
    #[serde(default)]
    pub meanings: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DictionaryFile {
    #[serde(default)]
    symbol: Vec<SymbolEntry>,
}

/// Read-only, ordered symbol → meanings mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolDictionary {
    entries: Vec<SymbolEntry>,
}

impl SymbolDictionary {
    /// The embedded default dictionary.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading symbol dictionary {}", path.display()))?;
        Self::from_toml_str(&data)
            .with_context(|| format!("parsing symbol dictionary {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let file: DictionaryFile = toml::from_str(s)?;
        Self::from_entries(file.symbol)
    }

    /// Keys are trimmed and lower-cased (normalized text is lower-case); blank
    /// keys are rejected and repeated keys keep their first definition.
    pub fn from_entries(entries: Vec<SymbolEntry>) -> Result<Self> {
        let mut out: Vec<SymbolEntry> = Vec::with_capacity(entries.len());
        for mut e in entries {
            e.key = e.key.trim().to_lowercase();
            if e.key.is_empty() {
                bail!("symbol with blank key");
            }
            if out.iter().any(|x| x.key == e.key) {
                warn!(key = %e.key, "duplicate symbol ignored");
                continue;
            }
            out.push(e);
        }
        Ok(Self { entries: out })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    pub fn meanings(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.meanings.as_slice())
    }

    /// Every key contained in `normalized_text`, in dictionary order.
    pub fn match_symbols(&self, normalized_text: &str) -> Vec<MatchedSymbol> {
        self.entries
            .iter()
            .filter(|e| normalized_text.contains(e.key.as_str()))
            .map(|e| MatchedSymbol {
                symbol: e.key.clone(),
                meanings: e.meanings.clone(),
            })
            .collect()
    }
}

impl Default for SymbolDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}
