// src/config/analyzer.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{env, fs};

pub const ENV_CONFIG_PATH: &str = "DREAM_CONFIG_PATH";
pub const ENV_SYMBOLS_PATH: &str = "DREAM_SYMBOLS_PATH";
pub const ENV_NER_DIR: &str = "NER_CONFIG_DIR";
pub const DEFAULT_CONFIG_PATH: &str = "config/analyzer.toml";

fn default_language() -> String {
    "english".to_string()
}
fn default_top_n() -> usize {
    5
}
fn default_positive() -> f64 {
    0.10
}
fn default_negative() -> f64 {
    -0.10
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LemmatizerKind {
    #[default]
    Morphy,
    Snowball,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Stop-word language code.
    #[serde(default = "default_language")]
    pub language: String,
    /// How many keywords an entry keeps.
    #[serde(default = "default_top_n")]
    pub keyword_top_n: usize,
    /// Polarity strictly above this is Positive.
    #[serde(default = "default_positive")]
    pub positive_threshold: f64,
    /// Polarity strictly below this is Negative.
    #[serde(default = "default_negative")]
    pub negative_threshold: f64,
    #[serde(default)]
    pub lemmatizer: LemmatizerKind,
    /// Symbol dictionary override; the embedded dictionary is used when unset.
    #[serde(default)]
    pub symbols_path: Option<PathBuf>,
    /// Gazetteer directory for the entity recognizer; built-in patterns only when unset.
    #[serde(default)]
    pub ner_patterns_dir: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            keyword_top_n: default_top_n(),
            positive_threshold: default_positive(),
            negative_threshold: default_negative(),
            lemmatizer: LemmatizerKind::default(),
            symbols_path: None,
            ner_patterns_dir: None,
        }
    }
}

impl AnalyzerConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading analyzer config from {}", path.display()))?;
        let cfg: AnalyzerConfig = toml::from_str(&data)
            .with_context(|| format!("parsing analyzer config {}", path.display()))?;
        Ok(cfg.sanitized())
    }

    /// Resolve config using env var + fallbacks:
    /// 1) $DREAM_CONFIG_PATH (must exist)
    /// 2) config/analyzer.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            return Self::load_from_file(&pb);
        }
        let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default_p.exists() {
            return Self::load_from_file(&default_p);
        }
        Ok(Self::default())
    }

    /// Clamp out-of-range values back to something usable.
    pub fn sanitized(mut self) -> Self {
        self.language = self.language.trim().to_ascii_lowercase();
        if self.language.is_empty() {
            self.language = default_language();
        }
        if self.keyword_top_n == 0 {
            self.keyword_top_n = default_top_n();
        }
        if !(-1.0..=1.0).contains(&self.positive_threshold) {
            self.positive_threshold = default_positive();
        }
        if !(-1.0..=1.0).contains(&self.negative_threshold) {
            self.negative_threshold = default_negative();
        }
        if self.negative_threshold > self.positive_threshold {
            // swap to keep a valid interval
            std::mem::swap(&mut self.negative_threshold, &mut self.positive_threshold);
        }
        self
    }

    /// Symbol dictionary path: `$DREAM_SYMBOLS_PATH` wins over the config file.
    pub fn symbols_path(&self) -> Option<PathBuf> {
        env::var(ENV_SYMBOLS_PATH)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| self.symbols_path.clone())
    }

    /// NER gazetteer directory: `$NER_CONFIG_DIR` wins over the config file.
    pub fn ner_patterns_dir(&self) -> Option<PathBuf> {
        env::var(ENV_NER_DIR)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| self.ner_patterns_dir.clone())
    }
}
