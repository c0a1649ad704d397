// src/config/mod.rs
pub mod analyzer;

pub use analyzer::{
    AnalyzerConfig, LemmatizerKind, DEFAULT_CONFIG_PATH, ENV_CONFIG_PATH, ENV_NER_DIR,
    ENV_SYMBOLS_PATH,
};
