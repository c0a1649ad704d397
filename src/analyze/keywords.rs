//! Keyword tagging and the top-N frequency table.

use std::collections::HashMap;

use crate::entry::KeywordCount;
use crate::error::OracleError;
use crate::nlp::{PosTagger, Tokenizer};

/// Tokens whose tag marks a noun (`N*`) or verb (`V*`), in text order,
/// duplicates kept. Tokenizes `text` itself rather than reusing any earlier
/// tokenization.
pub fn extract_keywords(
    text: &str,
    tokenizer: &dyn Tokenizer,
    tagger: &dyn PosTagger,
) -> Result<Vec<String>, OracleError> {
    let tokens = tokenizer.tokenize(text)?;
    let tags = tagger.tag(&tokens)?;
    if tags.len() != tokens.len() {
        return Err(OracleError::new(
            "pos-tagger",
            format!("{} tags for {} tokens", tags.len(), tokens.len()),
        ));
    }

    Ok(tokens
        .into_iter()
        .zip(tags)
        .filter(|(_, tag)| tag.starts_with('N') || tag.starts_with('V'))
        .map(|(tok, _)| tok)
        .collect())
}

/// Count occurrences and keep the `n` most frequent words.
/// Ties keep first-occurrence order.
pub fn top_keywords(keywords: &[String], n: usize) -> Vec<KeywordCount> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for k in keywords {
        let c = counts.entry(k.as_str()).or_insert(0);
        if *c == 0 {
            order.push(k.as_str());
        }
        *c += 1;
    }

    let mut table: Vec<KeywordCount> = order
        .into_iter()
        .map(|w| KeywordCount {
            word: w.to_string(),
            count: counts[w],
        })
        .collect();
    // stable sort: equal counts stay in first-occurrence order
    table.sort_by(|a, b| b.count.cmp(&a.count));
    table.truncate(n);
    table
}
