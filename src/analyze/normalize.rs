//! Lexical normalizer: lower-case, tokenize, drop stop words and
//! non-alphanumeric tokens, lemmatize, re-join with single spaces.

use crate::error::OracleError;
use crate::nlp::{Lemmatizer, StopWords, Tokenizer};

pub fn normalize(
    text: &str,
    tokenizer: &dyn Tokenizer,
    stop_words: &dyn StopWords,
    lemmatizer: &dyn Lemmatizer,
) -> Result<String, OracleError> {
    let lowered = text.to_lowercase();
    let tokens = tokenizer.tokenize(&lowered)?;

    let lemmas: Vec<String> = tokens
        .iter()
        .filter(|t| is_alphanumeric(t) && !stop_words.is_stop_word(t))
        .map(|t| lemmatizer.lemmatize(t))
        .filter(|l| !l.is_empty())
        .collect();

    Ok(lemmas.join(" "))
}

/// Non-empty and made only of letters and digits.
fn is_alphanumeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphanumeric)
}
