// src/nlp/tokenize.rs
//! Word tokenizer over Unicode word boundaries (UAX #29).
//!
//! Whitespace is dropped, every punctuation mark is its own token and English
//! clitics are split off the way Treebank tokenizers do it:
//! `don't` → `do`, `n't`; `dream's` → `dream`, `'s`.

use unicode_segmentation::UnicodeSegmentation;

use super::Tokenizer;
use crate::error::OracleError;

const CLITICS: &[&str] = &["s", "re", "ve", "ll", "d", "m"];

#[derive(Debug, Clone, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Infallible core used by the trait impl and by tests.
    pub fn split(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();
        for seg in text.split_word_bounds() {
            if seg.trim().is_empty() {
                continue;
            }
            push_with_clitics(seg, &mut out);
        }
        out
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, OracleError> {
        Ok(self.split(text))
    }
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

fn push_with_clitics(seg: &str, out: &mut Vec<String>) {
    let Some(apos) = seg.rfind(is_apostrophe) else {
        out.push(seg.to_string());
        return;
    };
    let apos_len = seg[apos..].chars().next().map_or(1, char::len_utf8);
    let head = &seg[..apos];
    let tail = &seg[apos + apos_len..];

    // n't: the split point moves one character left, onto the `n`.
    if tail.eq_ignore_ascii_case("t") && head.len() > 1 && head.to_ascii_lowercase().ends_with('n')
    {
        let cut = head.len() - 1;
        out.push(head[..cut].to_string());
        out.push(seg[cut..].to_string());
        return;
    }

    if !head.is_empty() && CLITICS.iter().any(|c| tail.eq_ignore_ascii_case(c)) {
        out.push(head.to_string());
        out.push(seg[apos..].to_string());
        return;
    }

    out.push(seg.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_words_and_punctuation() {
        let t = WordTokenizer::new();
        assert_eq!(
            t.split("I was flying, over water!"),
            vec!["I", "was", "flying", ",", "over", "water", "!"]
        );
    }

    #[test]
    fn splits_clitics_treebank_style() {
        let t = WordTokenizer::new();
        assert_eq!(t.split("don't"), vec!["do", "n't"]);
        assert_eq!(t.split("dream's end"), vec!["dream", "'s", "end"]);
        assert_eq!(t.split("we'll"), vec!["we", "'ll"]);
        assert_eq!(t.split("can\u{2019}t"), vec!["ca", "n\u{2019}t"]);
    }

    #[test]
    fn empty_and_blank_yield_no_tokens() {
        let t = WordTokenizer::new();
        assert!(t.split("").is_empty());
        assert!(t.split(" \n\t ").is_empty());
    }

    #[test]
    fn keeps_numbers_whole() {
        let t = WordTokenizer::new();
        assert_eq!(t.split("at 3 am"), vec!["at", "3", "am"]);
    }
}
