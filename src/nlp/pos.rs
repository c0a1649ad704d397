// src/nlp/pos.rs
//! Rule-based part-of-speech tagger producing Penn-Treebank tags.
//!
//! Closed word classes come from a lexicon; open classes are guessed from
//! suffixes and capitalisation. Unknown words fall back to `NN`/`NNS`.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::PosTagger;
use crate::error::OracleError;

static LEXICON: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    let groups: &[(&str, &[&str])] = &[
        (
            "DT",
            &[
                "the", "a", "an", "this", "that", "these", "those", "every", "each", "some",
                "any", "no", "all", "another", "both",
            ],
        ),
        (
            "IN",
            &[
                "of", "in", "on", "at", "over", "under", "into", "through", "with", "from", "by",
                "for", "about", "against", "between", "during", "before", "after", "above",
                "below", "while", "because", "if", "than", "like", "as", "until", "near",
                "behind", "across", "around", "inside", "outside", "toward", "towards", "upon",
                "onto", "beneath", "beside", "along", "off", "out", "up", "down", "without",
            ],
        ),
        ("CC", &["and", "but", "or", "nor", "yet", "so"]),
        (
            "PRP",
            &[
                "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them",
                "myself", "yourself", "himself", "herself", "itself", "ourselves",
                "themselves",
            ],
        ),
        ("PRP$", &["my", "your", "his", "its", "our", "their", "her"]),
        (
            "MD",
            &["can", "could", "will", "would", "shall", "should", "may", "might", "must", "wo", "ca"],
        ),
        ("TO", &["to"]),
        ("WP", &["what", "who", "whom", "which"]),
        ("WRB", &["when", "where", "why", "how"]),
        (
            "RB",
            &[
                "not", "n't", "very", "too", "also", "just", "then", "there", "here", "again",
                "never", "always", "suddenly", "still", "now", "soon", "back", "away", "almost",
                "even", "ever", "once", "quite", "rather", "really", "somehow", "everywhere",
                "somewhere", "nowhere", "together", "perhaps", "maybe",
            ],
        ),
        (
            "VBD",
            &[
                "was", "were", "had", "did", "felt", "saw", "ran", "flew", "fell", "came", "went",
                "got", "took", "made", "found", "knew", "thought", "told", "said", "left",
                "began", "became", "heard", "held", "stood", "sat", "lost", "woke", "dreamt",
                "swam", "ate", "drove", "fought", "hid", "spoke", "slept", "met", "caught",
                "brought", "bought", "kept", "meant", "sent", "gave", "grew", "drew", "threw",
                "wore", "tore", "rose", "rode", "wrote", "broke", "chose", "froze", "shook",
                "sang", "rang", "sank", "drank", "burnt", "led", "fled",
            ],
        ),
        (
            "VBN",
            &[
                "been", "gone", "seen", "done", "taken", "flown", "fallen", "known", "given",
                "broken", "eaten", "driven", "hidden", "spoken", "chosen", "frozen", "grown",
                "thrown", "written", "ridden", "forgotten", "stolen", "woken", "swum",
            ],
        ),
        ("VBZ", &["is", "has", "does", "'s"]),
        ("VBP", &["am", "are", "have", "do", "'re", "'ve", "'m"]),
        ("VB", &["be", "fly", "go", "see", "run", "feel", "know", "get", "make", "take"]),
        ("VBG", &["being", "having", "doing"]),
        (
            "JJ",
            &[
                "free", "happy", "sad", "big", "small", "little", "dark", "bright", "cold", "warm",
                "hot", "old", "new", "young", "strange", "weird", "scary", "beautiful", "ugly",
                "huge", "tiny", "tall", "short", "long", "high", "low", "deep", "calm", "quiet",
                "loud", "safe", "lost", "alone", "afraid", "scared", "angry", "lonely", "friendly",
                "lovely", "good", "bad", "great", "terrible", "horrible", "awful", "nice",
                "familiar", "empty", "full", "heavy", "light", "fast", "slow", "wet", "dry",
                "red", "blue", "green", "yellow", "black", "white", "grey", "gray", "golden",
                "purple", "pink", "orange", "silver", "open", "closed", "same", "other",
                "real", "true", "false", "strong", "weak", "sick", "dead", "alive", "wrong",
                "right", "late", "early", "clear", "soft", "hard", "sweet", "bitter", "glad",
                "calm", "wild", "gentle", "brave", "proud", "kind", "weightless", "endless",
            ],
        ),
    ];
    for (tag, words) in groups {
        for w in *words {
            m.entry(*w).or_insert(*tag);
        }
    }
    m
});

/// Words ending like adverbs or participles that are really nouns.
const NOUN_LOOKALIKES: &[&str] = &[
    "family", "lily", "belly", "jelly", "bully", "ally", "rally", "bed", "shed", "sled", "seed",
    "need", "feed", "hundred", "thing", "king", "ring", "wing", "string", "spring", "ceiling",
    "evening", "morning", "building", "nothing", "something", "anything", "everything",
];

const ADJ_SUFFIXES: &[&str] = &["ful", "ous", "ive", "able", "ible", "less", "ish", "ical"];

#[derive(Debug, Clone, Default)]
pub struct RuleTagger;

impl RuleTagger {
    pub fn new() -> Self {
        Self
    }

    /// Infallible core used by the trait impl and by tests.
    pub fn tag_tokens(&self, tokens: &[String]) -> Vec<String> {
        let mut tags: Vec<String> = Vec::with_capacity(tokens.len());
        for (i, tok) in tokens.iter().enumerate() {
            let prev = if i > 0 { tags[i - 1].as_str() } else { "" };
            tags.push(tag_one(tok, prev).to_string());
        }
        tags
    }
}

impl PosTagger for RuleTagger {
    fn tag(&self, tokens: &[String]) -> Result<Vec<String>, OracleError> {
        Ok(self.tag_tokens(tokens))
    }
}

fn tag_one(token: &str, prev: &str) -> &'static str {
    if !token.chars().any(char::is_alphanumeric) {
        return match token {
            "." | "!" | "?" => ".",
            "," => ",",
            ":" | ";" | "-" | "--" => ":",
            "(" | "[" | "{" => "(",
            ")" | "]" | "}" => ")",
            _ => "SYM",
        };
    }
    if token.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return "CD";
    }

    let lower = token.to_lowercase();
    if let Some(tag) = LEXICON.get(lower.as_str()) {
        // Base verbs after a modal or `to` stay base form; after a pronoun they are present tense.
        return match (*tag, prev) {
            ("VB", "PRP") => "VBP",
            (t, _) => t,
        };
    }

    let capitalised = token.chars().next().is_some_and(char::is_uppercase);
    if capitalised {
        return "NNP";
    }
    if matches!(prev, "MD" | "TO") {
        return "VB";
    }
    if NOUN_LOOKALIKES.contains(&lower.as_str()) {
        return "NN";
    }

    let len = lower.chars().count();
    if len > 4 && lower.ends_with("ing") {
        return "VBG";
    }
    if len > 3 && lower.ends_with("ed") {
        return if matches!(prev, "VBD" | "VBZ" | "VBP") { "VBN" } else { "VBD" };
    }
    if len > 4 && lower.ends_with("ly") {
        return "RB";
    }
    if len > 5 && ADJ_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return "JJ";
    }
    if len > 3 && lower.ends_with('s') && !lower.ends_with("ss") && !lower.ends_with("us") {
        return "NNS";
    }
    "NN"
}
