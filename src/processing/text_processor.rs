//! Text normalization and tokenization
//!
//! Latin and Arabic text are treated the same way: everything is lower-cased,
//! anything that is not an ASCII word character, whitespace or an Arabic-block
//! codepoint (U+0600..U+06FF) becomes a space, and whitespace runs collapse.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Tokens shorter than this many characters are dropped.
pub const MIN_TOKEN_CHARS: usize = 3;

pub struct TextProcessor {
    non_word_regex: Regex,
    whitespace_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let non_word_regex = Regex::new(r"[^A-Za-z0-9_\s\x{0600}-\x{06FF}]")
            .expect("Invalid non-word regex");

        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");

        Self {
            non_word_regex,
            whitespace_regex,
        }
    }

    /// Lower-case, strip punctuation, collapse whitespace and trim.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let stripped = self.non_word_regex.replace_all(&lowered, " ");
        self.whitespace_regex
            .replace_all(&stripped, " ")
            .trim()
            .to_string()
    }

    /// Normalize, then split on single spaces keeping tokens of three or more characters.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.normalize(text)
            .split(' ')
            .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
            .map(str::to_string)
            .collect()
    }

    /// Jaccard index over the token sets of two texts.
    ///
    /// Returns 0.0 when either side has no tokens.
    pub fn token_similarity(&self, text1: &str, text2: &str) -> f64 {
        let tokens1 = self.tokenize(text1);
        let tokens2 = self.tokenize(text2);
        if tokens1.is_empty() || tokens2.is_empty() {
            return 0.0;
        }

        let set1: HashSet<&String> = tokens1.iter().collect();
        let set2: HashSet<&String> = tokens2.iter().collect();

        let intersection = set1.intersection(&set2).count();
        let union = set1.union(&set2).count();

        if union == 0 {
            0.0
        } else {
            intersection as f64 / union as f64
        }
    }
}

fn shared() -> &'static TextProcessor {
    static PROCESSOR: OnceLock<TextProcessor> = OnceLock::new();
    PROCESSOR.get_or_init(TextProcessor::new)
}

pub fn normalize(text: &str) -> String {
    shared().normalize(text)
}

pub fn tokenize(text: &str) -> Vec<String> {
    shared().tokenize(text)
}

pub fn token_similarity(text1: &str, text2: &str) -> f64 {
    shared().token_similarity(text1, text2)
}
