use crate::markup::strip_markup;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    // ASCII letters and Cyrillic letters; everything else separates words.
    static ref WORD: Regex = Regex::new(r"[A-Za-z[\p{Cyrillic}&&\p{L}]]+").expect("valid regex");
}

/// Strip `suffix` when the word is longer than `min_len` characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixRule {
    pub suffix: String,
    pub min_len: usize,
}

impl SuffixRule {
    pub fn new(suffix: &str, min_len: usize) -> Self {
        Self { suffix: suffix.to_owned(), min_len }
    }
}

/// Built-in suffix tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StemmerProfile {
    None,
    #[default]
    Russian,
    RussianEnglish,
}

impl StemmerProfile {
    pub fn rules(self) -> Vec<SuffixRule> {
        let russian = ["ов", "ев", "ам", "ём"].into_iter().map(|s| SuffixRule::new(s, 4));
        match self {
            StemmerProfile::None => Vec::new(),
            StemmerProfile::Russian => russian.collect(),
            StemmerProfile::RussianEnglish => russian
                .chain([SuffixRule::new("ing", 5), SuffixRule::new("ed", 4)])
                .collect(),
        }
    }
}

impl FromStr for StemmerProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(StemmerProfile::None),
            "russian" => Ok(StemmerProfile::Russian),
            "russian-english" => Ok(StemmerProfile::RussianEnglish),
            other => Err(format!("unknown stemmer profile '{other}' (expected none, russian or russian-english)")),
        }
    }
}

impl fmt::Display for StemmerProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StemmerProfile::None => "none",
            StemmerProfile::Russian => "russian",
            StemmerProfile::RussianEnglish => "russian-english",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Tried in order; at most one rule applies per word.
    pub suffix_rules: Vec<SuffixRule>,
    /// Longer words keep only their first `max_token_len` characters.
    pub max_token_len: usize,
    /// Drop tags and `script`/`style` bodies before scanning for words.
    /// Unlike plain letter classification this is stateful: a `<` with no
    /// closing `>` hides every word after it.
    pub strip_markup: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self { suffix_rules: StemmerProfile::default().rules(), max_token_len: 63, strip_markup: true }
    }
}

impl AnalyzerConfig {
    pub fn with_profile(profile: StemmerProfile) -> Self {
        Self { suffix_rules: profile.rules(), ..Self::default() }
    }
}

/// Turns document text into normalized terms: NFC, lowercase, truncate, stem.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self { Self { config } }

    pub fn config(&self) -> &AnalyzerConfig { &self.config }

    /// Lazily split `text` into terms in a single forward pass.
    pub fn tokens(&self, text: &str) -> Tokens<'_> {
        let text = if self.config.strip_markup { strip_markup(text) } else { text.to_owned() };
        Tokens { analyzer: self, text: text.nfc().collect(), pos: 0 }
    }

    /// Normalize a query term the same way indexed words are normalized,
    /// without splitting it.
    pub fn normalize_term(&self, raw: &str) -> String {
        let nfc: String = raw.nfc().collect();
        self.normalize_word(&nfc)
    }

    fn normalize_word(&self, word: &str) -> String {
        let mut out = String::with_capacity(word.len());
        for c in word.chars().flat_map(char::to_lowercase).take(self.config.max_token_len) {
            out.push(c);
        }
        self.stem(out)
    }

    fn stem(&self, mut word: String) -> String {
        let len = word.chars().count();
        let rule = self
            .config
            .suffix_rules
            .iter()
            .find(|r| len > r.min_len && word.ends_with(r.suffix.as_str()));
        if let Some(rule) = rule {
            if word.len() > rule.suffix.len() {
                word.truncate(word.len() - rule.suffix.len());
            }
        }
        word
    }
}

/// Iterator returned by [`Analyzer::tokens`].
pub struct Tokens<'a> {
    analyzer: &'a Analyzer,
    text: String,
    pos: usize,
}

impl Iterator for Tokens<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let m = WORD.find_at(&self.text, self.pos)?;
        self.pos = m.end();
        Some(self.analyzer.normalize_word(m.as_str()))
    }
}

/// Tokenize with the default analyzer.
pub fn tokenize(text: &str) -> Vec<String> {
    Analyzer::default().tokens(text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        assert_eq!(tokenize("Кот, собака; 42 cats!"), vec!["кот", "собака", "cats"]);
    }

    #[test]
    fn only_one_rule_applies() {
        let a = Analyzer::default();
        // "ов" is stripped once, the remaining "ам"-like ending is left alone
        assert_eq!(a.normalize_term("домамов"), "домам");
        // too short for the rule
        assert_eq!(a.normalize_term("ров"), "ров");
        assert_eq!(a.normalize_term("рова"), "рова");
        assert_eq!(a.normalize_term("котов"), "кот");
    }

    #[test]
    fn english_rules_need_the_profile() {
        let ru = Analyzer::default();
        let en = Analyzer::new(AnalyzerConfig::with_profile(StemmerProfile::RussianEnglish));
        assert_eq!(ru.normalize_term("walking"), "walking");
        assert_eq!(en.normalize_term("walking"), "walk");
        assert_eq!(en.normalize_term("played"), "play");
        assert_eq!(en.normalize_term("bed"), "bed");
        assert_eq!(en.normalize_term("sing"), "sing");
    }

    #[test]
    fn long_words_are_truncated() {
        let a = Analyzer::new(AnalyzerConfig { max_token_len: 4, ..AnalyzerConfig::default() });
        assert_eq!(a.tokens("abcdefgh xy").collect::<Vec<_>>(), vec!["abcd", "xy"]);
    }

    #[test]
    fn profile_parsing() {
        assert_eq!("russian-english".parse::<StemmerProfile>(), Ok(StemmerProfile::RussianEnglish));
        assert!("klingon".parse::<StemmerProfile>().is_err());
        assert_eq!(StemmerProfile::None.to_string(), "none");
    }
}
