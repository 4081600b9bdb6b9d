use boolsearch_core::tokenizer::{tokenize, Analyzer, AnalyzerConfig, SuffixRule};

#[test]
fn it_lowercases_and_stems() {
    let words = tokenize("Котов ЁЖИКАМ");
    assert_eq!(words, vec!["кот", "ёжик"]);
}

#[test]
fn it_splits_on_digits_and_punctuation() {
    let words = tokenize("abc123def, x-y;привет!мир");
    assert_eq!(words, vec!["abc", "def", "x", "y", "привет", "мир"]);
}

#[test]
fn it_ignores_markup() {
    let words = tokenize("<div class=\"content\">Матч<script>var x;</script></div>");
    assert_eq!(words, vec!["матч"]);

    let keep = Analyzer::new(AnalyzerConfig { strip_markup: false, ..AnalyzerConfig::default() });
    let words: Vec<String> = keep.tokens("<b>матч</b>").collect();
    assert_eq!(words, vec!["b", "матч", "b"]);
}

#[test]
fn unclosed_angle_bracket_hides_the_rest() {
    assert_eq!(tokenize("кот < собака птица"), vec!["кот"]);

    let keep = Analyzer::new(AnalyzerConfig { strip_markup: false, ..AnalyzerConfig::default() });
    let words: Vec<String> = keep.tokens("кот < собака").collect();
    assert_eq!(words, vec!["кот", "собака"]);
}

#[test]
fn it_composes_decomposed_letters() {
    // "ё" written as "е" + combining diaeresis
    let words = tokenize("e\u{0435}\u{0308}ж");
    assert_eq!(words, vec!["eёж"]);
}

#[test]
fn custom_suffix_tables_are_honoured() {
    let analyzer = Analyzer::new(AnalyzerConfig {
        suffix_rules: vec![SuffixRule::new("s", 3)],
        ..AnalyzerConfig::default()
    });
    let words: Vec<String> = analyzer.tokens("cats is dogs").collect();
    assert_eq!(words, vec!["cat", "is", "dog"]);
}

#[test]
fn garbage_input_degrades_to_no_tokens() {
    assert!(tokenize("123 !!! ... \u{1F600}").is_empty());
    assert!(tokenize("").is_empty());
}
