use crate::text::lang::Language;
use crate::text::stopwords;
use unicode_segmentation::UnicodeSegmentation;

/// Splits cleaned text into word tokens. Both buckets use UAX-29 word
/// boundaries; the language tag still travels with the tokens so the
/// stopword and normalization stages can dispatch on it. If segmentation
/// yields nothing for non-blank input, fall back to whitespace splitting.
pub fn tokenize(text: &str, _lang: Language) -> Vec<String> {
    let tokens: Vec<String> = text.unicode_words().map(str::to_string).collect();

    if tokens.is_empty() && !text.trim().is_empty() {
        return text.split_whitespace().map(str::to_string).collect();
    }
    tokens
}

/// Drops stopwords for the given language bucket, preserving token order.
pub fn remove_stopwords(tokens: Vec<String>, lang: Language) -> Vec<String> {
    tokens
        .into_iter()
        .filter(|t| !stopwords::is_stopword(t, lang))
        .collect()
}
