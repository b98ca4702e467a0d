use crate::text::lang::Language;
use once_cell::sync::Lazy;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashMap;

// Common irregular noun plurals the detachment rules below cannot reach.
static IRREGULAR: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("men", "man"),
        ("women", "woman"),
        ("children", "child"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("geese", "goose"),
        ("mice", "mouse"),
        ("oxen", "ox"),
        ("lives", "life"),
        ("wives", "wife"),
        ("knives", "knife"),
        ("leaves", "leaf"),
        ("selves", "self"),
        ("elves", "elf"),
        ("halves", "half"),
        ("wolves", "wolf"),
        ("loaves", "loaf"),
    ])
});

// Words that end like plurals but are not.
static NON_PLURAL: &[&str] = &["news", "species", "series"];

// WordNet morphy noun detachments, most specific first.
const DETACHMENTS: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("zes", "z"),
    ("ies", "y"),
];

/// POS-agnostic lemmatization with the noun default: irregular table first,
/// then ordered suffix detachments, then a guarded plural-s strip. Unknown
/// shapes pass through unchanged.
fn lemmatize(token: &str) -> String {
    if let Some(base) = IRREGULAR.get(token) {
        return (*base).to_string();
    }
    if NON_PLURAL.contains(&token) {
        return token.to_string();
    }

    for (suffix, replacement) in DETACHMENTS {
        if let Some(stem) = token.strip_suffix(suffix) {
            if stem.len() >= 2 {
                return format!("{}{}", stem, replacement);
            }
        }
    }

    if token.len() > 3
        && token.ends_with('s')
        && !token.ends_with("ss")
        && !token.ends_with("us")
        && !token.ends_with("is")
    {
        return token[..token.len() - 1].to_string();
    }

    token.to_string()
}

/// Per-token normalization: lemmatize English, Snowball-stem Spanish.
pub struct Normalizer {
    spanish: Stemmer,
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            spanish: Stemmer::create(Algorithm::Spanish),
        }
    }

    pub fn normalize(&self, token: &str, lang: Language) -> String {
        match lang {
            Language::English => lemmatize(token),
            Language::Spanish => self.spanish.stem(token).to_string(),
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_regular_plurals() {
        assert_eq!(lemmatize("cats"), "cat");
        assert_eq!(lemmatize("warnings"), "warning");
        assert_eq!(lemmatize("boxes"), "box");
        assert_eq!(lemmatize("glasses"), "glass");
        assert_eq!(lemmatize("berries"), "berry");
        assert_eq!(lemmatize("churches"), "church");
    }

    #[test]
    fn test_english_irregular_plurals() {
        assert_eq!(lemmatize("children"), "child");
        assert_eq!(lemmatize("feet"), "foot");
        assert_eq!(lemmatize("lives"), "life");
    }

    #[test]
    fn test_english_non_plurals_untouched() {
        assert_eq!(lemmatize("news"), "news");
        assert_eq!(lemmatize("glass"), "glass");
        assert_eq!(lemmatize("bus"), "bus");
        assert_eq!(lemmatize("crisis"), "crisis");
        assert_eq!(lemmatize("gas"), "gas");
    }

    #[test]
    fn test_spanish_snowball_stemming() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize("casas", Language::Spanish), "cas");
        assert_eq!(normalizer.normalize("libros", Language::Spanish), "libr");
    }

    #[test]
    fn test_dispatch_by_language() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize("floods", Language::English), "flood");
        assert_eq!(normalizer.normalize("alertas", Language::Spanish), "alert");
    }
}
