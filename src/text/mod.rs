pub mod clean;
pub mod lang;
pub mod normalize;
pub mod stopwords;
pub mod tokenize;

pub use clean::clean;
pub use lang::Language;
pub use normalize::Normalizer;

/// 每列套用的文字清理流程：清理 → 偵測語言 → 斷詞 → 移除停用詞 →（可選）正規化
pub struct TextPipeline {
    normalize: bool,
    normalizer: Normalizer,
}

impl TextPipeline {
    /// Builds the pipeline and forces every lazy resource (regexes, stopword
    /// sets, the Spanish stemmer) so nothing initializes mid-batch.
    /// Constructing a second pipeline is harmless.
    pub fn new(normalize: bool) -> Self {
        clean::warm_up();
        stopwords::warm_up();

        Self {
            normalize,
            normalizer: Normalizer::new(),
        }
    }

    /// Cleaned, filtered (and optionally normalized) tokens for one cell.
    pub fn tokens(&self, raw: Option<&str>) -> Vec<String> {
        let cleaned = clean(raw);
        let lang = Language::detect(&cleaned);
        let tokens = tokenize::tokenize(&cleaned, lang);
        let tokens = tokenize::remove_stopwords(tokens, lang);

        if self.normalize {
            tokens
                .iter()
                .map(|t| self.normalizer.normalize(t, lang))
                .collect()
        } else {
            tokens
        }
    }

    /// The `clean_text` cell: tokens joined by single spaces.
    pub fn process(&self, raw: Option<&str>) -> String {
        self.tokens(raw).join(" ")
    }
}
