use once_cell::sync::Lazy;
use regex::Regex;

// Patterns are applied in this exact order; RT removal is case-sensitive and
// must run before case-folding.
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());
static MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").unwrap());
static RT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bRT\b").unwrap());
static NON_ALPHA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-záéíóúñüÁÉÍÓÚÑÜ\s]").unwrap());

/// Strips URLs, @mentions, the standalone retweet marker and everything
/// outside the Latin alphabet (Spanish accents kept), then lowercases.
///
/// Total: a missing cell comes out as the empty string, and the function is
/// idempotent on its own output.
pub fn clean(raw: Option<&str>) -> String {
    let text = raw.unwrap_or("");
    let text = URL_RE.replace_all(text, "");
    let text = MENTION_RE.replace_all(&text, "");
    let text = RT_RE.replace_all(&text, "");
    let text = NON_ALPHA_RE.replace_all(&text, "");
    text.to_lowercase()
}

/// Compiles every cleaning pattern up front instead of on the first row.
pub(crate) fn warm_up() {
    Lazy::force(&URL_RE);
    Lazy::force(&MENTION_RE);
    Lazy::force(&RT_RE);
    Lazy::force(&NON_ALPHA_RE);
}
