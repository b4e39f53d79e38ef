//! Lookup key derivation.
//!
//! A caller passes either a pre-formed tag (`"greeting"`, `"user.name"`) or
//! free display text (`"Welcome to our application!"`). Tags pass through
//! unchanged; free text is slugified into a single segment. The domain is
//! then prepended as the first segment.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Separator between key segments.
pub const KEY_SEPARATOR: char = '.';

/// Domain applied when the caller does not supply one.
pub const DEFAULT_DOMAIN: &str = "default";

/// Text-to-token normalization used for free-text inputs.
pub type Slugifier = fn(&str) -> String;

static QUOTES_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"['"`‘’“”]"#).unwrap());
static SEPARATOR_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\p{Alphabetic}\p{N}_]+").unwrap());

/// Returns true if `input` should be used verbatim as a tag.
///
/// A tag contains no space and is already all-lowercase.
pub fn is_tag(input: &str) -> bool {
    !input.contains(' ') && input.to_lowercase() == input
}

/// Normalize free text into a lowercase, `-`-joined token.
///
/// ```
/// use quicki18n::key::slugify;
///
/// assert_eq!(slugify("Welcome to our application!"), "welcome-to-our-application");
/// assert_eq!(slugify("Crème brûlée"), "creme-brulee");
/// ```
pub fn slugify(text: &str) -> String {
    let decomposed: String = text.nfkd().filter(|c| !is_combining_mark(*c)).collect();
    let lowered = decomposed.to_lowercase();
    let unquoted = QUOTES_REGEX.replace_all(&lowered, "");
    let joined = SEPARATOR_RUN_REGEX.replace_all(&unquoted, "-");
    joined.trim_matches('-').to_string()
}

/// Derive the full lookup key for `input` within `domain`.
///
/// An empty domain leaves the tag unprefixed.
pub fn derive_key(input: &str, domain: &str, slugifier: Slugifier) -> String {
    let tag = if is_tag(input) {
        input.to_string()
    } else {
        slugifier(input)
    };

    if domain.is_empty() {
        tag
    } else {
        format!("{domain}{KEY_SEPARATOR}{tag}")
    }
}
