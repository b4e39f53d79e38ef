//! Translation engine.
//!
//! [`I18n`] owns one [`LanguageStore`] per configured language. Every call
//! derives a key from the tag or text, optionally seeds that key into every
//! language file (authoring mode), looks it up in the requested language and
//! falls back to the input text on a miss.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::{I18nError, Result},
    format::{FormatArgs, format_template},
    key::{DEFAULT_DOMAIN, Slugifier, derive_key, slugify},
    store::{LanguageStore, is_valid_language_code},
};

pub const DEFAULT_TRANSLATIONS_DIR: &str = "translation";

/// Which placeholder authoring mode writes for a brand-new key.
///
/// Seeding runs twice per call: once before lookup and once more if the
/// lookup still misses. The policy decides what each pass writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedPolicy {
    /// Seed the derived key first, then the literal input.
    #[default]
    KeyThenText,
    /// Seed the literal input first, then the derived key.
    ///
    /// This is the order the Python `quick-i18n` package uses, so a first
    /// call with `"Language: {}"` already formats its argument.
    TextThenKey,
}

/// Per-call options: language, domain and format arguments.
#[derive(Debug, Clone, Default)]
pub struct Lookup<'a> {
    language: Option<&'a str>,
    domain: Option<&'a str>,
    args: FormatArgs,
}

impl<'a> Lookup<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a language; codes outside the configured set fall back to the default.
    pub fn lang(mut self, language: &'a str) -> Self {
        self.language = Some(language);
        self
    }

    /// Use `domain` instead of the default domain. An empty domain disables prefixing.
    pub fn domain(mut self, domain: &'a str) -> Self {
        self.domain = Some(domain);
        self
    }

    pub fn arg(mut self, value: impl ToString) -> Self {
        self.args.push(value);
        self
    }

    pub fn named(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.args.insert(name, value);
        self
    }

    pub fn args(mut self, args: FormatArgs) -> Self {
        self.args = args;
        self
    }
}

/// Detailed outcome of a translation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Final, formatted text.
    pub text: String,
    /// Derived lookup key.
    pub key: String,
    /// Language actually used for the lookup.
    pub language: String,
    /// False when the text fell back to the input.
    pub found: bool,
    /// Languages whose file was updated by this call, in configured order.
    pub seeded: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct I18nBuilder {
    languages: Vec<String>,
    default_language: Option<String>,
    dev_mode: bool,
    default_domain: String,
    translations_path: Option<PathBuf>,
    slugifier: Slugifier,
    seed_policy: SeedPolicy,
}

impl I18nBuilder {
    pub fn new<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            languages: languages.into_iter().map(Into::into).collect(),
            default_language: None,
            dev_mode: false,
            default_domain: DEFAULT_DOMAIN.to_string(),
            translations_path: None,
            slugifier: slugify,
            seed_policy: SeedPolicy::default(),
        }
    }

    pub fn default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = Some(language.into());
        self
    }

    /// Enable authoring mode: missing keys are written to every language file.
    pub fn dev_mode(mut self, enabled: bool) -> Self {
        self.dev_mode = enabled;
        self
    }

    pub fn default_domain(mut self, domain: impl Into<String>) -> Self {
        self.default_domain = domain.into();
        self
    }

    /// Directory holding `<lang>.json` files. Defaults to `./translation`.
    pub fn translations_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.translations_path = Some(path.into());
        self
    }

    pub fn slugifier(mut self, slugifier: Slugifier) -> Self {
        self.slugifier = slugifier;
        self
    }

    pub fn seed_policy(mut self, policy: SeedPolicy) -> Self {
        self.seed_policy = policy;
        self
    }

    /// Create the translations directory and load every language file.
    pub fn build(self) -> Result<I18n> {
        let mut languages: Vec<String> = Vec::with_capacity(self.languages.len());
        for language in self.languages {
            if !is_valid_language_code(&language) {
                return Err(I18nError::InvalidLanguageCode(language));
            }
            if !languages.contains(&language) {
                languages.push(language);
            }
        }
        let Some(first) = languages.first() else {
            return Err(I18nError::NoLanguages);
        };

        let default_language = match self.default_language {
            Some(language) if languages.contains(&language) => language,
            _ => first.clone(),
        };

        let translations_path = match self.translations_path {
            Some(path) => path,
            None => std::env::current_dir()
                .map_err(|e| I18nError::io(".", e))?
                .join(DEFAULT_TRANSLATIONS_DIR),
        };
        std::fs::create_dir_all(&translations_path)
            .map_err(|e| I18nError::io(&translations_path, e))?;

        let stores = languages
            .iter()
            .map(|language| LanguageStore::load(&translations_path, language, self.dev_mode))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            languages = ?languages,
            default_language = %default_language,
            dev_mode = self.dev_mode,
            path = %translations_path.display(),
            "translations loaded"
        );

        Ok(I18n {
            current_language: default_language.clone(),
            default_language,
            languages,
            dev_mode: self.dev_mode,
            default_domain: self.default_domain,
            translations_path,
            slugifier: self.slugifier,
            seed_policy: self.seed_policy,
            stores,
        })
    }
}

/// Tag-or-text translator backed by one JSON file per language.
///
/// Not thread-safe: calls mutate the stores in authoring mode, so wrap the
/// instance in a mutex if it must be shared.
#[derive(Debug)]
pub struct I18n {
    languages: Vec<String>,
    default_language: String,
    current_language: String,
    dev_mode: bool,
    default_domain: String,
    translations_path: PathBuf,
    slugifier: Slugifier,
    seed_policy: SeedPolicy,
    stores: Vec<LanguageStore>,
}

impl I18n {
    pub fn builder<I, S>(languages: I) -> I18nBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        I18nBuilder::new(languages)
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Language used when a call does not request one.
    pub fn language(&self) -> &str {
        &self.current_language
    }

    pub fn set_language(&mut self, language: &str) -> Result<()> {
        if !self.is_supported(language) {
            return Err(I18nError::InvalidLanguage {
                language: language.to_string(),
                supported: self.languages.clone(),
            });
        }
        self.current_language = language.to_string();
        Ok(())
    }

    pub fn is_supported(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
    }

    pub fn dev_mode(&self) -> bool {
        self.dev_mode
    }

    pub fn default_domain(&self) -> &str {
        &self.default_domain
    }

    pub fn translations_path(&self) -> &Path {
        &self.translations_path
    }

    pub fn store(&self, language: &str) -> Option<&LanguageStore> {
        self.stores.iter().find(|s| s.language() == language)
    }

    /// Derive the lookup key `input` maps to within `domain` (default domain if `None`).
    pub fn key_for(&self, input: &str, domain: Option<&str>) -> String {
        derive_key(input, domain.unwrap_or(&self.default_domain), self.slugifier)
    }

    /// Translate `input` in the current language with no arguments.
    pub fn t(&mut self, input: &str) -> Result<String> {
        self.resolve(input, &Lookup::new())
    }

    /// Translate `input` and return only the final text.
    pub fn resolve(&mut self, input: &str, lookup: &Lookup<'_>) -> Result<String> {
        self.translate(input, lookup).map(|t| t.text)
    }

    /// Translate `input`, reporting the key, hit/miss and any seeded languages.
    pub fn translate(&mut self, input: &str, lookup: &Lookup<'_>) -> Result<Translation> {
        let language = self.effective_language(lookup.language).to_string();
        let key = self.key_for(input, lookup.domain);
        tracing::debug!(input, key = %key, language = %language, "resolving translation");

        let (first_seed, second_seed) = match self.seed_policy {
            SeedPolicy::KeyThenText => (key.as_str(), input),
            SeedPolicy::TextThenKey => (input, key.as_str()),
        };

        let mut seeded = Vec::new();
        if self.dev_mode {
            seed_all(&mut self.stores, &key, first_seed, &mut seeded)?;
        }

        let found = self
            .store(&language)
            .and_then(|store| store.lookup(&key))
            .map(str::to_string);

        let (text, found) = match found {
            Some(text) => (text, true),
            None => {
                if self.dev_mode {
                    seed_all(&mut self.stores, &key, second_seed, &mut seeded)?;
                }
                (input.to_string(), false)
            }
        };

        let text = if lookup.args.is_empty() {
            text
        } else {
            format_template(&text, &lookup.args)?
        };

        Ok(Translation {
            text,
            key,
            language,
            found,
            seeded,
        })
    }

    fn effective_language<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        let language = requested.unwrap_or(&self.current_language);
        if self.is_supported(language) {
            language
        } else {
            tracing::debug!(language, fallback = %self.default_language, "unsupported language, using default");
            &self.default_language
        }
    }
}

/// Seed `key` into every store, recording languages whose file changed.
///
/// A store that fails to persist does not stop the others; the first error
/// is returned once every store has been tried.
fn seed_all(
    stores: &mut [LanguageStore],
    key: &str,
    placeholder: &str,
    seeded: &mut Vec<String>,
) -> Result<()> {
    let mut first_error = None;
    for store in stores.iter_mut() {
        match store.ensure(key, placeholder) {
            Ok(outcome) => {
                if outcome.is_change() && !seeded.iter().any(|l| l == store.language()) {
                    seeded.push(store.language().to_string());
                }
            }
            Err(err) => {
                tracing::warn!(language = %store.language(), key, error = %err, "failed to seed translation key");
                first_error.get_or_insert(err);
            }
        }
    }
    first_error.map_or(Ok(()), Err)
}
