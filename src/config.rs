use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::{
    i18n::{DEFAULT_TRANSLATIONS_DIR, I18nBuilder, SeedPolicy},
    key::DEFAULT_DOMAIN,
    store::is_valid_language_code,
};

pub const CONFIG_FILE_NAME: &str = ".qi18nrc.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,
    #[serde(default)]
    pub dev_mode: bool,
    #[serde(default = "default_domain")]
    pub default_domain: String,
    #[serde(default = "default_translations_path")]
    pub translations_path: String,
    #[serde(default)]
    pub seed_policy: SeedPolicy,
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_domain() -> String {
    DEFAULT_DOMAIN.to_string()
}

fn default_translations_path() -> String {
    format!("./{DEFAULT_TRANSLATIONS_DIR}")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            default_language: None,
            dev_mode: false,
            default_domain: default_domain(),
            translations_path: default_translations_path(),
            seed_policy: SeedPolicy::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Language codes name files on disk, so they must be non-empty and free
    /// of path separators, dots and whitespace.
    pub fn validate(&self) -> Result<()> {
        if self.languages.is_empty() {
            bail!("'languages' must list at least one language code");
        }

        for (i, language) in self.languages.iter().enumerate() {
            if !is_valid_language_code(language) {
                bail!("Invalid language code in 'languages': \"{}\"", language);
            }
            if self.languages[..i].contains(language) {
                bail!("Duplicate language code in 'languages': \"{}\"", language);
            }
        }

        Ok(())
    }

    /// Build an engine configuration, resolving `translationsPath` against `base_dir`.
    pub fn into_builder(self, base_dir: &Path) -> I18nBuilder {
        let mut builder = I18nBuilder::new(self.languages)
            .dev_mode(self.dev_mode)
            .default_domain(self.default_domain)
            .seed_policy(self.seed_policy)
            .translations_path(base_dir.join(&self.translations_path));
        if let Some(language) = self.default_language {
            builder = builder.default_language(language);
        }
        builder
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory relative paths in the config resolve against.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            tracing::debug!(path = %path.display(), "loaded config file");
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
