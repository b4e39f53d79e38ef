use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = I18nError> = std::result::Result<T, E>;

/// Errors raised by the translation engine.
///
/// A missing translation is not an error: it falls back to the input text.
#[derive(Debug, Error)]
pub enum I18nError {
    /// `set_language` was called with a code outside the configured set.
    #[error("Language '{language}' is not in the list of supported languages ({})", .supported.join(", "))]
    InvalidLanguage {
        language: String,
        supported: Vec<String>,
    },

    /// The resolved template references an argument the caller did not supply.
    #[error("Formatting error in translation '{template}': {reason}")]
    Formatting { template: String, reason: String },

    #[error("At least one language must be configured")]
    NoLanguages,

    /// The code cannot name a file inside the translations directory.
    #[error("Invalid language code \"{0}\"")]
    InvalidLanguageCode(String),

    #[error("Failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse translation file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize translations: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl I18nError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn formatting(template: &str, reason: impl Into<String>) -> Self {
        Self::Formatting {
            template: template.to_string(),
            reason: reason.into(),
        }
    }
}
