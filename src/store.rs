use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::{
    error::{I18nError, Result},
    table::{Ensured, TranslationTable},
};

/// Returns true if `language` can be used as a file stem under the translations directory.
pub fn is_valid_language_code(language: &str) -> bool {
    !language.is_empty()
        && !language
            .chars()
            .any(|c| c == '/' || c == '\\' || c == '.' || c.is_whitespace())
}

/// One language's translation table bound to `<dir>/<language>.json`.
#[derive(Debug)]
pub struct LanguageStore {
    language: String,
    file_path: PathBuf,
    table: TranslationTable,
}

impl LanguageStore {
    /// Path of the backing document for `language` inside `dir`.
    pub fn file_path_for(dir: &Path, language: &str) -> PathBuf {
        dir.join(format!("{language}.json"))
    }

    /// Load the table for `language` from `dir`.
    ///
    /// A missing document yields an empty table; when `create_missing` is
    /// set an empty document is written immediately.
    pub fn load(dir: &Path, language: &str, create_missing: bool) -> Result<Self> {
        let file_path = Self::file_path_for(dir, language);

        let table = if file_path.exists() {
            let content =
                fs::read_to_string(&file_path).map_err(|e| I18nError::io(&file_path, e))?;
            TranslationTable::from_json(&content).map_err(|source| I18nError::Parse {
                path: file_path.clone(),
                source,
            })?
        } else {
            TranslationTable::new()
        };

        let store = Self {
            language: language.to_string(),
            file_path,
            table,
        };

        if create_missing && !store.file_path.exists() {
            tracing::debug!(language, path = %store.file_path.display(), "creating empty translation file");
            store.save()?;
        } else {
            tracing::debug!(language, path = %store.file_path.display(), "loaded translation file");
        }

        Ok(store)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.table.lookup(key)
    }

    /// Seed `key` with `placeholder` and persist if the table changed.
    ///
    /// The in-memory table only takes the new key once the file has been
    /// written, so a failed save is retried by the next call.
    pub fn ensure(&mut self, key: &str, placeholder: &str) -> Result<Ensured> {
        let mut updated = self.table.clone();
        let outcome = updated.ensure(key, placeholder);
        match outcome {
            Ensured::Inserted | Ensured::Filled => {
                self.write_table(&updated)?;
                self.table = updated;
                tracing::info!(language = %self.language, key, placeholder, action = outcome.as_str(), "seeded translation key");
            }
            Ensured::Blocked => {
                tracing::warn!(language = %self.language, key, "cannot seed key: a parent segment holds a string");
            }
            Ensured::Kept => {}
        }
        Ok(outcome)
    }

    /// Write the table with sorted keys and 4-space indentation.
    ///
    /// The document is assembled in memory, written to a temporary file in
    /// the same directory and renamed over the target.
    ///
    /// An existing file keeps its permissions; a new one gets the usual
    /// `0644` rather than the temporary file's private mode.
    pub fn save(&self) -> Result<()> {
        self.write_table(&self.table)
    }

    fn write_table(&self, table: &TranslationTable) -> Result<()> {
        let dir = match self.file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| I18nError::io(dir, e))?;

        let content = format!("{}\n", table.to_pretty_json()?);

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| I18nError::io(dir, e))?;
        temp.write_all(content.as_bytes())
            .map_err(|e| I18nError::io(temp.path(), e))?;
        if let Some(permissions) = self.target_permissions() {
            temp.as_file()
                .set_permissions(permissions)
                .map_err(|e| I18nError::io(temp.path(), e))?;
        }
        temp.persist(&self.file_path)
            .map_err(|e| I18nError::io(&self.file_path, e.error))?;

        tracing::debug!(language = %self.language, path = %self.file_path.display(), "saved translation file");
        Ok(())
    }

    fn target_permissions(&self) -> Option<fs::Permissions> {
        match fs::metadata(&self.file_path) {
            Ok(metadata) if metadata.is_file() => Some(metadata.permissions()),
            _ => default_permissions(),
        }
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}
