//! Quick i18n - tag-or-text translations backed by JSON files
//!
//! Callers pass either a pre-formed tag (`"greeting"`) or display text
//! (`"Welcome to our application!"`). The text is turned into a dotted key,
//! looked up in the requested language's JSON file, formatted with the
//! supplied arguments and returned. Missing translations fall back to the
//! input. In authoring mode every newly seen key is written to every
//! language file so translators can fill it in later.
//!
//! ```no_run
//! use quicki18n::{I18n, Lookup};
//!
//! let mut t = I18n::builder(["en", "es"])
//!     .dev_mode(true)
//!     .translations_path("i18n/translation")
//!     .build()?;
//!
//! t.set_language("es")?;
//! println!("{}", t.resolve("Language: {}", &Lookup::new().arg("es"))?);
//! println!("{}", t.t("Welcome to our application!")?);
//! # Ok::<(), quicki18n::I18nError>(())
//! ```
//!
//! ## Module Structure
//!
//! - `key`: Tag detection, slugification and key derivation
//! - `table`: Hierarchical translation table
//! - `store`: Per-language JSON file persistence
//! - `format`: Brace-style template interpolation
//! - `i18n`: The translation engine
//! - `config`: Configuration file loading
//! - `cli`: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod i18n;
pub mod key;
pub mod store;
pub mod table;

pub use error::{I18nError, Result};
pub use format::FormatArgs;
pub use i18n::{I18n, I18nBuilder, Lookup, SeedPolicy, Translation};
