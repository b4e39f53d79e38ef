//! Human-readable summaries written to stderr.

use std::io::Write;

use colored::Colorize;

use crate::{config::CONFIG_FILE_NAME, i18n::Translation};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Describe how a translation was resolved.
pub fn print_translation_to<W: Write>(translation: &Translation, from_file: bool, writer: &mut W) {
    let status = if translation.found {
        format!("{} found", SUCCESS_MARK).green()
    } else {
        format!("{} missing, fell back to input", FAILURE_MARK).yellow()
    };
    let _ = writeln!(
        writer,
        "{} {} ({}) {}",
        "key".bold(),
        translation.key.cyan(),
        translation.language,
        status
    );

    if !translation.seeded.is_empty() {
        let _ = writeln!(
            writer,
            "  {} {}",
            "seeded:".bold(),
            translation.seeded.join(", ")
        );
    }

    if !from_file {
        let _ = writeln!(
            writer,
            "  {}",
            format!("no {} found, using defaults", CONFIG_FILE_NAME).dimmed()
        );
    }
}
