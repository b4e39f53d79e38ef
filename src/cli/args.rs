//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `translate`: Resolve a tag or text and print the result
//! - `init`: Initialize the configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Translate(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Arguments that override the configuration file.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Translations directory (overrides config file)
    #[arg(long, env = "QI18N_TRANSLATIONS_PATH")]
    pub translations_path: Option<PathBuf>,

    /// Comma-separated language codes (overrides config file)
    #[arg(long, value_delimiter = ',')]
    pub languages: Option<Vec<String>>,

    /// Default language (overrides config file)
    #[arg(long)]
    pub default_language: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    /// Tag (e.g. `greeting`) or display text (e.g. "Welcome!")
    pub text: String,

    /// Positional format arguments, substituted into `{}` fields
    pub args: Vec<String>,

    /// Language to translate into (falls back to the default language)
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Key domain (defaults to the configured domain)
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Named format argument, e.g. `--named name=Alice`
    #[arg(short, long = "named", value_name = "NAME=VALUE", value_parser = parse_named_arg)]
    pub named: Vec<(String, String)>,

    /// Seed missing keys into every language file
    #[arg(long, overrides_with = "no_dev")]
    pub dev: bool,

    /// Never write translation files
    #[arg(long, overrides_with = "dev")]
    pub no_dev: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl TranslateCommand {
    /// Authoring mode requested on the command line, if any.
    pub fn dev_mode(&self) -> Option<bool> {
        if self.dev {
            Some(true)
        } else if self.no_dev {
            Some(false)
        } else {
            None
        }
    }
}

fn parse_named_arg(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got \"{raw}\"")),
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Translate a tag or text, seeding missing keys in authoring mode
    Translate(TranslateCommand),
    /// Initialize a new .qi18nrc.json configuration file
    Init,
}
