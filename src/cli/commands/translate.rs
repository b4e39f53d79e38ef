use std::{env, io};

use anyhow::{Context, Result};

use super::super::args::TranslateCommand;
use super::super::exit_status::ExitStatus;
use super::super::report;
use crate::{
    config::{Config, ConfigLoadResult, load_config},
    format::FormatArgs,
    i18n::Lookup,
};

pub fn translate(cmd: TranslateCommand) -> Result<ExitStatus> {
    let cwd = env::current_dir().context("Failed to determine the working directory")?;
    let ConfigLoadResult {
        config,
        base_dir,
        from_file,
    } = load_config(&cwd)?;

    let config = apply_overrides(config, &cmd);
    config.validate()?;

    let mut builder = config.into_builder(&base_dir);
    if let Some(path) = &cmd.common.translations_path {
        builder = builder.translations_path(cwd.join(path));
    }
    let mut i18n = builder
        .build()
        .context("Failed to load translation files")?;

    let mut lookup = Lookup::new();
    if let Some(language) = &cmd.lang {
        lookup = lookup.lang(language);
    }
    if let Some(domain) = &cmd.domain {
        lookup = lookup.domain(domain);
    }
    let mut args = FormatArgs::new();
    for value in &cmd.args {
        args.push(value);
    }
    for (name, value) in &cmd.named {
        args.insert(name.as_str(), value);
    }
    lookup = lookup.args(args);

    let translation = i18n
        .translate(&cmd.text, &lookup)
        .with_context(|| format!("Failed to translate \"{}\"", cmd.text))?;

    println!("{}", translation.text);
    if cmd.common.verbose {
        report::print_translation_to(&translation, from_file, &mut io::stderr().lock());
    }

    Ok(ExitStatus::Success)
}

/// Apply command-line overrides on top of the loaded configuration.
fn apply_overrides(mut config: Config, cmd: &TranslateCommand) -> Config {
    if let Some(languages) = &cmd.common.languages {
        config.languages = languages.clone();
    }
    if let Some(language) = &cmd.common.default_language {
        config.default_language = Some(language.clone());
    }
    if let Some(dev_mode) = cmd.dev_mode() {
        config.dev_mode = dev_mode;
    }
    config
}
