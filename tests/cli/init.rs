use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["languages"], serde_json::json!(["en"]));
    assert_eq!(parsed["devMode"], false);
    assert_eq!(parsed["defaultDomain"], "default");
    assert_eq!(parsed["translationsPath"], "./translation");
    assert_eq!(parsed["seedPolicy"], "key-then-text");
    assert!(content.ends_with('\n'), "Config should end with a newline");

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Created .qi18nrc.json"));
    assert!(test.root().join(".qi18nrc.json").exists());

    let content = test.read_file(".qi18nrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_config("{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".qi18nrc.json already exists"));
    assert_eq!(test.read_file(".qi18nrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;

    let output = test.translate_command().arg("Hello there").output()?;
    assert!(
        output.status.success(),
        "Translate should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert_eq!(stdout(&output), "Hello there\n");
    assert!(test.root().join("translation").is_dir());

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("translate"));
    assert!(stdout(&output).contains("init"));

    Ok(())
}
