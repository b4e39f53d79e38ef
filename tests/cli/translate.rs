use anyhow::Result;
use insta::assert_snapshot;
use serde_json::{Value, json};

use crate::{CliTest, stderr, stdout};

const DEV_CONFIG: &str = r#"{
    "languages": ["en", "es", "ch", "ru"],
    "defaultLanguage": "en",
    "devMode": true,
    "translationsPath": "i18n/translation"
}"#;

fn read_json(test: &CliTest, path: &str) -> Result<Value> {
    Ok(serde_json::from_str(&test.read_file(path)?)?)
}

#[test]
fn test_translate_without_config_returns_input() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .translate_command()
        .arg("Welcome to our application!")
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "Welcome to our application!\n");
    assert!(!test.root().join("translation").join("en.json").exists());

    Ok(())
}

#[test]
fn test_translate_seeds_every_language() -> Result<()> {
    let test = CliTest::with_config(DEV_CONFIG)?;

    let output = test
        .translate_command()
        .args(["greeting", "--named", "name=Alice"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "default.greeting\n");
    for language in ["en", "es", "ch", "ru"] {
        let content = test.read_file(&format!("i18n/translation/{language}.json"))?;
        insta::allow_duplicates! {
            assert_snapshot!(content, @r#"
            {
                "default": {
                    "greeting": "default.greeting"
                }
            }
            "#);
        }
    }

    Ok(())
}

#[test]
fn test_translate_twice_leaves_files_unchanged() -> Result<()> {
    let test = CliTest::with_config(DEV_CONFIG)?;

    test.translate_command()
        .arg("Welcome to our application!")
        .output()?;
    let first = test.read_file("i18n/translation/es.json")?;

    let output = test
        .translate_command()
        .arg("Welcome to our application!")
        .output()?;

    assert_eq!(stdout(&output), "default.welcome-to-our-application\n");
    assert_eq!(test.read_file("i18n/translation/es.json")?, first);

    Ok(())
}

#[test]
fn test_translate_uses_existing_translation() -> Result<()> {
    let test = CliTest::with_config(DEV_CONFIG)?;
    test.write_file(
        "i18n/translation/es.json",
        r#"{"default": {"language": "Idioma: {}", "greeting": "¡Hola, {name}!"}}"#,
    )?;

    let output = test
        .translate_command()
        .args(["Language: {}", "es", "--lang", "es"])
        .output()?;
    assert_eq!(stdout(&output), "Idioma: es\n");

    let output = test
        .translate_command()
        .args(["greeting", "--lang", "es", "--named", "name=Alice"])
        .output()?;
    assert_eq!(stdout(&output), "¡Hola, Alice!\n");

    Ok(())
}

#[test]
fn test_translate_unsupported_language_uses_default() -> Result<()> {
    let test = CliTest::with_config(DEV_CONFIG)?;
    test.write_file(
        "i18n/translation/en.json",
        r#"{"default": {"language": "Language: {}"}}"#,
    )?;

    let output = test
        .translate_command()
        .args(["Language: {}", "de", "--lang", "de"])
        .output()?;

    assert_eq!(stdout(&output), "Language: de\n");

    Ok(())
}

#[test]
fn test_translate_formatting_error_exits_with_error() -> Result<()> {
    let test = CliTest::with_config(DEV_CONFIG)?;
    test.write_file(
        "i18n/translation/en.json",
        r#"{"default": {"greeting": "Hello, {name}!"}}"#,
    )?;

    let output = test
        .translate_command()
        .args(["greeting", "--named", "user=Alice"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout(&output), "");
    let stderr = stderr(&output);
    assert!(stderr.contains("Failed to translate \"greeting\""), "stderr: {stderr}");
    assert!(stderr.contains("missing named argument 'name'"), "stderr: {stderr}");

    Ok(())
}

#[test]
fn test_translate_invalid_json_exits_with_error() -> Result<()> {
    let test = CliTest::with_config(DEV_CONFIG)?;
    test.write_file("i18n/translation/ru.json", "{ invalid json }")?;

    let output = test.translate_command().arg("greeting").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("ru.json"));

    Ok(())
}

#[test]
fn test_translate_command_line_overrides() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .translate_command()
        .args([
            "Sign out",
            "--languages",
            "en,es",
            "--translations-path",
            "locales",
            "--domain",
            "auth",
            "--dev",
        ])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "auth.sign-out\n");
    assert_eq!(
        read_json(&test, "locales/es.json")?,
        json!({"auth": {"sign-out": "auth.sign-out"}})
    );
    assert!(!test.root().join("locales").join("ch.json").exists());

    Ok(())
}

#[test]
fn test_translate_no_dev_overrides_config() -> Result<()> {
    let test = CliTest::with_config(DEV_CONFIG)?;

    let output = test
        .translate_command()
        .args(["Welcome!", "--no-dev"])
        .output()?;

    assert_eq!(stdout(&output), "Welcome!\n");
    assert!(!test.root().join("i18n/translation/en.json").exists());

    Ok(())
}

#[test]
fn test_translate_text_then_key_policy() -> Result<()> {
    let test = CliTest::with_config(
        r#"{ "languages": ["en", "es"], "devMode": true, "seedPolicy": "text-then-key" }"#,
    )?;

    let output = test
        .translate_command()
        .args(["Language: {}", "en", "--lang", "ru"])
        .output()?;

    assert_eq!(stdout(&output), "Language: en\n");
    assert_eq!(
        read_json(&test, "translation/es.json")?,
        json!({"default": {"language": "Language: {}"}})
    );

    Ok(())
}

#[test]
fn test_translate_verbose_reports_seeding() -> Result<()> {
    let test = CliTest::with_config(DEV_CONFIG)?;

    let output = test
        .translate_command()
        .args(["greeting", "-v"])
        .output()?;

    assert_eq!(stdout(&output), "default.greeting\n");
    let stderr = stderr(&output);
    assert!(stderr.contains("key default.greeting (en)"), "stderr: {stderr}");
    assert!(stderr.contains("seeded: en, es, ch, ru"), "stderr: {stderr}");

    Ok(())
}

#[test]
fn test_translate_invalid_config_exits_with_error() -> Result<()> {
    let test = CliTest::with_config(r#"{ "languages": [] }"#)?;

    let output = test.translate_command().arg("greeting").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("at least one language"));

    Ok(())
}
