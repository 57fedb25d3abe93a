use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, stdout_of};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("Created"));

    let content = test.read_file(".i18nrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["localesDir"], "locales");
    assert_eq!(parsed["defaultLocale"], "en");
    assert_eq!(parsed["functionName"], "t");
    assert_eq!(parsed["strictMode"], false);
    assert!(parsed["include"].is_array());

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".i18nrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ✘ .i18nrc.json already exists

    ----- stderr -----
    ");

    assert_eq!(test.read_file(".i18nrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("locales/en.json", r#"{"hello": "Hello"}"#)?;
    test.write_file("src/main.ts", "t('hello')")?;

    let output = test.build_command().output()?;
    assert!(
        output.status.success(),
        "Build should work with initialized config. stdout: {}",
        stdout_of(&output)
    );

    Ok(())
}
