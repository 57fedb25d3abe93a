use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, stderr_of, stdout_of};

#[test]
fn test_resolve_default_locale() -> Result<()> {
    let test = CliTest::with_locales()?;

    let output = test.resolve_command("app.title").output()?;

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "My App\n");

    Ok(())
}

#[test]
fn test_resolve_with_locale_and_params() -> Result<()> {
    let test = CliTest::with_locales()?;

    let output = test
        .resolve_command("greeting")
        .args(["--locale", "zh", "--param", "name=World"])
        .output()?;

    assert_eq!(stdout_of(&output), "你好，World！\n");

    Ok(())
}

#[test]
fn test_resolve_missing_key_falls_back() -> Result<()> {
    let test = CliTest::with_locales()?;

    assert_cmd_snapshot!(test.resolve_command("missing.key"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    missing.key

    ----- stderr -----
    warning: no message for "missing.key" in locale "en"
    "#);

    Ok(())
}

#[test]
fn test_resolve_unknown_locale_keeps_default() -> Result<()> {
    let test = CliTest::with_locales()?;

    let output = test
        .resolve_command("app.title")
        .args(["--locale", "fr"])
        .output()?;

    assert_eq!(stdout_of(&output), "My App\n");
    assert!(stderr_of(&output).contains("Unknown locale 'fr'"));

    Ok(())
}

#[test]
fn test_resolve_rejects_bad_param() -> Result<()> {
    let test = CliTest::with_locales()?;

    let output = test
        .resolve_command("greeting")
        .args(["--param", "oops"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("expected NAME=VALUE"));

    Ok(())
}
