use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, stderr_of, stdout_of};

#[test]
fn test_build_reports_keys() -> Result<()> {
    let test = CliTest::with_locales()?;
    test.write_file(
        "src/App.vue",
        "<template>{{ t('app.title') }}</template>",
    )?;
    test.write_file("src/main.ts", "t('greeting', { name });\nt('app.title');")?;
    test.write_file("src/style.css", ".t { content: t('not.a.key') }")?;

    assert_cmd_snapshot!(test.build_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Scanned 2 source files, 2 with translation calls, 2 keys

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_build_skips_node_modules() -> Result<()> {
    let test = CliTest::with_locales()?;
    test.write_file("node_modules/pkg/index.js", "t('from.dependency')")?;
    test.write_file("src/main.js", "t('app.title')")?;

    let output = test.build_command().output()?;
    let stdout = stdout_of(&output);

    assert!(stdout.contains("Scanned 1 source file,"), "stdout: {stdout}");
    assert!(!stdout.contains("from.dependency"));

    Ok(())
}

#[test]
fn test_build_warns_on_missing_keys() -> Result<()> {
    let test = CliTest::with_locales()?;
    test.write_file("src/main.ts", "t('app.title'); t('x.y');")?;

    let _guard = test.snapshot_settings().bind_to_scope();
    assert_cmd_snapshot!(test.build_command(), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: missing translation key "x.y"
      --> [ROOT]/src/main.ts
    ✓ Scanned 1 source file, 1 with translation calls, 2 keys (1 missing key)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_build_strict_fails_on_missing_key() -> Result<()> {
    let test = CliTest::with_locales()?;
    test.write_file("src/main.ts", "t('app.title'); t('x.y');")?;

    let mut cmd = test.build_command();
    cmd.args(["--strict", "--out", "dist/i18n.js"]);

    let _guard = test.snapshot_settings().bind_to_scope();
    assert_cmd_snapshot!(cmd, @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: missing translation key "x.y"
      --> [ROOT]/src/main.ts
    ✘ Scanned 1 source file, 1 with translation calls, 2 keys (1 missing key)

    ----- stderr -----
    "#);
    assert!(!test.root().join("dist/i18n.js").exists());

    Ok(())
}

#[test]
fn test_build_strict_from_config_file() -> Result<()> {
    let test = CliTest::with_locales()?;
    test.write_file(".i18nrc.json", r#"{"strictMode": true}"#)?;
    test.write_file("src/main.ts", "t('nope')")?;

    let output = test.build_command().output()?;
    assert_eq!(output.status.code(), Some(1));

    Ok(())
}

#[test]
fn test_build_writes_virtual_module() -> Result<()> {
    let test = CliTest::with_locales()?;
    test.write_file("src/main.ts", "t('app.title')")?;

    let output = test
        .build_command()
        .args(["--out", "dist/i18n.js"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let module = test.read_file("dist/i18n.js")?;
    assert!(module.contains(
        r#"export const locales = {"en":{"app":{"title":"My App"},"greeting":"Hello, {name}!"},"zh":{"app":{"title":"我的应用"},"greeting":"你好，{name}！"}};"#
    ));
    assert!(module.contains(r#"export const defaultLocale = "en";"#));
    assert!(module.contains(r#"export const availableLocales = ["en","zh"];"#));

    Ok(())
}

#[test]
fn test_build_custom_function_name() -> Result<()> {
    let test = CliTest::with_locales()?;
    test.write_file("src/App.vue", "{{ $t('app.title') }} {{ t('ignored') }}")?;

    let output = test
        .build_command()
        .args(["--function-name", "$t", "--strict"])
        .output()?;

    assert!(output.status.success(), "stdout: {}", stdout_of(&output));
    assert!(stdout_of(&output).contains("1 key"));

    Ok(())
}

#[test]
fn test_build_malformed_locale_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("locales/en.json", r#"{"a": [1, 2]}"#)?;

    let _guard = test.snapshot_settings().bind_to_scope();
    assert_cmd_snapshot!(test.build_command(), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Invalid value in locale "en" ([ROOT]/locales/en.json) at a: expected a string or object, found array
    "#);

    Ok(())
}

#[test]
fn test_build_without_locales_dir() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/main.ts", "const x = 1;")?;

    let output = test.build_command().output()?;

    assert!(output.status.success());
    assert!(stdout_of(&output).contains("Scanned 1 source file, 0 with translation calls, 0 keys"));

    Ok(())
}
