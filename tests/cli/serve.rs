use std::{
    io::Write,
    process::{Output, Stdio},
};

use anyhow::{Context, Result};
use serde_json::{Value, json};

use crate::{CliTest, stderr_of};

fn run_session(test: &CliTest, requests: &[Value]) -> Result<Output> {
    let mut child = test
        .command()
        .arg("serve")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    {
        let mut stdin = child.stdin.take().context("stdin is piped")?;
        for request in requests {
            writeln!(stdin, "{}", request)?;
        }
    }

    Ok(child.wait_with_output()?)
}

fn responses(output: &Output) -> Vec<Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_serve_full_session() -> Result<()> {
    let test = CliTest::with_locales()?;
    let root = test.root().to_string_lossy().into_owned();
    let en = test.root().join("locales/en.json");

    let output = run_session(
        &test,
        &[
            json!({"id": 1, "hook": "configResolved", "root": root}),
            json!({"id": 2, "hook": "resolveId", "specifier": "virtual:i18n"}),
            json!({"id": 3, "hook": "load", "moduleId": "\u{0}virtual:i18n"}),
            json!({"id": 4, "hook": "transform", "code": "t('app.title')", "moduleId": format!("{root}/src/a.ts")}),
            json!({"id": 5, "hook": "handleHotUpdate", "file": en}),
        ],
    )?;

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let responses = responses(&output);
    assert_eq!(responses.len(), 5);
    assert_eq!(responses[0]["result"]["locales"], json!(["en", "zh"]));
    assert_eq!(responses[1]["result"], "\u{0}virtual:i18n");
    assert!(
        responses[2]["result"]
            .as_str()
            .unwrap()
            .contains("export const availableLocales = [\"en\",\"zh\"];")
    );
    assert_eq!(responses[3]["result"]["keys"], json!(["app.title"]));
    assert_eq!(responses[4]["result"], json!(["\u{0}virtual:i18n"]));

    Ok(())
}

#[test]
fn test_serve_strict_error_response() -> Result<()> {
    let test = CliTest::with_locales()?;

    let output = {
        let mut child = test
            .command()
            .args(["serve", "--strict"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        {
            let mut stdin = child.stdin.take().context("stdin is piped")?;
            let request = json!({"id": 1, "hook": "transform", "code": "t('x.y')", "moduleId": "/p/app.ts"});
            writeln!(stdin, "{}", request)?;
        }
        child.wait_with_output()?
    };

    assert!(output.status.success());
    assert_eq!(
        responses(&output),
        vec![json!({
            "id": 1,
            "error": {
                "kind": "MissingTranslationKeyError",
                "message": "Missing translation key \"x.y\" in /p/app.ts"
            }
        })]
    );

    Ok(())
}

#[test]
fn test_serve_fails_fast_on_broken_locales() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("locales/en.json", "{")?;

    let output = run_session(&test, &[])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("Error:"));

    Ok(())
}
