//! End-to-end runs of the `spdx-expr` binary.

use std::process::Output;

use assert_cmd::Command;
use rstest::rstest;

fn spdx_expr(args: &[&str]) -> Output {
    Command::cargo_bin("spdx-expr")
        .unwrap_or_else(|err| panic!("binary exists: {err}"))
        .env_remove("SPDX_LICENSE_LIST_DIR")
        .env_remove("SPDX_EXPR_LOG_LEVEL")
        .env("SPDX_ONLY_USE_LOCAL_LICENSES", "1")
        .args(args)
        .output()
        .unwrap_or_else(|err| panic!("runs: {err}"))
}

fn stdout(output: &Output) -> &str {
    std::str::from_utf8(&output.stdout).unwrap_or_else(|err| panic!("utf8: {err}"))
}

fn stderr(output: &Output) -> &str {
    std::str::from_utf8(&output.stderr).unwrap_or_else(|err| panic!("utf8: {err}"))
}

#[rstest]
#[case(&["parse", "mit or apache-2.0"], "(MIT OR Apache-2.0)\n")]
#[case(&["parse", "NOASSERTION"], "NOASSERTION\n")]
#[case(&["verify", "GPL-2.0 OR MIT"], "warning: license id `GPL-2.0` is deprecated\n")]
#[case(&["compare", "MIT AND ISC", "ISC AND MIT"], "equal: true\nequivalent: true\n")]
fn prints_results(#[case] args: &[&str], #[case] expected: &str) {
    let output = spdx_expr(args);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), expected);
}

#[test]
fn emits_json_trees() {
    let output = spdx_expr(&["parse", "--json", "GPL-2.0-or-later WITH Classpath-exception-2.0"]);
    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(stdout(&output)).unwrap_or_else(|err| panic!("json: {err}"));
    assert_eq!(
        json.get("kind").and_then(serde_json::Value::as_str),
        Some("with_exception")
    );
}

#[rstest]
#[case(&["parse", "(MIT AND"], "missing ')'")]
#[case(&["verify", "MIT WITH"], "expected an exception identifier")]
#[case(&["parse", "(MIT AND Apache-2.0)+"], "'+' can only follow a simple license")]
fn malformed_expressions_fail(#[case] args: &[&str], #[case] message: &str) {
    let output = spdx_expr(args);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains(message), "stderr: {}", stderr(&output));
}

#[test]
fn lists_filtered_ids() {
    let output = spdx_expr(&["licenses", "--filter", "gpl-2.0"]);
    assert!(output.status.success());
    let ids: Vec<&str> = stdout(&output).lines().collect();
    assert!(ids.contains(&"GPL-2.0-or-later"));
    assert!(!ids.contains(&"MIT"));
}

#[test]
fn lists_exceptions() {
    let output = spdx_expr(&["licenses", "--exceptions"]);
    assert!(output.status.success());
    assert!(stdout(&output).lines().any(|id| id == "LLVM-exception"));
}

#[test]
fn reads_a_license_directory() {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
    std::fs::write(
        dir.path().join("licenses.json"),
        r#"{ "licenseListVersion": "0.1", "licenses": [{ "licenseId": "Only-1.0" }] }"#,
    )
    .unwrap_or_else(|err| panic!("write: {err}"));
    std::fs::write(dir.path().join("exceptions.json"), r#"{ "exceptions": [] }"#)
        .unwrap_or_else(|err| panic!("write: {err}"));
    let root = dir
        .path()
        .to_str()
        .unwrap_or_else(|| panic!("non UTF-8 temp dir"));

    let output = Command::cargo_bin("spdx-expr")
        .unwrap_or_else(|err| panic!("binary exists: {err}"))
        .env_remove("SPDX_ONLY_USE_LOCAL_LICENSES")
        .args(["licenses", "--license-dir", root])
        .output()
        .unwrap_or_else(|err| panic!("runs: {err}"));
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "Only-1.0\n");
}

#[test]
fn invalid_log_level_in_environment_fails() {
    let output = Command::cargo_bin("spdx-expr")
        .unwrap_or_else(|err| panic!("binary exists: {err}"))
        .env("SPDX_EXPR_LOG_LEVEL", "chatty")
        .args(["licenses"])
        .output()
        .unwrap_or_else(|err| panic!("runs: {err}"));
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown log level 'chatty'"));
}
