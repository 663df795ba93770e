//! End-to-end tests for the `unify` binary

use std::io::Write;
use std::process::{Command, Stdio};

/// Run the binary, returning (success, stdout, stderr)
fn run(args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_unify"))
        .args(args)
        .output()
        .expect("failed to run unify");
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

#[test]
fn test_cli_success() {
    let (ok, stdout, _) = run(&["Eats(x, Apple)", "Eats(Riya, y)"]);
    assert!(ok);
    assert_eq!(stdout.trim(), "Substitution: {x -> Riya, y -> Apple}");
}

#[test]
fn test_cli_failure() {
    let (ok, stdout, _) = run(&["x", "f(x)"]);
    assert!(!ok);
    assert!(stdout.starts_with("Unification failed: occurs check failed"));
}

#[test]
fn test_cli_invalid_input() {
    let (ok, stdout, _) = run(&["f(a", "f(b)"]);
    assert!(!ok);
    assert!(stdout.starts_with("Invalid input format:"));
}

#[test]
fn test_cli_json() {
    let (ok, stdout, _) = run(&["--json", "Eats(x, Apple)", "Eats(Riya, y)"]);
    assert!(ok);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["result"], "Unified");
    assert_eq!(value["substitution"]["bindings"][0]["variable"], "x");
    assert_eq!(value["substitution"]["bindings"][0]["text"], "Riya");
}

#[test]
fn test_cli_keep_partial() {
    let (ok, stdout, _) = run(&["--keep-partial", "f(x, B)", "f(A, C)"]);
    assert!(!ok);
    assert!(stdout.starts_with("Unification failed: constant clash: B vs C"));
    assert!(stdout.contains("Partial substitution: {x -> A}"));

    // Rolled back by default
    let (ok, stdout, _) = run(&["f(x, B)", "f(A, C)"]);
    assert!(!ok);
    assert!(!stdout.contains("Partial substitution"));

    let (ok, stdout, _) = run(&["--keep-partial", "Eats(x, Apple)", "Eats(Riya, y)"]);
    assert!(ok);
    assert_eq!(stdout.trim(), "Substitution: {x -> Riya, y -> Apple}");
}

#[test]
fn test_cli_max_depth() {
    let (ok, stdout, _) = run(&["--max-depth", "2", "f(g(x))", "f(g(A))"]);
    assert!(ok);
    assert_eq!(stdout.trim(), "Substitution: {x -> A}");

    let (ok, stdout, _) = run(&["--max-depth", "2", "f(g(h(x)))", "y"]);
    assert!(!ok);
    assert!(stdout.starts_with("Invalid input format: term nesting exceeds depth limit 2"));
}

#[test]
fn test_cli_bad_max_depth() {
    for args in [
        &["--max-depth", "deep", "x", "y"][..],
        &["--max-depth", "-1", "x", "y"][..],
        &["x", "y", "--max-depth"][..],
    ] {
        let (ok, stdout, stderr) = run(args);
        assert!(!ok, "{:?}", args);
        assert!(stdout.is_empty());
        assert!(stderr.contains("--max-depth needs a non-negative integer"));
    }
}

#[test]
fn test_cli_wrong_expression_count() {
    for args in [&["x"][..], &["x", "y", "z"][..]] {
        let (ok, stdout, stderr) = run(args);
        assert!(!ok, "{:?}", args);
        assert!(stdout.is_empty());
        assert!(stderr.contains("Usage:"));
    }
}

#[test]
fn test_cli_unknown_option() {
    let (ok, stdout, stderr) = run(&["--frobnicate", "x", "y"]);
    assert!(!ok);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Unknown option: --frobnicate"));
    assert!(stderr.contains("Usage:"));
}

#[test]
fn test_cli_stdin_prompts() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_unify"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to run unify");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"Eats(x, Apple)\nEats(Riya, y)\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Enter the first expression"));
    assert!(stdout.contains("Substitution: {x -> Riya, y -> Apple}"));
}
