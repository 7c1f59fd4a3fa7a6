//! Integration tests for argument handling and exit codes

use std::fs;

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::seq2gif;

// ============================================================================
// Help and Version
// ============================================================================

#[test]
fn help_exits_0_and_shows_usage() {
    let home = TempDir::new().unwrap();
    seq2gif(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("seq2gif [OPTIONS] < ttyrecord > record.gif"))
        .stdout(predicate::str::contains("--last-frame-delay"))
        .stdout(predicate::str::contains("--cjkwidth"));
}

#[test]
fn capital_h_shows_help() {
    let home = TempDir::new().unwrap();
    seq2gif(home.path())
        .arg("-H")
        .assert()
        .success()
        .stdout(predicate::str::contains("--tabstop"));
}

#[test]
fn version_shows_license() {
    let home = TempDir::new().unwrap();
    seq2gif(home.path())
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "seq2gif {}",
            env!("CARGO_PKG_VERSION")
        )))
        .stdout(predicate::str::contains("GPLv3+"));
}

// ============================================================================
// Argument Errors
// ============================================================================

#[test]
fn zero_width_exits_1() {
    let home = TempDir::new().unwrap();
    seq2gif(home.path())
        .args(["-w", "0"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn color_out_of_range_exits_1() {
    let home = TempDir::new().unwrap();
    seq2gif(home.path()).args(["-c", "300"]).assert().code(1);
}

#[test]
fn unknown_flag_exits_1() {
    let home = TempDir::new().unwrap();
    seq2gif(home.path())
        .arg("--frobnicate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--frobnicate"));
}

// ============================================================================
// Configuration File
// ============================================================================

#[test]
fn invalid_config_value_exits_1() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("custom.toml");
    fs::write(&path, "tabstop = 999\n").unwrap();

    seq2gif(home.path())
        .arg("--config")
        .arg(&path)
        .write_stdin(Vec::new())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid tabstop"));
}

#[test]
fn missing_explicit_config_exits_1() {
    let home = TempDir::new().unwrap();
    seq2gif(home.path())
        .args(["--config", "/nonexistent/seq2gif.toml"])
        .write_stdin(Vec::new())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn config_from_environment_is_used() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("env.toml");
    fs::write(&path, "cursor_color = 1000\n").unwrap();

    seq2gif(home.path())
        .env("SEQ2GIF_CONFIG", &path)
        .write_stdin(Vec::new())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cursor_color"));
}
