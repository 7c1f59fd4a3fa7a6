//! Integration tests for end-to-end conversion

use std::fs;

use gif::Repeat;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{decode_gif, sample_session, seq2gif};

// ============================================================================
// Files and Standard Streams
// ============================================================================

#[test]
fn converts_file_to_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("session.rec");
    let output = dir.path().join("session.gif");
    fs::write(&input, sample_session()).unwrap();

    seq2gif(dir.path())
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let animation = decode_gif(&fs::read(&output).unwrap());
    assert_eq!((animation.width, animation.height), (640, 384));
    assert_eq!(animation.repeat, Repeat::Infinite);
    // Two captured frames and the 300 ms padding frame
    assert_eq!(animation.delays, vec![50, 50, 30]);
}

#[test]
fn converts_stdin_to_stdout() {
    let dir = TempDir::new().unwrap();
    let assert = seq2gif(dir.path())
        .write_stdin(sample_session())
        .assert()
        .success();

    let animation = decode_gif(&assert.get_output().stdout);
    assert_eq!(animation.delays.len(), 3);
}

#[test]
fn empty_input_yields_single_padding_frame() {
    let dir = TempDir::new().unwrap();
    let assert = seq2gif(dir.path())
        .write_stdin(Vec::new())
        .assert()
        .success();

    let animation = decode_gif(&assert.get_output().stdout);
    assert_eq!(animation.delays, vec![30]);
}

#[test]
fn missing_input_exits_1_without_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.gif");

    seq2gif(dir.path())
        .args(["-i", "/nonexistent/session.rec"])
        .arg("-o")
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cannot open input"));

    assert!(!output.exists());
}

// ============================================================================
// Truncated Streams
// ============================================================================

#[test]
fn truncated_stream_exits_1_but_writes_frames() {
    let dir = TempDir::new().unwrap();
    let mut data = sample_session();
    // Replace the trailing payload with half a length field
    data.truncate(data.len() - 4 - 4);
    data.extend_from_slice(&[0x04, 0x00]);

    let assert = seq2gif(dir.path()).write_stdin(data).assert().code(1);

    let animation = decode_gif(&assert.get_output().stdout);
    assert_eq!(animation.delays, vec![50, 50, 30]);
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn size_delay_and_repeat_flags() {
    let dir = TempDir::new().unwrap();
    let assert = seq2gif(dir.path())
        .args(["-w", "10", "-h", "2", "-l", "0", "-r", "2"])
        .write_stdin(sample_session())
        .assert()
        .success();

    let animation = decode_gif(&assert.get_output().stdout);
    assert_eq!((animation.width, animation.height), (80, 32));
    assert_eq!(animation.repeat, Repeat::Finite(2));
    assert_eq!(animation.delays, vec![50, 50]);
}

#[test]
fn default_config_file_is_applied() {
    let dir = TempDir::new().unwrap();
    let config_dir = dir.path().join("seq2gif");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "width = 20\nheight = 5\nlast_frame_delay = 1000\n",
    )
    .unwrap();

    let assert = seq2gif(dir.path())
        .write_stdin(sample_session())
        .assert()
        .success();

    let animation = decode_gif(&assert.get_output().stdout);
    assert_eq!((animation.width, animation.height), (160, 80));
    assert_eq!(animation.delays.last(), Some(&100));
}

#[test]
fn command_line_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    let config_dir = dir.path().join("seq2gif");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "width = 20\n").unwrap();

    let assert = seq2gif(dir.path())
        .args(["-w", "4", "-h", "1"])
        .write_stdin(sample_session())
        .assert()
        .success();

    let animation = decode_gif(&assert.get_output().stdout);
    assert_eq!((animation.width, animation.height), (32, 16));
}

#[test]
fn verbose_logs_go_to_stderr() {
    let dir = TempDir::new().unwrap();
    let assert = seq2gif(dir.path())
        .arg("-v")
        .write_stdin(sample_session())
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote 3 frames"));

    assert!(assert.get_output().stdout.starts_with(b"GIF89a"));
}
