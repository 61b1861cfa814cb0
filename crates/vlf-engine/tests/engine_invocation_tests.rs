//! Integration tests for the engine invocation contract.
//!
//! Each test stands up a small shell script as the engine binary and
//! drives a real subprocess through the orchestrator:
//! - argument and environment contract
//! - exit status and stderr mapping
//! - stdout JSON parsing, including engine-reported failures
//! - timeout handling
#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;
use vlf_engine::{EngineEnv, EngineLocation, Orchestrator};
use vlf_types::{ErrorCode, Mode};

// =============================================================================
// Test Fixtures
// =============================================================================

/// Writes an executable fake engine with the given body.
fn fake_engine(dir: &TempDir, body: &str) -> PathBuf {
    fake_engine_named(dir, "fake_engine.sh", body)
}

fn fake_engine_named(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    let script = format!("#!/bin/sh\n{body}\n");
    std::fs::write(&path, script).expect("write fake engine");

    let mut perms = std::fs::metadata(&path).expect("stat").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("chmod fake engine");
    path
}

fn orchestrator_for(binary: PathBuf) -> Orchestrator {
    Orchestrator::new(
        EngineLocation::explicit(binary),
        EngineEnv::new("/u/in", "/u/out"),
    )
}

// =============================================================================
// Success Path
// =============================================================================

#[tokio::test]
async fn success_payload_round_trips_stats() {
    let dir = TempDir::new().expect("temp dir");
    let body = r#"printf '{"success": true, "original_size": 1000, "compressed_size": 1000, "encoded_size": 400, "compression_ratio": 2.5, "space_saved_percent": 60, "character_count": 1000, "output_file": "/u/out/a_compressed.txt"}'"#;
    let engine = fake_engine(&dir, body);

    let outcome = orchestrator_for(engine)
        .invoke(
            Mode::Forward,
            Path::new("/tmp/a.txt"),
            Path::new("/u/out/a_compressed.txt"),
        )
        .await;

    let stats = outcome.stats().expect("should succeed");
    assert_eq!(stats.original_size, Some(1000));
    assert_eq!(stats.encoded_size, 400);
    assert_eq!(stats.ratio_display(), "2.5:1");
    assert_eq!(stats.saved_display().as_deref(), Some("60%"));
    assert_eq!(stats.output_file, "/u/out/a_compressed.txt");
}

#[tokio::test]
async fn pretty_printed_payload_parses() {
    let dir = TempDir::new().expect("temp dir");
    let body = r#"cat <<'EOF'
{
  "success": true,
  "compressed_size": 10,
  "encoded_size": 16,
  "compression_ratio": 1.0,
  "character_count": 16,
  "output_file": "x_compressed.txt"
}
EOF"#;
    let engine = fake_engine(&dir, body);

    let outcome = orchestrator_for(engine)
        .invoke(Mode::Forward, Path::new("a.txt"), Path::new("b.txt"))
        .await;

    let stats = outcome.stats().expect("should succeed");
    assert_eq!(stats.encoded_size, 16);
}

#[tokio::test]
async fn arguments_follow_the_contract() {
    let dir = TempDir::new().expect("temp dir");
    let body = r#"printf '{"success": true, "output_file": "%s %s %s %s"}' "$1" "$2" "$3" "$4""#;
    let engine = fake_engine(&dir, body);

    let outcome = orchestrator_for(engine)
        .invoke(
            Mode::Forward,
            Path::new("/tmp/in.txt"),
            Path::new("/tmp/out.txt"),
        )
        .await;

    let stats = outcome.stats().expect("should succeed");
    assert_eq!(stats.output_file, "compress /tmp/in.txt /tmp/out.txt --json");
}

#[tokio::test]
async fn inverse_mode_sends_decompress() {
    let dir = TempDir::new().expect("temp dir");
    let body = r#"printf '{"success": true, "output_file": "%s"}' "$1""#;
    let engine = fake_engine(&dir, body);

    let outcome = orchestrator_for(engine)
        .invoke(Mode::Inverse, Path::new("a.txt"), Path::new("b.txt"))
        .await;

    let stats = outcome.stats().expect("should succeed");
    assert_eq!(stats.output_file, "decompress");
}

#[tokio::test]
async fn environment_carries_configured_dirs() {
    let dir = TempDir::new().expect("temp dir");
    let body =
        r#"printf '{"success": true, "output_file": "%s|%s"}' "$VLF_INPUT_DIR" "$VLF_OUTPUT_DIR""#;
    let engine = fake_engine(&dir, body);

    let outcome = orchestrator_for(engine)
        .invoke(Mode::Forward, Path::new("a.txt"), Path::new("b.txt"))
        .await;

    let stats = outcome.stats().expect("should succeed");
    assert_eq!(stats.output_file, "/u/in|/u/out");
}

// =============================================================================
// Failure Mapping
// =============================================================================

#[tokio::test]
async fn nonzero_exit_surfaces_stderr() {
    let dir = TempDir::new().expect("temp dir");
    let body = "echo 'Invalid Base32 encoding: bad symbol' >&2\nexit 1";
    let engine = fake_engine(&dir, body);

    let outcome = orchestrator_for(engine)
        .invoke(Mode::Inverse, Path::new("a.txt"), Path::new("b.txt"))
        .await;

    let detail = outcome.failure().expect("should fail");
    assert_eq!(detail.code, "ENGINE_EXIT_FAILURE");
    assert_eq!(detail.message, "Invalid Base32 encoding: bad symbol");
}

#[tokio::test]
async fn nonzero_exit_empty_stderr_is_generic() {
    let dir = TempDir::new().expect("temp dir");
    let engine = fake_engine(&dir, "exit 3");

    let outcome = orchestrator_for(engine)
        .invoke(Mode::Forward, Path::new("a.txt"), Path::new("b.txt"))
        .await;

    let detail = outcome.failure().expect("should fail");
    assert_eq!(detail.message, "engine exited with status 3");
}

#[tokio::test]
async fn every_failing_exit_code_yields_a_diagnostic() {
    let dir = TempDir::new().expect("temp dir");

    for code in [1, 2, 42] {
        let engine = fake_engine_named(&dir, &format!("exit_{code}.sh"), &format!("exit {code}"));
        let outcome = orchestrator_for(engine)
            .invoke(Mode::Forward, Path::new("a.txt"), Path::new("b.txt"))
            .await;

        let detail = outcome.failure().expect("should fail");
        assert!(
            !detail.message.is_empty(),
            "exit {code} must carry a diagnostic"
        );
    }
}

#[tokio::test]
async fn clean_exit_with_garbage_is_protocol_failure() {
    let dir = TempDir::new().expect("temp dir");
    let engine = fake_engine(&dir, "printf 'not json at all'");

    let orchestrator = orchestrator_for(engine);
    let err = orchestrator
        .try_invoke(Mode::Forward, Path::new("a.txt"), Path::new("b.txt"))
        .await
        .expect_err("should fail");

    assert!(err.is_protocol_failure());
    assert_eq!(err.code(), "ENGINE_MALFORMED_OUTPUT");
    assert_eq!(err.to_string(), "malformed engine output");
}

#[tokio::test]
async fn reported_failure_uses_payload_error() {
    let dir = TempDir::new().expect("temp dir");
    let body = r#"printf '{"success": false, "error": "Input file not found: /tmp/a.txt"}'"#;
    let engine = fake_engine(&dir, body);

    let orchestrator = orchestrator_for(engine);
    let err = orchestrator
        .try_invoke(Mode::Forward, Path::new("a.txt"), Path::new("b.txt"))
        .await
        .expect_err("should fail");

    assert!(err.is_engine_failure());
    assert_eq!(err.to_string(), "Input file not found: /tmp/a.txt");
}

#[tokio::test]
async fn unspawnable_binary_is_a_launch_failure() {
    let dir = TempDir::new().expect("temp dir");
    // Present but not executable: passes the existence check, fails spawn.
    let path = dir.path().join("not_executable");
    std::fs::write(&path, "just text").expect("write file");

    let orchestrator = orchestrator_for(path.clone());
    let err = orchestrator
        .try_invoke(Mode::Forward, Path::new("a.txt"), Path::new("b.txt"))
        .await
        .expect_err("should fail");

    assert!(err.is_launch_failure());
    assert!(err.to_string().contains(path.to_str().expect("utf8 path")));
}

// =============================================================================
// Timeout
// =============================================================================

#[tokio::test]
async fn timeout_kills_hung_engine() {
    let dir = TempDir::new().expect("temp dir");
    let engine = fake_engine(&dir, "sleep 30");

    let orchestrator = Orchestrator::new(
        EngineLocation::explicit(engine),
        EngineEnv::new("/u/in", "/u/out"),
    )
    .with_timeout(Duration::from_millis(100));

    let started = std::time::Instant::now();
    let outcome = orchestrator
        .invoke(Mode::Forward, Path::new("a.txt"), Path::new("b.txt"))
        .await;

    let detail = outcome.failure().expect("should fail");
    assert_eq!(detail.code, "ENGINE_TIMEOUT");
    assert!(
        started.elapsed() < Duration::from_secs(10),
        "timeout must not wait for the hung engine"
    );
}
