//! Integration tests for command dispatch across both sessions.
//!
//! Each test stands up a real settings store in a temp directory and,
//! where an operation runs, a small shell script as the engine binary:
//! - capability gating between the setup and main sessions
//! - the full select → run → outcome loop against a live subprocess
//! - setup directory collection and finalization
#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use tempfile::TempDir;
use vlf_app::{
    App, AppCommand, AppError, AppResponse, Capability, EngineLocation, Mode, OperationOutcome,
    Settings, SettingsStore, SetupTarget, WorkflowPhase,
};

// =============================================================================
// Test Fixtures
// =============================================================================

const FORWARD_STATS: &str = r#"printf '{"success": true, "original_size": 1000, "compressed_size": 1000, "encoded_size": 400, "character_count": 1000, "compression_ratio": 2.5, "space_saved_percent": 60, "output_file": "a_compressed.txt"}'"#;

/// Writes an executable fake engine with the given body.
fn fake_engine(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("fake_engine.sh");
    let script = format!("#!/bin/sh\n{body}\n");
    std::fs::write(&path, script).expect("write fake engine");

    let mut perms = std::fs::metadata(&path).expect("stat").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("chmod fake engine");
    path
}

fn configured_store(dir: &TempDir) -> SettingsStore {
    let store = SettingsStore::new(dir.path().join("settings.json"));
    store
        .save(&Settings::new(dir.path().join("in"), dir.path().join("out")))
        .expect("save settings");
    store
}

fn app_with_engine(dir: &TempDir, body: &str) -> App {
    let engine = fake_engine(dir, body);
    App::builder()
        .with_store(configured_store(dir))
        .with_engine_location(EngineLocation::explicit(engine))
        .build()
}

fn outcome_of(response: AppResponse) -> OperationOutcome {
    match response {
        AppResponse::Outcome(outcome) => outcome,
        other => panic!("expected Outcome, got: {other:?}"),
    }
}

// =============================================================================
// First-Run Gating
// =============================================================================

#[tokio::test]
async fn first_run_gates_main_commands_until_setup_completes() {
    let dir = TempDir::new().expect("temp dir");
    let engine = fake_engine(&dir, FORWARD_STATS);
    let store = SettingsStore::new(dir.path().join("settings.json"));
    let mut app = App::builder()
        .with_store(store)
        .with_engine_location(EngineLocation::explicit(engine))
        .build();

    assert_eq!(app.granted(), Capability::SETUP_SESSION);

    // Every main-session command is refused while setup runs.
    let run = app.dispatch(AppCommand::Run { mode: Mode::Forward }).await;
    assert!(matches!(run, Err(AppError::PermissionDenied { .. })));
    let read = app.dispatch(AppCommand::ReadConfig).await;
    assert!(matches!(read, Err(AppError::PermissionDenied { .. })));

    // Completing setup flips the capability set and creates the dirs.
    let input = dir.path().join("docs/in");
    let output = dir.path().join("docs/out");
    app.dispatch(AppCommand::CompleteSetup {
        use_default: false,
        input_dir: Some(input.clone()),
        output_dir: Some(output.clone()),
    })
    .await
    .expect("complete setup");

    assert!(input.is_dir());
    assert!(output.is_dir());

    // The same command now fails for workflow reasons, not permissions.
    let run = app.dispatch(AppCommand::Run { mode: Mode::Forward }).await;
    assert!(matches!(run, Err(AppError::SessionNotReady { .. })));

    // Setup commands are refused in turn.
    let select = app
        .dispatch(AppCommand::SelectDirectory {
            target: SetupTarget::Input,
            path: None,
        })
        .await;
    assert!(matches!(select, Err(AppError::PermissionDenied { .. })));

    // And the full workflow runs against the rebuilt orchestrator.
    app.dispatch(AppCommand::SelectFile {
        mode: Mode::Forward,
        path: Some(input.join("report.txt")),
    })
    .await
    .expect("select file");
    let response = app
        .dispatch(AppCommand::Run { mode: Mode::Forward })
        .await
        .expect("run");
    assert!(outcome_of(response).is_success());
    assert_eq!(app.session(Mode::Forward).phase(), WorkflowPhase::Succeeded);
}

#[tokio::test]
async fn setup_collects_directories_through_dialogs() {
    let dir = TempDir::new().expect("temp dir");
    let store = SettingsStore::new(dir.path().join("settings.json"));
    let mut app = App::builder().with_store(store.clone()).build();

    app.dispatch(AppCommand::SelectDirectory {
        target: SetupTarget::Input,
        path: Some(dir.path().join("picked/in")),
    })
    .await
    .expect("select input dir");
    app.dispatch(AppCommand::SelectDirectory {
        target: SetupTarget::Output,
        path: Some(dir.path().join("picked/out")),
    })
    .await
    .expect("select output dir");

    // No directories in the payload: the collected ones are used.
    let response = app
        .dispatch(AppCommand::CompleteSetup {
            use_default: false,
            input_dir: None,
            output_dir: None,
        })
        .await
        .expect("complete setup");

    match response {
        AppResponse::Settings(settings) => {
            assert_eq!(settings.input_dir, dir.path().join("picked/in"));
            assert_eq!(settings.output_dir, dir.path().join("picked/out"));
        }
        other => panic!("expected Settings, got: {other:?}"),
    }
    assert!(dir.path().join("picked/in").is_dir());
    assert!(dir.path().join("picked/out").is_dir());
    assert!(!store.is_first_run());
}

// =============================================================================
// Operations
// =============================================================================

#[tokio::test]
async fn forward_run_returns_stats_and_records_success() {
    let dir = TempDir::new().expect("temp dir");
    let mut app = app_with_engine(&dir, FORWARD_STATS);

    app.dispatch(AppCommand::SelectFile {
        mode: Mode::Forward,
        path: Some("/tmp/report.txt".into()),
    })
    .await
    .expect("select file");

    let response = app
        .dispatch(AppCommand::Run { mode: Mode::Forward })
        .await
        .expect("run");

    let outcome = outcome_of(response);
    let stats = outcome.stats().expect("should succeed");
    assert_eq!(stats.ratio_display(), "2.5:1");
    assert_eq!(stats.saved_display().as_deref(), Some("60%"));

    let session = app.session(Mode::Forward);
    assert_eq!(session.phase(), WorkflowPhase::Succeeded);
    assert_eq!(session.last_result(), Some(&outcome));
}

#[tokio::test]
async fn engine_failure_is_recorded_and_retryable() {
    let dir = TempDir::new().expect("temp dir");
    let mut app = app_with_engine(&dir, "echo 'Input file not found' >&2\nexit 1");

    app.dispatch(AppCommand::SelectFile {
        mode: Mode::Forward,
        path: Some("/tmp/missing.txt".into()),
    })
    .await
    .expect("select file");

    let response = app
        .dispatch(AppCommand::Run { mode: Mode::Forward })
        .await
        .expect("dispatch itself succeeds");

    let outcome = outcome_of(response);
    let detail = outcome.failure().expect("should fail");
    assert_eq!(detail.message, "Input file not found");

    let session = app.session(Mode::Forward);
    assert_eq!(session.phase(), WorkflowPhase::Failed);
    assert!(session.can_start(), "a failed session may retry");
}

#[tokio::test]
async fn modes_run_isolated_sessions() {
    let dir = TempDir::new().expect("temp dir");
    let body = r#"printf '{"success": true, "output_file": "%s"}' "$1""#;
    let mut app = app_with_engine(&dir, body);

    app.dispatch(AppCommand::SelectFile {
        mode: Mode::Inverse,
        path: Some("/tmp/report_compressed.txt".into()),
    })
    .await
    .expect("select file");

    let response = app
        .dispatch(AppCommand::Run { mode: Mode::Inverse })
        .await
        .expect("run");
    let outcome = outcome_of(response);
    assert_eq!(outcome.stats().expect("success").output_file, "decompress");

    assert_eq!(app.session(Mode::Inverse).phase(), WorkflowPhase::Succeeded);
    assert_eq!(app.session(Mode::Forward).phase(), WorkflowPhase::Empty);
}

#[tokio::test]
async fn chosen_save_path_reaches_the_engine() {
    let dir = TempDir::new().expect("temp dir");
    let body = r#"printf '{"success": true, "output_file": "%s"}' "$3""#;
    let mut app = app_with_engine(&dir, body);
    let target = dir.path().join("elsewhere/target.txt");

    app.dispatch(AppCommand::SelectFile {
        mode: Mode::Forward,
        path: Some("/tmp/report.txt".into()),
    })
    .await
    .expect("select file");
    app.dispatch(AppCommand::SelectSavePath {
        mode: Mode::Forward,
        path: Some(target.clone()),
    })
    .await
    .expect("save dialog");

    let response = app
        .dispatch(AppCommand::Run { mode: Mode::Forward })
        .await
        .expect("run");
    assert_eq!(
        outcome_of(response).stats().expect("success").output_file,
        target.to_str().expect("utf8 path")
    );
}
