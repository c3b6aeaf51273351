//! End-to-end launcher behavior against real (harmless) programs.

#![cfg(unix)]

use sys_open::{open, OpenError, OpenOptions};

#[tokio::test]
async fn returns_a_running_process() {
    // `true` ignores the trailing target argument and exits cleanly.
    let mut child = OpenOptions::new().app("true").open("ignored").await.unwrap();
    assert!(child.id().is_some_and(|pid| pid != 0));
    child.wait().await.unwrap();
}

#[tokio::test]
async fn non_wait_returns_before_the_process_exits() {
    let mut child = OpenOptions::new().app("sleep").open("5").await.unwrap();
    assert!(child.id().is_some());
    child.kill().await.unwrap();
}

#[tokio::test]
async fn failures_go_unobserved_without_wait() {
    let mut child = OpenOptions::new()
        .app("false")
        .open("ignored")
        .await
        .unwrap();
    let status = child.wait().await.unwrap();
    assert_eq!(status.code(), Some(1));
}

#[tokio::test]
async fn wait_succeeds_on_a_clean_exit() {
    let mut child = OpenOptions::new()
        .wait(true)
        .app("true")
        .open("ignored")
        .await
        .unwrap();
    // The child is already reaped; the fused status is still readable.
    let status = child.wait().await.unwrap();
    assert_eq!(status.code(), Some(0));
}

#[tokio::test]
async fn wait_surfaces_positive_exit_codes() {
    let err = OpenOptions::new()
        .wait(true)
        .app("sh")
        .app_args(["-c", "exit 3"])
        .open("sh")
        .await
        .unwrap_err();
    assert!(matches!(err, OpenError::ExitCode(3)));
}

#[tokio::test]
async fn wait_surfaces_stderr_text_verbatim() {
    let err = OpenOptions::new()
        .wait(true)
        .app("sh")
        .app_args(["-c", "printf boom >&2"])
        .open("sh")
        .await
        .unwrap_err();
    match err {
        OpenError::Stderr(text) => assert_eq!(text, "boom"),
        other => panic!("expected stderr failure, got {other:?}"),
    }
}

#[tokio::test]
async fn stderr_takes_precedence_over_the_exit_code() {
    let err = OpenOptions::new()
        .wait(true)
        .app("sh")
        .app_args(["-c", "printf oops >&2; exit 7"])
        .open("sh")
        .await
        .unwrap_err();
    assert!(matches!(err, OpenError::Stderr(ref text) if text == "oops"));
}

#[tokio::test]
async fn missing_program_propagates_the_spawn_error() {
    let err = open_with_missing_program().await.unwrap_err();
    assert!(matches!(err, OpenError::Io(_)));
}

async fn open_with_missing_program() -> Result<tokio::process::Child, OpenError> {
    OpenOptions::new()
        .app("definitely-not-an-installed-opener")
        .open("ignored")
        .await
}

#[tokio::test]
async fn non_utf8_targets_are_rejected() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let err = open(OsStr::from_bytes(b"caf\xff")).await.unwrap_err();
    assert!(matches!(err, OpenError::InvalidTarget));
}
