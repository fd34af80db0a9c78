// tests/integration_test.rs
use std::process::Command;

fn git_release() -> Command {
    Command::new(env!("CARGO_BIN_EXE_git-release"))
}

#[test]
fn test_git_release_help() {
    let output = git_release()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("git-release"));
    assert!(stdout.contains("Draft a GitHub release"));
}

#[test]
fn test_git_release_version() {
    let output = git_release()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_flag_is_rejected() {
    let output = git_release()
        .arg("--dry-run")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_outside_repository_fails_before_network() {
    let dir = tempfile::tempdir().unwrap();
    let output = git_release()
        .current_dir(dir.path())
        .env("GITHUB_TOKEN", "unused")
        .env_remove("GIT_DIR")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("not a git repo"));
}
