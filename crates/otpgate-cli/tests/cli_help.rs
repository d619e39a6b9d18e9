use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("otpgate")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("signin"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("pending"));
}

#[test]
fn test_login_help_shows_steps() {
    cargo_bin_cmd!("otpgate")
        .args(["login", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--step"))
        .stdout(predicate::str::contains("credentials"))
        .stdout(predicate::str::contains("otp"));
}

#[test]
fn test_pending_help_shows_subcommands() {
    cargo_bin_cmd!("otpgate")
        .args(["pending", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("clear"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("otpgate")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}

#[test]
fn test_login_without_terminal_fails() {
    let dir = tempfile::tempdir().unwrap();

    // assert_cmd pipes stderr, so the TUI refuses to start.
    cargo_bin_cmd!("otpgate")
        .env("OTPGATE_HOME", dir.path())
        .env_remove("OTPGATE_BASE_URL")
        .arg("login")
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}
