use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_pending_show_without_pending_login() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("otpgate")
        .env("OTPGATE_HOME", dir.path())
        .env_remove("OTPGATE_BASE_URL")
        .args(["pending", "show"])
        .assert()
        .success()
        .stdout(predicate::str::diff("(none)\n"));
}

#[test]
fn test_pending_show_prints_masked_identifier() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("pending_login.json"),
        r#"{"userEmail":"jdoe@example.com"}"#,
    )
    .unwrap();

    cargo_bin_cmd!("otpgate")
        .env("OTPGATE_HOME", dir.path())
        .env_remove("OTPGATE_BASE_URL")
        .args(["pending", "show"])
        .assert()
        .success()
        .stdout(predicate::str::diff("j*********@example.com\n"));
}

#[test]
fn test_pending_show_uses_configured_key() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[storage]\npending_login_key = \"loginEmail\"\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("pending_login.json"),
        r#"{"userEmail":"other@example.com","loginEmail":"a@b.com"}"#,
    )
    .unwrap();

    cargo_bin_cmd!("otpgate")
        .env("OTPGATE_HOME", dir.path())
        .env_remove("OTPGATE_BASE_URL")
        .args(["pending", "show"])
        .assert()
        .success()
        .stdout(predicate::str::diff("a*********@b.com\n"));
}

#[test]
fn test_pending_clear_removes_value() {
    let dir = tempdir().unwrap();
    let pending_path = dir.path().join("pending_login.json");
    fs::write(&pending_path, r#"{"userEmail":"jdoe@example.com"}"#).unwrap();

    cargo_bin_cmd!("otpgate")
        .env("OTPGATE_HOME", dir.path())
        .env_remove("OTPGATE_BASE_URL")
        .args(["pending", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared"));

    assert!(!pending_path.exists());

    cargo_bin_cmd!("otpgate")
        .env("OTPGATE_HOME", dir.path())
        .env_remove("OTPGATE_BASE_URL")
        .args(["pending", "show"])
        .assert()
        .success()
        .stdout(predicate::str::diff("(none)\n"));
}
