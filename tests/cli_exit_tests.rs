use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn deploy_config_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_deploy-config"))
}

/// Run the binary from an empty directory so no `.env` file is picked up.
fn run_bin(dir: &Path, database_url: Option<&str>, args: &[&str]) -> Output {
    let mut cmd = Command::new(deploy_config_bin());
    cmd.current_dir(dir)
        .env_remove("DATABASE_URL_EXTERNAL")
        .env_remove("RUST_LOG")
        .env_remove("DEPLOY_CONFIG_LOGLEVEL")
        .env_remove("DEPLOY_CONFIG_PRETTY")
        .args(args);
    if let Some(url) = database_url {
        cmd.env("DATABASE_URL_EXTERNAL", url);
    }
    cmd.output().expect("failed to run deploy-config")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn missing_credential_exits_with_failure_and_names_variable() {
    let dir = TempDir::new().expect("tempdir");
    let out_path = dir.path().join("migration.json");

    let output = run_bin(
        dir.path(),
        None,
        &["migration", "--out", out_path.to_str().expect("utf-8 path")],
    );

    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("DATABASE_URL_EXTERNAL"));
    assert!(output.stdout.is_empty());
    assert!(!out_path.exists());
}

#[test]
fn empty_credential_exits_like_missing() {
    let dir = TempDir::new().expect("tempdir");

    let output = run_bin(dir.path(), Some(""), &["migration"]);

    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("DATABASE_URL_EXTERNAL"));
}

#[test]
fn migration_with_credential_succeeds() {
    let dir = TempDir::new().expect("tempdir");

    let output = run_bin(
        dir.path(),
        Some("postgres://u:p@host:5432/db"),
        &["migration", "--compact"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout was not json");
    assert_eq!(value["dbCredentials"]["url"], "postgres://u:p@host:5432/db");
}

#[test]
fn check_image_exit_codes() {
    let dir = TempDir::new().expect("tempdir");

    let allowed = run_bin(
        dir.path(),
        None,
        &["check-image", "https://images.unsplash.com/photo-1"],
    );
    assert_eq!(allowed.status.code(), Some(0), "stderr: {}", stderr(&allowed));
    assert_eq!(String::from_utf8_lossy(&allowed.stdout), "allowed\n");

    let denied = run_bin(dir.path(), None, &["check-image", "https://example.com/x.png"]);
    assert_eq!(denied.status.code(), Some(1), "stderr: {}", stderr(&denied));
    assert_eq!(String::from_utf8_lossy(&denied.stdout), "denied\n");

    let invalid = run_bin(dir.path(), None, &["check-image", "not a url"]);
    assert_eq!(invalid.status.code(), Some(2), "stderr: {}", stderr(&invalid));
    assert!(stderr(&invalid).contains("URL parse error"));
}
