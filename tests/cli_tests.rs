//! CLI integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn exgate() -> Command {
    let mut cmd = cargo_bin_cmd!("exgate");
    cmd.env("RUST_LOG", "off");
    cmd
}

fn write_config(dir: &TempDir, extra: &str) -> PathBuf {
    let db = dir.path().join("catalog.db");
    let path = dir.path().join("config.toml");
    let contents = format!(
        "[catalog]\ndatabase_url = \"{}\"\n{extra}",
        db.display()
    );
    fs::write(&path, contents).expect("write temp config");
    path
}

fn with_config(path: &Path) -> Command {
    let mut cmd = exgate();
    cmd.arg("--config").arg(path);
    cmd
}

#[test]
fn help_lists_commands() {
    exgate()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("exgate"))
        .stdout(predicate::str::contains("connect"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("catalog"));
}

#[test]
fn version_prints_name() {
    exgate()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("exgate"));
}

#[test]
fn catalog_activate_then_provider() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "");

    with_config(&config)
        .args(["catalog", "add", "binance"])
        .assert()
        .success();
    with_config(&config)
        .args(["catalog", "activate", "kraken"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Activated kraken"));

    with_config(&config)
        .args(["catalog", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  binance"))
        .stdout(predicate::str::contains("* kraken"));

    with_config(&config)
        .arg("provider")
        .assert()
        .success()
        .stdout(predicate::str::contains("kraken"));
}

#[test]
fn provider_reports_empty_catalog() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "");

    with_config(&config)
        .arg("provider")
        .assert()
        .success()
        .stdout(predicate::str::contains("No active exchange provider"));
}

#[test]
fn check_without_credentials_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "");

    with_config(&config)
        .args(["check", "exgatetestvenue", "--json"])
        .env_remove("APP_EXGATETESTVENUE_API_KEY")
        .env_remove("APP_EXGATETESTVENUE_API_SECRET")
        .assert()
        .failure()
        .stdout(predicate::str::contains("not_configured"));
}

#[test]
fn invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "[manager]\ncircuit_threshold = 0\n");

    with_config(&config)
        .arg("provider")
        .assert()
        .failure()
        .stderr(predicate::str::contains("circuit_threshold"));
}
