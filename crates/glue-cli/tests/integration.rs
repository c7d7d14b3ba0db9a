//! Integration tests for the gluemeister binary

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Command with its config file isolated inside `dir`
fn gluemeister_cmd(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("gluemeister");
    cmd.env("GLUEMEISTER_CONFIG", dir.join("gluemeister.toml"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_version() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    gluemeister_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gluemeister"));
    Ok(())
}

#[test]
fn test_help() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    gluemeister_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("resolve"));
    Ok(())
}

#[test]
fn test_invalid_command() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    gluemeister_cmd(dir.path()).arg("invalid").assert().failure();
    Ok(())
}

#[test]
fn test_resolve_prints_json() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let output = gluemeister_cmd(dir.path())
        .arg("resolve")
        .arg("--symbols")
        .arg(fixture("host.json"))
        .arg(fixture("valid.json"))
        .output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["modules"][0]["factory_name"], "WiringFactory");
    assert_eq!(
        json["modules"][0]["unimplemented_members"][0]["qualified_name"],
        "com.example.Wiring::settings"
    );
    assert_eq!(json["glueables"][0]["key"], "defaultName");
    assert_eq!(json["glueables"][1]["kind"], "STATIC_METHOD");
    assert!(!String::from_utf8_lossy(&output.stderr).contains("note:"));
    Ok(())
}

#[test]
fn test_resolve_reports_notices_on_stderr() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    gluemeister_cmd(dir.path())
        .arg("resolve")
        .arg("--symbols")
        .arg(fixture("host.json"))
        .arg(fixture("stale.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"key\": \"settings\""))
        .stdout(predicate::str::contains("counter").not())
        .stderr(predicate::str::contains("has to be final"))
        .stderr(predicate::str::contains("com.example.Removed"));
    Ok(())
}

#[test]
fn test_resolve_fail_on_notice() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    gluemeister_cmd(dir.path())
        .arg("resolve")
        .arg("--fail-on-notice")
        .arg("--symbols")
        .arg(fixture("host.json"))
        .arg(fixture("stale.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 manifest entries could not be resolved"));
    Ok(())
}

#[test]
fn test_resolve_merges_manifests_into_output_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let out = dir.path().join("resolved.json");
    gluemeister_cmd(dir.path())
        .arg("resolve")
        .arg("--symbols")
        .arg(fixture("host.json"))
        .arg("--output")
        .arg(&out)
        .arg(fixture("valid.json"))
        .arg(fixture("stale.json"))
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out)?)?;
    let keys: Vec<_> = json["glueables"]
        .as_array()
        .map(|items| items.iter().filter_map(|g| g["key"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(keys, vec!["defaultName", "defaults", "settings"]);
    Ok(())
}

#[test]
fn test_missing_manifest_is_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    gluemeister_cmd(dir.path())
        .arg("resolve")
        .arg("--symbols")
        .arg(fixture("host.json"))
        .arg(dir.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Something seems to be wrong with your project setup"));
    Ok(())
}

#[test]
fn test_unknown_kind_is_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let manifest = dir.path().join("gluemeister.json");
    fs::write(
        &manifest,
        r#"{ "glueables": [ { "kind": "CONSTRUCTOR", "identifier": "com.example.Settings", "key": "k" } ] }"#,
    )?;
    gluemeister_cmd(dir.path())
        .arg("resolve")
        .arg("--symbols")
        .arg(fixture("host.json"))
        .arg(&manifest)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn test_resolve_without_symbols_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    gluemeister_cmd(dir.path())
        .arg("resolve")
        .arg(fixture("valid.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No symbol universe given"));
    Ok(())
}

#[test]
fn test_resolve_uses_configured_location() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let package_dir = dir.path().join("assets").join("com").join("example");
    fs::create_dir_all(&package_dir)?;
    fs::copy(fixture("valid.json"), package_dir.join("glue.json"))?;
    fs::write(
        dir.path().join("gluemeister.toml"),
        format!(
            "manifest_root = {:?}\nmanifest_package = \"com.example\"\nmanifest_file = \"glue.json\"\nsymbols_path = {:?}\n",
            dir.path().join("assets").display().to_string(),
            fixture("host.json").display().to_string(),
        ),
    )?;

    gluemeister_cmd(dir.path())
        .arg("resolve")
        .assert()
        .success()
        .stdout(predicate::str::contains("com.example.Settings#DEFAULT_NAME"));
    Ok(())
}

#[test]
fn test_config_show() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    gluemeister_cmd(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration:"));
    Ok(())
}

#[test]
fn test_config_path_honors_env() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    gluemeister_cmd(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gluemeister.toml"));
    Ok(())
}

#[test]
fn test_config_set_then_get() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    gluemeister_cmd(dir.path())
        .args(["config", "set", "manifest-package", "com.example.glue"])
        .assert()
        .success();

    gluemeister_cmd(dir.path())
        .args(["config", "get", "manifest-package"])
        .assert()
        .success()
        .stdout(predicate::str::contains("com.example.glue"));

    let saved = fs::read_to_string(dir.path().join("gluemeister.toml"))?;
    assert!(saved.contains("manifest_package = \"com.example.glue\""));
    Ok(())
}

#[test]
fn test_config_rejects_unknown_key() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    gluemeister_cmd(dir.path())
        .args(["config", "set", "cache-path", "/tmp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
    Ok(())
}
