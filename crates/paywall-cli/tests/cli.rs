use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

fn project(theme: &str) -> TempDir {
    let root = tempfile::tempdir().unwrap();
    write(
        root.path(),
        "mkdocs.yml",
        &format!("site_name: Example\ntheme:\n  name: {theme}\nplugins:\n  - paywall\n"),
    );
    write(root.path(), "docs/index.md", "# Home\n\nFirst.\n\nSecond.\n");
    write(root.path(), "docs/guide.md", "# Guide\n\nRead me.\n");
    root
}

fn paywall(scratch: &Path) -> Command {
    let mut cmd = Command::cargo_bin("paywall").unwrap();
    cmd.env_remove("PAYWALL_CONFIG")
        .env("NO_COLOR", "1")
        .env("PAYWALL_SCRATCH_DIR", scratch);
    cmd
}

#[test]
fn help_lists_subcommands() {
    let scratch = tempfile::tempdir().unwrap();
    paywall(scratch.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn build_writes_both_variants() {
    let root = project("material");
    let scratch = tempfile::tempdir().unwrap();

    paywall(scratch.path())
        .current_dir(root.path())
        .args(["build", "-d", "public"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Built 4 pages"));

    let public = root.path().join("public");
    assert!(public.join("index.html").is_file());
    assert!(public.join("guide/index.html").is_file());
    let gated = fs::read_to_string(public.join("paywall/index.html")).unwrap();
    assert!(gated.contains("<p>First.</p>"));
    assert!(!gated.contains("Second."));
    assert!(gated.contains("https://dokknet.com/login"));
    assert_eq!(fs::read_dir(scratch.path()).unwrap().count(), 0);
}

#[test]
fn config_file_flag_and_env() {
    let root = project("material");
    let scratch = tempfile::tempdir().unwrap();
    let config = root.path().join("mkdocs.yml");

    paywall(scratch.path())
        .args(["build", "-f"])
        .arg(&config)
        .assert()
        .success();
    assert!(root.path().join("site/paywall/guide/index.html").is_file());

    paywall(scratch.path())
        .env("PAYWALL_CONFIG", &config)
        .args(["inspect", "-o", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("source: paywall/guide.md"));
}

#[test]
fn inspect_reports_gated_inventory_as_json() {
    let root = project("material");
    let scratch = tempfile::tempdir().unwrap();

    let output = paywall(scratch.path())
        .current_dir(root.path())
        .args(["inspect", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    let gated = rows
        .iter()
        .find(|row| row["source"] == "paywall/guide.md")
        .unwrap();
    assert_eq!(gated["url"], "guide/");
    assert_eq!(gated["destination"], "paywall/guide/index.html");
    assert_eq!(gated["gated"], true);
    assert_eq!(fs::read_dir(scratch.path()).unwrap().count(), 0);
    assert!(!root.path().join("site").exists());
}

#[test]
fn unsupported_theme_fails() {
    let root = project("readthedocs");
    let scratch = tempfile::tempdir().unwrap();

    paywall(scratch.path())
        .current_dir(root.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("readthedocs"))
        .stderr(predicate::str::contains("material"));
    assert!(!root.path().join("site").exists());
}

#[test]
fn missing_config_fails() {
    let root = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();

    paywall(scratch.path())
        .current_dir(root.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}
