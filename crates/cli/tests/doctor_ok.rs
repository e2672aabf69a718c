use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn doctor_reads_provided_config_path() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
vault_root = "/tmp/v"
site_root = "{{vault_root}}/../site"
posts_dirs = ["blog/notes"]
"#;
    write_file(&cfg, toml);

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("vaultpress"));
    cmd.args(["doctor", "--config", cfg.to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("OK   vaultpress doctor"))
        .stdout(predicate::str::contains("profile: default"))
        .stdout(predicate::str::contains("vault_root: /tmp/v"))
        .stdout(predicate::str::contains("posts_dir: /tmp/v/../site/content/blog/notes"));
}

#[test]
fn doctor_uses_xdg_default_when_present() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("vaultpress").join("config.toml");
    write_file(
        &cfg_path,
        r#"
version = 1
[profiles.default]
vault_root = "/tmp/v"
site_root = "/tmp/s"
"#,
    );

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("vaultpress"));
    cmd.env("XDG_CONFIG_HOME", tmp.path());
    cmd.arg("doctor");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("OK   vaultpress doctor"))
        .stdout(predicate::str::contains("site_root: /tmp/s"));
}

#[test]
fn doctor_selects_profile() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("config.toml");
    write_file(
        &cfg,
        r#"
version = 1
profile = "home"
[profiles.home]
vault_root = "/tmp/home-vault"
site_root = "/tmp/home-site"
[profiles.work]
vault_root = "/tmp/work-vault"
site_root = "/tmp/work-site"
"#,
    );

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("vaultpress"));
    cmd.args(["--config", cfg.to_str().unwrap(), "--profile", "work", "doctor"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("profile: work"))
        .stdout(predicate::str::contains("vault_root: /tmp/work-vault"));
}
