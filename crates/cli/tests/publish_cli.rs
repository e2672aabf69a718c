use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{TempDir, tempdir};

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

struct Fixture {
    dir: TempDir,
    config: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_file(
            &root.join("vault/Graphs.md"),
            "---\ntitle: Graphs\npublished: true\nhugo_section: blog/notes\n---\nSee [[BFS]].\n\n![[grid.png]]\n",
        );
        write_file(
            &root.join("vault/algo/BFS.md"),
            "---\ntitle: BFS\npublished: true\nhugo_section: blog/notes\n---\nUses a queue.\n",
        );
        write_file(&root.join("vault/img/grid.png"), "png");
        write_file(&root.join("vault/Private.md"), "diary");
        fs::create_dir_all(root.join("site/content")).unwrap();

        let config = root.join("config.toml");
        write_file(
            &config,
            &format!(
                "version = 1\n[profiles.default]\nvault_root = \"{}/vault\"\nsite_root = \"{}/site\"\nposts_dirs = [\"blog/notes\"]\n",
                root.display(),
                root.display()
            ),
        );
        Self { dir, config }
    }

    fn cmd(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("vaultpress"));
        cmd.arg("--config").arg(&self.config).args(args);
        cmd
    }

    fn site(&self) -> PathBuf {
        self.dir.path().join("site")
    }
}

#[test]
fn reach_lists_notes_and_assets() {
    let fx = Fixture::new();
    fx.cmd(&["reach"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Notes (2):"))
        .stdout(predicate::str::contains("  BFS"))
        .stdout(predicate::str::contains("  grid.png"))
        .stdout(predicate::str::contains("Private").not());
}

#[test]
fn reach_json_is_parseable() {
    let fx = Fixture::new();
    let assert = fx.cmd(&["reach", "--json"]).assert().success();
    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["notes"], serde_json::json!(["BFS", "Graphs"]));
    assert_eq!(json["assets"], serde_json::json!(["grid.png"]));
}

#[test]
fn publish_writes_site() {
    let fx = Fixture::new();
    fx.cmd(&["publish"]).assert().success().stdout(predicate::str::contains("Wrote (2):"));

    let graphs = fs::read_to_string(fx.site().join("content/blog/notes/graphs.md")).unwrap();
    assert!(graphs.contains("[BFS]({{< relref \"bfs.md\" >}})"));
    assert!(graphs.contains("![grid.png](/images/obsidian/grid.png)"));
    assert!(fx.site().join("content/blog/notes/bfs.md").is_file());
    assert!(fx.site().join("static/images/obsidian/grid.png").is_file());
}

#[test]
fn dry_run_writes_nothing() {
    let fx = Fixture::new();
    let assert = fx.cmd(&["publish", "--dry-run", "--json"]).assert().success();
    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(json["dry_run"], serde_json::json!(true));
    assert_eq!(json["written"].as_array().map(Vec::len), Some(2));
    assert!(!fx.site().join("content/blog").exists());
    assert!(!fx.site().join("static").exists());
}

#[test]
fn broken_link_fails_with_context() {
    let fx = Fixture::new();
    write_file(
        &fx.dir.path().join("vault/algo/BFS.md"),
        "---\ntitle: BFS\npublished: true\nhugo_section: blog/notes\n---\n[[DFS]]\n",
    );
    fx.cmd(&["publish"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[[DFS]]"))
        .stderr(predicate::str::contains("BFS"));
    assert!(!fx.site().join("content/blog/notes").exists());
}
