#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

pub fn write(root: &Path, path: &str, content: &str) {
    let full = root.join(path);
    fs::create_dir_all(full.parent().expect("has parent")).expect("failed to create parent dir");
    fs::write(full, content).expect("failed to write file");
}

pub fn package_json(name: &str, deps: &[&str]) -> String {
    let deps = deps
        .iter()
        .map(|d| format!("\"{d}\": \"^1.0.0\""))
        .collect::<Vec<_>>()
        .join(", ");
    format!(r#"{{ "name": "{name}", "version": "1.0.0", "dependencies": {{ {deps} }} }}"#)
}

fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(output.status.success(), "git {args:?} failed: {output:?}");
}

pub fn commit_all(dir: &Path, message: &str) {
    git(dir, &["add", "-A"]);
    git(dir, &["commit", "--quiet", "-m", message]);
}

/// `app -> core -> utils` plus an unrelated `docs`, committed once.
pub fn create_workspace() -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    let root = dir.path();

    write(
        root,
        "monoship.toml",
        "scope = \"@acme/\"\npackages = [\"packages/*\"]\n",
    );
    write(root, "packages/utils/package.json", &package_json("@acme/utils", &[]));
    write(
        root,
        "packages/core/package.json",
        &package_json("@acme/core", &["@acme/utils"]),
    );
    write(
        root,
        "packages/app/package.json",
        &package_json("@acme/app", &["@acme/core"]),
    );
    write(root, "packages/docs/package.json", &package_json("@acme/docs", &[]));

    git(root, &["init", "--quiet"]);
    git(root, &["config", "user.email", "test@example.com"]);
    git(root, &["config", "user.name", "Test"]);
    git(root, &["config", "commit.gpgsign", "false"]);
    commit_all(root, "Initial workspace");

    dir
}

/// The workspace with a second commit touching only `utils`.
pub fn workspace_with_utils_change() -> TempDir {
    let dir = create_workspace();
    write(dir.path(), "packages/utils/index.js", "module.exports = 1;");
    commit_all(dir.path(), "Touch utils");
    dir
}
