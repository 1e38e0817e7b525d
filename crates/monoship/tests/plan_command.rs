mod common;

use predicates::str::contains;

use common::{commit_all, create_workspace, workspace_with_utils_change, write};

macro_rules! monoship {
    () => {
        assert_cmd::cargo::cargo_bin_cmd!("monoship")
    };
}

#[test]
fn plan_prints_batches_in_dependency_order() {
    let workspace = workspace_with_utils_change();

    monoship!()
        .arg("plan")
        .current_dir(workspace.path())
        .assert()
        .success()
        .stdout(contains("Changed packages: 1"))
        .stdout(contains("Affected packages: 3"))
        .stdout(contains("1. @acme/utils\n  2. @acme/core\n  3. @acme/app"));
}

#[test]
fn plan_with_path_flag_from_elsewhere() {
    let workspace = workspace_with_utils_change();
    let elsewhere = tempfile::TempDir::new().expect("failed to create temp dir");

    monoship!()
        .arg("-C")
        .arg(workspace.path().join("packages/core"))
        .arg("plan")
        .current_dir(elsewhere.path())
        .assert()
        .success()
        .stdout(contains("@acme/utils"));
}

#[test]
fn plan_for_unowned_file_has_nothing_to_release() {
    let workspace = create_workspace();
    write(workspace.path(), "README.md", "# acme");
    commit_all(workspace.path(), "Docs only");

    monoship!()
        .arg("plan")
        .current_dir(workspace.path())
        .assert()
        .success()
        .stdout(contains("Affected packages: 0"))
        .stdout(contains("Nothing to release."));
}

#[test]
fn plan_as_json() {
    let workspace = workspace_with_utils_change();

    let output = monoship!()
        .args(["plan", "--format", "json"])
        .current_dir(workspace.path())
        .output()
        .expect("failed to run monoship");

    assert!(output.status.success());
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(report["directly_changed"], serde_json::json!(["@acme/utils"]));
    assert_eq!(
        report["batches"],
        serde_json::json!([["@acme/utils"], ["@acme/core"], ["@acme/app"]])
    );
    assert_eq!(report["repos"][0]["summary"], "Touch utils");
    assert_eq!(report["repos"][0]["merge"], false);
    assert_eq!(report["graph"]["@acme/core"]["used_by"], serde_json::json!(["@acme/app"]));
}
