//! End-to-end tests for the snitch binary

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn snitch() -> Command {
    let mut cmd = Command::cargo_bin("snitch").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn init_git_repo(path: &Path) -> git2::Repository {
    let repo = git2::Repository::init(path).expect("Failed to init git repo");
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();
    repo
}

fn track(repo: &git2::Repository, rel: &str, content: &str) {
    let full = repo.workdir().unwrap().join(rel);
    std::fs::create_dir_all(full.parent().unwrap()).unwrap();
    std::fs::write(&full, content).unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(Path::new(rel)).unwrap();
    index.write().unwrap();
}

#[test]
fn test_no_arguments_prints_usage() {
    snitch()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_subcommand_fails() {
    snitch()
        .arg("frobnicate")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("frobnicate"));
}

#[test]
fn test_report_requires_repo_argument() {
    snitch().arg("report").assert().failure().code(2);
}

#[test]
fn test_list_prints_tracked_todos() {
    let dir = tempdir().unwrap();
    let repo = init_git_repo(dir.path());
    track(
        &repo,
        "src/lib.rs",
        "fn a() {}\n    // TODO: add tests\nfn b() {} // TODO(#42): refactor\n",
    );
    track(&repo, "README.md", "nothing to see\n");
    std::fs::write(dir.path().join("scratch.rs"), "// TODO: untracked\n").unwrap();

    snitch()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(
            "src/lib.rs:2:     // TODO: add tests\n\
             src/lib.rs:3: fn b() {} // TODO(#42): refactor\n",
        );
}

#[test]
fn test_list_with_directory_flag() {
    let dir = tempdir().unwrap();
    let repo = init_git_repo(dir.path());
    track(&repo, "a/one.py", "# TODO: in a\n");
    track(&repo, "b/two.py", "# TODO: in b\n");

    snitch()
        .current_dir(dir.path())
        .args(["-C", "b", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("b/two.py:1: # TODO: in b"))
        .stdout(predicate::str::contains("in a").not());
}

#[test]
fn test_report_without_credentials() {
    let dir = tempdir().unwrap();
    let repo = init_git_repo(dir.path());
    track(&repo, "lib.rs", "// TODO: add tests\n");

    snitch()
        .current_dir(dir.path())
        .args(["--credentials", "missing.toml", "report", "owner/repo"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("credentials"));

    assert_eq!(
        std::fs::read_to_string(dir.path().join("lib.rs")).unwrap(),
        "// TODO: add tests\n"
    );
}

#[test]
fn test_report_rejects_malformed_repo() {
    let dir = tempdir().unwrap();
    let repo = init_git_repo(dir.path());
    track(&repo, "lib.rs", "// TODO: add tests\n");
    let creds = dir.path().join("github.toml");
    std::fs::write(&creds, "personal_token = \"ghp_test\"\n").unwrap();

    snitch()
        .current_dir(dir.path())
        .arg("--credentials")
        .arg(&creds)
        .args(["report", "not-a-repo"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("owner>/<repo"));
}
