use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;
use common::command::{head_branch, head_commit_id, repository_dir, run_gitlet_command};

#[rstest]
fn init_creates_the_repository_layout(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_gitlet_command(dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let gitlet = dir.path().join(".gitlet");
    assert!(gitlet.is_dir());
    assert!(gitlet.join("commits").is_dir());
    assert!(gitlet.join("blobs").is_dir());
    assert!(gitlet.join("branches").is_dir());
    assert!(gitlet.join("HEAD").is_file());
    assert!(gitlet.join("index").is_file());

    assert_eq!(head_branch(dir.path())?, "master");
    assert_eq!(head_commit_id(dir.path())?.len(), 40);

    Ok(())
}

#[rstest]
fn init_log_shows_the_root_commit_at_the_epoch(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_gitlet_command(dir.path(), &["init"]).assert().success();

    run_gitlet_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?m)^===$")?)
        .stdout(predicate::str::is_match(r"(?m)^commit [0-9a-f]{40}$")?)
        .stdout(predicate::str::contains(
            "Date: Thu Jan 1 00:00:00 1970 +0000",
        ))
        .stdout(predicate::str::contains("initial commit"));

    Ok(())
}

#[rstest]
fn init_twice_reports_the_existing_repository(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_gitlet_command(dir.path(), &["init"]).assert().success();

    run_gitlet_command(dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "A Gitlet version-control system already exists in the current directory.",
        ));

    Ok(())
}

#[rstest]
fn commands_require_an_initialized_repository(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    for args in [
        vec!["log"],
        vec!["status"],
        vec!["add", "a.txt"],
        vec!["commit", "message"],
        vec!["merge", "other"],
    ] {
        run_gitlet_command(dir.path(), &args)
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Not in an initialized Gitlet directory.",
            ));
    }

    Ok(())
}

#[rstest]
fn unknown_commands_and_missing_commands_are_reported(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_gitlet_command(dir.path(), &["no-such-command"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No command with that name exists."));

    run_gitlet_command(dir.path(), &[])
        .assert()
        .success()
        .stdout(predicate::str::contains("Please enter a command"));

    run_gitlet_command(dir.path(), &["log", "surplus"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Incorrect operands"));

    Ok(())
}
