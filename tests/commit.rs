use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;
use common::command::{gitlet_commit, head_commit_id, init_repository_dir, run_gitlet_command};
use common::file::{FileSpec, write_file};

#[rstest]
fn empty_message_is_rejected(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("a.txt"), "hello".to_string()));
    run_gitlet_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    let before = head_commit_id(dir.path())?;

    gitlet_commit(dir.path(), "")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please enter a commit message."));

    assert_eq!(head_commit_id(dir.path())?, before);

    Ok(())
}

#[rstest]
fn empty_staging_area_is_rejected(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    gitlet_commit(dir.path(), "nothing staged")
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes added to the commit."));

    Ok(())
}

#[rstest]
fn commit_advances_the_branch_and_extends_the_log(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let root = head_commit_id(dir.path())?;

    write_file(FileSpec::new(dir.path().join("a.txt"), "hello".to_string()));
    run_gitlet_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    gitlet_commit(dir.path(), "first").assert().success();

    let tip = head_commit_id(dir.path())?;
    assert_ne!(tip, root);

    run_gitlet_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("commit {}", tip)))
        .stdout(predicate::str::contains(format!("commit {}", root)))
        .stdout(predicate::str::contains("first"))
        .stdout(predicate::str::contains("initial commit"));

    Ok(())
}

#[rstest]
fn commit_clears_the_staging_area(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("a.txt"), "hello".to_string()));
    run_gitlet_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    gitlet_commit(dir.path(), "first").assert().success();

    gitlet_commit(dir.path(), "again")
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes added to the commit."));

    Ok(())
}

#[rstest]
fn commit_applies_staged_removals(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("a.txt"), "hello".to_string()));
    write_file(FileSpec::new(dir.path().join("b.txt"), "there".to_string()));
    run_gitlet_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_gitlet_command(dir.path(), &["add", "b.txt"])
        .assert()
        .success();
    gitlet_commit(dir.path(), "both files").assert().success();

    run_gitlet_command(dir.path(), &["rm", "b.txt"])
        .assert()
        .success();
    gitlet_commit(dir.path(), "drop b").assert().success();

    // the new snapshot no longer records b.txt
    run_gitlet_command(dir.path(), &["checkout", "--", "b.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("File does not exist in that commit."));

    // a.txt is still reachable
    run_gitlet_command(dir.path(), &["checkout", "--", "a.txt"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    Ok(())
}
