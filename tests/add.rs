use assert_fs::TempDir;
use gitlet::artifacts::objects::blob::Blob;
use gitlet::artifacts::objects::object::Object;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;
use common::command::{gitlet_commit, init_repository_dir, run_gitlet_command};
use common::file::{FileSpec, write_file};

#[rstest]
fn add_of_a_missing_file_is_reported(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_gitlet_command(dir.path(), &["add", "ghost.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("File does not exist."));

    Ok(())
}

#[rstest]
fn add_stores_the_blob_under_its_content_hash(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("a.txt"), "hello".to_string()));
    run_gitlet_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    let expected_oid = Blob::new("hello".to_string()).object_id()?;
    assert!(
        dir.path()
            .join(".gitlet")
            .join("blobs")
            .join(expected_oid.as_ref())
            .is_file()
    );

    run_gitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"));

    Ok(())
}

#[rstest]
fn add_of_content_matching_head_stages_nothing(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("a.txt"), "hello".to_string()));
    run_gitlet_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    gitlet_commit(dir.path(), "first").assert().success();

    // unchanged content: the second add must leave the staging area empty
    run_gitlet_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    gitlet_commit(dir.path(), "nothing to record")
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes added to the commit."));

    Ok(())
}

#[rstest]
fn add_undoes_a_pending_removal_when_content_matches_head(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("a.txt"), "hello".to_string()));
    run_gitlet_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    gitlet_commit(dir.path(), "first").assert().success();

    run_gitlet_command(dir.path(), &["rm", "a.txt"])
        .assert()
        .success();
    assert!(!dir.path().join("a.txt").exists());

    // restore the committed content, then re-add to cancel the removal
    run_gitlet_command(dir.path(), &["checkout", "--", "a.txt"])
        .assert()
        .success();
    run_gitlet_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    gitlet_commit(dir.path(), "nothing left staged")
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes added to the commit."));

    Ok(())
}

#[rstest]
fn checkout_then_add_of_the_unmodified_file_has_no_effect(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("a.txt"), "round trip".to_string()));
    run_gitlet_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    gitlet_commit(dir.path(), "first").assert().success();

    run_gitlet_command(dir.path(), &["checkout", "--", "a.txt"])
        .assert()
        .success();
    run_gitlet_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    run_gitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"=== Staged Files ===\n\n=== Removed Files ===",
        )?);

    Ok(())
}
