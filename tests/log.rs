use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

mod common;
use common::command::{gitlet_commit, head_commit_id, init_repository_dir, run_gitlet_command};
use common::file::{FileSpec, write_file};

fn commit_file(dir: &std::path::Path, name: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(name), content.to_string()));
    run_gitlet_command(dir, &["add", name]).assert().success();
    gitlet_commit(dir, message).assert().success();
}

#[rstest]
fn log_prints_commit_blocks_newest_first(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    commit_file(dir.path(), "a.txt", "one", "first");
    commit_file(dir.path(), "a.txt", "two", "second");
    let tip = head_commit_id(dir.path())?;

    let output = run_gitlet_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"(?s)^===\ncommit [0-9a-f]{40}\nDate: .+\nsecond\n\n===.*initial commit\n\n$",
        )?)
        .get_output()
        .stdout
        .clone();

    let output = String::from_utf8(output)?;
    let second_pos = output.find("second").expect("second commit missing");
    let first_pos = output.find("first").expect("first commit missing");
    let root_pos = output.find("initial commit").expect("root commit missing");
    assert!(second_pos < first_pos && first_pos < root_pos);
    assert!(output.contains(&format!("commit {}", tip)));

    Ok(())
}

#[rstest]
fn log_follows_only_the_first_parent_chain(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    commit_file(dir.path(), "base.txt", "base", "base");

    run_gitlet_command(dir.path(), &["branch", "side"])
        .assert()
        .success();
    run_gitlet_command(dir.path(), &["checkout", "side"])
        .assert()
        .success();
    commit_file(dir.path(), "side.txt", "side", "side work");

    run_gitlet_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    commit_file(dir.path(), "main.txt", "main", "master work");

    run_gitlet_command(dir.path(), &["merge", "side"])
        .assert()
        .success();

    // the merged-in branch's own commit sits behind parent two, which log
    // does not traverse
    run_gitlet_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged side into master."))
        .stdout(predicate::str::contains("master work"))
        .stdout(predicate::str::contains("side work").not());

    Ok(())
}

#[rstest]
fn global_log_shows_commits_from_every_branch(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    commit_file(dir.path(), "base.txt", "base", "base");
    run_gitlet_command(dir.path(), &["branch", "side"])
        .assert()
        .success();
    run_gitlet_command(dir.path(), &["checkout", "side"])
        .assert()
        .success();
    commit_file(dir.path(), "side.txt", "side", "side work");

    run_gitlet_command(dir.path(), &["global-log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("initial commit"))
        .stdout(predicate::str::contains("base"))
        .stdout(predicate::str::contains("side work"));

    Ok(())
}

#[rstest]
fn find_prints_matching_commit_ids(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    commit_file(dir.path(), "a.txt", "one", "needle");
    let needle_commit = head_commit_id(dir.path())?;
    commit_file(dir.path(), "a.txt", "two", "haystack");

    run_gitlet_command(dir.path(), &["find", "needle"])
        .assert()
        .success()
        .stdout(predicate::str::contains(&needle_commit));

    run_gitlet_command(dir.path(), &["find", "no such message"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found no commit with that message."));

    Ok(())
}
