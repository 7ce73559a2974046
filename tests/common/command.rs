use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

pub fn run_gitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find gitlet binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn gitlet_commit(dir: &Path, message: &str) -> Command {
    run_gitlet_command(dir, &["commit", message])
}

/// Read the active branch name from the HEAD file
pub fn head_branch(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let head = std::fs::read_to_string(dir.join(".gitlet").join("HEAD"))?;
    Ok(head.trim().to_string())
}

/// Read the tip commit id of a branch from its ref file
pub fn branch_tip(dir: &Path, branch: &str) -> Result<String, Box<dyn std::error::Error>> {
    let tip = std::fs::read_to_string(dir.join(".gitlet").join("branches").join(branch))?;
    Ok(tip.trim().to_string())
}

/// Read the commit id the active branch points at
pub fn head_commit_id(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    branch_tip(dir, &head_branch(dir)?)
}
