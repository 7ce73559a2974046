use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use gitlet::areas::repository::Repository;

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    about = "A tiny local version-control system",
    long_about = "Gitlet is a small local version-control system: a content-addressed \
    object store with a staging index, named branches and three-way merges. \
    It manages a single working directory and a single user.",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Initialize a new repository in the current directory")]
    Init,
    #[command(about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: String,
    },
    #[command(about = "Record the staged changes as a new commit")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(about = "Unstage a file or stage its removal")]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(about = "Show the current branch's history")]
    Log,
    #[command(about = "Show every commit ever made")]
    GlobalLog,
    #[command(about = "Print the ids of all commits with the given message")]
    Find {
        #[arg(index = 1, help = "The commit message to search for")]
        message: String,
    },
    #[command(about = "Show branches, staged changes and untracked files")]
    Status,
    #[command(
        about = "Restore files or switch branches",
        long_about = "Three forms: `checkout -- <file>` restores a file from the head \
        commit, `checkout <commit> -- <file>` restores it from the given commit \
        (hash prefixes allowed), and `checkout <branch>` switches branches."
    )]
    Checkout {
        #[arg(num_args = 0.., allow_hyphen_values = true, help = "Checkout operands")]
        args: Vec<String>,
    },
    #[command(about = "Create a new branch at the current head commit")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(about = "Delete a branch reference")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(about = "Move the current branch to an arbitrary commit")]
    Reset {
        #[arg(index = 1, help = "The commit id, full or abbreviated")]
        commit: String,
    },
    #[command(about = "Merge the given branch into the current one")]
    Merge {
        #[arg(index = 1, help = "The branch to merge in")]
        branch: String,
    },
    #[command(about = "Show line differences between snapshots and the working tree")]
    Diff {
        #[arg(index = 1, help = "First branch")]
        branch_one: Option<String>,
        #[arg(index = 2, help = "Second branch")]
        branch_two: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return report_usage_error(err),
    };

    let pwd = std::env::current_dir()?;
    let mut repository = Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

    if let Commands::Init = &cli.command {
        return repository.init().await;
    }

    if !repository.is_initialized() {
        println!("Not in an initialized Gitlet directory.");
        return Ok(());
    }

    match &cli.command {
        Commands::Init => unreachable!("handled above"),
        Commands::Add { file } => repository.add(file).await?,
        Commands::Commit { message } => repository.commit(message).await?,
        Commands::Rm { file } => repository.rm(file).await?,
        Commands::Log => repository.log().await?,
        Commands::GlobalLog => repository.global_log().await?,
        Commands::Find { message } => repository.find(message).await?,
        Commands::Status => repository.status().await?,
        Commands::Checkout { .. } => {
            // clap swallows the `--` marker that separates checkout's three
            // forms, so the operands are re-read from the raw arguments
            let operands = std::env::args().skip(2).collect::<Vec<_>>();
            checkout(&mut repository, &operands).await?;
        }
        Commands::Branch { name } => repository.branch(name).await?,
        Commands::RmBranch { name } => repository.rm_branch(name).await?,
        Commands::Reset { commit } => repository.reset(commit).await?,
        Commands::Merge { branch } => repository.merge(branch).await?,
        Commands::Diff {
            branch_one,
            branch_two,
        } => {
            repository
                .diff(branch_one.as_deref(), branch_two.as_deref())
                .await?
        }
    }

    Ok(())
}

/// Dispatch the three checkout forms, validating the `--` separator
async fn checkout(repository: &mut Repository, operands: &[String]) -> Result<()> {
    match operands {
        [branch] => repository.checkout_branch(branch).await,
        [separator, file] => {
            if separator != "--" {
                println!("Incorrect operands");
                return Ok(());
            }
            repository.checkout_file(file).await
        }
        [commit, separator, file] => {
            if separator != "--" {
                println!("Incorrect operands");
                return Ok(());
            }
            repository.checkout_commit_file(commit, file).await
        }
        _ => {
            println!("Incorrect operands");
            Ok(())
        }
    }
}

/// Map argument-parsing failures onto the fixed dispatcher messages
///
/// Every outcome terminates with status 0; only help/version requests keep
/// clap's own rendering.
fn report_usage_error(err: clap::Error) -> Result<()> {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        ErrorKind::InvalidSubcommand => {
            println!("No command with that name exists.");
            Ok(())
        }
        ErrorKind::MissingSubcommand | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            println!("Please enter a command");
            Ok(())
        }
        _ => {
            println!("Incorrect operands");
            Ok(())
        }
    }
}
