//! Porcelain commands (user-facing gitlet operations)
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository with its root commit
//! - `add`: Stage a file for the next commit
//! - `commit`: Record the staged changes as a new commit
//! - `rm`: Unstage a file or stage its removal
//! - `log`: Show the first-parent history (`log`, `global-log`, `find`)
//! - `status`: Show branches, staged changes and untracked files
//! - `checkout`: Restore files or switch branches (plus `reset`)
//! - `branch`: Create or delete branches
//! - `merge`: Three-way merge of another branch into the current one
//! - `diff`: Show line differences between snapshots and the working tree

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod diff;
pub mod init;
pub mod log;
pub mod merge;
pub mod rm;
pub mod status;
