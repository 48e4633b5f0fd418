//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. No other module imports
//! `git2`; everything above it works with the strong types re-exported here.
//! The actual object store, index format, and history walk are libgit2's.
//!
//! # Responsibilities
//!
//! - Repository creation and opening
//! - Working tree status
//! - Staging paths (including deletions)
//! - Creating commits with a chosen identity
//! - Walking history from HEAD
//!
//! # Example
//!
//! ```ignore
//! use memex_git::core::config::CommitIdentity;
//! use memex_git::git::Git;
//! use std::path::Path;
//!
//! let git = Git::init(Path::new("/tmp/notes"))?;
//! git.stage(Path::new("."))?;
//! let oid = git.commit("first", &CommitIdentity::memex_user())?;
//! assert_eq!(git.log()?[0].oid, oid);
//! ```

mod interface;

pub use interface::{CommitInfo, FileStatus, Git, GitError, StatusCode, StatusReport};
