//! memex-git - Git version control integration for memex
//!
//! A small shim that exposes repository initialization, staging,
//! committing, status, and log by delegating to libgit2. It ships as two
//! binaries sharing one core:
//!
//! - `memex-git`: a standalone CLI
//! - `memex-git-plugin`: a module loaded by a host over a subprocess
//!   protocol (`id`, `name`, `describe`, `run <verb> [args]`)
//!
//! # Architecture
//!
//! - [`cli`] - Standalone command-line front-end
//! - [`plugin`] - Host plugin protocol adapter
//! - [`module`] - Repository handle, command dispatch, module metadata
//! - [`git`] - Single interface for all Git operations
//! - [`core`] - Strong types, settings, path resolution
//! - [`ui`] - Rendering of command results
//! - [`logging`] - Diagnostic logging setup
//!
//! # Invariants
//!
//! 1. Only [`git`] imports `git2`
//! 2. Commands needing a repository fail with "not initialized" instead of
//!    panicking when none is open
//! 3. Front-end differences (commit identity, hash style) are settings, not
//!    separate code paths

pub mod cli;
pub mod core;
pub mod git;
pub mod logging;
pub mod module;
pub mod plugin;
pub mod ui;
