//! core
//!
//! Core domain types and configuration for memex-git.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Oid
//! - [`config`] - Behavioral settings and config file loading
//! - [`paths`] - Repository path resolution
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Nothing here touches Git; see [`crate::git`] for that

pub mod config;
pub mod paths;
pub mod types;
