//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Rendering of command results and printing helpers
//!
//! # Design
//!
//! All human-readable text goes through this module. Diagnostics go through
//! `tracing` instead and never mix with command output.

pub mod output;
