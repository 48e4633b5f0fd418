//! core::config::schema
//!
//! Configuration schema types.
//!
//! # File Format
//!
//! ```toml
//! [commit]
//! author_name = "Memex User"
//! author_email = "user@memex.local"
//! use_library_identity = false
//!
//! [log]
//! hash = "short"
//! ```
//!
//! # Validation
//!
//! Unknown keys are rejected at parse time. Identity fields are validated
//! after parsing.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Author name of the standalone CLI's fixed identity.
pub const MEMEX_USER_NAME: &str = "Memex User";

/// Author email of the standalone CLI's fixed identity.
pub const MEMEX_USER_EMAIL: &str = "user@memex.local";

/// How commit hashes are printed by `log`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashStyle {
    /// Full 40 (or 64) character hex.
    #[default]
    Full,
    /// Abbreviated to seven characters.
    Short,
}

/// Who new commits are attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitIdentity {
    /// A fixed author and committer.
    Fixed { name: String, email: String },
    /// Whatever `user.name` / `user.email` the repository's Git config yields.
    LibraryDefault,
}

impl CommitIdentity {
    /// The identity the standalone CLI commits as.
    pub fn memex_user() -> Self {
        CommitIdentity::Fixed {
            name: MEMEX_USER_NAME.to_string(),
            email: MEMEX_USER_EMAIL.to_string(),
        }
    }
}

/// Contents of a config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Commit identity overrides
    pub commit: Option<CommitConfig>,

    /// Log formatting overrides
    pub log: Option<LogConfig>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(commit) = &self.commit {
            commit.validate()?;
        }
        Ok(())
    }
}

/// `[commit]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CommitConfig {
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    /// Use the repository's Git identity instead of a fixed one.
    pub use_library_identity: Option<bool>,
}

impl CommitConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.use_library_identity == Some(true)
            && (self.author_name.is_some() || self.author_email.is_some())
        {
            return Err(ConfigError::InvalidValue(
                "use_library_identity cannot be combined with author_name/author_email"
                    .to_string(),
            ));
        }

        for (key, value) in [
            ("author_name", &self.author_name),
            ("author_email", &self.author_email),
        ] {
            if let Some(v) = value {
                if v.trim().is_empty() {
                    return Err(ConfigError::InvalidValue(format!("{} cannot be empty", key)));
                }
                if v.contains(['<', '>', '\n']) {
                    return Err(ConfigError::InvalidValue(format!(
                        "{} cannot contain '<', '>' or newlines",
                        key
                    )));
                }
            }
        }

        Ok(())
    }
}

/// `[log]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub hash: Option<HashStyle>,
}
