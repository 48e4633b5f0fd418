//! core::config
//!
//! Behavioral settings and their loading.
//!
//! # Overview
//!
//! The standalone CLI and the plugin adapter share one core but differ in
//! two behaviors: who commits are attributed to, and how `log` prints
//! hashes. Both are [`Settings`] rather than per-variant code.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Front-end defaults ([`Settings::standalone`] or [`Settings::hosted`])
//! 2. Config file (`--config` or `$MEMEX_GIT_CONFIG`)
//! 3. CLI flags ([`Overrides`])
//!
//! # Example
//!
//! ```
//! use memex_git::core::config::{HashStyle, Overrides, Settings};
//!
//! let settings = Settings::standalone().with_overrides(&Overrides {
//!     hash: Some(HashStyle::Full),
//!     ..Default::default()
//! });
//! assert_eq!(settings.hash_style, HashStyle::Full);
//! ```

pub mod schema;

pub use schema::{
    CommitConfig, CommitIdentity, FileConfig, HashStyle, LogConfig, MEMEX_USER_EMAIL,
    MEMEX_USER_NAME,
};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming an optional config file.
pub const CONFIG_ENV: &str = "MEMEX_GIT_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Resolved behavioral settings for one module instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub identity: CommitIdentity,
    pub hash_style: HashStyle,
}

impl Settings {
    /// Defaults for the standalone CLI: fixed identity, short hashes.
    pub fn standalone() -> Self {
        Self {
            identity: CommitIdentity::memex_user(),
            hash_style: HashStyle::Short,
        }
    }

    /// Defaults when running under a host: Git's own identity, full hashes.
    pub fn hosted() -> Self {
        Self {
            identity: CommitIdentity::LibraryDefault,
            hash_style: HashStyle::Full,
        }
    }

    /// Apply a parsed config file on top of these settings.
    ///
    /// A partial fixed identity keeps the missing half from the current
    /// fixed identity, or from [`CommitIdentity::memex_user`] if the current
    /// identity is the library default.
    pub fn with_file(mut self, file: &FileConfig) -> Self {
        if let Some(commit) = &file.commit {
            if commit.use_library_identity == Some(true) {
                self.identity = CommitIdentity::LibraryDefault;
            } else {
                self.identity = merge_identity(
                    self.identity,
                    commit.author_name.as_deref(),
                    commit.author_email.as_deref(),
                );
            }
        }

        if let Some(hash) = file.log.as_ref().and_then(|l| l.hash) {
            self.hash_style = hash;
        }

        self
    }

    /// Apply command-line overrides on top of these settings.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        self.identity = merge_identity(
            self.identity,
            overrides.author_name.as_deref(),
            overrides.author_email.as_deref(),
        );
        if let Some(hash) = overrides.hash {
            self.hash_style = hash;
        }
        self
    }

    /// Resolve settings from defaults, an optional config file, and overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read, parsed, or
    /// validated. A missing `config_path` is not an error.
    pub fn resolve(
        defaults: Settings,
        config_path: Option<&Path>,
        overrides: &Overrides,
    ) -> Result<Self, ConfigError> {
        let mut settings = defaults;
        if let Some(path) = config_path {
            let file = load_file(path)?;
            settings = settings.with_file(&file);
        }
        Ok(settings.with_overrides(overrides))
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub hash: Option<HashStyle>,
}

fn merge_identity(
    current: CommitIdentity,
    name: Option<&str>,
    email: Option<&str>,
) -> CommitIdentity {
    if name.is_none() && email.is_none() {
        return current;
    }

    let (base_name, base_email) = match current {
        CommitIdentity::Fixed { name, email } => (name, email),
        CommitIdentity::LibraryDefault => {
            (MEMEX_USER_NAME.to_string(), MEMEX_USER_EMAIL.to_string())
        }
    };

    CommitIdentity::Fixed {
        name: name.map(str::to_string).unwrap_or(base_name),
        email: email.map(str::to_string).unwrap_or(base_email),
    }
}

/// Read, parse, and validate a config file.
///
/// # Errors
///
/// - [`ConfigError::ReadError`] if the file cannot be read
/// - [`ConfigError::ParseError`] if it is not valid TOML for [`FileConfig`]
/// - [`ConfigError::InvalidValue`] if validation fails
pub fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    debug!(path = %path.display(), "loading config file");

    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: FileConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn standalone_and_hosted_differ() {
        assert_eq!(Settings::standalone().hash_style, HashStyle::Short);
        assert_eq!(Settings::hosted().hash_style, HashStyle::Full);
        assert_eq!(Settings::hosted().identity, CommitIdentity::LibraryDefault);
        assert_eq!(Settings::standalone().identity, CommitIdentity::memex_user());
    }

    #[test]
    fn file_overrides_defaults() {
        let file = FileConfig {
            commit: None,
            log: Some(LogConfig {
                hash: Some(HashStyle::Full),
            }),
        };
        let settings = Settings::standalone().with_file(&file);
        assert_eq!(settings.hash_style, HashStyle::Full);
        assert_eq!(settings.identity, CommitIdentity::memex_user());
    }

    #[test]
    fn partial_identity_keeps_other_half() {
        let file = FileConfig {
            commit: Some(CommitConfig {
                author_email: Some("me@example.com".into()),
                ..Default::default()
            }),
            log: None,
        };
        let settings = Settings::standalone().with_file(&file);
        assert_eq!(
            settings.identity,
            CommitIdentity::Fixed {
                name: "Memex User".into(),
                email: "me@example.com".into(),
            }
        );
    }

    #[test]
    fn file_can_select_library_identity() {
        let file = FileConfig {
            commit: Some(CommitConfig {
                use_library_identity: Some(true),
                ..Default::default()
            }),
            log: None,
        };
        let settings = Settings::standalone().with_file(&file);
        assert_eq!(settings.identity, CommitIdentity::LibraryDefault);
    }

    #[test]
    fn overrides_beat_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("memex-git.toml");
        fs::write(
            &path,
            r#"
            [commit]
            author_name = "From File"

            [log]
            hash = "full"
            "#,
        )
        .unwrap();

        let overrides = Overrides {
            author_name: Some("From Flag".into()),
            hash: Some(HashStyle::Short),
            ..Default::default()
        };
        let settings = Settings::resolve(Settings::hosted(), Some(&path), &overrides).unwrap();

        assert_eq!(settings.hash_style, HashStyle::Short);
        assert_eq!(
            settings.identity,
            CommitIdentity::Fixed {
                name: "From Flag".into(),
                email: "user@memex.local".into(),
            }
        );
    }

    #[test]
    fn missing_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let result = load_file(&temp.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        fs::write(&path, "[log\nhash=").unwrap();
        let result = load_file(&path);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn no_config_path_is_defaults() {
        let settings =
            Settings::resolve(Settings::standalone(), None, &Overrides::default()).unwrap();
        assert_eq!(settings, Settings::standalone());
    }
}
