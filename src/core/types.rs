//! core::types
//!
//! Value types shared by the git interface and the renderers.
//!
//! [`Oid`] is the only one: a commit hash that has already been checked, so
//! renderers can abbreviate it without re-validating.
//!
//! ```
//! use memex_git::core::types::Oid;
//!
//! let oid = Oid::new("9fceb02d0ae598e95dc970b74767f19372d61af8").unwrap();
//! assert_eq!(oid.short(Oid::SHORT_LEN), "9fceb02");
//! assert!(Oid::new("HEAD").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected input for a value type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid object id: {0}")]
    InvalidOid(String),
}

/// Hex object id of a commit, stored lowercase.
///
/// Both SHA-1 (40 digits) and SHA-256 (64 digits) repositories are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Oid(String);

impl Oid {
    /// Length of the abbreviated form used in human-readable output.
    pub const SHORT_LEN: usize = 7;

    /// Check and lowercase a hex string.
    pub fn new(oid: impl Into<String>) -> Result<Self, TypeError> {
        let oid = oid.into().to_ascii_lowercase();
        Self::validate(&oid)?;
        Ok(Self(oid))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading `len` digits, or the whole id if it is shorter.
    pub fn short(&self, len: usize) -> &str {
        let end = len.min(self.0.len());
        &self.0[..end]
    }

    fn validate(oid: &str) -> Result<(), TypeError> {
        match oid.len() {
            40 | 64 => {}
            n => {
                return Err(TypeError::InvalidOid(format!(
                    "{} digits, want 40 or 64",
                    n
                )))
            }
        }
        match oid.chars().find(|c| !c.is_ascii_hexdigit()) {
            Some(c) => Err(TypeError::InvalidOid(format!("unexpected '{}' in {}", c, oid))),
            None => Ok(()),
        }
    }
}

impl TryFrom<String> for Oid {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Oid> for String {
    fn from(Oid(hex): Oid) -> Self {
        hex
    }
}

impl std::fmt::Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
