//! # Store Paths
//!
//! [`StorePath`] is the newtype for store-relative, forward-slash
//! separated paths. Using a dedicated type instead of bare strings keeps
//! path normalization in one place and prevents accidentally passing an
//! arbitrary string where a hierarchy location is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// A store-relative path, forward-slash separated.
///
/// # Invariants
///
/// - No backslashes.
/// - No empty segments (`a//b`) and no trailing slash.
/// - Leading slashes are stripped on construction: producers disagree on
///   whether dataset paths are anchored, and the hierarchy store resolves
///   both spellings to the same node.
/// - The empty path denotes the root of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StorePath(String);

impl StorePath {
    /// Create a path, normalizing leading slashes away.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidStorePath`] for backslashes, empty
    /// segments, or a trailing slash.
    pub fn new(path: impl Into<String>) -> Result<Self, SchemaError> {
        let raw = path.into();
        let invalid = |reason: &str| SchemaError::InvalidStorePath {
            got: raw.clone(),
            reason: reason.to_string(),
        };
        if raw.contains('\\') {
            return Err(invalid("paths are forward-slash separated"));
        }
        let trimmed = raw.trim_start_matches('/');
        if trimmed.ends_with('/') {
            return Err(invalid("trailing slash"));
        }
        if !trimmed.is_empty() && trimmed.split('/').any(str::is_empty) {
            return Err(invalid("empty path segment"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The root of the hierarchy.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Returns true for the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve `child` relative to this path.
    pub fn join(&self, child: &StorePath) -> StorePath {
        if self.is_root() {
            child.clone()
        } else if child.is_root() {
            self.clone()
        } else {
            StorePath(format!("{}/{}", self.0, child.0))
        }
    }
}

impl TryFrom<String> for StorePath {
    type Error = SchemaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<StorePath> for String {
    fn from(path: StorePath) -> Self {
        path.0
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_slashes_are_stripped() {
        assert_eq!(StorePath::new("/s0").unwrap().as_str(), "s0");
        assert_eq!(StorePath::new("//a/b").unwrap().as_str(), "a/b");
    }

    #[test]
    fn test_backslash_rejected() {
        assert!(matches!(
            StorePath::new("a\\b"),
            Err(SchemaError::InvalidStorePath { .. })
        ));
    }

    #[test]
    fn test_empty_segment_rejected() {
        assert!(StorePath::new("a//b").is_err());
        assert!(StorePath::new("a/").is_err());
    }

    #[test]
    fn test_join_from_root() {
        let root = StorePath::root();
        let child = StorePath::new("s0").unwrap();
        assert_eq!(root.join(&child).as_str(), "s0");
    }

    #[test]
    fn test_join_nested() {
        let base = StorePath::new("images/img0").unwrap();
        let child = StorePath::new("s1").unwrap();
        assert_eq!(base.join(&child).as_str(), "images/img0/s1");
    }

    #[test]
    fn test_decode_normalizes() {
        let path: StorePath = serde_json::from_value(serde_json::json!("/0")).unwrap();
        assert_eq!(path.as_str(), "0");
    }
}
