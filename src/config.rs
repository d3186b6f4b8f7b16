//! Configuration shared by group trees and converters.
//!
//! A [`TreeConfig`] fixes the path separator used to build fully qualified
//! names and the policy for unknown fields in inbound payloads. Trees and
//! converters built from the same config agree on both.

use crate::error::{GroupError, GroupResult};

/// Separator used for fully qualified names unless configured otherwise.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Configuration for group naming and inbound payload handling.
///
/// # Examples
///
/// ```rust
/// use mcp_groups::config::TreeConfig;
///
/// let config = TreeConfig::default()
///     .with_separator("/")
///     .with_allow_unknown_fields(false);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.separator, "/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeConfig {
    /// Separator joining group names into a fully qualified name.
    /// Group names may not contain it.
    pub separator: String,

    /// Whether inbound group objects may carry fields outside the schema.
    /// Unknown fields are ignored when allowed and rejected otherwise.
    pub allow_unknown_fields: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            allow_unknown_fields: true,
        }
    }
}

impl TreeConfig {
    /// Set the fully qualified name separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the unknown field policy for inbound payloads.
    pub fn with_allow_unknown_fields(mut self, allow: bool) -> Self {
        self.allow_unknown_fields = allow;
        self
    }

    /// Validate the configuration.
    ///
    /// The separator must be non-empty and free of whitespace so that names
    /// can be split back out of a fully qualified name.
    pub fn validate(&self) -> GroupResult<()> {
        if self.separator.is_empty() {
            return Err(GroupError::invalid_config("Separator cannot be empty"));
        }

        if self.separator.chars().any(char::is_whitespace) {
            return Err(GroupError::invalid_config(
                "Separator cannot contain whitespace",
            ));
        }

        Ok(())
    }
}
