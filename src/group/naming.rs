//! Path resolution for fully qualified group names.
//!
//! A fully qualified name (FQN) is the separator-joined list of names from a
//! root group down to the group itself. These helpers are pure: they work on
//! name slices and strings and know nothing about trees.

use crate::error::{GroupError, GroupResult};

/// Check that `name` can be used as a group name under `separator`.
///
/// # Errors
///
/// Returns [`GroupError::InvalidName`] when the name is empty or contains
/// the separator.
///
/// # Examples
///
/// ```rust
/// use mcp_groups::group::naming::validate_name;
///
/// assert!(validate_name("api", ".").is_ok());
/// assert!(validate_name("", ".").is_err());
/// assert!(validate_name("com.example", ".").is_err());
/// assert!(validate_name("com.example", "/").is_ok());
/// ```
pub fn validate_name(name: &str, separator: &str) -> GroupResult<()> {
    if name.is_empty() {
        return Err(GroupError::invalid_name(name, "name cannot be empty"));
    }

    if name.contains(separator) {
        return Err(GroupError::invalid_name(
            name,
            format!("name cannot contain separator '{}'", separator),
        ));
    }

    Ok(())
}

/// Join names given in root-to-leaf order.
pub fn join<S: AsRef<str>>(names: &[S], separator: &str) -> String {
    let mut fqn = String::new();
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            fqn.push_str(separator);
        }
        fqn.push_str(name.as_ref());
    }
    fqn
}

/// Split a fully qualified name into its segments.
///
/// Returns `None` for an empty input or when any segment is empty, since
/// no valid group chain can produce such a name.
pub fn split<'a>(fqn: &'a str, separator: &str) -> Option<Vec<&'a str>> {
    if fqn.is_empty() {
        return None;
    }

    let segments: Vec<&str> = fqn.split(separator).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return None;
    }

    Some(segments)
}
