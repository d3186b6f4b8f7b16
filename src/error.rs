//! Error types for group tree operations.
//!
//! Every failure in this crate is local and synchronous: it is raised at the
//! operation that would have broken an invariant, and the tree is left exactly
//! as it was before the call. None of these errors are retried internally.

/// Main error type for group tree and conversion operations.
///
/// This enum covers structural violations (invalid names, cycles, duplicate
/// sibling names), lookups of unknown groups or entities, configuration
/// mistakes, and inbound payload problems.
#[derive(Debug, thiserror::Error)]
pub enum GroupError {
    /// Group name is empty or contains the path separator
    #[error("Invalid group name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// A structural change would make a group its own ancestor
    #[error("Cycle detected: '{group}' cannot be placed under '{parent}'")]
    Cycle { group: String, parent: String },

    /// Two siblings (or two roots) would share the same name
    #[error("Duplicate group name '{name}' under {}", .parent.as_deref().unwrap_or("<root>"))]
    DuplicateName {
        parent: Option<String>,
        name: String,
    },

    /// The group id does not belong to this tree
    #[error("Group not found: {id}")]
    GroupNotFound { id: String },

    /// The entity identity is not catalogued in this tree
    #[error("Entity not found: {key}")]
    EntityNotFound { key: String },

    /// Tree or converter configuration is unusable
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Inbound external payload does not match the expected shape
    #[error("Schema violation: {0}")]
    SchemaViolation(#[from] SchemaViolation),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Payload errors raised while reading an external representation.
///
/// Each variant carries the JSON path of the offending value (for example
/// `groups[2].parent`) so callers can point at the exact location.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaViolation {
    /// Value at the path must be a JSON object
    #[error("'{path}' must be a JSON object, got {actual}")]
    NotAnObject { path: String, actual: String },

    /// Required field is missing or null
    #[error("'{path}' is missing required field '{field}'")]
    MissingRequiredField { path: String, field: String },

    /// Field has the wrong JSON type
    #[error("'{path}.{field}' has invalid type, expected {expected}, got {actual}")]
    InvalidFieldType {
        path: String,
        field: String,
        expected: String,
        actual: String,
    },

    /// Field is not part of the schema and unknown fields are not allowed
    #[error("'{path}' contains unknown field '{field}'")]
    UnknownField { path: String, field: String },

    /// A reference (parent row, group FQN, entity identity) does not resolve
    #[error("'{path}' references unknown {target} '{reference}'")]
    UnknownReference {
        path: String,
        target: String,
        reference: String,
    },

    /// Row identifiers in a flat document must be unique
    #[error("Duplicate row id '{id}' at '{path}'")]
    DuplicateRowId { path: String, id: String },

    /// Value passed shape checks but could not be decoded
    #[error("'{path}' is malformed: {message}")]
    Malformed { path: String, message: String },
}

// Convenience methods for creating common errors
impl GroupError {
    /// Create an invalid name error
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a cycle error
    pub fn cycle(group: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::Cycle {
            group: group.into(),
            parent: parent.into(),
        }
    }

    /// Create a group not found error
    pub fn group_not_found(id: impl ToString) -> Self {
        Self::GroupNotFound { id: id.to_string() }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether this error reports an inbound payload problem.
    pub fn is_schema_violation(&self) -> bool {
        matches!(self, Self::SchemaViolation(_) | Self::Json(_))
    }
}

impl SchemaViolation {
    /// Create a missing required field error
    pub fn missing_required(path: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            path: path.into(),
            field: field.into(),
        }
    }

    /// Create an invalid type error
    pub fn invalid_type(
        path: impl Into<String>,
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::InvalidFieldType {
            path: path.into(),
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an unknown reference error
    pub fn unknown_reference(
        path: impl Into<String>,
        target: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self::UnknownReference {
            path: path.into(),
            target: target.into(),
            reference: reference.into(),
        }
    }

    /// Create a malformed value error
    pub fn malformed(path: impl Into<String>, message: impl ToString) -> Self {
        Self::Malformed {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

// Result type aliases for convenience
pub type GroupResult<T> = Result<T, GroupError>;
pub type ViolationResult<T> = Result<T, SchemaViolation>;
