//! Conversion between the in-memory model and external representations.
//!
//! A [`Converter`] maps one internal type `T` to one external type `E` and
//! back. Each supported external schema gets its own small converter rather
//! than a shared hierarchy:
//!
//! - [`JsonConverter`] - the JSON listing payload (groups embed their parent,
//!   entities list their groups in `_meta`)
//! - [`FlatConverter`] - a flat row document (groups reference their parent by
//!   row id, memberships are separate edges)
//!
//! Both are stateless apart from their [`TreeConfig`](crate::config::TreeConfig).
//!
//! # Round trips
//!
//! For every tree `t` and converter `c`, `c.from_external(&c.to_external(&t))`
//! yields a tree structurally equal to `t`:
//!
//! ```rust
//! use mcp_groups::converter::{Converter, JsonConverter};
//! use mcp_groups::entity::Tool;
//! use mcp_groups::group::Group;
//! use mcp_groups::tree::GroupTree;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tree = GroupTree::new();
//! let com = tree.create_group(Group::new("com"), None)?;
//! let api = tree.create_group(Group::new("api").with_title("API"), Some(com))?;
//! tree.add_member(api, Tool::new("search"))?;
//!
//! let converter = JsonConverter::default();
//! let payload = converter.to_external(&tree);
//! let restored: GroupTree = converter.from_external(&payload)?;
//!
//! assert_eq!(restored, tree);
//! # Ok(())
//! # }
//! ```

pub mod flat;
pub mod json;
pub mod version;

pub use flat::FlatConverter;
pub use json::JsonConverter;
pub use version::ListingVersion;

use crate::error::{GroupResult, SchemaViolation, ViolationResult};
use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Bidirectional mapping between an internal value `T` and an external
/// representation `E`.
///
/// `to_external` is total for every structurally valid internal value.
/// `from_external` validates the payload and fails with
/// [`GroupError::SchemaViolation`](crate::error::GroupError::SchemaViolation)
/// for shape problems, or with the structural error of the tree operation
/// that rejected the decoded data (for example
/// [`GroupError::Cycle`](crate::error::GroupError::Cycle)).
pub trait Converter<T, E> {
    /// Convert an internal value to its external representation.
    fn to_external(&self, internal: &T) -> E;

    /// Rebuild an internal value from an external representation.
    fn from_external(&self, external: &E) -> GroupResult<T>;

    /// Convert several internal values, preserving order.
    fn to_external_all<'a, I>(&self, internals: I) -> Vec<E>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        internals
            .into_iter()
            .map(|internal| self.to_external(internal))
            .collect()
    }

    /// Rebuild several internal values, stopping at the first failure.
    fn from_external_all(&self, externals: &[E]) -> GroupResult<Vec<T>> {
        externals
            .iter()
            .map(|external| self.from_external(external))
            .collect()
    }
}

/// Serialize a record whose `Serialize` impl cannot fail.
///
/// All model types serialize to plain JSON objects with string keys, so an
/// error here would be a bug; it is logged and rendered as `null`.
pub(crate) fn to_value<S: Serialize>(record: &S) -> Value {
    match serde_json::to_value(record) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to serialize record: {}", e);
            Value::Null
        }
    }
}

/// Decode a shape-checked payload value, reporting failures at `path`.
pub(crate) fn decode<D: DeserializeOwned>(value: Value, path: &str) -> ViolationResult<D> {
    serde_json::from_value(value).map_err(|e| SchemaViolation::malformed(path, e))
}
