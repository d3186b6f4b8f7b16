//! Wire-level definitions of the groups extension.
//!
//! This module holds the extension identifier, the serialized shape of a
//! group ([`GroupDescriptor`]), the published JSON Schemas and the shape
//! checks applied to inbound payloads before they are decoded.
//!
//! # Key Types
//!
//! - [`GroupDescriptor`] - a group with its parent chain embedded
//! - [`ObjectSchema`] - field table used by the payload checks
//!
//! # Examples
//!
//! ```rust
//! use mcp_groups::schema::{GROUPS_META_KEY, validation::membership_names};
//! use serde_json::json;
//!
//! let tool = json!({"name": "search", "_meta": {GROUPS_META_KEY: ["com.example"]}});
//! assert_eq!(membership_names(&tool, "tools[0]").unwrap(), vec!["com.example"]);
//! ```

pub mod descriptor;
pub mod embedded;
pub mod types;
pub mod validation;

pub use descriptor::GroupDescriptor;
pub use types::{FieldDefinition, FieldType, ObjectSchema};

/// Identifier of the groups extension.
pub const EXTENSION_ID: &str = "org.openmcptools.extensions.groups";

/// `_meta` key under which an entity lists the groups it belongs to.
pub const GROUPS_META_KEY: &str = EXTENSION_ID;
