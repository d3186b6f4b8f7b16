//! Hierarchical groups for MCP tools, prompts and resources.
//!
//! Organizes the capabilities a Model Context Protocol server exposes into
//! named groups, nested like folders, so clients can browse a namespace
//! instead of a flat list. The crate is the data model and its conversion
//! contract only; hosting, transport and persistence belong to the caller.
//!
//! # Core Components
//!
//! - [`GroupTree`] - registry of groups, their hierarchy and their members
//! - [`Group`] - descriptive record of one group
//! - [`Tool`], [`Prompt`], [`Resource`] - entity records that can be members
//! - [`Converter`] - mapping between the tree and an external representation,
//!   implemented by [`JsonConverter`] and [`FlatConverter`]
//!
//! # Quick Start
//!
//! ```rust
//! use mcp_groups::{Converter, Group, GroupTree, JsonConverter, Tool};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tree = GroupTree::new();
//! let com = tree.create_group(Group::new("com"), None)?;
//! let example = tree.create_group(Group::new("example"), Some(com))?;
//! let api = tree.create_group(Group::new("api"), Some(example))?;
//! tree.add_member(api, Tool::new("search"))?;
//!
//! assert_eq!(tree.fully_qualified_name(api)?, "com.example.api");
//!
//! let listing: serde_json::Value = JsonConverter::default().to_external(&tree);
//! assert_eq!(listing["groups"].as_array().map(Vec::len), Some(3));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod converter;
pub mod entity;
pub mod error;
pub mod group;
pub mod schema;
pub mod tree;

// Re-export commonly used types for convenience
pub use config::TreeConfig;
pub use converter::{Converter, FlatConverter, JsonConverter, ListingVersion};
pub use entity::{Entity, EntityKind, MemberKey, Meta, Prompt, Resource, Tool};
pub use error::{GroupError, GroupResult, SchemaViolation};
pub use group::{Group, GroupId};
pub use schema::{EXTENSION_ID, GROUPS_META_KEY, GroupDescriptor};
pub use tree::GroupTree;
