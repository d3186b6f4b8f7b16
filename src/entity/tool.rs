//! Tool descriptor records.

use super::{Icon, Meta};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Behavioural hints describing a tool.
///
/// All hints are advisory; a client must not rely on them for safety.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolAnnotations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only_hint: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destructive_hint: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotent_hint: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_world_hint: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_direct: Option<bool>,
}

/// A tool descriptor.
///
/// Identity is the tool `name`. Records are immutable once built; use the
/// `with_*` methods to assemble one.
///
/// # Examples
///
/// ```rust
/// use mcp_groups::entity::{Tool, ToolAnnotations};
/// use serde_json::json;
///
/// let tool = Tool::new("search")
///     .with_description("Full text search")
///     .with_input_schema(json!({"type": "object"}))
///     .with_annotations(ToolAnnotations {
///         read_only_hint: Some(true),
///         ..Default::default()
///     });
///
/// assert_eq!(tool.name(), "search");
/// assert_eq!(tool.description(), Some("Full text search"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    input_schema: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output_schema: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    annotations: Option<ToolAnnotations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icons: Option<Vec<Icon>>,
    #[serde(
        rename = "_meta",
        default,
        deserialize_with = "super::deserialize_meta",
        skip_serializing_if = "Option::is_none"
    )]
    meta: Option<Meta>,
}

impl Tool {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            input_schema: None,
            output_schema: None,
            annotations: None,
            icons: None,
            meta: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_input_schema(mut self, schema: Value) -> Self {
        self.input_schema = Some(schema);
        self
    }

    pub fn with_output_schema(mut self, schema: Value) -> Self {
        self.output_schema = Some(schema);
        self
    }

    pub fn with_annotations(mut self, annotations: ToolAnnotations) -> Self {
        self.annotations = Some(annotations);
        self
    }

    pub fn with_icons(mut self, icons: Vec<Icon>) -> Self {
        self.icons = Some(icons);
        self
    }

    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = super::non_empty(meta);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn input_schema(&self) -> Option<&Value> {
        self.input_schema.as_ref()
    }

    pub fn output_schema(&self) -> Option<&Value> {
        self.output_schema.as_ref()
    }

    pub fn annotations(&self) -> Option<&ToolAnnotations> {
        self.annotations.as_ref()
    }

    pub fn icons(&self) -> Option<&[Icon]> {
        self.icons.as_deref()
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }
}
