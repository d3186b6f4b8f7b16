//! Prompt descriptor records and their typed arguments.

use super::{Icon, Meta};
use serde::{Deserialize, Serialize};

/// Value type accepted by a prompt argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
}

/// A single named argument of a prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptArgument {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    value_type: Option<ArgumentType>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    required: bool,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    meta: Option<Meta>,
}

impl PromptArgument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            value_type: None,
            required: false,
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

    pub fn with_type(mut self, value_type: ArgumentType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
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

    pub fn value_type(&self) -> Option<ArgumentType> {
        self.value_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }
}

/// A prompt descriptor.
///
/// Identity is the prompt `name`. Arguments keep the order they were added in.
///
/// # Examples
///
/// ```rust
/// use mcp_groups::entity::{ArgumentType, Prompt, PromptArgument};
///
/// let prompt = Prompt::new("summarize")
///     .with_argument(PromptArgument::new("text").with_type(ArgumentType::String).required(true))
///     .with_argument(PromptArgument::new("max_words").with_type(ArgumentType::Integer));
///
/// let names: Vec<&str> = prompt.arguments().iter().map(|a| a.name()).collect();
/// assert_eq!(names, vec!["text", "max_words"]);
/// assert!(prompt.arguments()[0].is_required());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    arguments: Vec<PromptArgument>,
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

impl Prompt {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            arguments: Vec::new(),
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

    pub fn with_argument(mut self, argument: PromptArgument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Remove the argument with the given name, returning it if present.
    pub fn without_argument(mut self, name: &str) -> (Self, Option<PromptArgument>) {
        let removed = self
            .arguments
            .iter()
            .position(|a| a.name == name)
            .map(|index| self.arguments.remove(index));
        (self, removed)
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

    pub fn arguments(&self) -> &[PromptArgument] {
        &self.arguments
    }

    pub fn icons(&self) -> Option<&[Icon]> {
        self.icons.as_deref()
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }
}
