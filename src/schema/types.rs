//! Field tables describing the inbound object shapes.
//!
//! Each wire object (group, tool, prompt, resource) is described by a static
//! [`ObjectSchema`]: the fields it knows, their JSON types, and which of them
//! are required. Validation walks these tables before any decoding happens.

use std::fmt;

/// JSON type expected for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Boolean,
    Number,
    /// Non-negative integer
    Integer,
    Object,
    Array,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Boolean => "boolean",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Object => "object",
            FieldType::Array => "array",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Definition of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
}

impl FieldDefinition {
    pub const fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: false,
        }
    }
}

/// Shape of one kind of wire object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectSchema {
    /// Human-readable object name used in diagnostics
    pub name: &'static str,
    pub fields: &'static [FieldDefinition],
}

impl ObjectSchema {
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// A group descriptor. `parent` nests another group object.
pub const GROUP_OBJECT: ObjectSchema = ObjectSchema {
    name: "group",
    fields: &[
        FieldDefinition::required("name", FieldType::String),
        FieldDefinition::optional("title", FieldType::String),
        FieldDefinition::optional("description", FieldType::String),
        FieldDefinition::optional("parent", FieldType::Object),
        FieldDefinition::optional("_meta", FieldType::Object),
    ],
};

pub const TOOL_OBJECT: ObjectSchema = ObjectSchema {
    name: "tool",
    fields: &[
        FieldDefinition::required("name", FieldType::String),
        FieldDefinition::optional("title", FieldType::String),
        FieldDefinition::optional("description", FieldType::String),
        FieldDefinition::optional("inputSchema", FieldType::Object),
        FieldDefinition::optional("outputSchema", FieldType::Object),
        FieldDefinition::optional("annotations", FieldType::Object),
        FieldDefinition::optional("icons", FieldType::Array),
        FieldDefinition::optional("_meta", FieldType::Object),
    ],
};

pub const PROMPT_OBJECT: ObjectSchema = ObjectSchema {
    name: "prompt",
    fields: &[
        FieldDefinition::required("name", FieldType::String),
        FieldDefinition::optional("title", FieldType::String),
        FieldDefinition::optional("description", FieldType::String),
        FieldDefinition::optional("arguments", FieldType::Array),
        FieldDefinition::optional("icons", FieldType::Array),
        FieldDefinition::optional("_meta", FieldType::Object),
    ],
};

pub const RESOURCE_OBJECT: ObjectSchema = ObjectSchema {
    name: "resource",
    fields: &[
        FieldDefinition::required("uri", FieldType::String),
        FieldDefinition::required("name", FieldType::String),
        FieldDefinition::optional("title", FieldType::String),
        FieldDefinition::optional("description", FieldType::String),
        FieldDefinition::optional("mimeType", FieldType::String),
        FieldDefinition::optional("size", FieldType::Integer),
        FieldDefinition::optional("annotations", FieldType::Object),
        FieldDefinition::optional("icons", FieldType::Array),
        FieldDefinition::optional("_meta", FieldType::Object),
    ],
};

/// A row of the flat group format. `parent` is another row's id.
pub const GROUP_ROW: ObjectSchema = ObjectSchema {
    name: "group row",
    fields: &[
        FieldDefinition::required("id", FieldType::String),
        FieldDefinition::required("name", FieldType::String),
        FieldDefinition::optional("parent", FieldType::String),
        FieldDefinition::optional("title", FieldType::String),
        FieldDefinition::optional("description", FieldType::String),
        FieldDefinition::optional("_meta", FieldType::Object),
    ],
};

/// A membership edge of the flat format.
pub const MEMBERSHIP_ROW: ObjectSchema = ObjectSchema {
    name: "membership",
    fields: &[
        FieldDefinition::required("group", FieldType::String),
        FieldDefinition::required("kind", FieldType::String),
        FieldDefinition::required("id", FieldType::String),
    ],
};
