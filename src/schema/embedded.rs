//! Published JSON Schemas of the groups extension, embedded as static strings.
//!
//! Hosts can hand these to clients or to an external validator. The shape
//! checks in [`validation`](super::validation) enforce the same rules without
//! needing a JSON Schema engine.

/// JSON Schema of a group object.
///
/// `parent` embeds the full parent group, so the schema is recursive.
pub fn group_schema() -> &'static str {
    r##"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "$id": "org.openmcptools.extensions.groups/group",
  "title": "Group",
  "description": "A named node in the hierarchy of tools, prompts and resources",
  "type": "object",
  "properties": {
    "name": {
      "type": "string",
      "minLength": 1,
      "description": "Group name, unique among its siblings; must not contain the name separator"
    },
    "title": {
      "type": "string",
      "description": "Human-readable display name"
    },
    "description": {
      "type": "string",
      "description": "Longer human-readable explanation"
    },
    "parent": {
      "$ref": "#",
      "description": "The parent group; absent for root groups"
    },
    "_meta": {
      "type": "object",
      "additionalProperties": true
    }
  },
  "required": ["name"],
  "additionalProperties": true
}"##
}

/// JSON Schema of a group listing result.
///
/// Entities carry their memberships in `_meta` under the extension id, as an
/// array of fully qualified group names.
pub fn listing_schema() -> &'static str {
    r##"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "$id": "org.openmcptools.extensions.groups/listing",
  "title": "GroupListing",
  "type": "object",
  "properties": {
    "groups": {
      "type": "array",
      "items": { "$ref": "org.openmcptools.extensions.groups/group" }
    },
    "tools": {
      "type": "array",
      "items": { "$ref": "#/$defs/member" }
    },
    "prompts": {
      "type": "array",
      "items": { "$ref": "#/$defs/member" }
    },
    "resources": {
      "type": "array",
      "items": { "$ref": "#/$defs/member" }
    }
  },
  "$defs": {
    "member": {
      "type": "object",
      "properties": {
        "_meta": {
          "type": "object",
          "properties": {
            "org.openmcptools.extensions.groups": {
              "type": "array",
              "items": { "type": "string", "minLength": 1 }
            }
          }
        }
      }
    }
  }
}"##
}
