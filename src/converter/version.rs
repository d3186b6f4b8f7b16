//! Content fingerprints of exported listings.
//!
//! A [`ListingVersion`] is computed deterministically from an exported
//! listing using SHA-256, so a host can tell whether the listing changed
//! between two requests and answer conditional requests with a weak ETag.
//!
//! ```rust
//! use mcp_groups::converter::ListingVersion;
//! use mcp_groups::group::Group;
//! use mcp_groups::tree::GroupTree;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tree = GroupTree::new();
//! let before = tree.listing_version();
//!
//! tree.create_group(Group::new("ops"), None)?;
//! let after = tree.listing_version();
//! assert_ne!(before, after);
//!
//! // Weak ETag round trip
//! let parsed: ListingVersion = after.to_etag().parse()?;
//! assert_eq!(parsed, after);
//! # Ok(())
//! # }
//! ```

use super::{Converter, JsonConverter};
use crate::error::SchemaViolation;
use crate::tree::GroupTree;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::{fmt, str::FromStr};

/// Opaque fingerprint of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingVersion {
    opaque: String,
}

impl ListingVersion {
    /// Fingerprint raw bytes.
    pub fn from_content(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);
        let hash = hasher.finalize();

        // First 8 bytes keep ETags short
        Self {
            opaque: BASE64.encode(&hash[..8]),
        }
    }

    /// Fingerprint a JSON payload.
    ///
    /// Object keys serialize in sorted order, so equal payloads always
    /// produce the same version.
    pub fn from_value(value: &Value) -> Self {
        Self::from_content(value.to_string().as_bytes())
    }

    pub fn as_str(&self) -> &str {
        &self.opaque
    }

    /// Render as a weak HTTP ETag, e.g. `W/"q1w2e3r4t5y="`.
    pub fn to_etag(&self) -> String {
        format!("W/\"{}\"", self.opaque)
    }
}

impl fmt::Display for ListingVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.opaque)
    }
}

/// Accepts the raw form, a quoted ETag or a weak ETag.
impl FromStr for ListingVersion {
    type Err = SchemaViolation;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let unprefixed = trimmed.strip_prefix("W/").unwrap_or(trimmed);

        let opaque = match unprefixed.strip_prefix('"') {
            Some(rest) => rest
                .strip_suffix('"')
                .ok_or_else(|| SchemaViolation::malformed("etag", "unterminated quote"))?,
            None if unprefixed.len() != trimmed.len() => {
                return Err(SchemaViolation::malformed("etag", "weak ETag must be quoted"));
            }
            None => unprefixed,
        };

        if opaque.is_empty() {
            return Err(SchemaViolation::malformed("etag", "version cannot be empty"));
        }

        Ok(Self {
            opaque: opaque.to_string(),
        })
    }
}

impl GroupTree {
    /// Fingerprint of this tree's JSON listing.
    ///
    /// Two trees that are structurally equal have the same version, no
    /// matter which ids their groups were given.
    pub fn listing_version(&self) -> ListingVersion {
        let converter = JsonConverter::for_tree(self);
        ListingVersion::from_value(&converter.to_external(self))
    }
}
