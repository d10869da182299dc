//! Shared types passed between ingestion, the record store and rendering.
//!
//! [`Record`] is also the unit of the `records.json` export, so its serialized
//! shape is part of the tool's output contract.

use crate::naming::ParsedName;
use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};

/// Opaque reference to a portrait's pixels.
///
/// Usually a self-contained `data:` URI so the rendered board needs no
/// companion files; a plain path or URL works just as well. The store never
/// looks inside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// Encode raw image bytes as a `data:<mime>;base64,...` URI.
    pub fn data_uri(mime: &str, bytes: &[u8]) -> Self {
        let encoded = general_purpose::STANDARD.encode(bytes);
        Self(format!("data:{mime};base64,{encoded}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ImageRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ImageRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One person on the board.
///
/// Created from a filename by [`crate::naming::parse_filename`] plus the image
/// supplied by the caller. `name` is the record's identity in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub city: String,
    pub year: String,
    pub image: ImageRef,
    /// Set when the filename breaks the naming convention.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Record {
    /// Merge parsed filename fields with the caller's image reference.
    pub fn new(parsed: ParsedName, image: ImageRef) -> Self {
        Self {
            name: parsed.name,
            city: parsed.city,
            year: parsed.year,
            image,
            error_message: parsed.error.map(|e| e.to_string()),
        }
    }

    /// The error text, or `""` when the filename was well-formed.
    pub fn error_message(&self) -> &str {
        self.error_message.as_deref().unwrap_or_default()
    }

    pub fn has_error(&self) -> bool {
        !self.error_message().is_empty()
    }
}
