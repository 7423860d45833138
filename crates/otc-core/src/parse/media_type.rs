use serde::{Deserialize, Serialize};

use super::schema::SchemaOrRef;

/// A media type object holding the payload schema for one content type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

/// Content-type preference order used when a body or response offers several
/// representations. Only the first match is consulted.
pub const CONTENT_TYPE_PREFERENCE: [&str; 6] = [
    "application/json",
    "application/x-www-form-urlencoded",
    "multipart/form-data",
    "application/octet-stream",
    "text/plain",
    "*/*",
];

/// Select the preferred media type from a content map, if any.
pub fn preferred_content<'a>(
    content: &'a indexmap::IndexMap<String, MediaType>,
) -> Option<&'a MediaType> {
    CONTENT_TYPE_PREFERENCE
        .iter()
        .find_map(|ct| content.get(*ct))
}
