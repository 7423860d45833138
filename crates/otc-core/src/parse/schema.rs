use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A reference or inline schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Schema(Box<Schema>),
}

/// Prefix used by component schema references.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

impl SchemaOrRef {
    /// The bare component name of a reference (`#/components/schemas/Pet` → `Pet`).
    /// Unqualified references pass through as written; the target is never
    /// checked for existence.
    pub fn ref_name(&self) -> Option<&str> {
        match self {
            SchemaOrRef::Ref { ref_path } => {
                Some(ref_path.strip_prefix(SCHEMA_REF_PREFIX).unwrap_or(ref_path))
            }
            SchemaOrRef::Schema(_) => None,
        }
    }
}

/// A JSON Schema fragment. The `type` keyword is kept as a plain string so
/// unknown kinds fall through the lenient primitive table instead of failing
/// deserialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    // Object properties
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaOrRef>,

    /// Parsed but deliberately not consulted: every generated property is
    /// emitted optional.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    // Array items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaOrRef>>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,
}
