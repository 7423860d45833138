use otc_core::parse::schema::{Schema, SchemaOrRef};

/// Maps a schema fragment to a TypeScript type expression.
///
/// Resolution is total: unknown or missing type keywords come out as `any`
/// rather than failing, and referenced names are never checked for existence.
/// The configured prefix qualifies references (`Type.` inside the API module,
/// empty inside the declaration module).
#[derive(Debug, Clone, Default)]
pub struct TypeResolver {
    ref_prefix: String,
}

impl TypeResolver {
    /// Resolver emitting bare reference names.
    pub fn bare() -> Self {
        Self::default()
    }

    /// Resolver qualifying references with `prefix` (e.g. `Type.`).
    pub fn qualified(prefix: &str) -> Self {
        Self {
            ref_prefix: prefix.to_string(),
        }
    }

    /// Resolve a fragment, treating `None` as untyped.
    pub fn resolve_opt(&self, node: Option<&SchemaOrRef>) -> String {
        match node {
            Some(node) => self.resolve(node),
            None => "any".to_string(),
        }
    }

    /// Resolve a fragment to a type expression.
    pub fn resolve(&self, node: &SchemaOrRef) -> String {
        match node {
            SchemaOrRef::Ref { .. } => {
                // ref_name is always Some for the Ref variant.
                let name = node.ref_name().unwrap_or_default();
                format!("{}{}", self.ref_prefix, name)
            }
            SchemaOrRef::Schema(schema) => self.resolve_schema(schema),
        }
    }

    fn resolve_schema(&self, schema: &Schema) -> String {
        match schema.schema_type.as_deref() {
            Some("array") => {
                let inner = self.resolve_opt(schema.items.as_deref());
                format!("{inner}[]")
            }
            Some(kind) => primitive(kind).to_string(),
            None => "any".to_string(),
        }
    }
}

/// The primitive-type lookup table. Any kind outside the table is `any`.
fn primitive(kind: &str) -> &'static str {
    match kind {
        "string" => "string",
        "number" | "integer" => "number",
        "boolean" => "boolean",
        "array" => "any[]",
        "object" => "any",
        _ => "any",
    }
}
