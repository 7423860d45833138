use std::fmt::Write as _;

use otc_core::parse::schema::SchemaOrRef;
use otc_core::parse::spec::OpenApiDocument;

use crate::resolver::TypeResolver;

/// Heading separating component interfaces from the synthesized query types.
const QUERY_SECTION_HEADING: &str = "\n// Synthesized query parameter types\n";

/// Emit the declaration module: one exported interface per schema component
/// in document order, then the query interfaces synthesized during stub
/// generation. The whole module is returned as one string.
pub fn emit_types(doc: &OpenApiDocument, query_interfaces: &[String]) -> String {
    let resolver = TypeResolver::bare();
    let mut out = String::new();

    for (name, node) in doc.schemas() {
        match node {
            SchemaOrRef::Schema(schema) => {
                if let Some(desc) = &schema.description {
                    let _ = write!(out, "//{desc}\n");
                }
                let _ = write!(out, "export interface {name} {{\n");
                for (prop, prop_node) in &schema.properties {
                    let ty = resolver.resolve(prop_node);
                    // Every property is optional; the `required` list is
                    // intentionally not consulted.
                    match property_description(prop_node) {
                        Some(desc) => {
                            let _ = write!(out, "  {prop}?: {ty}; //{desc}\n");
                        }
                        None => {
                            let _ = write!(out, "  {prop}?: {ty};\n");
                        }
                    }
                }
                out.push_str("}\n\n");
            }
            // A component defined as a bare $ref carries no properties of its
            // own; emit an empty interface under its declared name.
            SchemaOrRef::Ref { .. } => {
                let _ = write!(out, "export interface {name} {{\n}}\n\n");
            }
        }
    }

    out.push_str(QUERY_SECTION_HEADING);
    for interface in query_interfaces {
        out.push_str(interface);
    }
    out
}

fn property_description(node: &SchemaOrRef) -> Option<&str> {
    match node {
        SchemaOrRef::Schema(schema) => schema.description.as_deref(),
        SchemaOrRef::Ref { .. } => None,
    }
}
