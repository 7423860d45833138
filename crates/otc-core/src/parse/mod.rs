pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod request_body;
pub mod response;
pub mod schema;
pub mod spec;

use crate::error::ParseError;
use spec::OpenApiDocument;

/// Parse an OpenAPI document from JSON.
pub fn from_json(input: &str) -> Result<OpenApiDocument, ParseError> {
    let doc: OpenApiDocument = serde_json::from_str(input)?;
    validate_version(&doc)?;
    Ok(doc)
}

/// Parse an OpenAPI document from YAML.
pub fn from_yaml(input: &str) -> Result<OpenApiDocument, ParseError> {
    let doc: OpenApiDocument = serde_yaml_ng::from_str(input)?;
    validate_version(&doc)?;
    Ok(doc)
}

fn validate_version(doc: &OpenApiDocument) -> Result<(), ParseError> {
    if !doc.openapi.starts_with("3.") {
        return Err(ParseError::UnsupportedVersion(doc.openapi.clone()));
    }
    Ok(())
}
