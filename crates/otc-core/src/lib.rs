pub mod error;
pub mod grouping;
pub mod naming;
pub mod parse;

/// A generated file with path and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for code generators that produce files from a parsed OpenAPI document.
pub trait CodeGenerator {
    type Config;
    type Error: std::error::Error;
    fn generate(
        &self,
        doc: &parse::spec::OpenApiDocument,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}
