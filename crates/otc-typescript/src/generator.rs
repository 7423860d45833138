use otc_core::naming::{DefaultNaming, NamingPolicy};
use otc_core::parse::spec::OpenApiDocument;
use otc_core::{CodeGenerator, GeneratedFile};

use crate::EmitError;
use crate::emitters;

/// Output options for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Base name of the output artifacts (`<name>.ts`, `<name>.d.ts`).
    pub base_name: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            base_name: "index".to_string(),
        }
    }
}

/// TypeScript client generator. The naming policy is injected at
/// construction; the generator itself keeps no other state.
pub struct TsClientGenerator {
    policy: Box<dyn NamingPolicy>,
}

impl TsClientGenerator {
    pub fn new(policy: Box<dyn NamingPolicy>) -> Self {
        Self { policy }
    }

    pub fn with_default_naming() -> Self {
        Self::new(Box::new(DefaultNaming))
    }
}

impl CodeGenerator for TsClientGenerator {
    type Config = GenerateOptions;
    type Error = EmitError;

    /// Build the API module first, then the declaration module. The query
    /// interfaces synthesized while building stubs are passed explicitly to
    /// the interface emitter, so the two passes share no mutable state.
    fn generate(
        &self,
        doc: &OpenApiDocument,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error> {
        let api = emitters::api::emit_api(doc, self.policy.as_ref(), &config.base_name);
        log::debug!(
            "generated {} query interfaces for {} paths",
            api.query_interfaces.len(),
            doc.paths.len()
        );
        let types = emitters::types::emit_types(doc, &api.query_interfaces);

        Ok(vec![
            GeneratedFile {
                path: format!("{}.ts", config.base_name),
                content: api.content,
            },
            GeneratedFile {
                path: format!("{}.d.ts", config.base_name),
                content: types,
            },
        ])
    }
}
