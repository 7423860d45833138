use minijinja::{Environment, context};
use otc_core::GeneratedFile;

use crate::EmitError;

/// Options for the seeded `request.ts` wrapper.
#[derive(Debug, Clone)]
pub struct WrapperOptions {
    /// Base URL baked into the axios instance.
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for WrapperOptions {
    fn default() -> Self {
        Self {
            base_url: "/".to_string(),
            timeout_ms: 10_000,
        }
    }
}

/// Collaborator files seeded next to the generated modules. Callers must
/// write these only when the target file does not already exist; a present
/// `request.ts` usually carries project-specific interceptors.
pub fn emit_seed_files(options: &WrapperOptions) -> Result<Vec<GeneratedFile>, EmitError> {
    Ok(vec![
        GeneratedFile {
            path: "request.ts".to_string(),
            content: emit_request_wrapper(options)?,
        },
        GeneratedFile {
            path: "naming.example.yaml".to_string(),
            content: include_str!("../../templates/naming.example.yaml").to_string(),
        },
    ])
}

fn emit_request_wrapper(options: &WrapperOptions) -> Result<String, EmitError> {
    let mut env = Environment::new();
    env.add_template("request.ts.j2", include_str!("../../templates/request.ts.j2"))?;
    let tmpl = env.get_template("request.ts.j2")?;
    let content = tmpl.render(context! {
        base_url => options.base_url,
        timeout_ms => options.timeout_ms,
    })?;
    Ok(content)
}
