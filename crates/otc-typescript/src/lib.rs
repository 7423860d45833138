pub mod emitters;
mod generator;
mod resolver;

pub use generator::{GenerateOptions, TsClientGenerator};
pub use resolver::TypeResolver;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to render template: {0}")]
    Template(#[from] minijinja::Error),
}
