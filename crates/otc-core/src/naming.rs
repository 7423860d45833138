use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::PolicyError;

/// Everything a naming policy may consult about one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationContext<'a> {
    pub operation_id: &'a str,
    pub description: &'a str,
    pub path: &'a str,
    pub method: &'a str,
    pub tag: Option<&'a str>,
}

/// A policy's answer. `None` (or an empty string) means "use the default".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamingOverride {
    pub module_name: Option<String>,
    pub function_name: Option<String>,
}

impl NamingOverride {
    pub fn module(&self) -> Option<&str> {
        self.module_name.as_deref().filter(|s| !s.is_empty())
    }

    pub fn function(&self) -> Option<&str> {
        self.function_name.as_deref().filter(|s| !s.is_empty())
    }
}

/// Capability interface for renaming generated modules and functions.
/// Injected into the generator at startup so grouping stays unit-testable
/// with stub policies.
pub trait NamingPolicy {
    fn resolve(&self, ctx: &OperationContext<'_>) -> NamingOverride;
}

/// The built-in policy: never overrides anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNaming;

impl NamingPolicy for DefaultNaming {
    fn resolve(&self, _ctx: &OperationContext<'_>) -> NamingOverride {
        NamingOverride::default()
    }
}

/// Declarative naming rules loaded from a YAML file.
///
/// `use_tag` groups every operation under its first tag (the usual fix when
/// path-derived groups are unhelpful); `modules` and `functions` override
/// individual operations by operationId.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamingRules {
    pub use_tag: bool,

    /// operationId → module name.
    pub modules: IndexMap<String, String>,

    /// operationId → function name.
    pub functions: IndexMap<String, String>,
}

impl NamingRules {
    /// Load rules from a YAML file. Any failure is fatal to the run.
    pub fn load(path: &Path) -> Result<Self, PolicyError> {
        let content = fs::read_to_string(path).map_err(|source| PolicyError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml_ng::from_str(&content).map_err(|source| PolicyError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

impl NamingPolicy for NamingRules {
    fn resolve(&self, ctx: &OperationContext<'_>) -> NamingOverride {
        let mut module_name = self.modules.get(ctx.operation_id).cloned();
        if module_name.is_none() && self.use_tag {
            module_name = ctx.tag.map(String::from);
        }
        let function_name = self.functions.get(ctx.operation_id).cloned();
        NamingOverride {
            module_name,
            function_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(operation_id: &'a str, tag: Option<&'a str>) -> OperationContext<'a> {
        OperationContext {
            operation_id,
            description: "",
            path: "/pet/{petId}",
            method: "get",
            tag,
        }
    }

    #[test]
    fn default_policy_overrides_nothing() {
        let o = DefaultNaming.resolve(&ctx("getPetById", Some("pet")));
        assert_eq!(o.module(), None);
        assert_eq!(o.function(), None);
    }

    #[test]
    fn empty_strings_mean_no_override() {
        let o = NamingOverride {
            module_name: Some(String::new()),
            function_name: Some("fetchPet".to_string()),
        };
        assert_eq!(o.module(), None);
        assert_eq!(o.function(), Some("fetchPet"));
    }

    #[test]
    fn rules_use_tag_as_module() {
        let rules: NamingRules = serde_yaml_ng::from_str("use_tag: true\n").unwrap();
        let o = rules.resolve(&ctx("getPetById", Some("pet")));
        assert_eq!(o.module(), Some("pet"));
        // No tag, no override.
        let o = rules.resolve(&ctx("getPetById", None));
        assert_eq!(o.module(), None);
    }

    #[test]
    fn explicit_rules_win_over_tag() {
        let yaml = r#"
use_tag: true
modules:
  getPetById: animals
functions:
  getPetById: fetchPet
"#;
        let rules: NamingRules = serde_yaml_ng::from_str(yaml).unwrap();
        let o = rules.resolve(&ctx("getPetById", Some("pet")));
        assert_eq!(o.module(), Some("animals"));
        assert_eq!(o.function(), Some("fetchPet"));
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let err = NamingRules::load(Path::new("/nonexistent/rules.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/rules.yaml"));
    }
}
