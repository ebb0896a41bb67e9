//! Namespace naming conventions
//!
//! Every product owns a family of namespaces derived from its id: one per
//! environment, one for CI/CD pipelines, one for application BuildConfigs.
//! The convention is configuration, not hard-coded call sites, so a
//! non-default cluster layout only needs a different `Naming` value.

use crate::environment;
use serde::{Deserialize, Serialize};

/// Naming convention for the namespaces of a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Naming {
    /// Suffix of the CI/CD namespace (default "cicd")
    pub cicd_suffix: String,
    /// Suffix of the namespace holding application BuildConfigs
    /// (default "build")
    pub build_suffix: String,
}

impl Default for Naming {
    fn default() -> Self {
        Self {
            cicd_suffix: "cicd".to_string(),
            build_suffix: "build".to_string(),
        }
    }
}

impl Naming {
    /// Namespace of a product's environment
    pub fn namespace(&self, product: &str, environment: &str) -> String {
        format!("{}-{}", product, environment)
    }

    /// Namespace holding the product's CI/CD pipelines
    pub fn cicd(&self, product: &str) -> String {
        format!("{}-{}", product, self.cicd_suffix)
    }

    /// Namespace holding the product's application BuildConfigs
    pub fn build(&self, product: &str) -> String {
        format!("{}-{}", product, self.build_suffix)
    }

    /// The product's production namespace
    pub fn prod(&self, product: &str) -> String {
        self.namespace(product, environment::PROD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_convention() {
        let naming = Naming::default();
        assert_eq!(naming.cicd("myproduct"), "myproduct-cicd");
        assert_eq!(naming.build("myproduct"), "myproduct-build");
        assert_eq!(naming.prod("myproduct"), "myproduct-prod");
        assert_eq!(naming.namespace("myproduct", "test"), "myproduct-test");
    }

    #[test]
    fn test_custom_suffixes() {
        let naming = Naming {
            cicd_suffix: "pipelines".to_string(),
            build_suffix: "src".to_string(),
        };
        assert_eq!(naming.cicd("myproduct"), "myproduct-pipelines");
        assert_eq!(naming.build("myproduct"), "myproduct-src");
    }
}
