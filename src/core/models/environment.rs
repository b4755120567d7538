use std::fmt;

use serde::Deserialize;

use super::fold_case;
use crate::core::errors::{EnvLayerError, Result};
use crate::core::services::registry_validator;

/// A declared environment as written by the caller (or in
/// `environments.toml`): a name plus the name of the environment it
/// inherits from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentDecl {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
}

impl EnvironmentDecl {
    /// Declare a root environment.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
        }
    }

    /// Declare an environment inheriting from `parent`.
    pub fn inherits(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent.into()),
        }
    }
}

/// A node in the registry. `parent` is an index into the owning
/// [`EnvironmentRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentNode {
    name: String,
    parent: Option<usize>,
}

impl EnvironmentNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }
}

/// The set of declared environments, built once at startup and read-only
/// afterwards. The default registry is empty ("flat" mode: base layer plus
/// the current environment's own layer).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentRegistry {
    nodes: Vec<EnvironmentNode>,
}

impl EnvironmentRegistry {
    /// Build a registry from declarations.
    ///
    /// Declarations may appear in any order; a parent does not need to be
    /// declared before its children.
    ///
    /// # Errors
    ///
    /// - `MissingArgument` if a declaration has an empty name.
    /// - `DuplicateEnvironment` if two names match case-insensitively.
    /// - `UnknownParent` if a parent name matches no declaration.
    pub fn from_declarations(decls: &[EnvironmentDecl]) -> Result<Self> {
        if decls.iter().any(|d| d.name.trim().is_empty()) {
            return Err(EnvLayerError::MissingArgument {
                name: "environment name",
            });
        }

        registry_validator::validate(decls.iter().map(|d| d.name.as_str()))?;

        let folded: Vec<String> = decls.iter().map(|d| fold_case(&d.name)).collect();

        let nodes = decls
            .iter()
            .map(|decl| -> Result<EnvironmentNode> {
                let parent = match &decl.parent {
                    Some(parent_name) => {
                        let wanted = fold_case(parent_name);
                        let idx = folded.iter().position(|n| *n == wanted).ok_or_else(|| {
                            EnvLayerError::UnknownParent {
                                environment: decl.name.clone(),
                                parent: parent_name.clone(),
                            }
                        })?;
                        Some(idx)
                    }
                    None => None,
                };
                Ok(EnvironmentNode {
                    name: decl.name.clone(),
                    parent,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { nodes })
    }

    /// Find a node by name, ignoring case.
    pub fn find(&self, name: &str) -> Option<usize> {
        let wanted = fold_case(name);
        self.nodes.iter().position(|n| fold_case(&n.name) == wanted)
    }

    pub fn node(&self, index: usize) -> Option<&EnvironmentNode> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[EnvironmentNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Environment names in apply order: most general ancestor first, the
/// current environment last. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChain {
    names: Vec<String>,
}

impl ResolvedChain {
    /// Wrap an already root-first list of names.
    pub(crate) fn from_root_first(names: Vec<String>) -> Self {
        debug_assert!(!names.is_empty());
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The most general ancestor.
    pub fn root(&self) -> &str {
        &self.names[0]
    }

    /// The environment the chain was resolved for.
    pub fn current(&self) -> &str {
        &self.names[self.names.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl fmt::Display for ResolvedChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names.join(" -> "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parents_resolve_regardless_of_declaration_order() {
        let registry = EnvironmentRegistry::from_declarations(&[
            EnvironmentDecl::inherits("Development", "ppe"),
            EnvironmentDecl::new("PPE"),
        ])
        .unwrap();

        let dev = registry.node(0).unwrap();
        assert_eq!(dev.name(), "Development");
        assert_eq!(dev.parent(), Some(1));
        assert_eq!(registry.node(1).unwrap().parent(), None);
    }

    #[test]
    fn unknown_parent_fails() {
        let err = EnvironmentRegistry::from_declarations(&[EnvironmentDecl::inherits(
            "dev", "staging",
        )])
        .unwrap_err();

        assert!(matches!(
            err,
            EnvLayerError::UnknownParent { ref parent, .. } if parent == "staging"
        ));
    }

    #[test]
    fn empty_name_fails() {
        let err = EnvironmentRegistry::from_declarations(&[EnvironmentDecl::new("  ")])
            .unwrap_err();

        assert!(matches!(err, EnvLayerError::MissingArgument { .. }));
    }

    #[test]
    fn duplicate_declaration_fails() {
        let err = EnvironmentRegistry::from_declarations(&[
            EnvironmentDecl::new("Production"),
            EnvironmentDecl::new("PRODUCTION"),
        ])
        .unwrap_err();

        assert!(matches!(err, EnvLayerError::DuplicateEnvironment { .. }));
    }

    #[test]
    fn find_ignores_case() {
        let registry =
            EnvironmentRegistry::from_declarations(&[EnvironmentDecl::new("Staging")]).unwrap();

        assert_eq!(registry.find("staging"), Some(0));
        assert_eq!(registry.find("STAGING"), Some(0));
        assert_eq!(registry.find("prod"), None);
    }

    #[test]
    fn empty_registry_is_default() {
        let registry = EnvironmentRegistry::from_declarations(&[]).unwrap();

        assert!(registry.is_empty());
        assert_eq!(registry, EnvironmentRegistry::default());
    }

    #[test]
    fn chain_displays_root_first() {
        let chain = ResolvedChain::from_root_first(vec!["PPE".into(), "Development".into()]);

        assert_eq!(chain.to_string(), "PPE -> Development");
        assert_eq!(chain.root(), "PPE");
        assert_eq!(chain.current(), "Development");
    }
}
