use tracing::debug;

use crate::core::errors::{EnvLayerError, Result};
use crate::core::models::environment::{EnvironmentRegistry, ResolvedChain};

/// Resolves environment inheritance (PPE -> Development, ...).
///
/// Given the current environment name and the declared registry, walks
/// parent links and returns the chain in apply order.
pub struct ChainResolver;

impl ChainResolver {
    /// Build the ordered inheritance chain from root to `current`.
    ///
    /// For `Development` with parent `PPE`, returns `["PPE", "Development"]`.
    /// A name that is not declared resolves to a chain of just itself,
    /// spelled as given.
    ///
    /// # Errors
    ///
    /// - `MissingArgument` if `current` is empty.
    /// - `CyclicEnvironment` if the parent links loop.
    pub fn resolve(&self, current: &str, registry: &EnvironmentRegistry) -> Result<ResolvedChain> {
        if current.trim().is_empty() {
            return Err(EnvLayerError::MissingArgument {
                name: "environment",
            });
        }

        let Some(start) = registry.find(current) else {
            debug!(environment = current, "environment not declared, using it alone");
            return Ok(ResolvedChain::from_root_first(vec![current.to_string()]));
        };

        let mut chain = Vec::new();
        let mut next = Some(start);

        // Walk upward collecting ancestors. An acyclic walk visits each
        // node at most once.
        while let Some(idx) = next {
            let Some(node) = registry.node(idx) else {
                break;
            };
            if chain.len() == registry.len() {
                chain.push(node.name().to_string());
                return Err(EnvLayerError::CyclicEnvironment {
                    chain: chain.join(" -> "),
                });
            }
            chain.push(node.name().to_string());
            next = node.parent();
        }

        // Reverse so root is first, current is last
        chain.reverse();
        let chain = ResolvedChain::from_root_first(chain);
        debug!(%chain, "resolved environment chain");
        Ok(chain)
    }
}
