//! Algorithm registry.

use std::collections::HashMap;
use std::sync::Arc;

use super::{HmacAlgorithm, RsaAlgorithm, SigningMethod};

/// Immutable lookup table from JWA algorithm name to signing method.
///
/// The registry is built once at construction and never mutated, so it can
/// be shared freely across threads. Parsers resolve the token header `alg`
/// against it; anything absent is rejected as unsupported.
#[derive(Clone)]
pub struct AlgorithmRegistry {
    methods: HashMap<&'static str, Arc<dyn SigningMethod>>,
}

impl AlgorithmRegistry {
    /// Creates a registry from an explicit set of methods.
    ///
    /// Later methods with the same algorithm name replace earlier ones.
    #[must_use]
    pub fn new(methods: impl IntoIterator<Item = Arc<dyn SigningMethod>>) -> Self {
        Self {
            methods: methods.into_iter().map(|m| (m.alg(), m)).collect(),
        }
    }

    /// Creates a registry with all supported methods registered
    /// (HS256/384/512 and RS256/384/512).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new([
            Arc::new(HmacAlgorithm::hs256()) as Arc<dyn SigningMethod>,
            Arc::new(HmacAlgorithm::hs384()),
            Arc::new(HmacAlgorithm::hs512()),
            Arc::new(RsaAlgorithm::rs256()),
            Arc::new(RsaAlgorithm::rs384()),
            Arc::new(RsaAlgorithm::rs512()),
        ])
    }

    /// Looks up a method by algorithm name.
    #[must_use]
    pub fn get(&self, alg: &str) -> Option<Arc<dyn SigningMethod>> {
        self.methods.get(alg).cloned()
    }

    /// Returns `true` if the algorithm name is registered.
    #[must_use]
    pub fn contains(&self, alg: &str) -> bool {
        self.methods.contains_key(alg)
    }

    /// Returns the registered algorithm names (unordered).
    pub fn algorithms(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.methods.keys().copied()
    }
}
