//! Backend registry for building backend pools from configuration.
//!
//! The [`BackendRegistry`] maps a backend *kind* (`"simulator"`,
//! `"annealer"`, ...) to a factory, so a pool of `Arc<dyn Backend>` can be
//! assembled from a list of [`BackendConfig`] entries.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::backend::{Backend, BackendConfig, BackendFactory};
use crate::error::{HalError, HalResult};

/// Factory function type for registered backends.
type Factory = Box<dyn Fn(BackendConfig) -> HalResult<Arc<dyn Backend>> + Send + Sync>;

/// Central registry of backend kinds.
pub struct BackendRegistry {
    factories: FxHashMap<String, Factory>,
}

impl BackendRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: FxHashMap::default(),
        }
    }

    /// Register a backend type under `kind`.
    pub fn register<B>(&mut self, kind: impl Into<String>)
    where
        B: BackendFactory + 'static,
    {
        let kind = kind.into();
        debug!("Registering backend kind: {}", kind);
        self.factories.insert(
            kind,
            Box::new(|config| {
                let backend = B::from_config(config)?;
                Ok(Arc::new(backend))
            }),
        );
    }

    /// Register a backend kind with a custom constructor.
    pub fn register_factory(
        &mut self,
        kind: impl Into<String>,
        factory: impl Fn(BackendConfig) -> HalResult<Arc<dyn Backend>> + Send + Sync + 'static,
    ) {
        let kind = kind.into();
        debug!("Registering factory backend kind: {}", kind);
        self.factories.insert(kind, Box::new(factory));
    }

    /// Create one backend from its configuration.
    pub fn create(&self, config: BackendConfig) -> HalResult<Arc<dyn Backend>> {
        match self.factories.get(&config.kind) {
            Some(factory) => factory(config),
            None => Err(HalError::BackendUnavailable(format!(
                "No backend registered for kind '{}' (instance '{}')",
                config.kind, config.name
            ))),
        }
    }

    /// Create every configured backend, failing on the first bad entry.
    pub fn create_pool(&self, configs: &[BackendConfig]) -> HalResult<Vec<Arc<dyn Backend>>> {
        configs.iter().cloned().map(|c| self.create(c)).collect()
    }

    /// List all registered kinds.
    pub fn available_kinds(&self) -> Vec<String> {
        let mut kinds: Vec<_> = self.factories.keys().cloned().collect();
        kinds.sort();
        kinds
    }

    /// Check if a kind is registered.
    pub fn has_kind(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry() {
        let registry = BackendRegistry::new();
        assert!(registry.available_kinds().is_empty());
        assert!(!registry.has_kind("simulator"));
    }

    #[test]
    fn test_register_factory() {
        let mut registry = BackendRegistry::new();
        registry.register_factory("test", |_config| {
            Err(HalError::BackendUnavailable("test only".into()))
        });

        assert!(registry.has_kind("test"));
        assert_eq!(registry.available_kinds(), vec!["test"]);
        assert!(matches!(
            registry.create(BackendConfig::new("t", "test")),
            Err(HalError::BackendUnavailable(_))
        ));
    }

    #[test]
    fn test_unknown_kind() {
        let registry = BackendRegistry::new();
        let err = registry
            .create(BackendConfig::new("qpu-1", "quantum-magic"))
            .err()
            .unwrap();
        assert!(err.to_string().contains("quantum-magic"));
    }
}
