//! Generator registry -- a named collection of available backends.
//!
//! Lets the surrounding request layer look up a generator by name when a
//! request asks for a specific model.

use std::collections::HashMap;
use std::sync::Arc;

use super::trait_def::Generator;

/// A collection of registered [`Generator`] implementations, keyed by name.
#[derive(Default)]
pub struct GeneratorRegistry {
    generators: HashMap<String, Arc<dyn Generator>>,
}

impl GeneratorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a generator under the name it reports.
    ///
    /// If a generator with the same name is already registered, it is
    /// replaced and the old one is returned.
    pub fn register(&mut self, generator: Arc<dyn Generator>) -> Option<Arc<dyn Generator>> {
        let name = generator.name().to_string();
        self.generators.insert(name, generator)
    }

    /// Look up a generator by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Generator>> {
        self.generators.get(name).cloned()
    }

    /// List the names of all registered generators. Order is not guaranteed.
    pub fn list(&self) -> Vec<&str> {
        self.generators.keys().map(|s| s.as_str()).collect()
    }

    /// Return the number of registered generators.
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Return `true` if no generators are registered.
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("generators", &self.generators.keys().collect::<Vec<_>>())
            .finish()
    }
}
