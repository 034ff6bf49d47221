//! Volume-type registry: name-to-constructor resolution with caching.
//!
//! The registry maps a normalized type name (ASCII lowercase, hyphens
//! rewritten to underscores) to a constructor. Unknown names go through the
//! installed resolvers exactly once; the outcome is cached even when the
//! lookup fails, so a name that resolved to nothing is answered from the
//! cache without consulting resolvers again. This indirection lets
//! extension modules add volume kinds without recompiling this subsystem.

use std::collections::HashMap;

use crate::volume::{Volume, VolumeConstructor};

/// Extension hook consulted at most once per unknown normalized type name.
pub type VolumeResolver = fn(&str) -> Option<VolumeConstructor>;

/// Registry mapping volume type names to constructors.
#[derive(Default)]
pub struct VolumeTypeRegistry {
    /// Normalized name -> constructor; `None` records a failed lookup.
    constructors: HashMap<String, Option<VolumeConstructor>>,
    /// Deferred resolution hooks, consulted in installation order.
    resolvers: Vec<VolumeResolver>,
}

impl VolumeTypeRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes a type name: ASCII lowercase, hyphens to underscores.
    #[must_use]
    pub fn normalize(name: &str) -> String {
        name.to_ascii_lowercase().replace('-', "_")
    }

    /// Registers a constructor under `name`.
    ///
    /// Re-registration overwrites, including a cached failed lookup.
    pub fn register(&mut self, name: &str, constructor: VolumeConstructor) {
        self.constructors
            .insert(Self::normalize(name), Some(constructor));
    }

    /// Installs a resolver consulted once per unknown name.
    pub fn add_resolver(&mut self, resolver: VolumeResolver) {
        self.resolvers.push(resolver);
    }

    /// Returns the cached entry for an already-normalized name without
    /// resolving: `None` means never looked up, `Some(None)` a remembered
    /// failed lookup.
    pub(crate) fn cached(&self, normalized: &str) -> Option<Option<VolumeConstructor>> {
        self.constructors.get(normalized).copied()
    }

    /// Resolves `name` to a constructor, consulting resolvers on a first
    /// miss and caching the outcome either way.
    pub fn resolve(&mut self, name: &str) -> Option<VolumeConstructor> {
        let normalized = Self::normalize(name);
        if let Some(cached) = self.constructors.get(&normalized) {
            return *cached;
        }

        log::debug!("looking up volume type '{normalized}' for the first time");
        let found = self
            .resolvers
            .iter()
            .find_map(|resolver| resolver(&normalized));
        if found.is_none() {
            log::warn!("no volume type '{normalized}' is registered or resolvable");
        }
        self.constructors.insert(normalized, found);
        found
    }

    /// Creates a volume of the named type, or `None` for an unknown type.
    pub fn create(&mut self, name: &str) -> Option<Box<dyn Volume>> {
        self.resolve(name).map(|constructor| constructor())
    }

    /// Returns whether `name` currently resolves to a constructor, without
    /// triggering resolution.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        matches!(
            self.constructors.get(&Self::normalize(name)),
            Some(Some(_))
        )
    }

    /// Number of cached entries, failed lookups included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Returns true if no entry has been registered or looked up.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}
