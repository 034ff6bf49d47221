//! Process-wide volume-type registry state.
//!
//! The registry is the only state shared across volumes. It lives behind a
//! lazily initialized lock, empty at startup, with no teardown beyond
//! process exit. First lookups of a given name serialize on the write lock,
//! so concurrent creations of a previously unseen type resolve it once.

use std::sync::{OnceLock, RwLock};

use crate::registry::{VolumeResolver, VolumeTypeRegistry};
use crate::volume::{Volume, VolumeConstructor};

static REGISTRY: OnceLock<RwLock<VolumeTypeRegistry>> = OnceLock::new();

fn registry() -> &'static RwLock<VolumeTypeRegistry> {
    REGISTRY.get_or_init(|| RwLock::new(VolumeTypeRegistry::new()))
}

/// Access the global registry for reading.
pub fn with_registry<F, R>(f: F) -> R
where
    F: FnOnce(&VolumeTypeRegistry) -> R,
{
    let guard = registry().read().expect("volume registry lock poisoned");
    f(&guard)
}

/// Access the global registry for writing.
pub fn with_registry_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut VolumeTypeRegistry) -> R,
{
    let mut guard = registry().write().expect("volume registry lock poisoned");
    f(&mut guard)
}

/// Registers `constructor` under `name` in the global registry.
pub fn register_volume_type(name: &str, constructor: VolumeConstructor) {
    with_registry_mut(|registry| registry.register(name, constructor));
}

/// Installs a resolver in the global registry, consulted once per unknown
/// type name.
pub fn add_volume_resolver(resolver: VolumeResolver) {
    with_registry_mut(|registry| registry.add_resolver(resolver));
}

/// Creates a volume of the named type through the global registry.
///
/// Returns `None` for an unknown type; the failed lookup is cached and not
/// retried. The constructor itself runs outside the registry lock.
#[must_use]
pub fn create_volume(name: &str) -> Option<Box<dyn Volume>> {
    let normalized = VolumeTypeRegistry::normalize(name);
    let constructor = match with_registry(|registry| registry.cached(&normalized)) {
        Some(entry) => entry,
        // resolve() re-checks the cache under the write lock: a racing
        // thread may have resolved the name between the two acquisitions.
        None => with_registry_mut(|registry| registry.resolve(&normalized)),
    };
    constructor.map(|constructor| constructor())
}
