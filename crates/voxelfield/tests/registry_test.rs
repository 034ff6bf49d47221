//! Integration tests for the process-wide volume-type registry.
//!
//! Note: the registry is global to the process, so all registry behaviors
//! are exercised from a single test function to keep the cache state
//! deterministic.

use std::sync::atomic::{AtomicUsize, Ordering};

use voxelfield::*;

static RESOLVER_CALLS: AtomicUsize = AtomicUsize::new(0);

fn plugin_resolver(name: &str) -> Option<VolumeConstructor> {
    RESOLVER_CALLS.fetch_add(1, Ordering::SeqCst);
    (name == "plugin_volume").then_some(plugin_constructor as VolumeConstructor)
}

fn plugin_constructor() -> Box<dyn Volume> {
    Box::new(StructuredVolume::new(ScalarKind::Unorm8))
}

/// Single test covering registry resolution, normalization, and caching.
#[test]
fn test_registry() {
    init();

    // Built-in types are registered by init()
    for name in ["structured_unorm8", "structured_float", "structured_double"] {
        let volume = create_volume(name).expect("built-in type");
        assert_eq!(volume.type_name(), name);
        assert!(!volume.is_committed());
    }

    // Scalar kinds follow the type name
    assert_eq!(
        create_volume("structured_float").unwrap().scalar_kind(),
        ScalarKind::Float32
    );
    assert_eq!(
        create_volume("structured_double").unwrap().scalar_kind(),
        ScalarKind::Float64
    );

    // Hyphens normalize to underscores, case folds to lowercase
    let volume = create_volume("structured-float").expect("normalized name");
    assert_eq!(volume.type_name(), "structured_float");
    assert!(create_volume("Structured-Unorm8").is_some());

    // Unknown types resolve to None and the failed lookup is cached:
    // the resolver installed afterwards is never consulted for them
    assert!(create_volume("no_such_volume").is_none());
    add_volume_resolver(plugin_resolver);
    assert!(create_volume("no_such_volume").is_none());
    assert_eq!(RESOLVER_CALLS.load(Ordering::SeqCst), 0);

    // A fresh unknown name consults the resolver exactly once
    assert!(create_volume("also_missing").is_none());
    assert!(create_volume("also_missing").is_none());
    assert!(create_volume("also-missing").is_none());
    assert_eq!(RESOLVER_CALLS.load(Ordering::SeqCst), 1);

    // A resolvable name is resolved once and served from the cache after
    let volume = create_volume("plugin_volume").expect("resolver-provided type");
    assert_eq!(volume.scalar_kind(), ScalarKind::Unorm8);
    assert!(create_volume("plugin-volume").is_some());
    assert_eq!(RESOLVER_CALLS.load(Ordering::SeqCst), 2);

    // Explicit registration is the other extension path
    register_volume_type("extension-volume", plugin_constructor);
    assert!(create_volume("extension_volume").is_some());
    assert_eq!(RESOLVER_CALLS.load(Ordering::SeqCst), 2);

    // The registry itself is reachable for inspection
    with_registry(|registry| {
        assert!(registry.is_registered("structured_float"));
        assert!(!registry.is_registered("no_such_volume"));
    });
}
