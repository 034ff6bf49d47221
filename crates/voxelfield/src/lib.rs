//! voxelfield-rs: a volumetric-data subsystem for scalar grid rendering.
//!
//! voxelfield manages dense regular 3D scalar grids: it ingests headerless
//! RAW grid files, stores voxels typed by scalar kind, resamples between
//! resolutions with kind-specific quantization, and resolves textual
//! volume-type names to constructors through a process-wide registry, so
//! new volume kinds can be added without recompiling this subsystem.
//!
//! # Quick Start
//!
//! ```no_run
//! use voxelfield::*;
//!
//! fn main() -> Result<()> {
//!     init();
//!
//!     let mut volume = create_volume("structured_float").expect("unknown volume type");
//!
//!     let mut params = ParamSet::new();
//!     params.set("dimensions", IVec3::new(64, 64, 64));
//!     params.set("filename", "head.raw");
//!     params.set("resample_dimensions", IVec3::new(32, 32, 32));
//!
//!     volume.commit(&params)?;
//!     let handoff = volume.handoff().expect("committed volume has a handoff");
//!     println!("{} voxel bytes for the render back end", handoff.voxels().len());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! A **volume** owns a voxel buffer of one scalar kind and is populated by
//! a **commit**, which reads its configuration from an opaque [`ParamSet`].
//! The **registry** maps normalized type names to constructors; unknown
//! names are resolved through extension-installed resolvers at most once,
//! with failed lookups cached. Extension modules register their types with
//! [`register_volume_type`] (or install a [`VolumeResolver`]) before first
//! use.

use voxelfield_volumes::structured;

// Re-export core types
pub use voxelfield_core::{
    error::{Result, VoxelFieldError},
    params::{ParamSet, ParamValue},
    registry::{VolumeResolver, VolumeTypeRegistry},
    scalar::{ScalarKind, ScalarValue},
    state::{with_registry, with_registry_mut},
    volume::{Volume, VolumeConstructor, VolumeHandoff},
    IVec3, UVec3, VoxelBuffer,
};

// Re-export volume implementations
pub use voxelfield_volumes::{
    load_raw, resample, resample_into, sample_normalized, StructuredVolume,
};

/// Initializes voxelfield: logging and the built-in volume types.
///
/// Call once before creating volumes. Registration is idempotent, so
/// calling it again is harmless.
pub fn init() {
    let _ = env_logger::try_init();
    voxelfield_core::state::register_volume_type("structured_unorm8", structured::create_unorm8);
    voxelfield_core::state::register_volume_type("structured_float", structured::create_float32);
    voxelfield_core::state::register_volume_type("structured_double", structured::create_float64);
    log::info!("voxelfield initialized");
}

/// Registers a volume type constructor under `name` in the process-wide
/// registry.
///
/// Names are normalized (ASCII lowercase, hyphens to underscores); this is
/// the hook extension modules call before first use of their type.
pub fn register_volume_type(name: &str, constructor: VolumeConstructor) {
    voxelfield_core::state::register_volume_type(name, constructor);
}

/// Installs a resolver consulted at most once per unknown volume type name.
pub fn add_volume_resolver(resolver: VolumeResolver) {
    voxelfield_core::state::add_volume_resolver(resolver);
}

/// Creates a volume of the named type, or `None` if the type is unknown.
///
/// An unknown name is resolved at most once; the failed lookup is cached
/// and answered from the cache afterwards.
#[must_use]
pub fn create_volume(name: &str) -> Option<Box<dyn Volume>> {
    voxelfield_core::state::create_volume(name)
}
