//! Core abstractions for voxelfield-rs.
//!
//! This crate provides the foundations used throughout voxelfield-rs:
//! - [`ScalarKind`]/[`ScalarValue`] — the closed catalog of voxel scalar
//!   representations and their quantization rules
//! - [`VoxelBuffer`] — dense 3D grids typed by scalar kind
//! - [`ParamSet`] — the opaque configuration surface read at commit time
//! - [`Volume`] trait and [`VolumeHandoff`] for the render back end
//! - The process-wide volume-type registry with deferred name resolution

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Quantization intentionally narrows after clamping
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod error;
pub mod params;
pub mod registry;
pub mod scalar;
pub mod state;
pub mod volume;

pub use buffer::VoxelBuffer;
pub use error::{Result, VoxelFieldError};
pub use params::{ParamSet, ParamValue};
pub use registry::{VolumeResolver, VolumeTypeRegistry};
pub use scalar::{ScalarKind, ScalarValue};
pub use state::{
    add_volume_resolver, create_volume, register_volume_type, with_registry, with_registry_mut,
};
pub use volume::{Volume, VolumeConstructor, VolumeHandoff};

// Re-export glam types for convenience
pub use glam::{IVec3, UVec3};
