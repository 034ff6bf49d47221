//! Error types for voxelfield-rs.

use std::path::PathBuf;

use glam::IVec3;
use thiserror::Error;

use crate::scalar::ScalarKind;

/// The main error type for voxelfield-rs operations.
///
/// Every externally triggerable failure (bad configuration, unreadable or
/// short file) surfaces as one of these variants. Malformed internal calls,
/// such as an out-of-bounds region write, are contract violations and panic
/// instead.
#[derive(Error, Debug)]
pub enum VoxelFieldError {
    /// A required commit parameter was absent from the parameter set.
    #[error("missing required parameter '{0}'")]
    MissingParameter(&'static str),

    /// A dimension triple contained a non-positive component.
    #[error("invalid dimensions {0}: every component must be positive")]
    InvalidDimensions(IVec3),

    /// The scalar kind cannot back voxel storage.
    #[error("scalar kind '{0}' cannot back a voxel buffer")]
    UnsupportedScalarKind(ScalarKind),

    /// A RAW grid file ended before the declared voxel count was read.
    #[error(
        "truncated RAW grid '{}': expected {expected_voxels} voxels, read {read_voxels}",
        path.display()
    )]
    TruncatedFile {
        path: PathBuf,
        expected_voxels: u64,
        read_voxels: u64,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for voxelfield-rs operations.
pub type Result<T> = std::result::Result<T, VoxelFieldError>;
