//! Volume type implementations for voxelfield-rs.
//!
//! This crate holds the machinery behind the built-in volume types:
//! - [`raw`] — ingestion of headerless RAW grid files
//! - [`resample`] — trilinear resampling between grid resolutions
//! - [`structured`] — the structured (dense regular grid) volume and its
//!   commit lifecycle

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Lattice indices intentionally narrow after clamping
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod raw;
pub mod resample;
pub mod structured;

pub use raw::load_raw;
pub use resample::{resample, resample_into, sample_normalized};
pub use structured::StructuredVolume;
