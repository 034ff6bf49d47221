//! Scalar-kind catalog for voxel storage.
//!
//! Every voxel buffer is associated with exactly one [`ScalarKind`] for its
//! entire lifetime. The catalog pins the byte width and display name of each
//! kind; [`ScalarValue`] is its compile-time face, implemented for the three
//! storage types only.

use serde::{Deserialize, Serialize};

/// Storage representation of a single voxel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ScalarKind {
    /// Normalized 8-bit unsigned: stored as 0..=255, sampled in [0, 1].
    Unorm8,
    /// 32-bit IEEE float.
    Float32,
    /// 64-bit IEEE float.
    Float64,
    /// No declared representation; cannot back a buffer.
    #[default]
    Unspecified,
}

impl ScalarKind {
    /// Bytes per voxel; zero for [`ScalarKind::Unspecified`].
    #[must_use]
    pub const fn byte_width(self) -> usize {
        match self {
            Self::Unorm8 => 1,
            Self::Float32 => 4,
            Self::Float64 => 8,
            Self::Unspecified => 0,
        }
    }

    /// Display name of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unorm8 => "unorm8",
            Self::Float32 => "float",
            Self::Float64 => "double",
            Self::Unspecified => "unspecified",
        }
    }
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A voxel storage type from the closed catalog.
///
/// The trait carries the two conversions the load/resample path needs:
/// widening a stored voxel to an interpolation sample, and quantizing an
/// interpolated sample back to storage. The quantization rule is
/// kind-specific: identity for the float kinds, `round(255 * v)` clamped to
/// `[0, 255]` for unorm8.
pub trait ScalarValue: bytemuck::Pod + Send + Sync + 'static {
    /// Runtime tag of this storage type.
    const KIND: ScalarKind;

    /// Widens a stored voxel to the f64 sample used by interpolation.
    fn to_sample(self) -> f64;

    /// Quantizes an interpolated sample back to storage.
    #[must_use]
    fn quantize(sample: f64) -> Self;
}

impl ScalarValue for u8 {
    const KIND: ScalarKind = ScalarKind::Unorm8;

    fn to_sample(self) -> f64 {
        f64::from(self) / 255.0
    }

    fn quantize(sample: f64) -> Self {
        (255.0 * sample).round().clamp(0.0, 255.0) as u8
    }
}

impl ScalarValue for f32 {
    const KIND: ScalarKind = ScalarKind::Float32;

    fn to_sample(self) -> f64 {
        f64::from(self)
    }

    fn quantize(sample: f64) -> Self {
        sample as f32
    }
}

impl ScalarValue for f64 {
    const KIND: ScalarKind = ScalarKind::Float64;

    fn to_sample(self) -> f64 {
        self
    }

    fn quantize(sample: f64) -> Self {
        sample
    }
}
