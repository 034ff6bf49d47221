//! Structured volumes: dense regular grids committed from RAW files.

use glam::{IVec3, UVec3};
use voxelfield_core::error::{Result, VoxelFieldError};
use voxelfield_core::params::ParamSet;
use voxelfield_core::scalar::ScalarKind;
use voxelfield_core::volume::{Volume, VolumeHandoff};
use voxelfield_core::VoxelBuffer;

use crate::raw::load_raw;
use crate::resample::resample;

/// A dense regular-grid volume loaded from a RAW file at commit time.
///
/// Configuration is read from the parameter set on every commit:
/// `dimensions` and `filename` are required; a `resample_dimensions` triple
/// with positive first component loads the file at `dimensions` into a
/// transient buffer and resamples it into the requested resolution. A
/// failed commit leaves prior committed state untouched.
pub struct StructuredVolume {
    kind: ScalarKind,
    grid: Option<VoxelBuffer>,
    handoff: Option<VolumeHandoff>,
}

impl StructuredVolume {
    /// Creates an uncommitted structured volume storing `kind` voxels.
    #[must_use]
    pub fn new(kind: ScalarKind) -> Self {
        Self {
            kind,
            grid: None,
            handoff: None,
        }
    }

    /// Registered type name for a structured volume of `kind`.
    #[must_use]
    pub fn type_name_for(kind: ScalarKind) -> &'static str {
        match kind {
            ScalarKind::Unorm8 => "structured_unorm8",
            ScalarKind::Float32 => "structured_float",
            ScalarKind::Float64 => "structured_double",
            ScalarKind::Unspecified => "structured_unspecified",
        }
    }
}

/// Constructor for the `structured_unorm8` registry entry.
#[must_use]
pub fn create_unorm8() -> Box<dyn Volume> {
    Box::new(StructuredVolume::new(ScalarKind::Unorm8))
}

/// Constructor for the `structured_float` registry entry.
#[must_use]
pub fn create_float32() -> Box<dyn Volume> {
    Box::new(StructuredVolume::new(ScalarKind::Float32))
}

/// Constructor for the `structured_double` registry entry.
#[must_use]
pub fn create_float64() -> Box<dyn Volume> {
    Box::new(StructuredVolume::new(ScalarKind::Float64))
}

/// Validates a configured dimension triple.
fn positive_dims(dims: IVec3) -> Result<UVec3> {
    if dims.x <= 0 || dims.y <= 0 || dims.z <= 0 {
        return Err(VoxelFieldError::InvalidDimensions(dims));
    }
    Ok(dims.as_uvec3())
}

impl Volume for StructuredVolume {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn type_name(&self) -> &'static str {
        Self::type_name_for(self.kind)
    }

    fn scalar_kind(&self) -> ScalarKind {
        self.kind
    }

    fn is_committed(&self) -> bool {
        self.grid.is_some()
    }

    fn commit(&mut self, params: &ParamSet) -> Result<()> {
        let dims = positive_dims(
            params
                .get_ivec3("dimensions")
                .ok_or(VoxelFieldError::MissingParameter("dimensions"))?,
        )?;
        let path = params
            .get_str("filename")
            .ok_or(VoxelFieldError::MissingParameter("filename"))?;

        // A resample request with non-positive first component reads as
        // absent; a positive first component demands a fully positive triple.
        let resample_dims = params
            .get_ivec3("resample_dimensions")
            .filter(|d| d.x > 0)
            .map(positive_dims)
            .transpose()?;

        let grid = match resample_dims {
            Some(target_dims) => {
                let transient = load_raw(path, dims, self.kind)?;
                resample(&transient, target_dims, self.kind)?
            }
            None => load_raw(path, dims, self.kind)?,
        };

        log::info!(
            "committed {} volume: {} voxels from '{}'",
            self.kind,
            grid.num_voxels(),
            path
        );
        self.handoff = Some(VolumeHandoff::new(&grid));
        self.grid = Some(grid);
        Ok(())
    }

    fn grid(&self) -> Option<&VoxelBuffer> {
        self.grid.as_ref()
    }

    fn handoff(&self) -> Option<&VolumeHandoff> {
        self.handoff.as_ref()
    }
}
