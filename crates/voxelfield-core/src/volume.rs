//! Volume trait and renderer handoff.
//!
//! A [`Volume`] is the externally visible entity of this subsystem: created
//! through the type registry, configured by an opaque parameter set, and
//! populated on commit. After a successful commit it exposes a
//! [`VolumeHandoff`] that the external rendering back end consumes
//! read-only.

use std::any::Any;
use std::sync::Arc;

use glam::UVec3;

use crate::buffer::VoxelBuffer;
use crate::error::Result;
use crate::params::ParamSet;
use crate::scalar::ScalarKind;

/// Zero-argument constructor invoked by the registry to create a volume of
/// one registered type.
pub type VolumeConstructor = fn() -> Box<dyn Volume>;

/// A volumetric dataset managed by this subsystem.
pub trait Volume: Any + Send + Sync {
    /// Returns a reference to self as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns a mutable reference to self as `Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Returns the registered type name of this volume
    /// (e.g. `"structured_float"`).
    fn type_name(&self) -> &'static str;

    /// Returns the voxel scalar kind this volume stores.
    fn scalar_kind(&self) -> ScalarKind;

    /// Returns whether a commit has completed successfully.
    fn is_committed(&self) -> bool;

    /// (Re)loads the volume from its configuration.
    ///
    /// Commit always reloads from the configured source; a second call
    /// re-executes the transition and replaces prior state. On failure the
    /// previously committed state is left untouched.
    fn commit(&mut self, params: &ParamSet) -> Result<()>;

    /// Returns the committed grid, if any.
    fn grid(&self) -> Option<&VoxelBuffer>;

    /// Returns the renderer-consumable representation built by the last
    /// successful commit.
    fn handoff(&self) -> Option<&VolumeHandoff>;
}

/// Read-only snapshot of a committed volume for the rendering back end.
///
/// Built once per successful commit. This subsystem never inspects what the
/// back end does with it; clones share the voxel bytes.
#[derive(Debug, Clone)]
pub struct VolumeHandoff {
    kind: ScalarKind,
    dims: UVec3,
    voxels: Arc<[u8]>,
}

impl VolumeHandoff {
    /// Snapshots `grid` for the back end.
    #[must_use]
    pub fn new(grid: &VoxelBuffer) -> Self {
        Self {
            kind: grid.kind(),
            dims: grid.dims(),
            voxels: Arc::from(grid.as_bytes()),
        }
    }

    /// Scalar kind of the snapshotted grid.
    #[must_use]
    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// Dimensions of the snapshotted grid.
    #[must_use]
    pub fn dims(&self) -> UVec3 {
        self.dims
    }

    /// Raw voxel bytes in row-major order.
    #[must_use]
    pub fn voxels(&self) -> &[u8] {
        &self.voxels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handoff_snapshots_grid_bytes() {
        let mut grid = VoxelBuffer::allocate(UVec3::new(2, 2, 1), ScalarKind::Unorm8).unwrap();
        grid.set_region(UVec3::ZERO, UVec3::new(2, 2, 1), &[1u8, 2, 3, 4]);

        let handoff = VolumeHandoff::new(&grid);
        assert_eq!(handoff.kind(), ScalarKind::Unorm8);
        assert_eq!(handoff.dims(), UVec3::new(2, 2, 1));
        assert_eq!(handoff.voxels(), &[1, 2, 3, 4]);

        // Clones share the same bytes
        let clone = handoff.clone();
        assert!(std::ptr::eq(handoff.voxels(), clone.voxels()));
    }
}
