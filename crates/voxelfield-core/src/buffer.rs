//! Voxel buffers: dense 3D grids typed by scalar kind.
//!
//! Storage stays type-erased at rest behind a closed tagged variant and is
//! re-typed only inside load/resample operations. Region writes follow the
//! loader's raster order: x fastest, then y, then z.

use glam::UVec3;

use crate::error::{Result, VoxelFieldError};
use crate::scalar::{ScalarKind, ScalarValue};

/// Typed storage for one grid, closed over the supported kinds.
#[derive(Debug, Clone)]
enum VoxelData {
    Unorm8(Vec<u8>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

/// A contiguous 3D grid of voxels of one scalar kind.
///
/// A buffer is exclusively owned by its volume. Dimensions are immutable
/// after allocation; replacing a buffer means allocating a new one.
#[derive(Debug, Clone)]
pub struct VoxelBuffer {
    dims: UVec3,
    data: VoxelData,
}

impl VoxelBuffer {
    /// Allocates zero-initialized storage for `dims` voxels of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`VoxelFieldError::InvalidDimensions`] if any component of
    /// `dims` is zero, and [`VoxelFieldError::UnsupportedScalarKind`] for
    /// [`ScalarKind::Unspecified`].
    pub fn allocate(dims: UVec3, kind: ScalarKind) -> Result<Self> {
        if dims.x == 0 || dims.y == 0 || dims.z == 0 {
            return Err(VoxelFieldError::InvalidDimensions(dims.as_ivec3()));
        }
        let n = dims.x as usize * dims.y as usize * dims.z as usize;
        let data = match kind {
            ScalarKind::Unorm8 => VoxelData::Unorm8(vec![0; n]),
            ScalarKind::Float32 => VoxelData::Float32(vec![0.0; n]),
            ScalarKind::Float64 => VoxelData::Float64(vec![0.0; n]),
            ScalarKind::Unspecified => {
                return Err(VoxelFieldError::UnsupportedScalarKind(kind));
            }
        };
        Ok(Self { dims, data })
    }

    /// Returns the scalar kind stored in this buffer.
    #[must_use]
    pub fn kind(&self) -> ScalarKind {
        match self.data {
            VoxelData::Unorm8(_) => ScalarKind::Unorm8,
            VoxelData::Float32(_) => ScalarKind::Float32,
            VoxelData::Float64(_) => ScalarKind::Float64,
        }
    }

    /// Returns the grid dimensions.
    #[must_use]
    pub fn dims(&self) -> UVec3 {
        self.dims
    }

    /// Total number of voxels.
    #[must_use]
    pub fn num_voxels(&self) -> usize {
        self.dims.x as usize * self.dims.y as usize * self.dims.z as usize
    }

    /// Raw bytes of the whole grid, in row-major voxel order.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match &self.data {
            VoxelData::Unorm8(v) => v.as_slice(),
            VoxelData::Float32(v) => bytemuck::cast_slice(v.as_slice()),
            VoxelData::Float64(v) => bytemuck::cast_slice(v.as_slice()),
        }
    }

    /// Typed view of the whole grid.
    ///
    /// # Panics
    ///
    /// Panics if `T` does not match the buffer's scalar kind.
    #[must_use]
    pub fn typed<T: ScalarValue>(&self) -> &[T] {
        assert_eq!(
            T::KIND,
            self.kind(),
            "typed access with mismatched scalar kind"
        );
        bytemuck::cast_slice(self.as_bytes())
    }

    fn typed_mut<T: ScalarValue>(&mut self) -> &mut [T] {
        assert_eq!(
            T::KIND,
            self.kind(),
            "typed access with mismatched scalar kind"
        );
        match &mut self.data {
            VoxelData::Unorm8(v) => bytemuck::cast_slice_mut(v.as_mut_slice()),
            VoxelData::Float32(v) => bytemuck::cast_slice_mut(v.as_mut_slice()),
            VoxelData::Float64(v) => bytemuck::cast_slice_mut(v.as_mut_slice()),
        }
    }

    /// Row-major linear index of voxel `(x, y, z)`.
    #[must_use]
    pub fn index(&self, x: u32, y: u32, z: u32) -> usize {
        debug_assert!(x < self.dims.x && y < self.dims.y && z < self.dims.z);
        (z as usize * self.dims.y as usize + y as usize) * self.dims.x as usize + x as usize
    }

    /// Reads voxel `(x, y, z)` as its storage type.
    #[must_use]
    pub fn get<T: ScalarValue>(&self, x: u32, y: u32, z: u32) -> T {
        self.typed::<T>()[self.index(x, y, z)]
    }

    /// Reads voxel `(x, y, z)` as the normalized f64 sample used by
    /// interpolation.
    #[must_use]
    pub fn sample(&self, x: u32, y: u32, z: u32) -> f64 {
        let idx = self.index(x, y, z);
        match &self.data {
            VoxelData::Unorm8(v) => v[idx].to_sample(),
            VoxelData::Float32(v) => v[idx].to_sample(),
            VoxelData::Float64(v) => v[idx].to_sample(),
        }
    }

    /// Replaces the axis-aligned region at `origin` with extent `extent`.
    ///
    /// `values` is a dense block of `extent.x * extent.y * extent.z` voxels
    /// in the same raster order as the buffer itself: x fastest, then y,
    /// then z.
    ///
    /// # Panics
    ///
    /// Violating the region contract is a programming error, not a
    /// recoverable condition: panics if `T` does not match the buffer's
    /// scalar kind, if `values` does not hold exactly the extent's voxel
    /// count, or if `origin + extent` exceeds the buffer dimensions.
    pub fn set_region<T: ScalarValue>(&mut self, origin: UVec3, extent: UVec3, values: &[T]) {
        let dims = self.dims;
        assert!(
            u64::from(origin.x) + u64::from(extent.x) <= u64::from(dims.x)
                && u64::from(origin.y) + u64::from(extent.y) <= u64::from(dims.y)
                && u64::from(origin.z) + u64::from(extent.z) <= u64::from(dims.z),
            "region {origin}+{extent} out of bounds for buffer {dims}"
        );
        let count = extent.x as usize * extent.y as usize * extent.z as usize;
        assert_eq!(values.len(), count, "region source length mismatch");

        let row = dims.x as usize;
        let slab = row * dims.y as usize;
        let dst = self.typed_mut::<T>();
        for dz in 0..extent.z {
            for dy in 0..extent.y {
                let src = ((dz as usize * extent.y as usize) + dy as usize) * extent.x as usize;
                let off = (origin.z + dz) as usize * slab
                    + (origin.y + dy) as usize * row
                    + origin.x as usize;
                dst[off..off + extent.x as usize]
                    .copy_from_slice(&values[src..src + extent.x as usize]);
            }
        }
    }
}
