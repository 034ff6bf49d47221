//! Trilinear grid resampling.
//!
//! Each target voxel coordinate maps to a normalized position in `[0,1]^3`
//! via `coord / (dim - 1)` per axis; an axis of dimension 1 degenerates to
//! position 0. The source is sampled at that position by trilinear
//! interpolation over the 8 nearest lattice points, clamped to the source
//! bounds, and the interpolated value is quantized with the target kind's
//! rule before being written one scan line at a time, exactly as the RAW
//! loader writes.

use bytemuck::Zeroable;
use glam::{DVec3, UVec3};
use voxelfield_core::error::Result;
use voxelfield_core::scalar::{ScalarKind, ScalarValue};
use voxelfield_core::VoxelBuffer;

/// Fills an already-allocated target buffer by resampling `source`.
pub fn resample_into(target: &mut VoxelBuffer, source: &VoxelBuffer) {
    match target.kind() {
        ScalarKind::Unorm8 => resample_typed::<u8>(target, source),
        ScalarKind::Float32 => resample_typed::<f32>(target, source),
        ScalarKind::Float64 => resample_typed::<f64>(target, source),
        ScalarKind::Unspecified => unreachable!("buffers cannot be allocated as unspecified"),
    }
}

/// Allocates a buffer of `dims` and `kind` and fills it by resampling
/// `source`.
pub fn resample(source: &VoxelBuffer, dims: UVec3, kind: ScalarKind) -> Result<VoxelBuffer> {
    let mut target = VoxelBuffer::allocate(dims, kind)?;
    resample_into(&mut target, source);
    Ok(target)
}

/// Trilinear sample of `source` at a normalized position in `[0,1]^3`.
///
/// Positions at or beyond a boundary sample the boundary voxel.
#[must_use]
pub fn sample_normalized(source: &VoxelBuffer, pos: DVec3) -> f64 {
    let dims = source.dims();
    sample_lattice(
        source,
        DVec3::new(
            pos.x * f64::from(dims.x - 1),
            pos.y * f64::from(dims.y - 1),
            pos.z * f64::from(dims.z - 1),
        ),
    )
}

fn resample_typed<T: ScalarValue>(target: &mut VoxelBuffer, source: &VoxelBuffer) {
    let dims = target.dims();
    let src_dims = source.dims();
    let mut line = vec![T::zeroed(); dims.x as usize];
    let extent = UVec3::new(dims.x, 1, 1);
    for z in 0..dims.z {
        let pz = source_pos(z, dims.z, src_dims.z);
        for y in 0..dims.y {
            let py = source_pos(y, dims.y, src_dims.y);
            for (x, out) in line.iter_mut().enumerate() {
                let px = source_pos(x as u32, dims.x, src_dims.x);
                *out = T::quantize(sample_lattice(source, DVec3::new(px, py, pz)));
            }
            target.set_region(UVec3::new(0, y, z), extent, &line);
        }
    }
}

/// Source lattice coordinate for target `coord`: the normalized position
/// `coord / (target_dim - 1)` scaled by `source_dim - 1`, fused into one
/// expression so that identity resampling lands on lattice points exactly.
/// A single-voxel target axis degenerates to position 0.
fn source_pos(coord: u32, target_dim: u32, source_dim: u32) -> f64 {
    if target_dim <= 1 {
        0.0
    } else {
        f64::from(coord) * f64::from(source_dim - 1) / f64::from(target_dim - 1)
    }
}

/// Trilinear interpolation over the 8 lattice points surrounding `p`,
/// clamped to the source bounds.
fn sample_lattice(source: &VoxelBuffer, p: DVec3) -> f64 {
    let dims = source.dims();
    let (x0, x1, fx) = lattice_axis(p.x, dims.x);
    let (y0, y1, fy) = lattice_axis(p.y, dims.y);
    let (z0, z1, fz) = lattice_axis(p.z, dims.z);

    let c00 = lerp(source.sample(x0, y0, z0), source.sample(x1, y0, z0), fx);
    let c10 = lerp(source.sample(x0, y1, z0), source.sample(x1, y1, z0), fx);
    let c01 = lerp(source.sample(x0, y0, z1), source.sample(x1, y0, z1), fx);
    let c11 = lerp(source.sample(x0, y1, z1), source.sample(x1, y1, z1), fx);

    let c0 = lerp(c00, c10, fy);
    let c1 = lerp(c01, c11, fy);
    lerp(c0, c1, fz)
}

/// Clamped lattice neighbors and fractional weight along one axis.
fn lattice_axis(p: f64, dim: u32) -> (u32, u32, f64) {
    let hi = dim - 1;
    let p = p.clamp(0.0, f64::from(hi));
    let i0 = (p.floor() as u32).min(hi);
    let i1 = (i0 + 1).min(hi);
    (i0, i1, p - f64::from(i0))
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn sequential_grid(dims: UVec3) -> VoxelBuffer {
        let mut buffer = VoxelBuffer::allocate(dims, ScalarKind::Float32).unwrap();
        let values: Vec<f32> = (0..buffer.num_voxels()).map(|i| i as f32).collect();
        buffer.set_region(UVec3::ZERO, dims, &values);
        buffer
    }

    #[test]
    fn test_identity_resample_is_exact_for_floats() {
        let dims = UVec3::new(5, 3, 4);
        let source = sequential_grid(dims);
        let target = resample(&source, dims, ScalarKind::Float32).unwrap();
        assert_eq!(source.typed::<f32>(), target.typed::<f32>());
    }

    #[test]
    fn test_identity_resample_is_exact_for_awkward_dims() {
        // 49 divides badly in binary floating point; the fused position
        // computation must still land on lattice points exactly.
        let dims = UVec3::new(50, 1, 1);
        let source = sequential_grid(dims);
        let target = resample(&source, dims, ScalarKind::Float32).unwrap();
        assert_eq!(source.typed::<f32>(), target.typed::<f32>());
    }

    #[test]
    fn test_identity_resample_unorm8_within_one_unit() {
        let dims = UVec3::splat(4);
        let mut source = VoxelBuffer::allocate(dims, ScalarKind::Unorm8).unwrap();
        let values: Vec<u8> = (0..64u32).map(|i| (i * 4) as u8).collect();
        source.set_region(UVec3::ZERO, dims, &values);

        let target = resample(&source, dims, ScalarKind::Unorm8).unwrap();
        for (s, t) in source.typed::<u8>().iter().zip(target.typed::<u8>()) {
            assert!(s.abs_diff(*t) <= 1, "source {s} vs target {t}");
        }
    }

    #[test]
    fn test_downsample_corners_hit_source_corners() {
        let source = sequential_grid(UVec3::splat(4));
        let target = resample(&source, UVec3::splat(2), ScalarKind::Float32).unwrap();

        assert_eq!(target.get::<f32>(0, 0, 0), 0.0);
        assert_eq!(target.get::<f32>(1, 0, 0), 3.0);
        assert_eq!(target.get::<f32>(0, 1, 0), 12.0);
        assert_eq!(target.get::<f32>(1, 1, 1), 63.0);
    }

    #[test]
    fn test_upsample_midpoint_averages_neighbors() {
        let dims = UVec3::new(2, 1, 1);
        let mut source = VoxelBuffer::allocate(dims, ScalarKind::Float32).unwrap();
        source.set_region(UVec3::ZERO, dims, &[10.0f32, 20.0]);

        let target = resample(&source, UVec3::new(3, 1, 1), ScalarKind::Float32).unwrap();
        assert_eq!(target.get::<f32>(0, 0, 0), 10.0);
        assert_eq!(target.get::<f32>(1, 0, 0), 15.0);
        assert_eq!(target.get::<f32>(2, 0, 0), 20.0);
    }

    #[test]
    fn test_degenerate_target_axes_sample_position_zero() {
        let source = sequential_grid(UVec3::splat(4));

        let target = resample(&source, UVec3::new(1, 1, 1), ScalarKind::Float32).unwrap();
        assert_eq!(target.get::<f32>(0, 0, 0), 0.0);

        // Only the y axis is degenerate; x and z still span the source
        let target = resample(&source, UVec3::new(2, 1, 2), ScalarKind::Float32).unwrap();
        assert_eq!(target.get::<f32>(0, 0, 0), 0.0);
        assert_eq!(target.get::<f32>(1, 0, 0), 3.0);
        assert_eq!(target.get::<f32>(1, 0, 1), 51.0);
    }

    #[test]
    fn test_sample_normalized_probe() {
        let dims = UVec3::new(2, 1, 1);
        let mut source = VoxelBuffer::allocate(dims, ScalarKind::Float32).unwrap();
        source.set_region(UVec3::ZERO, dims, &[10.0f32, 20.0]);

        assert_eq!(sample_normalized(&source, DVec3::new(0.0, 0.0, 0.0)), 10.0);
        assert_eq!(sample_normalized(&source, DVec3::new(0.5, 0.0, 0.0)), 15.0);
        assert_eq!(sample_normalized(&source, DVec3::new(1.0, 0.0, 0.0)), 20.0);
        // Positions beyond the boundary clamp to the boundary voxel
        assert_eq!(sample_normalized(&source, DVec3::new(1.5, 0.0, 0.0)), 20.0);
    }

    #[test]
    fn test_single_voxel_source() {
        let mut source = VoxelBuffer::allocate(UVec3::ONE, ScalarKind::Float32).unwrap();
        source.set_region(UVec3::ZERO, UVec3::ONE, &[7.5f32]);

        let target = resample(&source, UVec3::splat(3), ScalarKind::Float32).unwrap();
        assert!(target.typed::<f32>().iter().all(|&v| v == 7.5));
    }

    fn source_grid() -> impl Strategy<Value = (UVec3, Vec<f32>)> {
        (1u32..=4, 1u32..=4, 1u32..=4).prop_flat_map(|(x, y, z)| {
            let n = (x * y * z) as usize;
            (
                Just(UVec3::new(x, y, z)),
                prop::collection::vec(-100.0f32..100.0, n),
            )
        })
    }

    proptest! {
        /// Interpolated values stay inside the convex hull of the 8
        /// sampled lattice values.
        #[test]
        fn prop_interpolation_stays_in_corner_hull(
            (src_dims, values) in source_grid(),
            tx in 1u32..=5,
            ty in 1u32..=5,
            tz in 1u32..=5,
        ) {
            let mut source = VoxelBuffer::allocate(src_dims, ScalarKind::Float32).unwrap();
            source.set_region(UVec3::ZERO, src_dims, &values);

            let dims = UVec3::new(tx, ty, tz);
            let target = resample(&source, dims, ScalarKind::Float32).unwrap();

            for z in 0..dims.z {
                for y in 0..dims.y {
                    for x in 0..dims.x {
                        let p = DVec3::new(
                            source_pos(x, dims.x, src_dims.x),
                            source_pos(y, dims.y, src_dims.y),
                            source_pos(z, dims.z, src_dims.z),
                        );
                        let (x0, x1, _) = lattice_axis(p.x, src_dims.x);
                        let (y0, y1, _) = lattice_axis(p.y, src_dims.y);
                        let (z0, z1, _) = lattice_axis(p.z, src_dims.z);

                        let mut lo = f64::INFINITY;
                        let mut hi = f64::NEG_INFINITY;
                        for &cz in &[z0, z1] {
                            for &cy in &[y0, y1] {
                                for &cx in &[x0, x1] {
                                    let c = source.sample(cx, cy, cz);
                                    lo = lo.min(c);
                                    hi = hi.max(c);
                                }
                            }
                        }

                        let v = f64::from(target.get::<f32>(x, y, z));
                        prop_assert!(
                            v >= lo - 1e-4 && v <= hi + 1e-4,
                            "voxel ({x},{y},{z}) = {v} outside hull [{lo}, {hi}]"
                        );
                    }
                }
            }
        }
    }
}
