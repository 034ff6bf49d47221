//! RAW grid ingestion.
//!
//! A RAW grid file is a headerless flat binary dump of exactly
//! `x * y * z` voxels of one scalar kind, row-major (x fastest, then y,
//! then z), in native byte order. The loader reads one scan line at a time
//! in strictly increasing z-then-y order, with no seeking; a line that
//! comes up short is a data-integrity error, while surplus bytes past the
//! last voxel are ignored.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use bytemuck::Zeroable;
use glam::UVec3;
use voxelfield_core::error::{Result, VoxelFieldError};
use voxelfield_core::scalar::{ScalarKind, ScalarValue};
use voxelfield_core::VoxelBuffer;

/// Loads a RAW grid file into a freshly allocated buffer.
///
/// # Errors
///
/// Returns [`VoxelFieldError::Io`] if the file cannot be opened or read,
/// and [`VoxelFieldError::TruncatedFile`] if it ends before `dims` voxels
/// were read. Dimension and kind validation is as in
/// [`VoxelBuffer::allocate`].
pub fn load_raw(path: impl AsRef<Path>, dims: UVec3, kind: ScalarKind) -> Result<VoxelBuffer> {
    match kind {
        ScalarKind::Unorm8 => load_raw_typed::<u8>(path.as_ref(), dims),
        ScalarKind::Float32 => load_raw_typed::<f32>(path.as_ref(), dims),
        ScalarKind::Float64 => load_raw_typed::<f64>(path.as_ref(), dims),
        ScalarKind::Unspecified => Err(VoxelFieldError::UnsupportedScalarKind(kind)),
    }
}

fn load_raw_typed<T: ScalarValue>(path: &Path, dims: UVec3) -> Result<VoxelBuffer> {
    let mut buffer = VoxelBuffer::allocate(dims, T::KIND)?;
    let mut reader = BufReader::new(File::open(path)?);

    let mut line = vec![T::zeroed(); dims.x as usize];
    let extent = UVec3::new(dims.x, 1, 1);
    for z in 0..dims.z {
        for y in 0..dims.y {
            reader
                .read_exact(bytemuck::cast_slice_mut(&mut line))
                .map_err(|err| line_read_error(err, path, dims, y, z))?;
            buffer.set_region(UVec3::new(0, y, z), extent, &line);
        }
    }

    log::debug!(
        "loaded RAW grid '{}': {} voxels of {}",
        path.display(),
        buffer.num_voxels(),
        buffer.kind()
    );
    Ok(buffer)
}

fn line_read_error(err: std::io::Error, path: &Path, dims: UVec3, y: u32, z: u32) -> VoxelFieldError {
    if err.kind() == ErrorKind::UnexpectedEof {
        let lines_read = u64::from(z) * u64::from(dims.y) + u64::from(y);
        VoxelFieldError::TruncatedFile {
            path: path.to_path_buf(),
            expected_voxels: u64::from(dims.x) * u64::from(dims.y) * u64::from(dims.z),
            read_voxels: lines_read * u64::from(dims.x),
        }
    } else {
        VoxelFieldError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn raw_file(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_sequential_floats() {
        let values: Vec<f32> = (0..64).map(|i| i as f32).collect();
        let file = raw_file(bytemuck::cast_slice(&values));

        let buffer = load_raw(file.path(), UVec3::splat(4), ScalarKind::Float32).unwrap();
        for z in 0..4 {
            for y in 0..4 {
                for x in 0..4 {
                    assert_eq!(buffer.get::<f32>(x, y, z), (x + 4 * y + 16 * z) as f32);
                }
            }
        }
    }

    #[test]
    fn test_round_trip_preserves_bytes_for_every_kind() {
        for kind in [ScalarKind::Unorm8, ScalarKind::Float32, ScalarKind::Float64] {
            let bytes: Vec<u8> = (0..8 * kind.byte_width()).map(|i| i as u8).collect();
            let file = raw_file(&bytes);

            let buffer = load_raw(file.path(), UVec3::new(2, 2, 2), kind).unwrap();
            assert_eq!(buffer.as_bytes(), &bytes[..], "kind {kind}");
        }
    }

    #[test]
    fn test_truncated_file_is_a_data_integrity_error() {
        let values: Vec<f32> = (0..40).map(|i| i as f32).collect();
        let file = raw_file(bytemuck::cast_slice(&values));

        let err = load_raw(file.path(), UVec3::splat(4), ScalarKind::Float32).unwrap_err();
        match err {
            VoxelFieldError::TruncatedFile {
                expected_voxels,
                read_voxels,
                ..
            } => {
                assert_eq!(expected_voxels, 64);
                // 10 whole scan lines of 4 voxels fit in 40 values
                assert_eq!(read_voxels, 40);
            }
            other => panic!("expected TruncatedFile, got {other:?}"),
        }
    }

    #[test]
    fn test_surplus_bytes_are_ignored() {
        let values: Vec<f32> = (0..100).map(|i| i as f32).collect();
        let file = raw_file(bytemuck::cast_slice(&values));

        let buffer = load_raw(file.path(), UVec3::splat(4), ScalarKind::Float32).unwrap();
        assert_eq!(buffer.get::<f32>(3, 3, 3), 63.0);
    }

    #[test]
    fn test_unreadable_file_is_an_io_error() {
        let err = load_raw("/no/such/file.raw", UVec3::splat(4), ScalarKind::Unorm8).unwrap_err();
        assert!(matches!(err, VoxelFieldError::Io(_)));
    }
}
