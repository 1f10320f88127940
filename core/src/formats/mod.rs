//! Volume readers
//!
//! Each supported on-disk format decodes into a dense `f64` array plus a
//! header implementing [`VolumeHeader`]. Format selection is by file-name
//! suffix (see [`VolumeFormat`]).

pub mod mgh;
pub mod nii;

use crate::error::{Result, VolpreviewError};
use crate::types::{Volume, VolumeData, VolumeFormat, VoxelGeometry};
use flate2::read::GzDecoder;
use log::debug;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub use mgh::MghHeader;
pub use nii::{NiftiImageHeader, SpatialUnits};

/// Shared view of a format-specific image header
pub trait VolumeHeader: fmt::Debug {
    /// Format name for diagnostics
    fn format_name(&self) -> &'static str;

    /// Length unit of the voxel spacing, if the format records one
    fn units_of_length(&self) -> Option<&str>;

    /// Physical size of one voxel
    fn voxel_geometry(&self) -> VoxelGeometry;
}

/// Loads a volume from `path`
///
/// # Errors
///
/// Returns an error if:
/// - The suffix does not name a readable format (MINC included)
/// - The file cannot be read or decompressed
/// - The header or voxel data is malformed
/// - The image has a fourth axis longer than 1
pub fn open_volume(path: &Path) -> Result<Volume> {
    let format = VolumeFormat::from_path(path)
        .ok_or_else(|| VolpreviewError::UnsupportedFormat(path.to_path_buf()))?;
    debug!("Reading {} as {}", path.display(), format);

    match format {
        VolumeFormat::Nifti { .. } => {
            let (data, header) = nii::read(path)?;
            Ok(Volume::new(VolumeData::from_dyn(data)?, Box::new(header)))
        }
        VolumeFormat::Mgh { compressed } => {
            let bytes = read_file_bytes(path, compressed)?;
            let (data, header) = mgh::decode(&bytes)?;
            Ok(Volume::new(VolumeData::from_dyn(data)?, Box::new(header)))
        }
        VolumeFormat::Minc => Err(VolpreviewError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Reads a whole file, gunzipping it when `compressed`
fn read_file_bytes(path: &Path, compressed: bool) -> Result<Vec<u8>> {
    let mut file = BufReader::new(File::open(path)?);
    let mut bytes = Vec::new();
    if compressed {
        GzDecoder::new(file).read_to_end(&mut bytes)?;
    } else {
        file.read_to_end(&mut bytes)?;
    }
    Ok(bytes)
}

/// Checks that `bytes` holds `count` elements of `size` bytes from `offset`
fn voxel_bytes(bytes: &[u8], offset: usize, count: usize, size: usize) -> Result<&[u8]> {
    let len = count
        .checked_mul(size)
        .ok_or_else(|| VolpreviewError::InvalidHeader("voxel count overflows".to_string()))?;
    offset
        .checked_add(len)
        .and_then(|end| bytes.get(offset..end))
        .ok_or_else(|| {
            VolpreviewError::InvalidHeader(format!(
                "truncated voxel data: need {} bytes at offset {}, file has {}",
                len,
                offset,
                bytes.len()
            ))
        })
}
