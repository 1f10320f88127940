//! NIfTI-1 reader (`.nii`, `.nii.gz`)

use super::VolumeHeader;
use crate::error::{Result, VolpreviewError};
use crate::types::VoxelGeometry;
use log::debug;
use ndarray::ArrayD;
use nifti::header::MAGIC_CODE_NI1;
use nifti::{IntoNdArray, NiftiHeader, NiftiObject, ReaderOptions};
use std::path::Path;

/// Spatial unit code stored in the low bits of `xyzt_units`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpatialUnits {
    #[default]
    Unknown,
    Meter,
    Millimeter,
    Micrometer,
}

impl SpatialUnits {
    /// Decodes the spatial part of an `xyzt_units` byte
    pub fn from_code(code: u8) -> Self {
        match code & 0x07 {
            1 => SpatialUnits::Meter,
            2 => SpatialUnits::Millimeter,
            3 => SpatialUnits::Micrometer,
            _ => SpatialUnits::Unknown,
        }
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            SpatialUnits::Unknown => "unknown",
            SpatialUnits::Meter => "meter",
            SpatialUnits::Millimeter => "mm",
            SpatialUnits::Micrometer => "micron",
        }
    }
}

/// Header of a loaded NIfTI-1 image
#[derive(Debug, Clone)]
pub struct NiftiImageHeader {
    // `NiftiHeader` is a large stack object.
    header: Box<NiftiHeader>,
}

impl NiftiImageHeader {
    /// Wraps a decoded header
    pub fn new(header: NiftiHeader) -> Self {
        Self {
            header: Box::new(header),
        }
    }

    /// The raw header fields
    pub fn raw(&self) -> &NiftiHeader {
        &self.header
    }

    /// Spacing of the three spatial axes, `pixdim[1..=3]`
    pub fn spacing(&self) -> [f64; 3] {
        let [_, x, y, z, ..] = self.header.pixdim;
        [f64::from(x), f64::from(y), f64::from(z)]
    }

    /// Unit of [`Self::spacing`]
    pub fn spatial_units(&self) -> SpatialUnits {
        SpatialUnits::from_code(self.header.xyzt_units)
    }
}

impl VolumeHeader for NiftiImageHeader {
    fn format_name(&self) -> &'static str {
        "NIfTI"
    }

    fn units_of_length(&self) -> Option<&str> {
        Some(self.spatial_units().simple_name())
    }

    fn voxel_geometry(&self) -> VoxelGeometry {
        VoxelGeometry::from_spacing(&self.spacing())
    }
}

/// Reads a single-file NIfTI-1 image, gunzipping `.gz` files
///
/// The returned array is indexed `[x, y, z, ...]` following the header's
/// axis order, with `scl_slope`/`scl_inter` applied when the slope is
/// non-zero. Intensities are widened to `f64` whatever the stored type.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the header is malformed,
/// the voxel data is truncated, or the header belongs to a two-file
/// (`ni1`) header/image pair.
pub fn read(path: &Path) -> Result<(ArrayD<f64>, NiftiImageHeader)> {
    let header = NiftiHeader::from_file(path)?;
    if header.magic == *MAGIC_CODE_NI1 {
        return Err(VolpreviewError::InvalidHeader(
            "two-file (ni1) NIfTI images are not supported".to_string(),
        ));
    }

    let obj = ReaderOptions::new().read_file(path)?;
    let header = obj.header().clone();
    debug!(
        "NIfTI dim {:?}, datatype {}, pixdim {:?}",
        header.dim, header.datatype, header.pixdim
    );

    let data = obj.into_volume().into_ndarray::<f64>()?;
    Ok((data, NiftiImageHeader::new(header)))
}
