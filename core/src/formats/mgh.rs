//! FreeSurfer MGH reader (`.mgh`, `.mgz`)

use super::{voxel_bytes, VolumeHeader};
use crate::error::{Result, VolpreviewError};
use crate::types::VoxelGeometry;
use byteorder::{BigEndian, ByteOrder};
use ndarray::{ArrayD, IxDyn, ShapeBuilder};

/// Byte offset of the voxel data
pub const DATA_OFFSET: usize = 284;

const SPACING_OFFSET: usize = 30;
const MDC_OFFSET: usize = 42;
const CENTER_OFFSET: usize = 78;

/// Direction cosines used when the header carries no valid orientation,
/// as columns `x`, `y`, `z` in RAS
const DEFAULT_MDC: [[f64; 3]; 3] = [[-1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]];

/// MGH voxel storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MghDataType {
    UChar,
    Int32,
    Float32,
    Int16,
}

impl MghDataType {
    /// Parses from the header `type` field
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(MghDataType::UChar),
            1 => Ok(MghDataType::Int32),
            3 => Ok(MghDataType::Float32),
            4 => Ok(MghDataType::Int16),
            other => Err(VolpreviewError::InvalidHeader(format!(
                "unsupported MGH data type {}",
                other
            ))),
        }
    }

    /// Size of each element in bytes
    pub const fn byte_size(self) -> usize {
        match self {
            MghDataType::UChar => 1,
            MghDataType::Int16 => 2,
            MghDataType::Int32 | MghDataType::Float32 => 4,
        }
    }
}

/// Decoded MGH header
#[derive(Debug, Clone, PartialEq)]
pub struct MghHeader {
    /// `[width, height, depth]`
    pub dims: [usize; 3],

    /// Number of frames
    pub nframes: usize,

    /// Voxel storage type
    pub datatype: MghDataType,

    /// Voxel spacing in mm
    pub spacing: [f64; 3],

    /// Direction cosines, one column per voxel axis
    pub mdc: [[f64; 3]; 3],

    /// RAS coordinate of the volume centre
    pub center: [f64; 3],

    /// Whether the header recorded its own orientation
    pub good_ras: bool,
}

impl MghHeader {
    /// Parses the fixed-size MGH header
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is shorter than the header, a dimension
    /// is not positive or the data type is unknown.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < DATA_OFFSET {
            return Err(VolpreviewError::InvalidHeader(format!(
                "MGH header too short: {} bytes",
                bytes.len()
            )));
        }

        let int = |offset: usize| BigEndian::read_i32(&bytes[offset..offset + 4]);
        let float = |offset: usize| f64::from(BigEndian::read_f32(&bytes[offset..offset + 4]));

        let version = int(0);
        if version != 1 {
            return Err(VolpreviewError::InvalidHeader(format!(
                "unsupported MGH version {}",
                version
            )));
        }

        let mut extents = [0usize; 4];
        for (i, extent) in extents.iter_mut().enumerate() {
            let value = int(4 + i * 4);
            if value <= 0 {
                return Err(VolpreviewError::InvalidHeader(format!(
                    "MGH dimension {} must be positive, got {}",
                    i, value
                )));
            }
            *extent = value as usize;
        }

        let datatype = MghDataType::from_code(int(20))?;
        let good_ras = BigEndian::read_i16(&bytes[28..30]) > 0;

        let (spacing, mdc, center) = if good_ras {
            let spacing = [0, 1, 2].map(|i| float(SPACING_OFFSET + i * 4));
            // Stored as x_r, x_a, x_s, y_r, ...; one column per voxel axis.
            let mdc = [0, 1, 2]
                .map(|col| [0, 1, 2].map(|row| float(MDC_OFFSET + (col * 3 + row) * 4)));
            let center = [0, 1, 2].map(|i| float(CENTER_OFFSET + i * 4));
            (spacing, mdc, center)
        } else {
            ([1.0; 3], DEFAULT_MDC, [0.0; 3])
        };

        Ok(Self {
            dims: [extents[0], extents[1], extents[2]],
            nframes: extents[3],
            datatype,
            spacing,
            mdc,
            center,
            good_ras,
        })
    }

    /// Voxel-to-RAS transform
    ///
    /// The linear part is the direction cosines scaled by spacing; the
    /// translation places the volume centre at `center`.
    pub fn affine(&self) -> [[f64; 4]; 4] {
        let mut affine = [[0.0; 4]; 4];
        for row in 0..3 {
            for col in 0..3 {
                affine[row][col] = self.mdc[col][row] * self.spacing[col];
            }
            let offset: f64 = (0..3)
                .map(|col| affine[row][col] * self.dims[col] as f64 / 2.0)
                .sum();
            affine[row][3] = self.center[row] - offset;
        }
        affine[3][3] = 1.0;
        affine
    }

    /// Array shape: 3D for a single frame, 4D otherwise
    pub fn shape(&self) -> Vec<usize> {
        let mut shape = self.dims.to_vec();
        if self.nframes != 1 {
            shape.push(self.nframes);
        }
        shape
    }
}

impl VolumeHeader for MghHeader {
    fn format_name(&self) -> &'static str {
        "MGH"
    }

    fn units_of_length(&self) -> Option<&str> {
        None
    }

    fn voxel_geometry(&self) -> VoxelGeometry {
        VoxelGeometry::from_affine(&self.affine())
    }
}

/// Decodes a complete (already decompressed) MGH file
///
/// Voxels are stored with the first axis fastest; the returned array is
/// indexed `[x, y, z]` or `[x, y, z, frame]`.
pub fn decode(bytes: &[u8]) -> Result<(ArrayD<f64>, MghHeader)> {
    let header = MghHeader::from_bytes(bytes)?;
    let shape = header.shape();
    let count: usize = shape.iter().product();
    let raw = voxel_bytes(bytes, DATA_OFFSET, count, header.datatype.byte_size())?;

    let values: Vec<f64> = match header.datatype {
        MghDataType::UChar => raw.iter().map(|&v| f64::from(v)).collect(),
        MghDataType::Int16 => raw
            .chunks_exact(2)
            .map(|c| f64::from(BigEndian::read_i16(c)))
            .collect(),
        MghDataType::Int32 => raw
            .chunks_exact(4)
            .map(|c| f64::from(BigEndian::read_i32(c)))
            .collect(),
        MghDataType::Float32 => raw
            .chunks_exact(4)
            .map(|c| f64::from(BigEndian::read_f32(c)))
            .collect(),
    };

    let data = ArrayD::from_shape_vec(IxDyn(&shape).f(), values)
        .map_err(|e| VolpreviewError::InvalidHeader(format!("voxel data: {}", e)))?;

    Ok((data, header))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{mgh_bytes, write_mgh};
    use crate::types::Volume;
    use tempfile::TempDir;

    fn ramp(shape: &[usize]) -> ArrayD<f64> {
        let count: usize = shape.iter().product();
        ArrayD::from_shape_vec(IxDyn(shape), (0..count).map(|v| v as f64).collect()).unwrap()
    }

    #[test]
    fn test_decode_preserves_axis_order() {
        let data = ramp(&[4, 3, 2]);
        let bytes = mgh_bytes(&data, [1.0, 1.0, 1.0]);
        let (decoded, header) = decode(&bytes).unwrap();

        assert_eq!(header.dims, [4, 3, 2]);
        assert_eq!(header.nframes, 1);
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_geometry_from_affine() {
        let data = ramp(&[2, 2, 2]);
        let bytes = mgh_bytes(&data, [1.0, 2.0, 3.0]);
        let (_, header) = decode(&bytes).unwrap();

        assert!(header.good_ras);
        assert!((header.voxel_geometry().voxel_volume() - 6.0).abs() < 1e-9);
        assert_eq!(header.units_of_length(), None);
    }

    #[test]
    fn test_affine_centres_volume() {
        let data = ramp(&[4, 4, 4]);
        let bytes = mgh_bytes(&data, [2.0, 2.0, 2.0]);
        let (_, header) = decode(&bytes).unwrap();
        let affine = header.affine();

        // The voxel at dims / 2 maps onto the centre (0, 0, 0).
        for row in affine.iter().take(3) {
            let mapped: f64 = (0..3).map(|col| row[col] * 2.0).sum::<f64>() + row[3];
            assert!(mapped.abs() < 1e-9);
        }
        assert_eq!(affine[3], [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_default_orientation_without_good_ras() {
        let data = ramp(&[2, 2, 2]);
        let mut bytes = mgh_bytes(&data, [5.0, 5.0, 5.0]);
        BigEndian::write_i16(&mut bytes[28..30], 0);

        let (_, header) = decode(&bytes).unwrap();
        assert!(!header.good_ras);
        assert_eq!(header.spacing, [1.0; 3]);
        assert_eq!(header.mdc, DEFAULT_MDC);
        assert_eq!(header.voxel_geometry().voxel_volume(), 1.0);
    }

    #[test]
    fn test_multi_frame_is_four_d() {
        let data = ramp(&[2, 2, 2, 3]);
        let bytes = mgh_bytes(&data, [1.0, 1.0, 1.0]);
        let (decoded, header) = decode(&bytes).unwrap();

        assert_eq!(header.nframes, 3);
        assert_eq!(decoded.shape(), &[2, 2, 2, 3]);
    }

    #[test]
    fn test_decode_rejects_bad_type() {
        let data = ramp(&[2, 2, 2]);
        let mut bytes = mgh_bytes(&data, [1.0, 1.0, 1.0]);
        BigEndian::write_i32(&mut bytes[20..24], 2);
        assert!(matches!(
            decode(&bytes),
            Err(VolpreviewError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_decode_truncated() {
        let data = ramp(&[3, 3, 3]);
        let bytes = mgh_bytes(&data, [1.0, 1.0, 1.0]);
        assert!(decode(&bytes[..bytes.len() - 1]).is_err());
        assert!(decode(&bytes[..100]).is_err());
    }

    #[test]
    fn test_open_mgz() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("aseg.mgz");
        let data = ramp(&[3, 2, 4]);
        write_mgh(&path, &data, [1.0, 1.0, 1.0]);

        let volume = Volume::open(&path).unwrap();
        assert_eq!(volume.data().view(), data.view());
        assert_eq!(volume.header().format_name(), "MGH");
    }
}
