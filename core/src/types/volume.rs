use crate::error::{Result, VolpreviewError};
use crate::formats::{self, VolumeHeader};
use crate::types::VoxelGeometry;
use ndarray::{Array3, Array4, ArrayD, ArrayView3, ArrayViewD, Axis, Ix3, Ix4};
use std::path::Path;

/// Narrows an array of arbitrary rank to its three spatial axes
///
/// A trailing axis of length 1 is dropped. Any other rank, or a trailing axis
/// longer than 1, is rejected.
///
/// # Errors
///
/// - [`VolpreviewError::UnsupportedDimensionality`] for ranks other than 3
///   and for 4D arrays whose last axis is not a singleton
/// - [`VolpreviewError::EmptyVolume`] if a spatial axis has length zero
pub fn spatial_view(data: ArrayViewD<'_, f64>) -> Result<ArrayView3<'_, f64>> {
    let shape = data.shape().to_vec();

    let spatial = match shape.len() {
        3 => data.into_dimensionality::<Ix3>(),
        4 if shape[3] == 1 => data.index_axis_move(Axis(3), 0).into_dimensionality::<Ix3>(),
        _ => return Err(VolpreviewError::unsupported_shape(&shape)),
    }
    .map_err(|_| VolpreviewError::unsupported_shape(&shape))?;

    if spatial.is_empty() {
        return Err(VolpreviewError::EmptyVolume { shape });
    }
    Ok(spatial)
}

/// Voxel intensities of a loaded volume
///
/// Resolved once at load time: a volume either is three-dimensional or
/// carries a singleton fourth axis. True time series never get here.
#[derive(Debug, Clone, PartialEq)]
pub enum VolumeData {
    /// `[x, y, z]`
    ThreeD(Array3<f64>),
    /// `[x, y, z, 1]`
    ReducibleFourD(Array4<f64>),
}

impl VolumeData {
    /// Classifies a decoded array
    ///
    /// # Errors
    ///
    /// Same conditions as [`spatial_view`].
    pub fn from_dyn(data: ArrayD<f64>) -> Result<Self> {
        // Run the same checks the renderer applies.
        spatial_view(data.view())?;

        let shape = data.shape().to_vec();
        let classified = match shape.len() {
            3 => data.into_dimensionality::<Ix3>().map(VolumeData::ThreeD),
            _ => data
                .into_dimensionality::<Ix4>()
                .map(VolumeData::ReducibleFourD),
        };
        classified.map_err(|_| VolpreviewError::unsupported_shape(&shape))
    }

    /// Full-rank view of the intensities
    pub fn view(&self) -> ArrayViewD<'_, f64> {
        match self {
            VolumeData::ThreeD(data) => data.view().into_dyn(),
            VolumeData::ReducibleFourD(data) => data.view().into_dyn(),
        }
    }

    /// Spatial view with any singleton fourth axis dropped
    pub fn spatial(&self) -> ArrayView3<'_, f64> {
        match self {
            VolumeData::ThreeD(data) => data.view(),
            VolumeData::ReducibleFourD(data) => data.index_axis(Axis(3), 0),
        }
    }

    /// Shape as stored in the file
    pub fn shape(&self) -> &[usize] {
        match self {
            VolumeData::ThreeD(data) => data.shape(),
            VolumeData::ReducibleFourD(data) => data.shape(),
        }
    }
}

/// An image loaded from disk: intensities plus its format-specific header
#[derive(Debug)]
pub struct Volume {
    data: VolumeData,
    header: Box<dyn VolumeHeader>,
}

impl Volume {
    /// Creates a volume from decoded parts
    pub fn new(data: VolumeData, header: Box<dyn VolumeHeader>) -> Self {
        Self { data, header }
    }

    /// Loads a volume, choosing the reader from the file-name suffix
    ///
    /// # Errors
    ///
    /// Returns an error if the format is unsupported, the file cannot be
    /// read, the header is malformed or the image is a true time series.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        formats::open_volume(path.as_ref())
    }

    /// Voxel intensities
    pub fn data(&self) -> &VolumeData {
        &self.data
    }

    /// Format-specific header
    pub fn header(&self) -> &dyn VolumeHeader {
        self.header.as_ref()
    }

    /// Physical size of one voxel
    pub fn geometry(&self) -> VoxelGeometry {
        self.header.voxel_geometry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    #[test]
    fn test_spatial_view_three_d() {
        let data = ArrayD::<f64>::zeros(IxDyn(&[2, 3, 4]));
        let view = spatial_view(data.view()).unwrap();
        assert_eq!(view.shape(), &[2, 3, 4]);
    }

    #[test]
    fn test_spatial_view_drops_singleton_time_axis() {
        let mut data = ArrayD::<f64>::zeros(IxDyn(&[2, 3, 4, 1]));
        data[[1, 2, 3, 0]] = 7.0;
        let view = spatial_view(data.view()).unwrap();
        assert_eq!(view.shape(), &[2, 3, 4]);
        assert_eq!(view[[1, 2, 3]], 7.0);
    }

    #[test]
    fn test_spatial_view_rejects_time_series() {
        let data = ArrayD::<f64>::zeros(IxDyn(&[2, 3, 4, 2]));
        let err = spatial_view(data.view()).unwrap_err();
        assert!(err.to_string().starts_with("4D image not supported"));
    }

    #[test]
    fn test_spatial_view_rejects_other_ranks() {
        for shape in [vec![4, 4], vec![2, 2, 2, 1, 1]] {
            let data = ArrayD::<f64>::zeros(IxDyn(&shape));
            assert!(matches!(
                spatial_view(data.view()),
                Err(VolpreviewError::UnsupportedDimensionality { .. })
            ));
        }
    }

    #[test]
    fn test_spatial_view_rejects_empty_axis() {
        let data = ArrayD::<f64>::zeros(IxDyn(&[2, 0, 4]));
        assert!(matches!(
            spatial_view(data.view()),
            Err(VolpreviewError::EmptyVolume { .. })
        ));
    }

    #[test]
    fn test_volume_data_from_dyn() {
        let three = VolumeData::from_dyn(ArrayD::zeros(IxDyn(&[2, 2, 2]))).unwrap();
        assert!(matches!(three, VolumeData::ThreeD(_)));

        let four = VolumeData::from_dyn(ArrayD::zeros(IxDyn(&[2, 3, 5, 1]))).unwrap();
        assert!(matches!(four, VolumeData::ReducibleFourD(_)));
        assert_eq!(four.shape(), &[2, 3, 5, 1]);
        assert_eq!(four.spatial().shape(), &[2, 3, 5]);
        assert_eq!(four.view().ndim(), 4);

        assert!(VolumeData::from_dyn(ArrayD::zeros(IxDyn(&[2, 3, 5, 3]))).is_err());
    }
}
