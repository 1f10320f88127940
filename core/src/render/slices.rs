use crate::error::Result;
use crate::types::spatial_view;
use ndarray::{ArrayView2, ArrayViewD, Axis};

/// The three orthogonal centre slices of a volume
#[derive(Debug, Clone)]
pub struct SliceTriplet<'a> {
    /// Slice at `X / 2` along axis 0, shape `(Y, Z)`
    pub sagittal: ArrayView2<'a, f64>,

    /// Slice at `Y / 2` along axis 1, shape `(X, Z)`
    pub coronal: ArrayView2<'a, f64>,

    /// Slice at `Z / 2` along axis 2, shape `(X, Y)`
    pub axial: ArrayView2<'a, f64>,
}

impl<'a> SliceTriplet<'a> {
    /// Takes the centre slices of a 3D (or reducible 4D) array
    ///
    /// # Errors
    ///
    /// Returns an error if the array cannot be narrowed to three spatial axes.
    pub fn extract(data: ArrayViewD<'a, f64>) -> Result<Self> {
        let spatial = spatial_view(data)?;
        let (x, y, z) = spatial.dim();

        Ok(Self {
            sagittal: spatial.index_axis_move(Axis(0), x / 2),
            coronal: spatial.index_axis_move(Axis(1), y / 2),
            axial: spatial.index_axis_move(Axis(2), z / 2),
        })
    }
}
