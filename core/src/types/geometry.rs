use std::fmt;

/// Physical volume of a single voxel, in cubic units of the source image
///
/// Derived either from per-axis voxel spacing or from the linear part of a
/// voxel-to-world affine. Always non-negative: reflections and negative
/// spacings contribute their magnitude only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelGeometry {
    voxel_volume: f64,
}

impl VoxelGeometry {
    /// Creates a geometry from a precomputed per-voxel volume
    pub fn new(voxel_volume: f64) -> Self {
        Self {
            voxel_volume: voxel_volume.abs(),
        }
    }

    /// Builds the geometry from per-axis spacing
    ///
    /// Only the first three (spatial) values are used. A time axis, if the
    /// caller passes one, never scales the result.
    ///
    /// # Example
    ///
    /// ```
    /// use volpreview_core::VoxelGeometry;
    ///
    /// let geometry = VoxelGeometry::from_spacing(&[0.5, 2.0, -3.0, 40.0]);
    /// assert_eq!(geometry.voxel_volume(), 3.0);
    /// ```
    pub fn from_spacing(spacing: &[f64]) -> Self {
        let volume: f64 = spacing.iter().take(3).product();
        Self::new(volume)
    }

    /// Builds the geometry from a 4x4 voxel-to-world affine (row-major)
    ///
    /// Each spatial basis vector is a column of the upper-left 3x3 block; the
    /// voxel volume is the product of their Euclidean lengths.
    pub fn from_affine(affine: &[[f64; 4]; 4]) -> Self {
        let volume: f64 = (0..3)
            .map(|col| {
                (0..3)
                    .map(|row| affine[row][col] * affine[row][col])
                    .sum::<f64>()
                    .sqrt()
            })
            .product();
        Self::new(volume)
    }

    /// Volume of one voxel
    pub fn voxel_volume(&self) -> f64 {
        self.voxel_volume
    }

    /// Physical volume covered by `voxel_count` voxels
    pub fn volume_of(&self, voxel_count: u64) -> f64 {
        voxel_count as f64 * self.voxel_volume
    }
}

impl fmt::Display for VoxelGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} per voxel", self.voxel_volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagonal(sx: f64, sy: f64, sz: f64) -> [[f64; 4]; 4] {
        [
            [sx, 0.0, 0.0, 10.0],
            [0.0, sy, 0.0, -4.0],
            [0.0, 0.0, sz, 2.5],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }

    #[test]
    fn test_from_spacing_product() {
        let geometry = VoxelGeometry::from_spacing(&[1.0, 2.0, 3.0]);
        assert_eq!(geometry.voxel_volume(), 6.0);
    }

    #[test]
    fn test_from_spacing_ignores_time_axis() {
        let with_time = VoxelGeometry::from_spacing(&[1.0, 2.0, 3.0, 0.0]);
        assert_eq!(with_time.voxel_volume(), 6.0);
    }

    #[test]
    fn test_from_spacing_negative_is_absolute() {
        let geometry = VoxelGeometry::from_spacing(&[-1.0, 2.0, 3.0]);
        assert_eq!(geometry.voxel_volume(), 6.0);
    }

    #[test]
    fn test_zero_spacing_is_zero_volume() {
        let geometry = VoxelGeometry::from_spacing(&[1.0, 0.0, 3.0]);
        assert_eq!(geometry.voxel_volume(), 0.0);
        assert_eq!(geometry.volume_of(1000), 0.0);
    }

    #[test]
    fn test_spacing_is_permutation_invariant() {
        let a = VoxelGeometry::from_spacing(&[0.7, 1.3, 2.9]);
        let b = VoxelGeometry::from_spacing(&[2.9, 0.7, 1.3]);
        assert!((a.voxel_volume() - b.voxel_volume()).abs() < 1e-12);
    }

    #[test]
    fn test_rescaling_one_axis_scales_volume() {
        let base = VoxelGeometry::from_spacing(&[0.7, 1.3, 2.9]);
        let scaled = VoxelGeometry::from_spacing(&[0.7, 1.3 * 4.0, 2.9]);
        assert!((scaled.voxel_volume() - 4.0 * base.voxel_volume()).abs() < 1e-12);
    }

    #[test]
    fn test_affine_agrees_with_spacing() {
        let from_affine = VoxelGeometry::from_affine(&diagonal(0.8, 1.1, 2.4));
        let from_spacing = VoxelGeometry::from_spacing(&[0.8, 1.1, 2.4]);
        assert!((from_affine.voxel_volume() - from_spacing.voxel_volume()).abs() < 1e-12);
    }

    #[test]
    fn test_affine_reflection_is_absolute() {
        let geometry = VoxelGeometry::from_affine(&diagonal(-2.0, 1.0, 1.5));
        assert!((geometry.voxel_volume() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_affine_rotation_keeps_column_lengths() {
        // 90 degree rotation about z, then spacing (2, 3, 4)
        let affine = [
            [0.0, -3.0, 0.0, 0.0],
            [2.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 4.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        let geometry = VoxelGeometry::from_affine(&affine);
        assert!((geometry.voxel_volume() - 24.0).abs() < 1e-12);
    }
}
