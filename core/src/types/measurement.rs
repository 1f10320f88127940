use std::fmt;

/// Foreground measurement of one input volume
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementResult {
    /// Number of voxels above the background threshold
    pub voxel_count: u64,

    /// `voxel_count` times the volume of one voxel
    pub physical_volume: f64,

    /// Length unit label; the volume is in cubic units of this
    pub units: String,
}

impl MeasurementResult {
    /// Creates a new MeasurementResult
    pub fn new(voxel_count: u64, physical_volume: f64, units: impl Into<String>) -> Self {
        Self {
            voxel_count,
            physical_volume,
            units: units.into(),
        }
    }
}

impl fmt::Display for MeasurementResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} voxels, volume={} {}^3",
            self.voxel_count, self.physical_volume, self.units
        )
    }
}
