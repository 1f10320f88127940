//! Foreground counting and physical volume estimation

use crate::types::{MeasurementResult, Volume};
use log::error;
use ndarray::{ArrayBase, Data, Dimension};

/// Counts elements strictly greater than `threshold`
///
/// Works on arrays of any rank. NaN never counts as foreground.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use volpreview_core::measure::count_foreground;
///
/// let data = array![[0.0f64, 1.0], [2.0, -3.0]];
/// assert_eq!(count_foreground(&data, 0.0), 2);
/// assert_eq!(count_foreground(&data, 1.0), 1);
/// ```
pub fn count_foreground<S, D>(data: &ArrayBase<S, D>, threshold: f64) -> u64
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    data.iter().filter(|&&v| v > threshold).count() as u64
}

/// Measures the foreground of a volume
///
/// The physical volume is the foreground voxel count times the volume of one
/// voxel. Formats without unit metadata get `units_fallback` as their units
/// label; this is logged but does not fail the measurement.
///
/// # Arguments
///
/// * `volume` - Loaded volume
/// * `threshold` - Voxels strictly above this are foreground
/// * `units_fallback` - Units label used when the header has none
pub fn estimate_volume(volume: &Volume, threshold: f64, units_fallback: &str) -> MeasurementResult {
    let voxel_count = count_foreground(&volume.data().view(), threshold);
    let physical_volume = volume.geometry().volume_of(voxel_count);

    let units = match volume.header().units_of_length() {
        Some(units) => units.to_string(),
        None => {
            error!("Not supported for {} header", volume.header().format_name());
            units_fallback.to_string()
        }
    };

    MeasurementResult::new(voxel_count, physical_volume, units)
}
