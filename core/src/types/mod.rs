//! Core type definitions for volume measurement
//!
//! This module provides the fundamental types used throughout the volpreview library:
//! - [`Volume`]: A loaded image with its format-specific header
//! - [`VolumeData`]: Intensities narrowed to three spatial axes at load time
//! - [`VoxelGeometry`]: Physical size of one voxel
//! - [`MeasurementResult`]: Foreground voxel count and physical volume
//! - [`OutputKind`]: Artifact kind selected by output file extension
//! - [`VolumeFormat`]: Input format selected by input file extension
//! - [`Config`]: Options of a batch run

mod config;
mod enums;
mod geometry;
mod measurement;
mod volume;

pub use config::{
    parse_extension_list, Config, FigureStyle, DEFAULT_DPI, DEFAULT_INPUT_EXTENSIONS,
    DEFAULT_OUTPUT_EXTENSIONS, DEFAULT_UNITS_FALLBACK,
};
pub use enums::{OutputKind, VolumeFormat, OUTPUT_KINDS};
pub use geometry::VoxelGeometry;
pub use measurement::MeasurementResult;
pub use volume::{spatial_view, Volume, VolumeData};
