use nifti::error::NiftiError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for volpreview operations
pub type Result<T> = std::result::Result<T, VolpreviewError>;

/// Error types for volpreview operations
#[derive(Error, Debug)]
pub enum VolpreviewError {
    /// Image has a time axis (or an unusable rank)
    #[error("4D image not supported (shape {shape:?})")]
    UnsupportedDimensionality { shape: Vec<usize> },

    /// Image has an axis of length zero
    #[error("Volume has an empty axis (shape {shape:?})")]
    EmptyVolume { shape: Vec<usize> },

    /// Output base path could not be derived from an input file name
    #[error("Unrecognized file extension in: {}", .0.display())]
    UnrecognizedExtension(PathBuf),

    /// No reader exists for this file
    #[error("Unsupported volume format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Malformed or truncated volume header/data
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// NIfTI decoding error
    #[error("NIfTI error: {0}")]
    Nifti(#[source] NiftiError),

    /// Font could not be loaded
    #[error("Font error: {0}")]
    Font(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VolpreviewError {
    /// Builds a [`VolpreviewError::UnsupportedDimensionality`] from an array shape
    pub fn unsupported_shape(shape: &[usize]) -> Self {
        VolpreviewError::UnsupportedDimensionality {
            shape: shape.to_vec(),
        }
    }
}

impl From<NiftiError> for VolpreviewError {
    fn from(err: NiftiError) -> Self {
        match err {
            NiftiError::Io(e) => VolpreviewError::Io(e),
            other => VolpreviewError::Nifti(other),
        }
    }
}
