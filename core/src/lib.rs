pub mod api;
pub mod cli;
pub mod error;
pub mod formats;
pub mod mapping;
pub mod measure;
pub mod output;
pub mod render;
pub mod types;

#[cfg(test)]
mod testing;

pub use api::{ProcessedInput, VolumePipeline};
pub use cli::report::{FigureCaption, TextReport};
pub use error::{Result, VolpreviewError};
pub use formats::{open_volume, MghHeader, NiftiImageHeader, SpatialUnits, VolumeHeader};
pub use mapping::{MappedInput, PathMapper};
pub use measure::{count_foreground, estimate_volume};
pub use output::{OutputRequest, OutputWriter};
pub use render::SliceFigure;
pub use types::*;
