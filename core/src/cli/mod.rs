pub mod report;

use crate::error::Result;
use crate::types::{
    Config, FigureStyle, DEFAULT_DPI, DEFAULT_INPUT_EXTENSIONS, DEFAULT_OUTPUT_EXTENSIONS,
    DEFAULT_UNITS_FALLBACK,
};
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for volpreview
#[derive(Parser, Debug)]
#[command(name = "volpreview")]
#[command(about = "Measure foreground volume of brain images and render slice previews")]
#[command(version)]
pub struct Cli {
    /// Directory searched recursively for input volumes
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory receiving the outputs, mirroring the input tree
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Threshold indicating background voxels
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub background: f64,

    /// File extensions of input files, comma-separated
    #[arg(short, long, default_value = DEFAULT_INPUT_EXTENSIONS)]
    pub inputs: String,

    /// Output file extensions, comma-separated
    #[arg(short, long, default_value = DEFAULT_OUTPUT_EXTENSIONS)]
    pub outputs: String,

    /// Voxel size units for file formats where units are unknown
    #[arg(short, long, default_value = DEFAULT_UNITS_FALLBACK)]
    pub units_fallback: String,

    /// Resolution of rendered figures
    #[arg(long, default_value_t = DEFAULT_DPI)]
    pub dpi: u32,

    /// TrueType/OpenType font for figure captions (default: bundled DejaVu Sans)
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Builds and validates the run configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid (see [`Config::validate`]).
    pub fn to_config(&self) -> Result<Config> {
        let config = Config::default()
            .with_background(self.background)
            .with_input_extensions(&self.inputs)
            .with_output_extensions(&self.outputs)
            .with_units_fallback(self.units_fallback.as_str())
            .with_figure(FigureStyle {
                dpi: self.dpi,
                font_path: self.font.clone(),
            });
        config.validate()?;
        Ok(config)
    }
}
