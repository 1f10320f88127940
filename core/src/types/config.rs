use crate::error::{Result, VolpreviewError};
use std::path::PathBuf;

/// Default input extensions, comma-separated
pub const DEFAULT_INPUT_EXTENSIONS: &str = ".nii,.nii.gz,.mgz";

/// Default output extensions, comma-separated
pub const DEFAULT_OUTPUT_EXTENSIONS: &str = ".png,.txt";

/// Units label used when a format carries no unit metadata
pub const DEFAULT_UNITS_FALLBACK: &str = "unknown";

/// Default rasterization resolution of the preview figure
pub const DEFAULT_DPI: u32 = 100;

/// Splits a comma-separated extension list
///
/// Whitespace around items is trimmed and empty items are dropped.
///
/// # Example
///
/// ```
/// use volpreview_core::parse_extension_list;
///
/// assert_eq!(parse_extension_list(".png, .txt,"), vec![".png", ".txt"]);
/// ```
pub fn parse_extension_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(str::to_string)
        .collect()
}

/// Layout parameters of the rendered slice figure
#[derive(Debug, Clone, PartialEq)]
pub struct FigureStyle {
    /// Pixels per inch used to rasterize the fixed-size figure
    pub dpi: u32,

    /// Caption font. If None, the bundled DejaVu Sans is used.
    pub font_path: Option<PathBuf>,
}

impl FigureStyle {
    /// Figure width in inches
    pub const WIDTH_INCHES: f64 = 6.0;

    /// Figure height in inches
    pub const HEIGHT_INCHES: f64 = 4.0;

    /// Caption size in points ("large" relative to a 12pt base)
    pub const CAPTION_POINTS: f64 = 14.4;

    /// Raster size (width, height) of the figure in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (Self::WIDTH_INCHES * dpi).round() as u32,
            (Self::HEIGHT_INCHES * dpi).round() as u32,
        )
    }

    /// Caption glyph height in pixels
    pub fn caption_scale(&self) -> f32 {
        (Self::CAPTION_POINTS * f64::from(self.dpi) / 72.0) as f32
    }
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            font_path: None,
        }
    }
}

/// Configuration for a batch run
///
/// # Example
///
/// ```
/// use volpreview_core::Config;
///
/// let config = Config::default()
///     .with_background(10.0)
///     .with_output_extensions(".txt");
///
/// assert_eq!(config.background, 10.0);
/// assert_eq!(config.output_extensions, vec![".txt"]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Voxels strictly above this intensity are foreground
    pub background: f64,

    /// File-name suffixes of discovered inputs
    pub input_extensions: Vec<String>,

    /// One output artifact is written per extension
    pub output_extensions: Vec<String>,

    /// Units label for formats without unit metadata
    pub units_fallback: String,

    /// Figure layout for rendered outputs
    pub figure: FigureStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            background: 0.0,
            input_extensions: parse_extension_list(DEFAULT_INPUT_EXTENSIONS),
            output_extensions: parse_extension_list(DEFAULT_OUTPUT_EXTENSIONS),
            units_fallback: DEFAULT_UNITS_FALLBACK.to_string(),
            figure: FigureStyle::default(),
        }
    }
}

impl Config {
    /// Sets the background threshold
    pub fn with_background(mut self, background: f64) -> Self {
        self.background = background;
        self
    }

    /// Sets the input extensions from a comma-separated list
    pub fn with_input_extensions(mut self, extensions: &str) -> Self {
        self.input_extensions = parse_extension_list(extensions);
        self
    }

    /// Sets the output extensions from a comma-separated list
    pub fn with_output_extensions(mut self, extensions: &str) -> Self {
        self.output_extensions = parse_extension_list(extensions);
        self
    }

    /// Sets the units fallback label
    pub fn with_units_fallback(mut self, units: impl Into<String>) -> Self {
        self.units_fallback = units.into();
        self
    }

    /// Sets the figure style
    pub fn with_figure(mut self, figure: FigureStyle) -> Self {
        self.figure = figure;
        self
    }

    /// Checks that the configuration can drive a run
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The threshold is NaN or infinite
    /// - Either extension list is empty
    /// - The DPI is zero
    pub fn validate(&self) -> Result<()> {
        if !self.background.is_finite() {
            return Err(VolpreviewError::Config(format!(
                "background threshold must be finite, got {}",
                self.background
            )));
        }
        if self.input_extensions.is_empty() {
            return Err(VolpreviewError::Config(
                "at least one input extension is required".to_string(),
            ));
        }
        if self.output_extensions.is_empty() {
            return Err(VolpreviewError::Config(
                "at least one output extension is required".to_string(),
            ));
        }
        if self.figure.dpi == 0 {
            return Err(VolpreviewError::Config("dpi must be positive".to_string()));
        }
        Ok(())
    }
}
