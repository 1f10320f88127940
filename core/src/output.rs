//! Writes one output artifact per requested extension

use crate::cli::report::{FigureCaption, TextReport};
use crate::error::{Result, VolpreviewError};
use crate::render::SliceFigure;
use crate::types::{FigureStyle, MeasurementResult, OutputKind, Volume};
use ab_glyph::FontVec;
use log::debug;
use std::fs;
use std::path::PathBuf;

/// An output path and the kind of artifact it receives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRequest {
    pub path: PathBuf,
    pub kind: OutputKind,
}

impl OutputRequest {
    /// Classifies `path` through the output extension table
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let kind = OutputKind::for_path(&path);
        Self { path, kind }
    }
}

/// Writes measurement artifacts, choosing the kind from the file name
#[derive(Clone, Copy)]
pub struct OutputWriter<'a> {
    style: &'a FigureStyle,
    font: Option<&'a FontVec>,
}

impl<'a> OutputWriter<'a> {
    /// Creates a writer rendering figures with `style`
    ///
    /// `font` may be None when only text reports will be written.
    pub fn new(style: &'a FigureStyle, font: Option<&'a FontVec>) -> Self {
        Self { style, font }
    }

    /// Writes a text report or a rendered preview, as the request says
    ///
    /// # Errors
    ///
    /// Returns an error if the volume cannot be rendered, no caption font was
    /// given for an image, the image format is not supported or the file
    /// cannot be written.
    pub fn write(
        &self,
        request: &OutputRequest,
        volume: &Volume,
        result: &MeasurementResult,
    ) -> Result<()> {
        debug!("Writing {} as {}", request.path.display(), request.kind);

        match request.kind {
            OutputKind::TextReport => {
                fs::write(&request.path, TextReport::new(result).to_string())?;
            }
            OutputKind::RenderedImage => {
                let font = self.font.ok_or_else(|| {
                    VolpreviewError::Font(format!(
                        "no caption font loaded for {}",
                        request.path.display()
                    ))
                })?;
                let caption = FigureCaption::new(result).to_string();
                let data = volume.data().view();
                SliceFigure::new(data, &caption)?.save(&request.path, self.style, font)?;
            }
        }
        Ok(())
    }
}
