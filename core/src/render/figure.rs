use super::SliceTriplet;
use crate::error::Result;
use crate::types::FigureStyle;
use ab_glyph::FontVec;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use ndarray::{ArrayView2, ArrayViewD};
use std::path::Path;

/// Figure background
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Caption text color
const CAPTION_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Fraction of each panel side left empty around its content
const PANEL_MARGIN: f64 = 0.05;

/// Caption line advance relative to the glyph height
const LINE_SPACING: f32 = 1.2;

/// Content of one quadrant of the figure
#[derive(Debug, Clone)]
pub enum Panel<'a> {
    /// Grayscale slice, row 0 drawn at the bottom
    Image(ArrayView2<'a, f64>),
    /// Text anchored at the bottom-left of the panel
    Caption(&'a str),
}

/// Pixel rectangle inside the figure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PanelRect {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl PanelRect {
    /// Quadrant `index` (row-major) of a `width` x `height` figure
    fn quadrant(index: usize, (width, height): (u32, u32)) -> Self {
        let (col, row) = ((index % 2) as u32, (index / 2) as u32);
        let (panel_width, panel_height) = (width / 2, height / 2);
        Self {
            x: col * panel_width,
            y: row * panel_height,
            width: panel_width,
            height: panel_height,
        }
    }

    fn inset(self) -> Self {
        let dx = (f64::from(self.width) * PANEL_MARGIN).round() as u32;
        let dy = (f64::from(self.height) * PANEL_MARGIN).round() as u32;
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width.saturating_sub(2 * dx).max(1),
            height: self.height.saturating_sub(2 * dy).max(1),
        }
    }
}

/// 2x2 preview: three orthogonal centre slices and a caption
///
/// Quadrants in row-major order: sagittal, coronal, axial, caption.
#[derive(Debug, Clone)]
pub struct SliceFigure<'a> {
    slices: SliceTriplet<'a>,
    caption: &'a str,
}

impl<'a> SliceFigure<'a> {
    /// Creates a figure of `data` with `caption` in the last quadrant
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is 4D with a trailing axis longer than 1,
    /// or otherwise not reducible to three spatial axes.
    pub fn new(data: ArrayViewD<'a, f64>, caption: &'a str) -> Result<Self> {
        Ok(Self {
            slices: SliceTriplet::extract(data)?,
            caption,
        })
    }

    /// Quadrant contents in row-major order
    pub fn panels(&self) -> [Panel<'a>; 4] {
        [
            Panel::Image(self.slices.sagittal.clone()),
            Panel::Image(self.slices.coronal.clone()),
            Panel::Image(self.slices.axial.clone()),
            Panel::Caption(self.caption),
        ]
    }

    /// Draws the figure at the style's resolution
    pub fn rasterize(&self, style: &FigureStyle, font: &FontVec) -> RgbImage {
        let size = style.pixel_size();
        let mut canvas = RgbImage::from_pixel(size.0, size.1, BACKGROUND);

        for (index, panel) in self.panels().into_iter().enumerate() {
            let rect = PanelRect::quadrant(index, size).inset();
            match panel {
                Panel::Image(slice) => draw_slice(&mut canvas, slice, rect),
                Panel::Caption(text) => {
                    draw_caption(&mut canvas, text, rect, font, style.caption_scale())
                }
            }
        }
        canvas
    }

    /// Rasterizes the figure and encodes it in the format implied by `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the extension names no supported image format or
    /// the file cannot be written.
    pub fn save<P: AsRef<Path>>(
        &self,
        path: P,
        style: &FigureStyle,
        font: &FontVec,
    ) -> Result<()> {
        self.rasterize(style, font).save(path)?;
        Ok(())
    }
}

/// Maps a slice onto 0..255 from its own min..max, row 0 at the bottom
///
/// A constant slice maps to black.
fn to_grayscale(slice: ArrayView2<'_, f64>) -> GrayImage {
    let (rows, cols) = slice.dim();
    let (lo, hi) = slice
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = hi - lo;

    let mut buf = GrayImage::new(cols as u32, rows as u32);
    for ((r, c), &v) in slice.indexed_iter() {
        let gray = if range > 0.0 && range.is_finite() {
            ((v - lo) / range * 255.0).round() as u8
        } else {
            0
        };
        buf.put_pixel(c as u32, (rows - 1 - r) as u32, Luma([gray]));
    }
    buf
}

/// Scales a slice to fit `rect` (aspect preserved) and centres it there
fn draw_slice(canvas: &mut RgbImage, slice: ArrayView2<'_, f64>, rect: PanelRect) {
    let gray = to_grayscale(slice);
    let (w, h) = gray.dimensions();
    let scale = (f64::from(rect.width) / f64::from(w)).min(f64::from(rect.height) / f64::from(h));
    let fit_width = ((f64::from(w) * scale).round() as u32).clamp(1, rect.width);
    let fit_height = ((f64::from(h) * scale).round() as u32).clamp(1, rect.height);

    let resized = imageops::resize(&gray, fit_width, fit_height, FilterType::Nearest);
    let rgb = DynamicImage::ImageLuma8(resized).into_rgb8();

    let x = rect.x + (rect.width - fit_width) / 2;
    let y = rect.y + (rect.height - fit_height) / 2;
    imageops::overlay(canvas, &rgb, i64::from(x), i64::from(y));
}

/// Draws `text` line by line so that the last line sits on the bottom edge
fn draw_caption(canvas: &mut RgbImage, text: &str, rect: PanelRect, font: &FontVec, scale: f32) {
    let lines: Vec<&str> = text.split('\n').collect();
    let line_height = scale * LINE_SPACING;
    let bottom = (rect.y + rect.height) as f32;
    let top = (bottom - line_height * lines.len() as f32).max(rect.y as f32);

    for (i, line) in lines.iter().enumerate() {
        let y = top + i as f32 * line_height;
        draw_text_mut(
            canvas,
            CAPTION_COLOR,
            rect.x as i32,
            y.round() as i32,
            scale,
            font,
            line,
        );
    }
}
