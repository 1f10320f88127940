//! Slice preview rendering
//!
//! Produces a fixed-size 2x2 figure: the centre sagittal, coronal and axial
//! slices plus a text caption, rasterized with `image` and `imageproc`.

mod figure;
mod font;
mod slices;

pub use figure::{Panel, SliceFigure};
pub use font::load_caption_font;
pub use slices::SliceTriplet;
