use crate::error::{Result, VolpreviewError};
use ab_glyph::FontVec;
use log::{debug, info};
use std::path::Path;

/// DejaVu Sans, used when no caption font is configured
const BUNDLED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Loads the font used for figure captions
///
/// A configured font must load; without one the bundled DejaVu Sans is used,
/// so captions are always drawn.
///
/// # Errors
///
/// Returns an error if `font_path` is given but cannot be read or parsed.
pub fn load_caption_font(font_path: Option<&Path>) -> Result<FontVec> {
    match font_path {
        Some(path) => {
            let font_data = std::fs::read(path)?;
            let font = FontVec::try_from_vec(font_data).map_err(|_| {
                VolpreviewError::Font(format!("Failed to parse font file: {}", path.display()))
            })?;
            info!("Loaded caption font: {}", path.display());
            Ok(font)
        }
        None => {
            debug!("Using bundled caption font");
            FontVec::try_from_vec(BUNDLED_FONT.to_vec())
                .map_err(|e| VolpreviewError::Font(format!("Bundled font is invalid: {}", e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ab_glyph::Font;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_configured_font() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.ttf");
        assert!(matches!(
            load_caption_font(Some(&path)),
            Err(VolpreviewError::Io(_))
        ));
    }

    #[test]
    fn test_unparseable_configured_font() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("garbage.ttf");
        fs::write(&path, b"definitely not a font").unwrap();

        let err = load_caption_font(Some(&path)).unwrap_err();
        assert!(matches!(err, VolpreviewError::Font(_)));
        assert!(err.to_string().contains("garbage.ttf"));
    }

    #[test]
    fn test_bundled_font_covers_caption_text() {
        let font = load_caption_font(None).unwrap();
        for c in "total volume = 0123456789,.mm³ voxels".chars() {
            assert_ne!(font.glyph_id(c).0, 0, "no glyph for {:?}", c);
        }
    }

    #[test]
    fn test_configured_font_is_loaded() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("caption.ttf");
        fs::write(&path, BUNDLED_FONT).unwrap();

        assert!(load_caption_font(Some(&path)).is_ok());
    }
}
