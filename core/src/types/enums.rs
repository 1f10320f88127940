use std::fmt;
use std::path::Path;

/// Kind of artifact written for an output path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    /// Two-line plain-text measurement report
    TextReport,
    /// Four-panel slice preview, encoded by file extension
    RenderedImage,
}

/// File-name suffixes with a dedicated output kind
///
/// Anything not listed here is rendered as an image.
pub const OUTPUT_KINDS: &[(&str, OutputKind)] = &[(".txt", OutputKind::TextReport)];

impl OutputKind {
    /// Classifies an output path by its file-name suffix
    ///
    /// # Example
    ///
    /// ```
    /// use std::path::Path;
    /// use volpreview_core::OutputKind;
    ///
    /// assert_eq!(OutputKind::for_path(Path::new("a/brain.txt")), OutputKind::TextReport);
    /// assert_eq!(OutputKind::for_path(Path::new("a/brain.png")), OutputKind::RenderedImage);
    /// ```
    pub fn for_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        OUTPUT_KINDS
            .iter()
            .find(|(suffix, _)| name.ends_with(suffix))
            .map(|(_, kind)| *kind)
            .unwrap_or(OutputKind::RenderedImage)
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            OutputKind::TextReport => "text",
            OutputKind::RenderedImage => "image",
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// On-disk volume format, detected from the file-name suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeFormat {
    /// NIfTI-1 (`.nii`, `.nii.gz`)
    Nifti { compressed: bool },
    /// FreeSurfer MGH (`.mgh`, `.mgz`)
    Mgh { compressed: bool },
    /// MINC (`.mnc`); recognized but not readable
    Minc,
}

impl VolumeFormat {
    /// Detects the format of `path`, or `None` for unknown suffixes
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy();

        if name.ends_with(".nii.gz") {
            Some(VolumeFormat::Nifti { compressed: true })
        } else if name.ends_with(".nii") {
            Some(VolumeFormat::Nifti { compressed: false })
        } else if name.ends_with(".mgz") {
            Some(VolumeFormat::Mgh { compressed: true })
        } else if name.ends_with(".mgh") {
            Some(VolumeFormat::Mgh { compressed: false })
        } else if name.ends_with(".mnc") {
            Some(VolumeFormat::Minc)
        } else {
            None
        }
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            VolumeFormat::Nifti { .. } => "NIfTI",
            VolumeFormat::Mgh { .. } => "MGH",
            VolumeFormat::Minc => "MINC",
        }
    }

    /// Whether the file body is gzip-compressed
    pub fn is_compressed(&self) -> bool {
        match self {
            VolumeFormat::Nifti { compressed } | VolumeFormat::Mgh { compressed } => *compressed,
            VolumeFormat::Minc => false,
        }
    }
}

impl fmt::Display for VolumeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}
