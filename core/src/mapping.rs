//! Input discovery and input-to-output path mapping

use crate::error::{Result, VolpreviewError};
use log::debug;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Neutral extension carried by an output base until a real one is chosen
pub const PLACEHOLDER_EXTENSION: &str = "out";

/// An input file and the extension-less base of its outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedInput {
    /// Input volume
    pub input: PathBuf,

    /// Output path ending in the placeholder extension
    pub output_base: PathBuf,
}

impl MappedInput {
    /// One output path per extension
    pub fn output_paths(&self, extensions: &[String]) -> Vec<PathBuf> {
        extensions
            .iter()
            .map(|ext| output_path(&self.output_base, ext))
            .collect()
    }
}

/// Mirrors matching files of an input tree into an output tree
#[derive(Debug, Clone)]
pub struct PathMapper {
    input_dir: PathBuf,
    output_dir: PathBuf,
    input_extensions: Vec<String>,
}

impl PathMapper {
    /// Creates a mapper for files ending in any of `input_extensions`
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(
        input_dir: P,
        output_dir: Q,
        input_extensions: &[String],
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            input_extensions: input_extensions.to_vec(),
        }
    }

    /// Finds matching files below the input directory
    ///
    /// The result is sorted and free of duplicates. Symlinked directories are
    /// not descended into.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be listed.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let mut found = BTreeSet::new();
        self.walk(&self.input_dir, &mut found)?;
        debug!(
            "Found {} inputs matching {:?} in {}",
            found.len(),
            self.input_extensions,
            self.input_dir.display()
        );
        Ok(found.into_iter().collect())
    }

    fn walk(&self, dir: &Path, found: &mut BTreeSet<PathBuf>) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if entry.file_type()?.is_dir() {
                self.walk(&path, found)?;
            } else if path.is_file() && self.matches(&path) {
                found.insert(path);
            }
        }
        Ok(())
    }

    fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy();
        self.input_extensions
            .iter()
            .any(|ext| name.ends_with(ext.as_str()))
    }

    /// Pairs every discovered input with its output base
    ///
    /// The parent directory of each output base is created.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery fails, an input file name has no
    /// extension, or an output directory cannot be created.
    pub fn map(&self) -> Result<Vec<MappedInput>> {
        let mut mapped = Vec::new();
        for input in self.discover()? {
            let relative = input.strip_prefix(&self.input_dir).unwrap_or(&input);
            let output_base = placeholder_output_base(relative, &self.output_dir)?;
            if let Some(parent) = output_base.parent() {
                fs::create_dir_all(parent)?;
            }
            mapped.push(MappedInput { input, output_base });
        }
        Ok(mapped)
    }
}

/// Derives the output base of an input path relative to the input root
///
/// A trailing `.gz` becomes `_gz` so that the compression marker goes away
/// together with the real extension.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use volpreview_core::mapping::placeholder_output_base;
///
/// let base = placeholder_output_base(Path::new("sub/brain.nii.gz"), Path::new("/out")).unwrap();
/// assert_eq!(base, Path::new("/out/sub/brain.out"));
/// ```
///
/// # Errors
///
/// Returns [`VolpreviewError::UnrecognizedExtension`] if the file name has no `.`.
pub fn placeholder_output_base(relative: &Path, output_dir: &Path) -> Result<PathBuf> {
    let name = relative
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| VolpreviewError::UnrecognizedExtension(relative.to_path_buf()))?;

    let name = match name.strip_suffix(".gz") {
        Some(stem) => format!("{}_gz", stem),
        None => name,
    };
    if !name.contains('.') {
        return Err(VolpreviewError::UnrecognizedExtension(relative.to_path_buf()));
    }

    Ok(output_dir
        .join(relative.with_file_name(name))
        .with_extension(PLACEHOLDER_EXTENSION))
}

/// Replaces the placeholder extension of `base`; the leading `.` is optional
pub fn output_path(base: &Path, extension: &str) -> PathBuf {
    base.with_extension(extension.trim_start_matches('.'))
}
