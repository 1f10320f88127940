use crate::error::{Result, VolpreviewError};
use crate::mapping::{output_path, MappedInput, PathMapper, PLACEHOLDER_EXTENSION};
use crate::measure::estimate_volume;
use crate::output::{OutputRequest, OutputWriter};
use crate::render::load_caption_font;
use crate::types::{Config, MeasurementResult, OutputKind, Volume};
use ab_glyph::FontVec;
use log::{debug, error, info};
use std::path::{Path, PathBuf};

/// Outcome for one processed input
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedInput {
    /// Input volume
    pub input: PathBuf,

    /// Foreground measurement
    pub result: MeasurementResult,

    /// Files written, in configured extension order
    pub outputs: Vec<PathBuf>,
}

/// Batch pipeline: discover, measure, and write reports and previews
///
/// Inputs are processed one at a time in sorted order. The first failing
/// input ends the run.
///
/// # Example
///
/// ```no_run
/// use volpreview_core::{Config, VolumePipeline};
///
/// let config = Config::default().with_output_extensions(".txt");
/// let pipeline = VolumePipeline::new(config).unwrap();
/// for processed in pipeline.run("incoming", "outgoing").unwrap() {
///     println!("{}: {}", processed.input.display(), processed.result);
/// }
/// ```
pub struct VolumePipeline {
    config: Config,
    font: Option<FontVec>,
}

impl VolumePipeline {
    /// Creates a pipeline, loading the caption font if any output is an image
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a configured font
    /// cannot be loaded.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let renders_images = config
            .output_extensions
            .iter()
            .any(|ext| renders_image(ext));
        let font = if renders_images {
            Some(load_caption_font(config.figure.font_path.as_deref())?)
        } else {
            None
        };

        Ok(Self { config, font })
    }

    /// Run configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Processes every matching input below `input_dir`
    ///
    /// # Errors
    ///
    /// Returns an error if `input_dir` is not a directory, discovery fails,
    /// or any input fails to load, measure or write.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        output_dir: Q,
    ) -> Result<Vec<ProcessedInput>> {
        let input_dir = input_dir.as_ref();
        if !input_dir.is_dir() {
            return Err(VolpreviewError::Config(format!(
                "{} is not a directory",
                input_dir.display()
            )));
        }

        debug!("input files: {:?}", self.config.input_extensions);
        debug!("output formats: {:?}", self.config.output_extensions);
        debug!("background threshold: {}", self.config.background);

        let mapper = PathMapper::new(
            input_dir,
            output_dir.as_ref(),
            &self.config.input_extensions,
        );

        let mut processed = Vec::new();
        for mapped in mapper.map()? {
            match self.process_input(&mapped) {
                Ok(done) => processed.push(done),
                Err(e) => {
                    error!("Failed to process {}", mapped.input.display());
                    return Err(e);
                }
            }
        }

        info!("Processed {} inputs", processed.len());
        Ok(processed)
    }

    /// Measures one input and writes all of its outputs
    ///
    /// # Errors
    ///
    /// Returns an error if the volume cannot be loaded or an output cannot be
    /// written.
    pub fn process_input(&self, mapped: &MappedInput) -> Result<ProcessedInput> {
        let volume = Volume::open(&mapped.input)?;
        let result = estimate_volume(&volume, self.config.background, &self.config.units_fallback);
        info!("{}: {}", mapped.input.display(), result);

        let writer = OutputWriter::new(&self.config.figure, self.font.as_ref());
        let outputs = mapped.output_paths(&self.config.output_extensions);
        for output in &outputs {
            writer.write(&OutputRequest::new(output.as_path()), &volume, &result)?;
            info!("\t-> {}", output.display());
        }

        Ok(ProcessedInput {
            input: mapped.input.clone(),
            result,
            outputs,
        })
    }
}

/// Whether outputs with extension `ext` are rendered figures
fn renders_image(ext: &str) -> bool {
    let sample = output_path(Path::new(PLACEHOLDER_EXTENSION), ext);
    OutputKind::for_path(&sample) == OutputKind::RenderedImage
}
