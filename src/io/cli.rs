//! Command-line interface for composing image grids from files on disk

use crate::io::configuration::DEFAULT_OUTPUT_DIR;
use crate::io::error::{Result, WithPath, invalid_input};
use crate::io::export::{batch_file_name, save_canvas};
use crate::io::progress::ProgressManager;
use crate::layout::display::Viewport;
use crate::params::DEFAULT_STRING;
use crate::session::loader::FsImageLoader;
use crate::session::orchestrator::{GenerateRequest, GenerationEvent, Orchestrator};
use crate::session::pool::ImageSource;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "imagegrid")]
#[command(
    author,
    version,
    about = "Arrange a random selection of images into a grid"
)]
/// Command-line arguments for the grid composer
pub struct Cli {
    /// Image files or directories of images to draw from
    #[arg(value_name = "INPUTS")]
    pub inputs: Vec<PathBuf>,

    /// Parameter directive such as "rows 4" (repeatable, later ones win)
    #[arg(short = 'p', long = "param", value_name = "DIRECTIVE")]
    pub params: Vec<String>,

    /// File of parameter directives, one per line
    #[arg(short = 'f', long, value_name = "FILE")]
    pub params_file: Option<PathBuf>,

    /// Random seed for reproducible selections
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Number of grids to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Directory generated grids are saved into
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Write the layout guide for the parameters to this PNG
    #[arg(short, long, value_name = "PNG")]
    pub guide: Option<PathBuf>,

    /// Write the working canvas showing the last grid to this PNG
    #[arg(long, value_name = "PNG")]
    pub preview: Option<PathBuf>,

    /// Working canvas size used for guide and preview
    #[arg(long, value_name = "WxH", default_value_t = Viewport::default())]
    pub viewport: Viewport,

    /// Print the default parameter text and exit
    #[arg(long)]
    pub print_defaults: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Assemble the parameter text from the file and inline directives
    ///
    /// Falls back to the default text when neither is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter file cannot be read
    pub fn parameter_text(&self) -> Result<String> {
        let mut lines = Vec::new();

        if let Some(path) = &self.params_file {
            lines.push(std::fs::read_to_string(path).with_path(path, "read parameters")?);
        }
        lines.extend(self.params.iter().cloned());

        if lines.is_empty() {
            Ok(DEFAULT_STRING.to_string())
        } else {
            Ok(lines.join("\n"))
        }
    }
}

/// Install the logger, honouring `RUST_LOG` over the quiet flag
pub fn init_logging(quiet: bool) {
    let level = if quiet { "warn" } else { "info" };
    // A logger may already be installed when embedded or under test
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

/// Runs one command-line session: pool, guide, generations, preview
pub struct SessionRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

/// What a session run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of images added to the pool
    pub pooled: usize,
    /// Saved grid images in generation order
    pub saved: Vec<PathBuf>,
    /// Guide image, if requested
    pub guide: Option<PathBuf>,
    /// Preview image, if requested
    pub preview: Option<PathBuf>,
}

impl SessionRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self {
            cli,
            progress_manager: None,
        }
    }

    /// Run the session described by the CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if inputs cannot be read or outputs cannot be written
    // Allow print for the requested defaults listing
    #[allow(clippy::print_stdout)]
    pub fn process(&mut self) -> Result<RunSummary> {
        if self.cli.print_defaults {
            println!("{DEFAULT_STRING}");
            return Ok(RunSummary::default());
        }

        let text = self.cli.parameter_text()?;
        let files = self.collect_files()?;

        let mut session = Orchestrator::new(FsImageLoader::new(), self.cli.viewport, self.cli.seed);
        for file in &files {
            session.add_file(file);
        }
        session.edit_parameters(&text, Instant::now());

        let mut summary = RunSummary {
            pooled: session.pool().len(),
            ..RunSummary::default()
        };

        if let Some(path) = &self.cli.guide {
            session.set_guide_mode(true);
            save_canvas(session.working_canvas(), path)?;
            session.set_guide_mode(false);
            log::info!("Wrote layout guide to {}", path.display());
            summary.guide = Some(path.clone());
        }

        if session.pool().is_empty() {
            log::warn!("No images given; nothing will be composited");
        }

        summary.saved = self.generate_all(&mut session)?;

        if let Some(path) = &self.cli.preview {
            save_canvas(session.working_canvas(), path)?;
            summary.preview = Some(path.clone());
        }

        Ok(summary)
    }

    fn generate_all(&mut self, session: &mut Orchestrator<FsImageLoader>) -> Result<Vec<PathBuf>> {
        let params = session.parameters();
        let mut saved = Vec::new();

        if self.cli.should_show_progress() && params.is_generatable() {
            self.progress_manager = Some(ProgressManager::new(self.cli.count));
        }

        for index in 0..self.cli.count {
            let selected = match session.request_generate() {
                GenerateRequest::Started { selected } => selected,
                GenerateRequest::Degenerate => break,
                GenerateRequest::Busy => continue,
            };

            if let Some(ref pm) = self.progress_manager {
                pm.start_generation(index, selected);
            }

            let message = match session.wait() {
                Some(GenerationEvent::Completed { placed }) => {
                    let file_name = batch_file_name(&params.file_name, index);
                    if let Some(path) = session.save_as(&self.cli.output_dir, &file_name)? {
                        saved.push(path);
                    }
                    format!("{file_name}: {placed} images")
                }
                Some(GenerationEvent::Empty) => "no images loaded".to_string(),
                Some(GenerationEvent::Failed) | None => "generation failed".to_string(),
            };

            if let Some(ref pm) = self.progress_manager {
                pm.complete_generation(&message);
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(saved)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for input in &self.cli.inputs {
            if input.is_file() {
                if ImageSource::is_supported(input) {
                    files.push(input.clone());
                } else {
                    return Err(invalid_input(&format!(
                        "'{}' is not a supported image file",
                        input.display()
                    )));
                }
            } else if input.is_dir() {
                files.extend(Self::collect_directory(input)?);
            } else {
                return Err(invalid_input(&format!(
                    "'{}' must be an image file or directory",
                    input.display()
                )));
            }
        }

        Ok(files)
    }

    fn collect_directory(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).with_path(dir, "read directory")? {
            let path = entry.with_path(dir, "read directory entry")?.path();
            if path.is_file() && ImageSource::is_supported(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}
