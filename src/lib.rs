//! Extract, deduplicate and sort email addresses from a local text file and
//! an optional remote text resource.
//!
//! The pipeline lives in [`extractor`]; [`MailSift`] wires it to the
//! configuration, console output and progress display used by the binary.

pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod source;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, FetchConfig, OutputConfig};
pub use error::{ErrorCategory, MailSiftError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    extract_emails, extract_emails_with, EmailSet, ExtractionReport, ExtractionRequest,
    OutputWriter, SourceSummary, EMAIL_PATTERN,
};
pub use source::{HttpFetcher, RemoteSource, SourceOrigin, SourceText};
pub use ui::{OutputFormatter, OutputMode, ProgressManager, SpinnerFetcher};

use std::path::Path;

/// Main library interface for MailSift functionality
pub struct MailSift {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl MailSift {
    /// Create a new MailSift instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create MailSift instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(config, output_mode, cli_args.verbose, cli_args.quiet))
    }

    /// Build the run request from CLI paths and the merged configuration.
    pub fn request_from_cli(&self, cli_args: &Cli) -> Result<ExtractionRequest> {
        let (input, output) = match (&cli_args.input, &cli_args.output) {
            (Some(input), Some(output)) => (input, output),
            _ => {
                return Err(MailSiftError::Config {
                    message: "Both INPUT and OUTPUT paths are required".to_string(),
                })
            }
        };

        Ok(ExtractionRequest::new(input, output)
            .with_remote_url(cli_args.url.clone())
            .with_timeout(self.config.fetch_timeout_duration())
            .with_create_parent_dirs(self.config.output.create_parent_dirs))
    }

    /// Run one extraction with the configured HTTP client.
    pub fn run(&self, request: &ExtractionRequest) -> Result<ExtractionReport> {
        self.output_formatter.start_operation(&format!(
            "Extracting email addresses from {}",
            request.input.display()
        ));

        if request.remote_url().is_none() {
            return self.run_with(request, &extractor::pipeline::offline);
        }

        let fetcher = HttpFetcher::new(&self.config.fetch, request.timeout)?;
        self.run_with(request, &fetcher)
    }

    /// Run one extraction against a caller-supplied remote source.
    pub fn run_with<R>(&self, request: &ExtractionRequest, remote: &R) -> Result<ExtractionReport>
    where
        R: RemoteSource + ?Sized,
    {
        let fetcher = SpinnerFetcher::new(remote, &self.progress_manager);
        let report = extract_emails_with(request, &fetcher)?;

        self.output_formatter.debug(&format!(
            "{} match(es) across {} source(s), {} duplicate(s) collapsed",
            report.total_matches(),
            report.sources.len(),
            report.duplicates_collapsed()
        ));

        Ok(report)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        Config::default().save_to_file(output_path)
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Get progress manager reference
    pub fn progress_manager(&self) -> &ProgressManager {
        &self.progress_manager
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &MailSiftError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Get build information
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
        build_date: option_env!("BUILD_DATE").unwrap_or("unknown"),
        target: std::env::consts::ARCH.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_date: &'static str,
    pub target: String,
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MailSift {} ({}) built on {} for {}",
            self.version, self.git_hash, self.build_date, self.target
        )
    }
}
