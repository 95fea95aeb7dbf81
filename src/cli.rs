use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::source::remote::validate_remote_url;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mailsift")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract unique email addresses from text files and URLs")]
#[command(
    long_about = "MailSift scans a local text file, and optionally one remote text resource, \
                  for email addresses and writes the unique set, sorted case-insensitively, \
                  to an output file."
)]
#[command(after_help = "EXAMPLES:\n  \
    mailsift contacts.txt emails.txt\n  \
    mailsift notes.txt emails.txt --url https://example.com/team.txt --timeout 5\n  \
    mailsift notes.txt emails.txt --output-format json\n  \
    mailsift --generate-config --config mailsift.toml")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Local text file to scan
    #[arg(required_unless_present = "generate_config")]
    pub input: Option<PathBuf>,

    /// File to write the sorted unique addresses to (overwritten)
    #[arg(required_unless_present = "generate_config")]
    pub output: Option<PathBuf>,

    /// Remote text resource to scan as well
    #[arg(short, long, value_parser = validate_url_arg)]
    pub url: Option<String>,

    /// Timeout for the remote fetch in seconds
    #[arg(short, long, value_parser = parse_timeout)]
    pub timeout: Option<f64>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Create missing parent directories of the output file
    #[arg(long)]
    pub create_dirs: bool,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (validate inputs and show the plan without fetching or writing)
    #[arg(long)]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_timeout(self.timeout)
            .with_create_parent_dirs(self.create_dirs.then_some(true))
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

pub fn validate_url_arg(s: &str) -> std::result::Result<String, String> {
    validate_remote_url(s)
        .map(|_| s.to_string())
        .map_err(|_| "Only absolute http:// and https:// URLs are supported".to_string())
}

pub fn parse_timeout(s: &str) -> std::result::Result<f64, String> {
    let secs: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number of seconds: {}", s))?;

    if !secs.is_finite() || secs <= 0.0 {
        return Err("Timeout must be a positive number of seconds".to_string());
    }

    Ok(secs)
}
