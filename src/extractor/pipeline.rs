use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::error::{MailSiftError, Result};
use crate::extractor::{EmailSet, ExtractionReport, OutputWriter, SourceSummary};
use crate::source::{read_local_text, HttpFetcher, RemoteSource, SourceText};
use chrono::Utc;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// One run's inputs: where to read, where to write, and the optional remote
/// source with its timeout.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub remote_url: Option<String>,
    pub timeout: Duration,
    pub create_parent_dirs: bool,
}

impl ExtractionRequest {
    pub fn new<I: Into<PathBuf>, O: Into<PathBuf>>(input: I, output: O) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            remote_url: None,
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
            create_parent_dirs: false,
        }
    }

    pub fn with_remote_url<S: Into<String>>(mut self, url: Option<S>) -> Self {
        self.remote_url = url.map(Into::into);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_create_parent_dirs(mut self, create: bool) -> Self {
        self.create_parent_dirs = create;
        self
    }

    /// An empty string counts as no URL.
    pub fn remote_url(&self) -> Option<&str> {
        self.remote_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Run the pipeline with the real HTTP client for the remote source.
pub fn extract_emails(request: &ExtractionRequest) -> Result<ExtractionReport> {
    if request.remote_url().is_none() {
        return extract_emails_with(request, &offline);
    }

    let fetcher = HttpFetcher::with_timeout(request.timeout)?;
    extract_emails_with(request, &fetcher)
}

/// Load, extract, sort, write.
///
/// Every failure aborts the run before the output file is opened, except a
/// failure of the write itself. A run with zero matches still writes an
/// empty file.
pub fn extract_emails_with<R>(request: &ExtractionRequest, remote: &R) -> Result<ExtractionReport>
where
    R: RemoteSource + ?Sized,
{
    let started = Instant::now();

    let mut sources = vec![read_local_text(&request.input)?];

    if let Some(url) = request.remote_url() {
        let text = remote.fetch(url)?;
        sources.push(SourceText::remote(url, text));
    }

    let mut email_set = EmailSet::new();
    let summaries: Vec<SourceSummary> = sources
        .iter()
        .map(|source| SourceSummary {
            origin: source.origin.clone(),
            bytes: source.len(),
            matches: email_set.extend_from_source(source),
        })
        .collect();
    drop(sources);

    let emails = email_set.into_sorted();
    if emails.is_empty() {
        tracing::info!(input = %request.input.display(), "no email addresses detected");
    }

    let outcome = OutputWriter::new(&request.output)
        .with_create_parent_dirs(request.create_parent_dirs)
        .write(&emails)?;

    Ok(ExtractionReport {
        input: request.input.clone(),
        output: outcome.path,
        remote_url: request.remote_url().map(str::to_string),
        sources: summaries,
        unique_count: outcome.count,
        emails,
        bytes_written: outcome.bytes,
        duration: started.elapsed(),
        extracted_at: Utc::now(),
    })
}

pub(crate) fn offline(url: &str) -> Result<String> {
    Err(MailSiftError::Network {
        url: url.to_string(),
        message: "no remote source configured".to_string(),
    })
}
