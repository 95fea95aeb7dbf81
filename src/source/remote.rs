use crate::config::FetchConfig;
use crate::error::{MailSiftError, Result};
use crate::source::decode_lossy;
use reqwest::blocking::Client;
use std::io::{self, Read};
use std::time::Duration;
use url::Url;

/// Anything that can turn a URL into source text.
///
/// The pipeline only talks to this trait, so tests can substitute a closure
/// for the real HTTP client.
pub trait RemoteSource {
    fn fetch(&self, url: &str) -> Result<String>;
}

impl<F> RemoteSource for F
where
    F: Fn(&str) -> Result<String>,
{
    fn fetch(&self, url: &str) -> Result<String> {
        self(url)
    }
}

/// Single-shot blocking HTTP GET. No retries.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
    max_response_bytes: Option<u64>,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .timeout(timeout)
            .build()
            .map_err(|e| MailSiftError::Config {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            timeout,
            max_response_bytes: config.max_response_bytes,
        })
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Self::new(&FetchConfig::default(), timeout)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn map_transport_error(&self, url: &str, error: reqwest::Error) -> MailSiftError {
        if error.is_timeout() {
            MailSiftError::Timeout {
                url: url.to_string(),
                seconds: self.timeout.as_secs_f64(),
            }
        } else {
            MailSiftError::Network {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }

    // Body reads surface timeouts as io errors wrapping the reqwest error.
    fn map_read_error(&self, url: &str, error: io::Error) -> MailSiftError {
        let timed_out = error.kind() == io::ErrorKind::TimedOut
            || error
                .get_ref()
                .and_then(|inner| inner.downcast_ref::<reqwest::Error>())
                .is_some_and(reqwest::Error::is_timeout);

        if timed_out {
            MailSiftError::Timeout {
                url: url.to_string(),
                seconds: self.timeout.as_secs_f64(),
            }
        } else {
            MailSiftError::Network {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }

    /// Reads at most one byte past the ceiling, so an oversized body without
    /// a content-length is rejected without being buffered in full.
    fn read_body<R: Read>(&self, url: &str, reader: R) -> Result<Vec<u8>> {
        let limit = self
            .max_response_bytes
            .map_or(u64::MAX, |max| max.saturating_add(1));

        let mut body = Vec::new();
        reader
            .take(limit)
            .read_to_end(&mut body)
            .map_err(|e| self.map_read_error(url, e))?;

        self.check_size(url, body.len() as u64)?;
        Ok(body)
    }

    fn check_size(&self, url: &str, len: u64) -> Result<()> {
        match self.max_response_bytes {
            Some(max) if len > max => Err(MailSiftError::Network {
                url: url.to_string(),
                message: format!("response too large ({} bytes, max {})", len, max),
            }),
            _ => Ok(()),
        }
    }
}

impl RemoteSource for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let parsed = validate_remote_url(url)?;

        tracing::info!(url = %parsed, timeout_secs = self.timeout.as_secs_f64(), "fetching remote text");

        let response = self
            .client
            .get(parsed)
            .send()
            .map_err(|e| self.map_transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "remote fetch rejected");
            return Err(MailSiftError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(len) = response.content_length() {
            self.check_size(url, len)?;
        }

        let body = self.read_body(url, response)?;

        tracing::debug!(url, bytes = body.len(), "remote text received");
        Ok(decode_lossy(&body))
    }
}

/// Accept only absolute http(s) URLs with a host.
pub fn validate_remote_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|_| MailSiftError::InvalidUrl {
        url: url.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(parsed),
        _ => Err(MailSiftError::InvalidUrl {
            url: url.to_string(),
        }),
    }
}
