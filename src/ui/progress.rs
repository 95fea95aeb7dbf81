use crate::error::Result;
use crate::source::RemoteSource;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        pb.set_message(message.to_string());
        pb
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Shows a spinner while the wrapped source is fetching.
pub struct SpinnerFetcher<'a, R: RemoteSource + ?Sized> {
    inner: &'a R,
    progress: &'a ProgressManager,
}

impl<'a, R: RemoteSource + ?Sized> SpinnerFetcher<'a, R> {
    pub fn new(inner: &'a R, progress: &'a ProgressManager) -> Self {
        Self { inner, progress }
    }
}

impl<R: RemoteSource + ?Sized> RemoteSource for SpinnerFetcher<'_, R> {
    fn fetch(&self, url: &str) -> Result<String> {
        let spinner = self.progress.create_spinner(&format!("Fetching {}", url));
        let result = self.inner.fetch(url);

        match &result {
            Ok(body) => spinner.finish_with_message(format!(
                "Fetched {} bytes from {}",
                body.len(),
                url
            )),
            Err(_) => spinner.finish_and_clear(),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MailSiftError;

    #[test]
    fn test_disabled_progress_is_hidden() {
        let manager = ProgressManager::new(false);
        assert!(!manager.is_enabled());
        assert!(manager.create_spinner("Fetching").is_hidden());
    }

    #[test]
    fn test_spinner_fetcher_passes_through() {
        let manager = ProgressManager::new(false);
        let inner = |url: &str| -> Result<String> { Ok(format!("hello@{}", url)) };
        let fetcher = SpinnerFetcher::new(&inner, &manager);

        assert_eq!(fetcher.fetch("example.com").unwrap(), "hello@example.com");
    }

    #[test]
    fn test_spinner_fetcher_propagates_errors() {
        let manager = ProgressManager::new(false);
        let inner = |url: &str| -> Result<String> {
            Err(MailSiftError::HttpStatus {
                url: url.to_string(),
                status: 503,
            })
        };
        let fetcher = SpinnerFetcher::new(&inner, &manager);

        let err = fetcher.fetch("https://example.com").unwrap_err();
        assert!(matches!(err, MailSiftError::HttpStatus { status: 503, .. }));
    }
}
