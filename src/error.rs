use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailSiftError {
    #[error("Input file not found: {path}")]
    MissingInput { path: String },

    #[error("Permission denied: {path}")]
    Permission { path: String },

    #[error("Network error while fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("Fetching {url} timed out after {seconds} seconds")]
    Timeout { url: String, seconds: f64 },

    #[error("Remote server returned HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid remote URL: {url}")]
    InvalidUrl { url: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Coarse grouping of failures, stable across variant changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    MissingInput,
    Permission,
    Network,
    Io,
    Config,
}

impl MailSiftError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MailSiftError::MissingInput { .. } => ErrorCategory::MissingInput,
            MailSiftError::Permission { .. } => ErrorCategory::Permission,
            MailSiftError::Network { .. }
            | MailSiftError::Timeout { .. }
            | MailSiftError::HttpStatus { .. }
            | MailSiftError::InvalidUrl { .. } => ErrorCategory::Network,
            MailSiftError::Io(_) => ErrorCategory::Io,
            MailSiftError::Config { .. } => ErrorCategory::Config,
        }
    }

    /// Classify an I/O failure on `path`, splitting out access-rights errors.
    pub fn from_io(error: std::io::Error, path: &std::path::Path) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => MailSiftError::Permission {
                path: path.display().to_string(),
            },
            _ => MailSiftError::Io(error),
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for MailSiftError {
    fn user_message(&self) -> String {
        match self {
            MailSiftError::MissingInput { path } => {
                format!("File error: Input file not found: {}", path)
            }
            MailSiftError::Permission { path } => {
                format!("File error: Permission denied: {}", path)
            }
            MailSiftError::Network { url, message } => {
                format!("Network error while fetching remote text from {}: {}", url, message)
            }
            MailSiftError::Timeout { url, seconds } => {
                format!(
                    "Network error while fetching remote text from {}: timed out after {}s",
                    url, seconds
                )
            }
            MailSiftError::HttpStatus { url, status } => {
                format!(
                    "Network error while fetching remote text from {}: HTTP {}",
                    url, status
                )
            }
            MailSiftError::InvalidUrl { url } => {
                format!("Network error: invalid remote URL: {}", url)
            }
            MailSiftError::Io(e) => format!("I/O error: {}", e),
            MailSiftError::Config { message } => {
                format!("Configuration error: {}", message)
            }
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            MailSiftError::MissingInput { .. } => Some(
                "Check that the input path points to an existing regular file.".to_string()
            ),
            MailSiftError::Permission { .. } => Some(
                "Ensure you have read access to the input file and write access to the output location.".to_string()
            ),
            MailSiftError::Network { .. } => Some(
                "Check your internet connection and that the remote server is reachable.".to_string()
            ),
            MailSiftError::Timeout { .. } => Some(
                "The remote server did not answer in time. Try again or raise the limit with --timeout.".to_string()
            ),
            MailSiftError::HttpStatus { .. } => Some(
                "The remote resource could not be retrieved. Verify the URL points to a readable text resource.".to_string()
            ),
            MailSiftError::InvalidUrl { .. } => Some(
                "Provide a full http:// or https:// URL (e.g., https://example.com/contacts.txt).".to_string()
            ),
            MailSiftError::Config { .. } => Some(
                "Check your configuration file syntax and value ranges, or regenerate one with --generate-config.".to_string()
            ),
            MailSiftError::Io(_) => None,
        }
    }
}

impl From<toml::de::Error> for MailSiftError {
    fn from(error: toml::de::Error) -> Self {
        MailSiftError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MailSiftError>;
