use crate::error::{MailSiftError, Result};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "location", rename_all = "lowercase")]
pub enum SourceOrigin {
    Local(PathBuf),
    Remote(String),
}

impl fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceOrigin::Local(path) => write!(f, "{}", path.display()),
            SourceOrigin::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Decoded text from one origin, scanned once and then dropped.
#[derive(Debug, Clone)]
pub struct SourceText {
    pub origin: SourceOrigin,
    pub text: String,
}

impl SourceText {
    pub fn local<P: Into<PathBuf>>(path: P, text: String) -> Self {
        Self {
            origin: SourceOrigin::Local(path.into()),
            text,
        }
    }

    pub fn remote<S: Into<String>>(url: S, text: String) -> Self {
        Self {
            origin: SourceOrigin::Remote(url.into()),
            text,
        }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Read `path` as UTF-8, dropping any byte sequence that does not decode.
///
/// The regular-file check runs before any read so a missing path never
/// reaches the filesystem read call.
pub fn read_local_text(path: &Path) -> Result<SourceText> {
    if !path.is_file() {
        return Err(MailSiftError::MissingInput {
            path: path.display().to_string(),
        });
    }

    let bytes = fs::read(path).map_err(|e| MailSiftError::from_io(e, path))?;
    let text = decode_lossy(&bytes);

    tracing::debug!(
        path = %path.display(),
        bytes = bytes.len(),
        chars = text.chars().count(),
        "loaded local source"
    );

    Ok(SourceText::local(path, text))
}

/// Unlike `String::from_utf8_lossy`, invalid sequences are removed rather
/// than replaced with U+FFFD.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}
