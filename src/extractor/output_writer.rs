use crate::error::{MailSiftError, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteOutcome {
    pub path: PathBuf,
    pub count: usize,
    pub bytes: usize,
}

/// Writes the final list in one shot. Existing content is truncated, an
/// empty list produces a zero-byte file, and nothing is rolled back if the
/// write fails halfway.
pub struct OutputWriter {
    path: PathBuf,
    create_parent_dirs: bool,
}

impl OutputWriter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            create_parent_dirs: false,
        }
    }

    pub fn with_create_parent_dirs(mut self, create: bool) -> Self {
        self.create_parent_dirs = create;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, emails: &[String]) -> Result<WriteOutcome> {
        if self.create_parent_dirs {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| MailSiftError::from_io(e, parent))?;
            }
        }

        let content = render(emails);
        fs::write(&self.path, content.as_bytes())
            .map_err(|e| MailSiftError::from_io(e, &self.path))?;

        tracing::info!(path = %self.path.display(), count = emails.len(), "wrote output");

        Ok(WriteOutcome {
            path: self.path.clone(),
            count: emails.len(),
            bytes: content.len(),
        })
    }
}

/// Newline-joined, no trailing newline.
pub fn render(emails: &[String]) -> String {
    emails.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_write_joined_without_trailing_newline() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");

        let outcome = OutputWriter::new(&path)
            .write(&list(&["alice@test.org", "Bob@Example.com"]))
            .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "alice@test.org\nBob@Example.com");
        assert_eq!(outcome.count, 2);
        assert_eq!(outcome.bytes, 30);
        assert_eq!(outcome.path, path);
    }

    #[test]
    fn test_empty_list_truncates_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");
        fs::write(&path, "stale@old.com\nother@old.com").unwrap();

        let outcome = OutputWriter::new(&path).write(&[]).unwrap();

        assert_eq!(outcome.count, 0);
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn test_overwrites_longer_previous_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");
        fs::write(&path, "x".repeat(500)).unwrap();

        OutputWriter::new(&path).write(&list(&["a@b.c"])).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a@b.c");
    }

    #[test]
    fn test_missing_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("out.txt");

        let err = OutputWriter::new(&path).write(&list(&["a@b.c"])).unwrap_err();
        assert!(matches!(err, MailSiftError::Io(_)));
        assert!(!path.exists());

        OutputWriter::new(&path)
            .with_create_parent_dirs(true)
            .write(&list(&["a@b.c"]))
            .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a@b.c");
    }

    #[cfg(unix)]
    #[test]
    fn test_read_only_directory_is_permission_error() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let locked = temp_dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        // Root ignores mode bits; only assert when a plain write is denied.
        let denied = fs::write(locked.join("check.txt"), "").is_err();
        let result = OutputWriter::new(locked.join("out.txt")).write(&list(&["a@b.c"]));

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if denied {
            let err = result.unwrap_err();
            assert!(matches!(err, MailSiftError::Permission { .. }));
            assert!(!locked.join("out.txt").exists());
        }
    }

    #[test]
    fn test_render() {
        assert_eq!(render(&[]), "");
        assert_eq!(render(&list(&["one@x.y"])), "one@x.y");
    }
}
