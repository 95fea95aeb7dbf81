use crate::source::SourceOrigin;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub remote_url: Option<String>,
    pub sources: Vec<SourceSummary>,
    pub unique_count: usize,
    pub emails: Vec<String>,
    pub bytes_written: usize,
    pub duration: Duration,
    pub extracted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub origin: SourceOrigin,
    pub bytes: usize,
    /// Matches before deduplication.
    pub matches: usize,
}

impl ExtractionReport {
    pub fn is_empty(&self) -> bool {
        self.unique_count == 0
    }

    pub fn total_matches(&self) -> usize {
        self.sources.iter().map(|s| s.matches).sum()
    }

    pub fn duplicates_collapsed(&self) -> usize {
        self.total_matches().saturating_sub(self.unique_count)
    }

    pub fn summary_line(&self) -> String {
        if self.is_empty() {
            "No email addresses detected.".to_string()
        } else {
            format!(
                "Extracted {} unique email(s) to {}",
                self.unique_count,
                self.output.display()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(sources: Vec<SourceSummary>, emails: &[&str]) -> ExtractionReport {
        ExtractionReport {
            input: PathBuf::from("in.txt"),
            output: PathBuf::from("out.txt"),
            remote_url: None,
            sources,
            unique_count: emails.len(),
            emails: emails.iter().map(|s| s.to_string()).collect(),
            bytes_written: 0,
            duration: Duration::from_millis(3),
            extracted_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_line() {
        let empty = report(Vec::new(), &[]);
        assert!(empty.is_empty());
        assert_eq!(empty.summary_line(), "No email addresses detected.");

        let full = report(Vec::new(), &["a@b.c", "d@e.f"]);
        assert_eq!(full.summary_line(), "Extracted 2 unique email(s) to out.txt");
    }

    #[test]
    fn test_match_totals() {
        let sources = vec![
            SourceSummary {
                origin: SourceOrigin::Local(PathBuf::from("in.txt")),
                bytes: 40,
                matches: 3,
            },
            SourceSummary {
                origin: SourceOrigin::Remote("https://example.com".to_string()),
                bytes: 12,
                matches: 1,
            },
        ];
        let report = report(sources, &["a@b.c", "d@e.f"]);

        assert_eq!(report.total_matches(), 4);
        assert_eq!(report.duplicates_collapsed(), 2);
    }

    #[test]
    fn test_json_shape() {
        let sources = vec![SourceSummary {
            origin: SourceOrigin::Remote("https://example.com/list".to_string()),
            bytes: 5,
            matches: 1,
        }];
        let value = serde_json::to_value(report(sources, &["a@b.c"])).unwrap();

        assert_eq!(value["unique_count"], 1);
        assert_eq!(value["emails"][0], "a@b.c");
        assert_eq!(value["sources"][0]["origin"]["kind"], "remote");
        assert_eq!(value["sources"][0]["origin"]["location"], "https://example.com/list");
    }
}
