pub mod email_set;
pub mod output_writer;
pub mod pattern;
pub mod pipeline;
pub mod report;

pub use email_set::{sort_case_insensitive, EmailSet};
pub use output_writer::{OutputWriter, WriteOutcome};
pub use pattern::{find_emails, EMAIL_PATTERN};
pub use pipeline::{extract_emails, extract_emails_with, ExtractionRequest};
pub use report::{ExtractionReport, SourceSummary};
