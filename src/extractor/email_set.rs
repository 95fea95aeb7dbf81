use crate::extractor::pattern::find_emails;
use crate::source::SourceText;
use std::collections::HashSet;

/// Distinct matched addresses across every source of a run.
///
/// Membership is exact string equality: `A@B.com` and `a@b.com` are two
/// entries. Values are stored exactly as matched.
#[derive(Debug, Clone, Default)]
pub struct EmailSet {
    emails: HashSet<String>,
}

impl EmailSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<S: Into<String>>(&mut self, email: S) -> bool {
        self.emails.insert(email.into())
    }

    /// Returns the number of matches found in `text`, duplicates included.
    pub fn extend_from_text(&mut self, text: &str) -> usize {
        let mut seen = 0;
        for email in find_emails(text) {
            seen += 1;
            if !self.emails.contains(email) {
                self.emails.insert(email.to_string());
            }
        }
        seen
    }

    pub fn extend_from_source(&mut self, source: &SourceText) -> usize {
        let seen = self.extend_from_text(&source.text);
        tracing::debug!(origin = %source.origin, matches = seen, total_unique = self.len(), "scanned source");
        seen
    }

    pub fn contains(&self, email: &str) -> bool {
        self.emails.contains(email)
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn into_sorted(self) -> Vec<String> {
        let mut emails: Vec<String> = self.emails.into_iter().collect();
        sort_case_insensitive(&mut emails);
        emails
    }
}

impl<S: Into<String>> FromIterator<S> for EmailSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            emails: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Order by lowercased form; entries equal ignoring case fall back to byte
/// order so the result never depends on set iteration order.
pub fn sort_case_insensitive(emails: &mut Vec<String>) {
    let mut keyed: Vec<(String, String)> = emails
        .drain(..)
        .map(|email| (email.to_lowercase(), email))
        .collect();
    keyed.sort_unstable();
    emails.extend(keyed.into_iter().map(|(_, email)| email));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_contact_line() {
        let mut set = EmailSet::new();
        let seen = set.extend_from_text("Contact: Bob@Example.com, alice@test.org, Bob@Example.com");

        assert_eq!(seen, 3);
        assert_eq!(set.len(), 2);
        assert_eq!(set.into_sorted(), vec!["alice@test.org", "Bob@Example.com"]);
    }

    #[test]
    fn test_case_variants_are_distinct() {
        let mut set = EmailSet::new();
        set.extend_from_text("bob@x.com Bob@x.com BOB@X.COM bob@x.com");

        assert_eq!(set.len(), 3);
        assert!(set.contains("BOB@X.COM"));
        assert!(!set.contains("Bob@X.com"));
    }

    #[test]
    fn test_case_insensitive_ties_use_byte_order() {
        let set: EmailSet = ["bob@x.com", "Bob@x.com", "BOB@X.COM", "amy@x.com"]
            .into_iter()
            .collect();

        assert_eq!(
            set.into_sorted(),
            vec!["amy@x.com", "BOB@X.COM", "Bob@x.com", "bob@x.com"]
        );
    }

    #[test]
    fn test_union_across_sources() {
        let mut set = EmailSet::new();
        set.extend_from_source(&SourceText::local("local.txt", "a@one.com b@two.com".to_string()));
        set.extend_from_source(&SourceText::remote(
            "https://example.com/list",
            "b@two.com c@three.com".to_string(),
        ));

        assert_eq!(set.into_sorted(), vec!["a@one.com", "b@two.com", "c@three.com"]);
    }

    #[test]
    fn test_sorted_output_is_ordered_and_verbatim() {
        let text = "Zed@z.io, mike@M.net; ann@a.org\nmike@M.net x_y+z@q.q.q";
        let mut set = EmailSet::new();
        set.extend_from_text(text);
        let sorted = set.into_sorted();

        for pair in sorted.windows(2) {
            assert!(pair[0].to_lowercase() <= pair[1].to_lowercase());
        }
        for email in &sorted {
            assert!(text.contains(email.as_str()));
        }
        assert_eq!(sorted.len(), 4);
    }

    #[test]
    fn test_empty_set() {
        let mut set = EmailSet::new();
        assert_eq!(set.extend_from_text("nothing to see"), 0);
        assert!(set.is_empty());
        assert!(set.into_sorted().is_empty());
    }
}
