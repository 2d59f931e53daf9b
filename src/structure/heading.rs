//! Heading classification.

use crate::model::Fragment;

use super::FontProfile;

/// Decides whether a fragment is a heading, using the document's font profile.
#[derive(Debug, Clone, Copy)]
pub struct HeadingClassifier<'p> {
    profile: &'p FontProfile,
}

impl<'p> HeadingClassifier<'p> {
    /// Create a classifier over a finished profile.
    pub fn new(profile: &'p FontProfile) -> Self {
        Self { profile }
    }

    /// Heading level (1-6) for a fragment, or `None` for body text.
    ///
    /// The font size must be one of the profile's ranked sizes, and the
    /// trimmed text must be a single non-empty line. Multi-line runs at a
    /// heading size (pull quotes, emphasized passages) stay body text.
    pub fn classify(&self, fragment: &Fragment) -> Option<u8> {
        let level = self.profile.level_for(fragment.font_size)?;
        let text = fragment.text.trim();
        if text.is_empty() || text.contains(['\n', '\r']) {
            return None;
        }
        Some(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> FontProfile {
        let fragments = vec![
            Fragment::new("Title", 24.0, 1, 0),
            Fragment::new("Section", 18.0, 1, 1),
            Fragment::new("Plenty of ordinary body text here.", 12.0, 1, 2),
        ];
        FontProfile::from_fragments(&fragments).unwrap()
    }

    #[test]
    fn test_ranked_sizes_become_headings() {
        let profile = profile();
        let classifier = HeadingClassifier::new(&profile);

        assert_eq!(classifier.classify(&Fragment::new("Title", 24.0, 1, 0)), Some(1));
        assert_eq!(classifier.classify(&Fragment::new("Section", 18.0, 1, 1)), Some(2));
        assert_eq!(classifier.classify(&Fragment::new("Body", 12.0, 1, 2)), None);
    }

    #[test]
    fn test_multiline_heading_size_is_body() {
        let profile = profile();
        let classifier = HeadingClassifier::new(&profile);

        let quote = Fragment::new("A large pull quote\nthat wraps", 24.0, 1, 5);
        assert_eq!(classifier.classify(&quote), None);

        // Surrounding whitespace does not count as extra lines
        let padded = Fragment::new("\n  Title  \n", 24.0, 1, 6);
        assert_eq!(classifier.classify(&padded), Some(1));
    }

    #[test]
    fn test_blank_heading_size_is_not_heading() {
        let profile = profile();
        let classifier = HeadingClassifier::new(&profile);
        assert_eq!(classifier.classify(&Fragment::new("   ", 24.0, 1, 7)), None);
    }

    #[test]
    fn test_empty_profile_has_no_headings() {
        let profile = FontProfile::empty();
        let classifier = HeadingClassifier::new(&profile);
        assert_eq!(classifier.classify(&Fragment::new("Title", 24.0, 1, 0)), None);
    }
}
