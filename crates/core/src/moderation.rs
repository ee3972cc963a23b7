//! Blocked-term filter for user-submitted text

/// Terms rejected when no list is configured
pub const DEFAULT_BLOCKED_TERMS: &[&str] = &[
    "gali1", "gali2", "abuse1", "abuse2", "mc", "bc", "randi", "chod", "madarchod", "bhosdike",
    "lavde", "chutiya", "gaandu",
];

/// Case-insensitive substring filter
#[derive(Debug, Clone)]
pub struct ContentFilter {
    terms: Vec<String>,
}

impl ContentFilter {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            terms: terms
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// Returns the first blocked term found in `text`
    pub fn find_blocked(&self, text: &str) -> Option<&str> {
        let lowered = text.to_lowercase();
        self.terms
            .iter()
            .find(|term| lowered.contains(term.as_str()))
            .map(String::as_str)
    }

    pub fn is_clean(&self, text: &str) -> bool {
        self.find_blocked(text).is_none()
    }
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCKED_TERMS)
    }
}
