use std::fmt;

/// Plain text pulled out of a document, fragments kept in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedText(String);

impl ExtractedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Joins page or paragraph fragments with `separator`. Empty fragments
    /// still take their slot, so two separators may end up adjacent.
    pub fn from_fragments<I, S>(fragments: I, separator: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for (index, fragment) in fragments.into_iter().enumerate() {
            if index > 0 {
                text.push_str(separator);
            }
            text.push_str(fragment.as_ref());
        }
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ExtractedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
