//! Content path filtering.

/// Allow-list of content directories plus a required file extension.
#[derive(Debug, Clone)]
pub struct ContentFilter {
    prefixes: Vec<String>,
    extension: String,
}

impl ContentFilter {
    /// Create a filter from directory prefixes and an extension (with dot).
    pub fn new(prefixes: impl IntoIterator<Item = impl Into<String>>, extension: &str) -> Self {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
            extension: extension.to_owned(),
        }
    }

    /// Whether `path` lives under a content directory and has the extension.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        path.ends_with(&self.extension)
            && self.prefixes.iter().any(|prefix| path.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> ContentFilter {
        ContentFilter::new(["docs/_posts/", "docs/_pages/"], ".md")
    }

    #[test]
    fn test_accepts_post_and_page() {
        let filter = filter();
        assert!(filter.matches("docs/_posts/2024-01-01-a.md"));
        assert!(filter.matches("docs/_pages/about.md"));
    }

    #[test]
    fn test_rejects_outside_content_dirs() {
        let filter = filter();
        assert!(!filter.matches("README.md"));
        assert!(!filter.matches("docs/index.md"));
        assert!(!filter.matches("other/docs/_posts/a.md"));
    }

    #[test]
    fn test_rejects_wrong_extension() {
        let filter = filter();
        assert!(!filter.matches("docs/_posts/image.png"));
        assert!(!filter.matches("docs/_posts/draft.md.bak"));
        assert!(!filter.matches("docs/_pages/page.markdown"));
    }
}
