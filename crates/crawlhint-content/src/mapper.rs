//! Mapping changed files to public URLs.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::permalink::extract_permalink;
use crate::{ContentError, ContentUrl};

/// Result of mapping one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    /// Path relative to the content root, as given to the mapper.
    pub path: String,
    /// What the mapper produced for it.
    pub outcome: MappingOutcome,
}

/// Outcome of mapping a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingOutcome {
    /// The file declares a permalink.
    Mapped(ContentUrl),
    /// The file has no usable `permalink:` line.
    NoPermalink,
    /// The file could not be read; carries the error message.
    Unreadable(String),
}

impl Mapping {
    /// URL produced for this file, if any.
    #[must_use]
    pub fn url(&self) -> Option<&ContentUrl> {
        match &self.outcome {
            MappingOutcome::Mapped(url) => Some(url),
            MappingOutcome::NoPermalink | MappingOutcome::Unreadable(_) => None,
        }
    }
}

/// Maps content files under a root directory to URLs on a site origin.
pub struct UrlMapper {
    root: PathBuf,
    origin: String,
}

impl UrlMapper {
    /// Create a mapper resolving paths against `root`.
    pub fn new(root: impl Into<PathBuf>, origin: &str) -> Self {
        Self {
            root: root.into(),
            origin: origin.trim_end_matches('/').to_owned(),
        }
    }

    /// Map a single file.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Io`] if the file cannot be read.
    pub fn map_file(&self, path: &str) -> Result<Mapping, ContentError> {
        let full_path = self.root.join(Path::new(path));
        let content = std::fs::read_to_string(&full_path).map_err(|source| ContentError::Io {
            path: full_path.clone(),
            source,
        })?;

        let outcome = match extract_permalink(&content) {
            Some(permalink) => {
                let url = ContentUrl::from_permalink(&self.origin, &permalink);
                debug!(path, url = %url, "mapped content file");
                MappingOutcome::Mapped(url)
            }
            None => {
                debug!(path, "no permalink in content file");
                MappingOutcome::NoPermalink
            }
        };

        Ok(Mapping {
            path: path.to_owned(),
            outcome,
        })
    }

    /// Map every file, keeping input order.
    ///
    /// Unreadable files are logged and reported as [`MappingOutcome::Unreadable`].
    pub fn map_all<'a>(&self, paths: impl IntoIterator<Item = &'a str>) -> Vec<Mapping> {
        paths
            .into_iter()
            .map(|path| {
                self.map_file(path).unwrap_or_else(|err| {
                    warn!(path, error = %err, "skipping unreadable content file");
                    Mapping {
                        path: path.to_owned(),
                        outcome: MappingOutcome::Unreadable(err.to_string()),
                    }
                })
            })
            .collect()
    }
}

/// Collect the mapped URLs in order.
#[must_use]
pub fn collect_urls(mappings: &[Mapping]) -> Vec<ContentUrl> {
    mappings.iter().filter_map(Mapping::url).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn write(root: &Path, path: &str, content: &str) {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }

    #[test]
    fn test_maps_post_to_site_url() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "docs/_posts/2024-01-01-a.md",
            "---\nlayout: post\npermalink: /a/\n---\nHello\n",
        );

        let mapper = UrlMapper::new(dir.path(), "https://victorfts.com");
        let mapping = mapper.map_file("docs/_posts/2024-01-01-a.md").unwrap();
        assert_eq!(
            mapping.url().map(ContentUrl::as_str),
            Some("https://victorfts.com/a/")
        );
    }

    #[test]
    fn test_origin_trailing_slash_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.md", "permalink: /a/\n");

        let mapper = UrlMapper::new(dir.path(), "https://victorfts.com/");
        let mapping = mapper.map_file("a.md").unwrap();
        assert_eq!(mapping.url().unwrap().as_str(), "https://victorfts.com/a/");
    }

    #[test]
    fn test_file_without_permalink_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "docs/_pages/draft.md", "---\ntitle: Draft\n---\n");

        let mapper = UrlMapper::new(dir.path(), "https://victorfts.com");
        let mapping = mapper.map_file("docs/_pages/draft.md").unwrap();
        assert_eq!(mapping.outcome, MappingOutcome::NoPermalink);
        assert!(mapping.url().is_none());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mapper = UrlMapper::new(dir.path(), "https://victorfts.com");
        assert!(matches!(
            mapper.map_file("docs/_posts/gone.md"),
            Err(ContentError::Io { .. })
        ));
    }

    #[test]
    fn test_map_all_keeps_order_and_absorbs_failures() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "docs/_posts/b.md", "permalink: /b/\n");
        write(dir.path(), "docs/_posts/a.md", "permalink: '/a/'\n");
        write(dir.path(), "docs/_posts/none.md", "no front matter\n");

        let mapper = UrlMapper::new(dir.path(), "https://victorfts.com");
        let mappings = mapper.map_all([
            "docs/_posts/b.md",
            "docs/_posts/missing.md",
            "docs/_posts/none.md",
            "docs/_posts/a.md",
        ]);

        assert_eq!(mappings.len(), 4);
        assert!(matches!(
            mappings[1].outcome,
            MappingOutcome::Unreadable(_)
        ));
        assert_eq!(mappings[2].outcome, MappingOutcome::NoPermalink);

        let urls: Vec<String> = collect_urls(&mappings)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://victorfts.com/b/".to_owned(),
                "https://victorfts.com/a/".to_owned()
            ]
        );
    }
}
