//! Permalink extraction and URL mapping for crawlhint.
//!
//! Each changed content file declares its public path in a `permalink:`
//! front-matter line. [`UrlMapper`] reads the file, extracts that path and
//! joins it with the site origin to form a [`ContentUrl`].

mod mapper;
mod permalink;

pub use mapper::{Mapping, MappingOutcome, UrlMapper, collect_urls};
pub use permalink::extract_permalink;

use std::fmt;
use std::path::PathBuf;

/// Error reading a content file.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Absolute public URL of a content page.
///
/// Always starts with the site origin it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentUrl(String);

impl ContentUrl {
    /// Join a site origin and a permalink.
    ///
    /// A permalink without a leading `/` gets one, so the origin's host is
    /// never merged with the path.
    #[must_use]
    pub fn from_permalink(origin: &str, permalink: &str) -> Self {
        if permalink.starts_with('/') {
            Self(format!("{origin}{permalink}"))
        } else {
            Self(format!("{origin}/{permalink}"))
        }
    }

    /// The URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ContentUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
