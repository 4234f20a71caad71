//! Notification endpoints.
//!
//! Every notifier absorbs its own failures: a failed call becomes a
//! [`Submission`] with an error and never stops the calls after it.

mod google;
mod indexnow;
mod websub;

pub use google::GoogleIndexingNotifier;
pub use indexnow::IndexNowNotifier;
pub use websub::WebSubNotifier;

use crawlhint_content::ContentUrl;

use crate::error::NotifyError;

/// Outcome of one HTTP call made by a notifier.
#[derive(Debug)]
pub struct Submission {
    /// What the call was about (a page URL, the feed URL, the token endpoint).
    pub target: String,
    /// HTTP status on success.
    pub result: Result<u16, NotifyError>,
}

impl Submission {
    /// Whether the call succeeded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// A search-engine notification endpoint.
pub trait Notifier: Send {
    /// Human-readable name used in progress output.
    fn name(&self) -> &'static str;

    /// Submit `urls`, returning one entry per HTTP call attempted.
    fn notify(&self, urls: &[ContentUrl]) -> Vec<Submission>;
}
