//! Search-engine notification clients for crawlhint.
//!
//! Provides sync HTTP clients for the Google Indexing API (with
//! service-account JWT-bearer authorization), `IndexNow` and `WebSub` hubs.
//!
//! Every client implements [`Notifier`]. A notifier never fails as a whole:
//! each HTTP call it makes is reported as a [`Submission`], successful or not.

pub mod auth;
mod client;
mod error;
mod notifier;

pub use client::http_agent;
#[cfg(feature = "rs256")]
pub use error::RsaKeyError;
pub use error::{AuthError, NotifyError};
pub use notifier::{
    GoogleIndexingNotifier, IndexNowNotifier, Notifier, Submission, WebSubNotifier,
};
