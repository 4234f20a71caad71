//! `WebSub` (`PubSubHubbub`) publish ping.

use crawlhint_content::ContentUrl;
use tracing::{info, warn};
use ureq::Agent;

use super::{Notifier, Submission};
use crate::client::read_response;
use crate::error::NotifyError;

/// Tells a hub that the site feed changed. Needs no credential.
pub struct WebSubNotifier {
    agent: Agent,
    hub: String,
    feed_url: String,
}

impl WebSubNotifier {
    /// Create a notifier announcing `feed_url` to `hub`.
    pub fn new(agent: Agent, hub: &str, feed_url: &str) -> Self {
        Self {
            agent,
            hub: hub.to_owned(),
            feed_url: feed_url.to_owned(),
        }
    }

    fn ping(&self) -> Result<u16, NotifyError> {
        let response = self
            .agent
            .post(&self.hub)
            .send_form([("hub.mode", "publish"), ("hub.url", self.feed_url.as_str())])?;
        let (status, _) = read_response(response)?;
        Ok(status)
    }
}

impl Notifier for WebSubNotifier {
    fn name(&self) -> &'static str {
        "WebSub"
    }

    /// Pings the hub once; the page list is not part of the protocol.
    fn notify(&self, _urls: &[ContentUrl]) -> Vec<Submission> {
        let result = self.ping();
        match &result {
            Ok(status) => info!(feed = %self.feed_url, status, "WebSub hub pinged"),
            Err(err) => warn!(feed = %self.feed_url, error = %err, "WebSub ping failed"),
        }
        vec![Submission {
            target: self.feed_url.clone(),
            result,
        }]
    }
}
