//! `IndexNow` batch submission.

use crawlhint_content::ContentUrl;
use serde::Serialize;
use tracing::{info, warn};
use ureq::Agent;

use super::{Notifier, Submission};
use crate::client::read_response;
use crate::error::NotifyError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexNowRequest<'a> {
    host: &'a str,
    key: &'a str,
    url_list: Vec<&'a str>,
}

/// Submits the whole URL list in a single request.
pub struct IndexNowNotifier {
    agent: Agent,
    endpoint: String,
    host: String,
    key: String,
}

impl IndexNowNotifier {
    /// Create a notifier for `host` authenticated by `key`.
    pub fn new(agent: Agent, endpoint: &str, host: &str, key: &str) -> Self {
        Self {
            agent,
            endpoint: endpoint.to_owned(),
            host: host.to_owned(),
            key: key.to_owned(),
        }
    }

    fn submit(&self, urls: &[ContentUrl]) -> Result<u16, NotifyError> {
        let request = IndexNowRequest {
            host: &self.host,
            key: &self.key,
            url_list: urls.iter().map(ContentUrl::as_str).collect(),
        };
        let response = self.agent.post(&self.endpoint).send_json(&request)?;
        let (status, _) = read_response(response)?;
        Ok(status)
    }
}

impl Notifier for IndexNowNotifier {
    fn name(&self) -> &'static str {
        "IndexNow"
    }

    fn notify(&self, urls: &[ContentUrl]) -> Vec<Submission> {
        let result = self.submit(urls);
        match &result {
            Ok(status) => info!(count = urls.len(), status, "IndexNow accepted URLs"),
            Err(err) => warn!(error = %err, "IndexNow submission failed"),
        }
        vec![Submission {
            target: format!("{} URLs", urls.len()),
            result,
        }]
    }
}
