//! Google Indexing API.

use std::time::{SystemTime, UNIX_EPOCH};

use crawlhint_content::ContentUrl;
use serde::Serialize;
use tracing::{info, warn};
use ureq::Agent;

use super::{Notifier, Submission};
use crate::auth::{AssertionSigner, BearerToken, ServiceAccount, TokenClient};
use crate::client::read_response;
use crate::error::NotifyError;

#[derive(Serialize)]
struct UrlNotification<'a> {
    url: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Publishes `URL_UPDATED` notifications, one request per URL.
///
/// A bearer token is minted when [`Notifier::notify`] runs.
pub struct GoogleIndexingNotifier {
    agent: Agent,
    endpoint: String,
    token_client: TokenClient,
    account: ServiceAccount,
    signer: Box<dyn AssertionSigner>,
}

impl GoogleIndexingNotifier {
    /// Create a notifier for `account`, signing assertions with `signer`.
    pub fn new(
        agent: Agent,
        endpoint: &str,
        token_url: &str,
        account: ServiceAccount,
        signer: Box<dyn AssertionSigner>,
    ) -> Self {
        Self {
            token_client: TokenClient::new(agent.clone(), token_url),
            agent,
            endpoint: endpoint.to_owned(),
            account,
            signer,
        }
    }

    fn publish(&self, url: &ContentUrl, token: &BearerToken) -> Result<u16, NotifyError> {
        let response = self
            .agent
            .post(&self.endpoint)
            .header("Authorization", &format!("Bearer {}", token.secret()))
            .send_json(UrlNotification {
                url: url.as_str(),
                kind: "URL_UPDATED",
            })?;
        let (status, _) = read_response(response)?;
        Ok(status)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

impl Notifier for GoogleIndexingNotifier {
    fn name(&self) -> &'static str {
        "Google Indexing API"
    }

    fn notify(&self, urls: &[ContentUrl]) -> Vec<Submission> {
        let token = match self
            .token_client
            .mint(&self.account, self.signer.as_ref(), unix_now())
        {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "could not obtain Google access token");
                return vec![Submission {
                    target: self.token_client.token_url().to_owned(),
                    result: Err(err),
                }];
            }
        };

        urls.iter()
            .map(|url| {
                let result = self.publish(url, &token);
                match &result {
                    Ok(status) => info!(url = %url, status, "Google notified"),
                    Err(err) => warn!(url = %url, error = %err, "Google notification failed"),
                }
                Submission {
                    target: url.to_string(),
                    result,
                }
            })
            .collect()
    }
}
