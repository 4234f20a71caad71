//! Shared HTTP plumbing.

use std::time::Duration;

use ureq::Agent;
use ureq::http::Response;

use crate::error::NotifyError;

/// Maximum number of characters of an error body kept for diagnostics.
const ERROR_BODY_LIMIT: usize = 200;

/// Build the agent shared by all notifiers.
///
/// Status codes are not turned into errors; callers inspect them.
#[must_use]
pub fn http_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Read status and body, failing on any non-2xx status.
pub(crate) fn read_response(response: Response<ureq::Body>) -> Result<(u16, String), NotifyError> {
    let status = response.status().as_u16();
    let mut body_reader = response.into_body();
    let body = body_reader
        .read_to_string()
        .unwrap_or_else(|_| "(unable to read response body)".to_owned());

    if !(200..300).contains(&status) {
        return Err(NotifyError::HttpResponse {
            status,
            body: truncate(&body, ERROR_BODY_LIMIT),
        });
    }

    Ok((status, body))
}

fn truncate(body: &str, limit: usize) -> String {
    body.chars().take(limit).collect()
}
