//! HTTP plumbing shared by destinations.
//!
//! Non-success responses are turned into taxonomy errors here, so destinations only
//! handle the cases where they want a more specific message.

use actions_common::config::HttpSettings;
use actions_common::scrubber::scrub_excerpt;
use actions_error::{IntegrationError, Result};
use reqwest::Response;

/// Longest response body excerpt placed in an error message
pub const MAX_BODY_EXCERPT: usize = 512;

pub fn build_client(settings: &HttpSettings) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(settings.request_timeout())
        .user_agent(settings.user_agent.clone())
        .build()?;
    Ok(client)
}

/// Pass successful responses through; classify everything else.
pub async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().path().to_string();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!("Failed to read error response body from {}: {}", url, e);
            String::new()
        }
    };
    let excerpt = scrub_excerpt(&body, MAX_BODY_EXCERPT);

    let message = if excerpt.is_empty() {
        format!("Request to {} failed with status {}", url, status.as_u16())
    } else {
        format!(
            "Request to {} failed with status {}: {}",
            url,
            status.as_u16(),
            excerpt
        )
    };

    let err = IntegrationError::from_status(status.as_u16(), message);
    err.log();
    Err(err)
}
