use crate::core::retry::{ForwardState, RetryPolicy};
use crate::core::{Country, CountrySink, PostId};
use crate::domain::model::{PostPayload, PostResponse};
use crate::utils::error::ForwardError;
use async_trait::async_trait;
use reqwest::{Client, Response};

/// Posts a country summary to `{base}/posts`, retrying on 500.
#[derive(Debug, Clone)]
pub struct RestCountrySink {
    client: Client,
    posts_url: String,
    policy: RetryPolicy,
}

impl RestCountrySink {
    pub fn new(client: Client, base_url: &str, policy: RetryPolicy) -> Self {
        Self {
            client,
            posts_url: format!("{}/posts", base_url.trim_end_matches('/')),
            policy,
        }
    }

    pub fn posts_url(&self) -> &str {
        &self.posts_url
    }
}

#[async_trait]
impl CountrySink for RestCountrySink {
    async fn forward(&self, country: &Country) -> Result<Option<PostId>, ForwardError> {
        let payload = PostPayload::from(country);
        let mut attempt = 0;

        loop {
            let response = self
                .client
                .post(&self.posts_url)
                .json(&payload)
                .send()
                .await
                .map_err(|e| {
                    tracing::error!(attempt, "Error posting country details: {}", e);
                    ForwardError::Transport(e)
                })?;

            let status = response.status();
            let step = self.policy.advance(attempt, status);

            if let Some(delay) = step.delay {
                tracing::warn!(
                    status = status.as_u16(),
                    attempt,
                    max_attempts = self.policy.max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "REST sink returned server error, backing off"
                );
                tokio::time::sleep(delay).await;
            }

            match step.next {
                ForwardState::Attempting(next) => attempt = next,
                ForwardState::Success => {
                    tracing::debug!(status = status.as_u16(), attempt, "Country posted");
                    return Ok(read_post_id(response).await);
                }
                ForwardState::Skipped => {
                    tracing::warn!(status = status.as_u16(), "403 Forbidden error. Skipping request.");
                    return Err(ForwardError::Forbidden);
                }
                ForwardState::Exhausted => {
                    tracing::error!(
                        attempts = attempt + 1,
                        "REST sink still failing after all retry attempts"
                    );
                    return Err(ForwardError::RetriesExhausted {
                        attempts: attempt + 1,
                    });
                }
                ForwardState::Rejected(status) => {
                    tracing::warn!(status = status.as_u16(), "Failed to post country details");
                    return Err(ForwardError::UnexpectedStatus(status.as_u16()));
                }
            }
        }
    }
}

/// A missing or unparseable `id` is tolerated.
async fn read_post_id(response: Response) -> Option<PostId> {
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Could not read REST sink response body: {}", e);
            return None;
        }
    };

    match serde_json::from_str::<PostResponse>(&body) {
        Ok(parsed) => parsed.id,
        Err(e) => {
            tracing::warn!("REST sink response has no usable id: {}", e);
            None
        }
    }
}
