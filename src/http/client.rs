use crate::retry::RetryPolicy;
use anyhow::{Context, Result};
use log::warn;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use std::time::Duration;

/// HTTP client with built-in timeout and retry handling.
///
/// Transport failures and 5xx responses are retried with a fixed delay;
/// any other response is returned as-is so callers can inspect the status.
pub struct RetryingClient {
    client: Client,
    max_retries: usize,
    retry_delay_ms: u64,
}

impl RetryingClient {
    pub fn new(
        user_agent: &str,
        timeout_secs: u64,
        max_retries: usize,
        retry_delay_ms: u64,
    ) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;

        Ok(Self {
            client,
            max_retries,
            retry_delay_ms,
        })
    }

    pub async fn get(&self, url: &str) -> Result<Response> {
        self.execute(|| self.client.get(url)).await
    }

    pub async fn get_with_bearer(&self, url: &str, token: &str) -> Result<Response> {
        self.execute(|| self.client.get(url).bearer_auth(token))
            .await
    }

    pub async fn post_json<T: Serialize>(
        &self,
        url: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        self.execute(|| self.client.post(url).bearer_auth(token).json(body))
            .await
    }

    // --- Helper Methods ---

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn execute<F>(&self, build: F) -> Result<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut policy = RetryPolicy::new(self.max_retries, self.retry_delay_ms);

        loop {
            match Self::send(build()).await {
                Ok(response) if response.status().is_server_error() => {
                    if !policy.next_attempt() {
                        anyhow::bail!(
                            "Server returned {} after {} attempts",
                            response.status(),
                            policy.attempts()
                        );
                    }
                    warn!("Server returned {}, retrying", response.status());
                    policy.wait().await;
                }
                Ok(response) => return Ok(response),
                Err(e) => {
                    if !policy.next_attempt() {
                        return Err(e).with_context(|| {
                            format!("Request failed after {} attempts", policy.attempts())
                        });
                    }
                    warn!("Request failed, retrying: {e:#}");
                    policy.wait().await;
                }
            }
        }
    }

    async fn send(request: RequestBuilder) -> Result<Response> {
        request.send().await.context("Failed to send request")
    }
}
