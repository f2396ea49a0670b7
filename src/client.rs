use chrono::{SecondsFormat, Utc};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde_json::Value;

use crate::auth;
use crate::error::{FireflyError, Result};
use crate::operations::Operation;
use crate::types::*;

/// Firefly generative API base.
pub const API_BASE_URL: &str = "https://firefly-api.adobe.io/v3";

fn normalize(endpoint: String) -> String {
    endpoint.trim_end_matches('/').to_string()
}

/// Async client for the Adobe Firefly generative API.
///
/// Handles the IMS token exchange, job submission, and status polling.
/// Every call carries its own credentials; the client holds no per-call
/// state and is cheap to clone.
///
/// # Example
/// ```no_run
/// use firefly_rs::{Credentials, FireflyClient, TextToImage};
///
/// # async fn example() -> firefly_rs::Result<()> {
/// let client = FireflyClient::new();
/// let credentials = Credentials::new("client-id", "client-secret");
/// let record = client
///     .execute(&credentials, &TextToImage::new("a red fox").into())
///     .await?;
/// println!("job {} is {}", record.job_id, record.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FireflyClient {
    http: Client,
    base_url: String,
    auth_url: String,
}

impl Default for FireflyClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FireflyClient {
    /// Create a client pointing at the production Firefly and IMS endpoints.
    pub fn new() -> Self {
        Self {
            http: Client::new(),
            base_url: API_BASE_URL.to_string(),
            auth_url: auth::AUTH_URL.to_string(),
        }
    }

    /// Use a custom `reqwest::Client` (for connection pooling, timeouts, TLS).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// Override the API base URL (staging environments, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = normalize(url.into());
        self
    }

    /// Override the IMS token endpoint (tests).
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    /// Returns the configured API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Authentication ──────────────────────────────────────────────

    /// Exchange client credentials for a fresh bearer token.
    ///
    /// Called once per [`execute`](Self::execute); tokens are not cached
    /// across calls.
    pub async fn fetch_access_token(&self, credentials: &Credentials) -> Result<AccessToken> {
        auth::fetch_access_token(&self.http, &self.auth_url, credentials).await
    }

    // ── Requests ────────────────────────────────────────────────────

    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        token: &AccessToken,
        api_key: &str,
    ) -> Result<Value> {
        if token.as_str().is_empty() {
            return Err(FireflyError::MissingToken);
        }
        if api_key.is_empty() {
            return Err(FireflyError::MissingCredentials);
        }

        let url = format!("{}{}", self.base_url, endpoint);
        let mut req = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(token.as_str())
            .header("x-api-key", api_key);
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| FireflyError::Network {
            context: format!("Cannot reach Firefly at {}", self.base_url),
            source: e,
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body_text = resp.text().await.unwrap_or_default();
            return Err(FireflyError::Api {
                status,
                body: body_text,
            });
        }

        resp.json().await.map_err(|e| FireflyError::Network {
            context: "Failed to parse Firefly response".into(),
            source: e,
        })
    }

    /// Submit a generation job. Returns the initial snapshot — usually
    /// `RUNNING` with the vendor-assigned job id.
    pub async fn submit(
        &self,
        endpoint: &str,
        payload: &Value,
        token: &AccessToken,
        api_key: &str,
    ) -> Result<JobSnapshot> {
        let json = self
            .request(Method::POST, endpoint, Some(payload), token, api_key)
            .await?;
        JobSnapshot::from_value(&json, None)
    }

    /// Read the current snapshot of a job.
    pub async fn job_status(
        &self,
        job_id: &str,
        token: &AccessToken,
        api_key: &str,
    ) -> Result<JobSnapshot> {
        let endpoint = format!("/generativeAssets/jobs/{}", job_id);
        let json = self
            .request(Method::GET, &endpoint, None, token, api_key)
            .await?;
        JobSnapshot::from_value(&json, Some(job_id))
    }

    // ── Completion polling ──────────────────────────────────────────

    /// Poll the job-status endpoint until the job reaches a terminal
    /// state or the attempt budget runs out.
    ///
    /// Each attempt is one status read: `SUCCEEDED` returns the snapshot,
    /// `FAILED` surfaces [`FireflyError::JobFailed`] with the vendor
    /// message, anything else stays pending. Between attempts the calling
    /// task is suspended for `policy.interval` — never after the final
    /// read. Exhausting the budget surfaces [`FireflyError::JobTimeout`]
    /// with the attempt count.
    pub async fn poll_until_terminal(
        &self,
        job_id: &str,
        token: &AccessToken,
        api_key: &str,
        policy: PollPolicy,
    ) -> Result<JobSnapshot> {
        let mut attempts = 0u32;

        while attempts < policy.max_attempts {
            let snapshot = self.job_status(job_id, token, api_key).await?;

            match snapshot.status {
                JobStatus::Succeeded => return Ok(snapshot),
                JobStatus::Failed => {
                    return Err(FireflyError::JobFailed {
                        message: snapshot
                            .failure_message
                            .unwrap_or_else(|| "Unknown error".into()),
                    });
                }
                JobStatus::Pending(_) => {}
            }

            attempts += 1;
            if attempts < policy.max_attempts {
                tokio::time::sleep(policy.interval).await;
            }
        }

        Err(FireflyError::JobTimeout {
            attempts: policy.max_attempts,
        })
    }

    // ── Dispatch ────────────────────────────────────────────────────

    /// Run one operation end to end: fetch a fresh token, submit the
    /// shaped payload, and — for operations that opted into waiting —
    /// poll until the job completes.
    ///
    /// The `x-api-key` header is the client id; the secret is only ever
    /// sent to the token endpoint.
    pub async fn execute(
        &self,
        credentials: &Credentials,
        operation: &Operation,
    ) -> Result<OperationRecord> {
        credentials.ensure_present()?;
        let token = self.fetch_access_token(credentials).await?;

        let snapshot = self
            .submit(
                operation.endpoint(),
                &operation.payload(),
                &token,
                &credentials.client_id,
            )
            .await?;

        if let Some(policy) = operation.wait() {
            if snapshot.status != JobStatus::Succeeded {
                let final_snapshot = self
                    .poll_until_terminal(&snapshot.id, &token, &credentials.client_id, policy)
                    .await?;
                let completed_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
                return Ok(operation.record(&final_snapshot, Some(completed_at)));
            }
        }

        Ok(operation.record(&snapshot, None))
    }
}
