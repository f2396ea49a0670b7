use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::time::Duration;

use crate::error::{FireflyError, Result};

/// Client-credentials pair supplied by the hosting environment's
/// credential store. Opaque to this crate and never persisted.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Fail fast before any network call when either field is empty.
    pub(crate) fn ensure_present(&self) -> Result<()> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(FireflyError::MissingCredentials);
        }
        Ok(())
    }
}

/// Short-lived bearer token from the IMS client-credentials exchange.
///
/// Expiry is vendor-defined and not tracked here; each top-level
/// [`execute`](crate::FireflyClient::execute) call fetches a fresh one.
#[derive(Debug, Clone)]
pub struct AccessToken(pub(crate) String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Job status as reported by Firefly.
///
/// An open enumeration: only `SUCCEEDED` and `FAILED` are terminal. Any
/// other value — `RUNNING` today, whatever the vendor adds tomorrow — is
/// treated as still in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Succeeded,
    Failed,
    /// Non-terminal; holds the raw vendor string.
    Pending(String),
}

impl JobStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "SUCCEEDED" => JobStatus::Succeeded,
            "FAILED" => JobStatus::Failed,
            other => JobStatus::Pending(other.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Succeeded => "SUCCEEDED",
            JobStatus::Failed => "FAILED",
            JobStatus::Pending(raw) => raw,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for JobStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One snapshot of a vendor-side job, as returned by submission or a
/// status read. The id never changes once issued; only `status` and the
/// output/failure fields evolve.
#[derive(Debug, Clone)]
pub struct JobSnapshot {
    pub id: String,
    pub status: JobStatus,
    /// Result artifacts, present once the job succeeds. Passed through
    /// as vendor-shaped JSON.
    pub outputs: Option<Value>,
    /// Vendor-supplied failure message, present on FAILED jobs.
    pub failure_message: Option<String>,
}

impl JobSnapshot {
    /// Parse a job response body. Submit responses must carry `id`;
    /// status reads may fall back to the id that was polled.
    pub(crate) fn from_value(json: &Value, fallback_id: Option<&str>) -> Result<Self> {
        let id = json
            .get("id")
            .and_then(|v| v.as_str())
            .or(fallback_id)
            .map(|s| s.to_string())
            .ok_or_else(|| FireflyError::InvalidResponse("Response missing job id".into()))?;

        let status = json
            .get("status")
            .and_then(|v| v.as_str())
            .map(JobStatus::parse)
            .ok_or_else(|| FireflyError::InvalidResponse("Response missing job status".into()))?;

        let outputs = json.get("outputs").cloned();
        let failure_message = json
            .pointer("/failureDetails/message")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        Ok(Self {
            id,
            status,
            outputs,
            failure_message,
        })
    }
}

/// How long and how often to poll a job for completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Total status reads to attempt, at least 1.
    pub max_attempts: u32,
    /// Wait between attempts. Not slept after the final attempt.
    pub interval: Duration,
}

impl PollPolicy {
    /// Fixed interval used when deriving a policy from a timeout.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            interval,
        }
    }

    /// Derive an attempt budget from a wall-clock timeout: ceiling
    /// division by the 5-second interval, so 600 s → 120 attempts and
    /// 7 s → 2 attempts.
    pub fn from_timeout_secs(timeout_secs: u64) -> Self {
        let attempts = timeout_secs.div_ceil(5).max(1) as u32;
        Self {
            max_attempts: attempts,
            interval: Self::DEFAULT_INTERVAL,
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 120,
            interval: Self::DEFAULT_INTERVAL,
        }
    }
}

/// Normalized result record produced by one operation: the job id and
/// status plus the operation's artifact field and echoed inputs,
/// serialized with the camelCase keys the host contract expects.
#[derive(Debug, Clone, Serialize)]
pub struct OperationRecord {
    #[serde(rename = "jobId")]
    pub job_id: String,
    pub status: JobStatus,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl OperationRecord {
    /// Look up an artifact or echoed-input field by its record key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}
