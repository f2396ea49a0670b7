use thiserror::Error;

/// Errors returned by Firefly operations.
#[derive(Error, Debug)]
pub enum FireflyError {
    /// The token exchange was rejected, or returned no usable token.
    #[error("Failed to obtain access token: {status}")]
    Auth { status: String },

    /// Firefly returned a non-success HTTP status.
    #[error("API request failed: {status} - {body}")]
    Api { status: u16, body: String },

    /// The vendor reported a terminal FAILED status for the job.
    #[error("Job failed: {message}")]
    JobFailed { message: String },

    /// Poll attempts were exhausted without the job reaching a terminal state.
    #[error("Job polling timeout after {attempts} attempts")]
    JobTimeout { attempts: u32 },

    /// A client id or secret was empty before any network call was made.
    #[error("Adobe Firefly API credentials not found")]
    MissingCredentials,

    /// A vendor call was attempted with an empty access token.
    #[error("Access token is required")]
    MissingToken,

    /// The response from Firefly was missing expected fields.
    #[error("{0}")]
    InvalidResponse(String),

    /// Network-level request failure with context.
    #[error("{context}: {source}")]
    Network {
        context: String,
        source: reqwest::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, FireflyError>;
