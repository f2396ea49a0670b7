//! # firefly-rs
//!
//! Async Rust client for the [Adobe Firefly](https://developer.adobe.com/firefly-services/)
//! generative API — image and video generation, expansion, fill,
//! compositing, and similar-image variations.
//!
//! Built for embedding in workflow-automation hosts: every call carries
//! its own credentials, authenticates via the IMS client-credentials
//! exchange, submits a long-running job, and can optionally block (as a
//! cooperative task suspension) until the job reaches a terminal state.
//!
//! ## Quick Start
//!
//! ```no_run
//! use firefly_rs::{Credentials, FireflyClient, TextToImage, TextToVideo};
//!
//! # async fn example() -> firefly_rs::Result<()> {
//! let client = FireflyClient::new();
//! let credentials = Credentials::new("client-id", "client-secret");
//!
//! // Fire-and-forget image generation: returns the job id immediately.
//! let record = client
//!     .execute(
//!         &credentials,
//!         &TextToImage::new("a red fox").size(1024, 1024).into(),
//!     )
//!     .await?;
//! println!("submitted {} ({})", record.job_id, record.status);
//!
//! // Video generation, waiting up to 10 minutes for completion.
//! let record = client
//!     .execute(
//!         &credentials,
//!         &TextToVideo::new("waves at dusk")
//!             .duration(10)
//!             .wait_for_completion(600)
//!             .into(),
//!     )
//!     .await?;
//! println!("video ready: {:?}", record.get("video"));
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod operations;
pub mod types;

pub use client::{FireflyClient, API_BASE_URL};
pub use error::{FireflyError, Result};
pub use operations::{
    ExpandImage, FillImage, ObjectComposite, Operation, SimilarImages, TextToImage, TextToVideo,
};
pub use types::{AccessToken, Credentials, JobSnapshot, JobStatus, OperationRecord, PollPolicy};
