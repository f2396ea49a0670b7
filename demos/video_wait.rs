//! Generate a short video and block until it completes.
//!
//! ```sh
//! FIREFLY_CLIENT_ID=... FIREFLY_CLIENT_SECRET=... cargo run --example video_wait
//! ```

use firefly_rs::{Credentials, FireflyClient, FireflyError, TextToVideo};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let credentials = Credentials::new(
        std::env::var("FIREFLY_CLIENT_ID")?,
        std::env::var("FIREFLY_CLIENT_SECRET")?,
    );
    let client = FireflyClient::new();

    let result = client
        .execute(
            &credentials,
            &TextToVideo::new("ocean waves rolling in at dusk")
                .duration(10)
                .aspect_ratio("16:9")
                .style("cinematic")
                .wait_for_completion(600)
                .into(),
        )
        .await;

    match result {
        Ok(record) => {
            println!("Job {} finished at {:?}", record.job_id, record.get("completedAt"));
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Err(FireflyError::JobTimeout { attempts }) => {
            eprintln!("Gave up after {} status reads — the job may still finish", attempts);
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
