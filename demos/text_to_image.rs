//! Submit a text-to-image job and print the job id.
//!
//! Requires Firefly Services credentials:
//!
//! ```sh
//! FIREFLY_CLIENT_ID=... FIREFLY_CLIENT_SECRET=... cargo run --example text_to_image
//! ```

use firefly_rs::{Credentials, FireflyClient, TextToImage};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let credentials = Credentials::new(
        std::env::var("FIREFLY_CLIENT_ID")?,
        std::env::var("FIREFLY_CLIENT_SECRET")?,
    );
    let client = FireflyClient::new();

    let record = client
        .execute(
            &credentials,
            &TextToImage::new("a red fox in a snowy forest")
                .size(1344, 768)
                .variations(2)
                .style("photography")
                .into(),
        )
        .await?;

    println!("Submitted job {} ({})", record.job_id, record.status);
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
