// server/src/main.rs

// Entry point for the trialdash binary.

use anyhow::Result;
use trialdash_server::cli::start_cli;

#[tokio::main]
async fn main() -> Result<()> {
    // A .env file may carry the summarizer API key.
    dotenvy::dotenv().ok();
    env_logger::init();

    start_cli().await
}
