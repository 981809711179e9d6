//! autosoc - Security operations dashboard
//!
//! Full-screen dashboard and one-shot views of an AutoSOC client.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    autosoc_cli::run().await
}
