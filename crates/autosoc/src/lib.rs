//! AutoSOC: security-monitoring dashboard model and snapshot sources.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use autosoc::{SnapshotSource, SocClient};
//!
//! #[tokio::main]
//! async fn main() -> autosoc::Result<()> {
//!     let client = SocClient::builder("http://localhost:8000/api/v1")
//!         .client_id("demo-client-001")
//!         .build()?;
//!
//!     let snapshot = client.fetch_snapshot().await?;
//!     println!("Risk: {} ({})", snapshot.risk_score, snapshot.risk_level);
//!     println!("HIGH+ alerts: {}", snapshot.high_plus_count());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/autosoc/1.0.0")]

// Re-export core types
pub use autosoc_core::*;

// Re-export snapshot sources
pub use autosoc_client::{
    DemoSource, HealthStatus, RetryConfig, SnapshotSource, SocClient, SocClientBuilder,
    StaticSource, DEFAULT_BASE_URL, DEFAULT_CLIENT_ID,
};

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facade_exposes_model_and_sources() {
        let snapshot = tokio_test::block_on(DemoSource.fetch_snapshot()).unwrap();
        assert!(validate(&snapshot, &RiskBands::default()).is_ok());
    }
}
