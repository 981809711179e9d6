//! Snapshot sources for AutoSOC.
//!
//! This crate provides the [`SnapshotSource`] seam the dashboard reads
//! through, the built-in [`DemoSource`], and [`SocClient`] for the live
//! `GET /overview` read API.

#![doc(html_root_url = "https://docs.rs/autosoc-client/1.0.0")]

mod client;
mod config;
mod source;

pub use autosoc_core::{Result, SocError};
pub use client::{HealthStatus, SocClient, SocClientBuilder, DEFAULT_BASE_URL, DEFAULT_CLIENT_ID};
pub use config::*;
pub use source::{DemoSource, SnapshotSource, StaticSource};
