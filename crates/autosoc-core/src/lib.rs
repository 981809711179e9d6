//! Core dashboard model for AutoSOC.
//!
//! This crate provides the foundational types shared by every AutoSOC crate:
//!
//! - **Types**: The [`DashboardSnapshot`] and everything it aggregates
//! - **Risk**: Configurable score banding and gauge geometry
//! - **Validation**: Invariant checks that decide whether a snapshot is shown
//! - **Playbooks**: The response each alert severity triggers
//! - **Errors**: Error handling with [`SocError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use autosoc_core::{demo_snapshot, validate, RiskBands};
//!
//! let snapshot = demo_snapshot();
//! let warnings = validate(&snapshot, &RiskBands::default())?;
//! println!("risk {} ({})", snapshot.risk_score, snapshot.risk_level);
//! ```

#![doc(html_root_url = "https://docs.rs/autosoc-core/1.0.0")]

mod demo;
mod error;
pub mod playbook;
pub mod risk;
pub mod types;
pub mod validate;

pub use demo::demo_snapshot;
pub use error::{Result, SocError};
pub use playbook::{NotificationChannel, ResponseAction, ResponsePlaybook};
pub use risk::{needle_angle, RiskBands, RiskLevel};
pub use types::*;
pub use validate::{validate, Warning};
