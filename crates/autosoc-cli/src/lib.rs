//! # autosoc-cli
//!
//! Terminal front end for AutoSOC clients.
//!
//! ## Features
//!
//! - **Dashboard**: Full-screen ratatui view with dashboard, alerts,
//!   compliance and reports tabs, refreshed on a timer
//! - **One-shot views**: `overview`, `alerts`, `compliance`, `report`
//! - **Multiple output formats**: Pretty text, JSON, CSV, YAML
//! - **Local read API**: `serve` exposes a snapshot source over HTTP

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;
pub mod server;
pub mod theme;
pub mod tui;
pub mod view;
pub mod widgets;

pub use cli::run;
