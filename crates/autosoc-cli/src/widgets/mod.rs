//! Presentational atoms.
//!
//! Each atom is a plain value built from model data. Its derived text and
//! colours can be checked without a terminal, and it draws itself through
//! [`ratatui::widgets::Widget`].

mod alert_row;
mod compliance_badge;
mod gauge;
mod source_bar;
mod stat_card;

pub use alert_row::AlertRow;
pub use compliance_badge::{BadgeVariant, ComplianceBadge};
pub use gauge::RiskGauge;
pub use source_bar::SourceBar;
pub use stat_card::{summary_cards, StatCard};
