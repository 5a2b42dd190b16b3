//! Data models for AggieTime API payloads.
//!
//! - `UserInfo`: the authenticated user and the positions they hold
//! - `Shift`: an open work session
//! - `WeekSummary`: remote weekly-hours rollup
//! - `StatusReport`: the human-readable wrapper the reporting calls return

pub mod shift;
pub mod summary;
pub mod user;

pub use shift::Shift;
pub use summary::{StatusReport, WeekSummary};
pub use user::UserInfo;
