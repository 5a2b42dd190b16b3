//! Async client for the AggieTime time-tracking service.
//!
//! AggieTime owns all the business rules; this crate shapes requests,
//! replays the session cookie jar, captures the anti-forgery token the
//! service sets at login, and caches a handful of short-lived values so
//! chatty callers do not hammer the API.
//!
//! ```no_run
//! use aggietime::{AggieTimeClient, Config};
//!
//! # async fn run() -> Result<(), aggietime::ClientError> {
//! let client = AggieTimeClient::new(Config::default())?;
//!
//! // "A01234567 - 1.25 hours" or "A01234567 - No Shift"
//! let report = client.status_line().await?;
//! println!("{}", report.status);
//!
//! // Position is inferred when the user holds exactly one.
//! client.clock_in(None).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod models;
pub mod retry;

pub use api::{AggieTimeClient, ClientError};
pub use config::Config;
pub use models::{Shift, StatusReport, UserInfo, WeekSummary};
