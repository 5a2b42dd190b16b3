//! HTTP client module for the AggieTime service.
//!
//! This module provides the `AggieTimeClient` facade for clocking in/out and
//! reading user, shift, and weekly-hours data.
//!
//! Authentication is implicit: the service keys requests off a session
//! cookie jar, and state-mutating calls additionally replay the CSRF token
//! the service sets as a cookie at login.

pub mod client;
pub mod error;
pub mod paths;

pub use client::AggieTimeClient;
pub use error::ClientError;
