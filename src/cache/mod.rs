//! In-memory caching for short-lived API values.
//!
//! This module provides the `ExpiringCache`, a keyed value store where each
//! entry carries its own optional time-to-live. The facade owns one cache per
//! client instance, so two clients never see each other's entries.

pub mod expiring;

pub use expiring::ExpiringCache;
