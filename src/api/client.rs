//! API client for communicating with the AggieTime service.
//!
//! This module provides the `AggieTimeClient` facade for fetching user and
//! position info, clocking in/out, and building the shift and weekly-hours
//! report strings.
//!
//! The service authenticates through its session cookie jar; the client only
//! has to replay cookies and attach the CSRF token (captured from the
//! login-response cookie) on mutating calls. A few short-lived values are
//! cached per client instance so chatty callers do not hammer the API.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use tracing::debug;

use crate::cache::ExpiringCache;
use crate::config::Config;
use crate::models::{Shift, StatusReport, UserInfo, WeekSummary};
use crate::retry::with_exponential_retry;

use super::paths::{
    render_path, CLOCKIN_PATH, CLOCKOUT_PATH, OPEN_SHIFT_PATH, SUMMARY_PATH, USER_PATH,
};
use super::ClientError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Cookie the service sets at login; its value goes back out on mutations.
const CSRF_COOKIE: &str = "XSRF-TOKEN";

/// Header that carries the CSRF token on mutating requests.
const CSRF_HEADER: &str = "X-XSRF-TOKEN";

// Cache keys. One slot each; `past_week` is not scoped by position or date
// range, so within its TTL every caller sees the same string.
const USER_KEY: &str = "user";
const CSRF_KEY: &str = "aggietime-csrf";
const STATUS_LINE_KEY: &str = "status_line";
const PAST_WEEK_KEY: &str = "past_week";

/// API client for AggieTime.
/// Clone is cheap - the connection pool and both caches are shared.
#[derive(Clone)]
pub struct AggieTimeClient {
    http: Client,
    config: Config,
    user_cache: Arc<ExpiringCache<UserInfo>>,
    text_cache: Arc<ExpiringCache<String>>,
}

impl AggieTimeClient {
    /// Create a new client. The cookie store is enabled so the AggieTime
    /// session survives across calls.
    pub fn new(config: Config) -> Result<Self, ClientError> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            config,
            user_cache: Arc::new(ExpiringCache::new()),
            text_cache: Arc::new(ExpiringCache::new()),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: Response) -> Result<Response, ClientError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::from_status(status, &body))
        }
    }

    /// One uncached round trip to the user endpoint. Returns the user payload
    /// together with the CSRF token set on the response.
    async fn fetch_user(&self) -> Result<(UserInfo, String), ClientError> {
        let url = self.endpoint(USER_PATH);
        let response = self.http.get(&url).send().await?;
        let response = Self::check_response(response).await?;

        // Host-only cookies carry no domain attribute.
        let csrf = response
            .cookies()
            .find(|cookie| {
                cookie.name() == CSRF_COOKIE
                    && cookie
                        .domain()
                        .map_or(true, |domain| {
                            domain.eq_ignore_ascii_case(&self.config.cookie_domain)
                        })
            })
            .map(|cookie| cookie.value().to_string())
            .ok_or(ClientError::MissingCsrfCookie)?;

        let user = response.json().await?;
        Ok((user, csrf))
    }

    /// Fetch the authenticated user, serving from cache inside the user TTL.
    ///
    /// A fresh fetch is wrapped in exponential-backoff retry (the only
    /// retried call site) and refreshes the stored CSRF token as a side
    /// effect; the token itself never expires, it is only ever overwritten.
    pub async fn user_info(&self) -> Result<UserInfo, ClientError> {
        if let Some(user) = self.user_cache.get(USER_KEY) {
            debug!("user info served from cache");
            return Ok(user);
        }

        let (user, csrf) = with_exponential_retry(|| self.fetch_user()).await?;
        debug!(anumber = %user.anumber, "user info fetched");

        self.text_cache.set(CSRF_KEY, csrf, None);
        self.user_cache
            .set(USER_KEY, user.clone(), Some(self.config.user_cache_ttl()));
        Ok(user)
    }

    /// Pick the position to operate on: the explicit one if given (not
    /// validated against the user's list), otherwise the user's sole
    /// position. Always goes through `user_info` first, so the CSRF token is
    /// populated before any mutation that follows.
    async fn resolve_position(&self, position_id: Option<&str>) -> Result<String, ClientError> {
        let user = self.user_info().await?;
        select_position(&user.positions, position_id)
    }

    async fn clock_mutation(
        &self,
        template: &str,
        position_id: Option<&str>,
    ) -> Result<Value, ClientError> {
        let position_id = self.resolve_position(position_id).await?;
        let csrf = self
            .text_cache
            .get(CSRF_KEY)
            .ok_or(ClientError::MissingCsrfCookie)?;

        let path = render_path(template, &[("position_id", &position_id)])?;
        let response = self
            .http
            .post(self.endpoint(&path))
            .header(CSRF_HEADER, csrf)
            .json(&json!({ "comment": "" }))
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        let body = response.json().await?;

        // Shift state just changed; the cached status line is stale.
        self.text_cache.remove(STATUS_LINE_KEY);
        debug!(position_id = %position_id, "clock mutation applied");
        Ok(body)
    }

    /// Clock in against `position_id`, or the sole position when `None`.
    /// Returns the raw response body.
    pub async fn clock_in(&self, position_id: Option<&str>) -> Result<Value, ClientError> {
        self.clock_mutation(CLOCKIN_PATH, position_id).await
    }

    /// Clock out of `position_id`, or the sole position when `None`.
    /// Returns the raw response body.
    pub async fn clock_out(&self, position_id: Option<&str>) -> Result<Value, ClientError> {
        self.clock_mutation(CLOCKOUT_PATH, position_id).await
    }

    /// The user's currently open shift, or `None` when the service reports
    /// 404 (nothing open). Every other failure propagates unchanged.
    pub async fn current_shift(&self) -> Result<Option<Shift>, ClientError> {
        let user = self.user_info().await?;
        let path = render_path(OPEN_SHIFT_PATH, &[("anumber", &user.anumber)])?;

        let response = self.http.get(self.endpoint(&path)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("no open shift");
            return Ok(None);
        }
        let response = Self::check_response(response).await?;
        Ok(Some(response.json().await?))
    }

    /// Human-readable status: `"<anumber> - <elapsed> hours"` while a shift
    /// is open, `"<anumber> - No Shift"` otherwise. Cached for the open-shift
    /// TTL and invalidated by any clock mutation.
    pub async fn status_line(&self) -> Result<StatusReport, ClientError> {
        if let Some(status) = self.text_cache.get(STATUS_LINE_KEY) {
            debug!("status line served from cache");
            return Ok(StatusReport { status });
        }

        let user = self.user_info().await?;
        let shift = self.current_shift().await?;
        let status = format_status_line(&user.anumber, shift.as_ref(), Utc::now());

        self.text_cache.set(
            STATUS_LINE_KEY,
            status.clone(),
            Some(self.config.open_shift_ttl()),
        );
        Ok(StatusReport { status })
    }

    /// Undisputed hours from Monday of the current week through today,
    /// formatted `"<anumber> - <hours> hours"`. Cached for the past-week TTL
    /// under a single slot regardless of position or date range.
    pub async fn last_week(&self, position_id: Option<&str>) -> Result<StatusReport, ClientError> {
        let position_id = self.resolve_position(position_id).await?;
        let (start, end) = week_range(Utc::now().date_naive());

        if let Some(status) = self.text_cache.get(PAST_WEEK_KEY) {
            debug!("weekly hours served from cache");
            return Ok(StatusReport { status });
        }

        let user = self.user_info().await?;
        let path = render_path(
            SUMMARY_PATH,
            &[
                ("position_id", &position_id),
                ("start", &start.format("%Y-%m-%d").to_string()),
                ("end", &end.format("%Y-%m-%d").to_string()),
            ],
        )?;

        let response = self.http.get(self.endpoint(&path)).send().await?;
        let response = Self::check_response(response).await?;
        let summary: WeekSummary = response.json().await?;

        let status = format!("{} - {} hours", user.anumber, summary.undisputed_hours);
        self.text_cache.set(
            PAST_WEEK_KEY,
            status.clone(),
            Some(self.config.past_week_ttl()),
        );
        Ok(StatusReport { status })
    }
}

/// The explicit position if given, otherwise the user's sole position.
fn select_position(positions: &[String], explicit: Option<&str>) -> Result<String, ClientError> {
    if let Some(position_id) = explicit {
        return Ok(position_id.to_string());
    }
    match positions {
        [only] => Ok(only.clone()),
        _ => Err(ClientError::AmbiguousPosition {
            available: positions.len(),
        }),
    }
}

fn format_status_line(anumber: &str, shift: Option<&Shift>, now: DateTime<Utc>) -> String {
    match shift {
        Some(shift) => format!("{} - {:.2} hours", anumber, shift.elapsed_hours(now)),
        None => format!("{} - No Shift", anumber),
    }
}

/// Monday of `today`'s week through `today`.
fn week_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today.week(Weekday::Mon).first_day(), today)
}
