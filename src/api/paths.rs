//! Endpoint path templates and `:name` placeholder substitution.
//!
//! Templates are relative to the configured base URL. Every placeholder must
//! be supplied at render time; a missing one is an error rather than a
//! silently unsubstituted path segment.

use super::ClientError;

pub const USER_PATH: &str = "/api/v1/users/me";
pub const CLOCKIN_PATH: &str = "/api/v1/positions/:position_id/clock-in";
pub const CLOCKOUT_PATH: &str = "/api/v1/positions/:position_id/clock-out";
pub const OPEN_SHIFT_PATH: &str = "/api/v1/users/:anumber/shifts/open";
pub const SUMMARY_PATH: &str = "/api/v1/positions/:position_id/summary?start=:start&end=:end";

/// Substitute each `:name` placeholder in `template` from `params`.
///
/// A placeholder name runs over `[A-Za-z0-9_]`; a `:` not followed by such a
/// character is literal. Fails with `MissingPathParameter` on the first
/// placeholder that has no matching entry.
pub fn render_path(template: &str, params: &[(&str, &str)]) -> Result<String, ClientError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(idx) = rest.find(':') {
        out.push_str(&rest[..idx]);
        rest = &rest[idx + 1..];

        let end = rest
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
            .unwrap_or(rest.len());
        if end == 0 {
            out.push(':');
            continue;
        }

        let name = &rest[..end];
        let value = params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| ClientError::MissingPathParameter(name.to_string()))?;
        out.push_str(value);
        rest = &rest[end..];
    }

    out.push_str(rest);
    Ok(out)
}
