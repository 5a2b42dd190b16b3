use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An open (not yet clocked out) work session.
///
/// The open-shift endpoint returns 404 when nothing is open, so this type
/// only ever represents a shift that exists; `end` is populated on the
/// bodies the clock-out endpoint echoes back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    pub id: Option<i64>,
    pub position_id: Option<String>,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl Shift {
    /// Hours elapsed between the shift start and `now`.
    pub fn elapsed_hours(&self, now: DateTime<Utc>) -> f64 {
        (now - self.start).num_milliseconds() as f64 / 3_600_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_parse_shift() {
        let json = r#"{"id": 91, "position_id": "1042", "start": "2025-03-04T15:30:00Z"}"#;
        let shift: Shift = serde_json::from_str(json).expect("Failed to parse shift");
        assert_eq!(shift.id, Some(91));
        assert_eq!(shift.position_id.as_deref(), Some("1042"));
        assert!(shift.end.is_none());
        assert_eq!(shift.start.to_rfc3339(), "2025-03-04T15:30:00+00:00");
    }

    #[test]
    fn test_elapsed_hours_exact_hour() {
        let start: DateTime<Utc> = "2025-03-04T15:30:00Z".parse().expect("valid timestamp");
        let shift = Shift {
            id: None,
            position_id: None,
            start,
            end: None,
        };
        assert_eq!(shift.elapsed_hours(start + Duration::hours(1)), 1.0);
    }

    #[test]
    fn test_elapsed_hours_fractional() {
        let start: DateTime<Utc> = "2025-03-04T15:30:00Z".parse().expect("valid timestamp");
        let shift = Shift {
            id: None,
            position_id: None,
            start,
            end: None,
        };
        let elapsed = shift.elapsed_hours(start + Duration::minutes(90));
        assert!((elapsed - 1.5).abs() < 1e-9);
    }
}
