use serde::{Deserialize, Serialize};

/// Weekly hours rollup for one position, as returned by the summary
/// endpoint. Disputed hours are pending supervisor review and excluded from
/// the reported total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekSummary {
    pub undisputed_hours: f64,
    pub disputed_hours: Option<f64>,
}

/// Human-readable wrapper returned by the reporting operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub status: String,
}
