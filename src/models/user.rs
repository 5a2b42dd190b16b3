use serde::{Deserialize, Serialize};

/// The authenticated user as reported by the user endpoint.
///
/// `anumber` is the campus-wide identifier the service keys shifts and
/// summaries on. `positions` lists the job identifiers the user may clock
/// against; it can legitimately be empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub anumber: String,
    #[serde(default)]
    pub positions: Vec<String>,
    pub name: Option<String>,
}
