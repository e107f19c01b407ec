use serde::{Deserialize, Serialize};

/// One recorded event with its dimension codes resolved to display names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub event_id: String,
    pub year: i64,
    pub month: i64,
    pub day: i64,
    /// Whether the incident lasted more than 24 hours (0 or 1).
    pub extended: i64,
    pub country: String,
    pub region: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub summary: Option<String>,
    pub is_success: bool,
    pub is_suicide: bool,
    pub attack_type: String,
    pub target_type: String,
    pub kills_count: Option<i64>,
    pub group: String,
}

impl Event {
    /// `YYYY-MM-DD`, with zero components (unknown month or day) kept as is.
    pub fn date(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}
