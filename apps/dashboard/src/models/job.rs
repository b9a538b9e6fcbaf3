use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    New,
    Saved,
    Applied,
    Dismissed,
}

/// A scored job posting as the API delivers it. Scoring and ghost detection
/// run server-side; their breakdowns are carried as opaque JSON for the
/// detail view to render verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub url: Option<String>,
    pub posted_at: Option<NaiveDate>,
    pub status: JobStatus,
    /// 0–100 match score against the persona.
    pub score: u32,
    pub score_breakdown: Value,
    pub ghost_signals: Value,
    pub notes: Option<String>,
}
