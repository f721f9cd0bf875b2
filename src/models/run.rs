use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a run. Only the remote service moves a run between states.
///
/// `queued` → `in_progress` → one of `requires_action`, `cancelling`, `completed`,
/// `failed`, `expired`; `cancelling` → `cancelled`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Expired,
    Other(String),
}

impl RunStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Cancelling => "cancelling",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Failed => "failed",
            RunStatus::Completed => "completed",
            RunStatus::Expired => "expired",
            RunStatus::Other(raw) => raw.as_str(),
        }
    }

    /// `queued` and `in_progress` are the only states worth polling again.
    pub fn is_pending(&self) -> bool {
        matches!(self, RunStatus::Queued | RunStatus::InProgress)
    }
}

impl From<String> for RunStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "queued" => RunStatus::Queued,
            "in_progress" => RunStatus::InProgress,
            "requires_action" => RunStatus::RequiresAction,
            "cancelling" => RunStatus::Cancelling,
            "cancelled" => RunStatus::Cancelled,
            "failed" => RunStatus::Failed,
            "completed" => RunStatus::Completed,
            "expired" => RunStatus::Expired,
            _ => RunStatus::Other(value),
        }
    }
}

impl From<RunStatus> for String {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LastError {
    pub code: String,
    pub message: String,
}

impl fmt::Display for LastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Snapshot of one run as returned by the service. Timestamps are unix seconds.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Run {
    pub id: String,
    pub thread_id: String,
    pub status: RunStatus,
    pub created_at: i64,
    #[serde(default)]
    pub started_at: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub cancelled_at: Option<i64>,
    #[serde(default)]
    pub failed_at: Option<i64>,
    #[serde(default)]
    pub completed_at: Option<i64>,
    #[serde(default)]
    pub last_error: Option<LastError>,
}

impl Run {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at, 0)
    }

    pub fn started(&self) -> Option<DateTime<Utc>> {
        self.started_at.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }

    pub fn completed(&self) -> Option<DateTime<Utc>> {
        self.completed_at.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }

    pub fn failed(&self) -> Option<DateTime<Utc>> {
        self.failed_at.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }

    /// Time from start to completion or failure, once both are known.
    pub fn run_time(&self) -> Option<TimeDelta> {
        let finished = self.completed().or_else(|| self.failed())?;
        Some(finished - self.started()?)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RunCreateRequest {
    pub assistant_id: String,
}

impl RunCreateRequest {
    pub fn new(assistant_id: &str) -> Self {
        RunCreateRequest {
            assistant_id: assistant_id.to_string(),
        }
    }
}
