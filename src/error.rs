use thiserror::Error;

use crate::models::run::RunStatus;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything a call into the client can fail with.
#[derive(Debug, Error)]
pub enum Error {
    /// The run was still `queued` or `in_progress` once the poll budget ran out.
    #[error("Run {run_id} on thread {thread_id} is still queued or in progress after {attempts} polls")]
    RetriesExhausted {
        run_id: String,
        thread_id: String,
        attempts: u32,
    },

    /// The run stopped in a state other than the one we wait for.
    #[error("Run {run_id} on thread {thread_id} has status {actual} (expected {expected})")]
    UnexpectedRunStatus {
        run_id: String,
        thread_id: String,
        actual: RunStatus,
        expected: RunStatus,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response. `body` is the response text as received; `message` is
    /// `error.message` when the body is the usual error envelope.
    #[error("API error {status}: {body}")]
    Api {
        status: u16,
        message: Option<String>,
        body: String,
    },

    #[error("Failed to decode response JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid client configuration: {0}")]
    Configuration(String),
}

impl Error {
    /// True for the two failures raised by run polling itself rather than the transport.
    pub fn is_run_failure(&self) -> bool {
        matches!(
            self,
            Error::RetriesExhausted { .. } | Error::UnexpectedRunStatus { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_status_message_names_both_statuses() {
        let err = Error::UnexpectedRunStatus {
            run_id: "run_1".to_string(),
            thread_id: "thread_1".to_string(),
            actual: RunStatus::Failed,
            expected: RunStatus::Completed,
        };
        assert_eq!(
            err.to_string(),
            "Run run_1 on thread thread_1 has status failed (expected completed)"
        );
        assert!(err.is_run_failure());
    }

    #[test]
    fn test_api_error_is_not_a_run_failure() {
        let err = Error::Api {
            status: 500,
            message: None,
            body: "boom".to_string(),
        };
        assert!(!err.is_run_failure());
        assert_eq!(err.to_string(), "API error 500: boom");
    }
}
