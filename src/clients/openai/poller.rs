use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::run::{Run, RunCreateRequest, RunStatus};
use crate::models::thread::ThreadMessage;
use crate::models::Role;

use super::api::OpenAiApi;

/// Bounded, linearly growing wait between polls of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Most re-fetches made after the run is created.
    pub max_attempts: u32,
    pub base_delay: Duration,
    /// Added to the delay for every attempt already made.
    pub delay_step: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        PollPolicy {
            max_attempts: 15,
            base_delay: Duration::from_millis(1000),
            delay_step: Duration::from_millis(500),
        }
    }
}

impl PollPolicy {
    /// Wait before re-fetch number `attempt + 1`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay + self.delay_step * attempt
    }
}

/// Creates a run for `assistant_id` on `thread_id` and polls it until it leaves
/// `queued`/`in_progress`. Only a `completed` run is returned.
///
/// Dropping the returned future stops polling at the next await point.
pub async fn poll_run<A: OpenAiApi>(
    api: &A,
    policy: &PollPolicy,
    thread_id: &str,
    assistant_id: &str,
) -> Result<Run> {
    let mut run = api
        .create_run(thread_id, &RunCreateRequest::new(assistant_id))
        .await?;
    debug!("Created run {} on thread {} ({})", run.id, thread_id, run.status);

    let mut attempts = 0;
    while run.status.is_pending() && attempts < policy.max_attempts {
        let delay = policy.delay_for(attempts);
        debug!(
            "Run {} is {}, polling again in {}ms (attempt {}/{})",
            run.id,
            run.status,
            delay.as_millis(),
            attempts + 1,
            policy.max_attempts
        );
        tokio::time::sleep(delay).await;
        run = api.retrieve_run(thread_id, &run.id).await?;
        attempts += 1;
    }

    if run.status.is_pending() {
        warn!(
            "Run {} on thread {} still {} after {} polls",
            run.id, thread_id, run.status, attempts
        );
        return Err(Error::RetriesExhausted {
            run_id: run.id,
            thread_id: thread_id.to_string(),
            attempts,
        });
    }

    if run.status != RunStatus::Completed {
        match &run.last_error {
            Some(last_error) => warn!(
                "Run {} on thread {} ended as {}: {}",
                run.id, thread_id, run.status, last_error
            ),
            None => warn!("Run {} on thread {} ended as {}", run.id, thread_id, run.status),
        }
        return Err(Error::UnexpectedRunStatus {
            run_id: run.id,
            thread_id: thread_id.to_string(),
            actual: run.status,
            expected: RunStatus::Completed,
        });
    }

    match run.run_time() {
        Some(run_time) => info!(
            "Run {} on thread {} completed after {} polls in {}s",
            run.id,
            thread_id,
            attempts,
            run_time.num_seconds()
        ),
        None => info!(
            "Run {} on thread {} completed after {} polls",
            run.id, thread_id, attempts
        ),
    }
    Ok(run)
}

/// Text written by the latest run: the leading assistant messages of a newest-first
/// listing, stopping at the first message from anyone else.
pub fn extract_latest_assistant_text(messages: Vec<ThreadMessage>) -> Vec<String> {
    messages
        .into_iter()
        .take_while(|message| message.role == Role::Assistant)
        .flat_map(|message| {
            message
                .texts()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}
