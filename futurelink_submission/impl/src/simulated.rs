use std::time::Duration;

use futurelink_models::enrollment::EnrollmentRequest;
use futurelink_submission_contracts::{SubmissionError, SubmissionService};

/// Stand-in for the real admissions endpoint: accepts every request after a
/// fixed delay and only logs it.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedSubmissionService {
    delay: Duration,
}

impl SimulatedSubmissionService {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl SubmissionService for SimulatedSubmissionService {
    async fn submit(&self, request: EnrollmentRequest) -> Result<(), SubmissionError> {
        tokio::time::sleep(self.delay).await;
        tracing::info!(?request, "enrollment request received");
        Ok(())
    }
}
