use std::future::Future;

use futurelink_models::enrollment::EnrollmentRequest;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SubmissionService: Send + Sync + 'static {
    /// Hands a validated enrollment request to the admissions team.
    fn submit(
        &self,
        request: EnrollmentRequest,
    ) -> impl Future<Output = Result<(), SubmissionError>> + Send;
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("The enrollment request was rejected.")]
    Rejected,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockSubmissionService {
    pub fn with_submit(
        mut self,
        request: EnrollmentRequest,
        result: Result<(), SubmissionError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(request))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
