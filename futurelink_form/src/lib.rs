use futurelink_models::enrollment::{
    validate, CourseName, EnrollmentDraft, EnrollmentRequest, ValidationErrors,
};
use futurelink_submission_contracts::{SubmissionError, SubmissionService};
use thiserror::Error;

/// Lifecycle of a single form instance. `Success` is terminal; a failed
/// validation causes no transition at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Success,
}

/// Banner shown above the form until the user dismisses it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FormNotice {
    #[error("Your enrollment could not be submitted. Please try again later.")]
    SubmissionFailed,
}

/// A single enrollment form instance.
///
/// The form owns its draft, error map and notice exclusively and is only
/// mutated through the transition functions below. At most one submission
/// is in flight at a time; re-entry is gated by [`FormStatus::Submitting`].
#[derive(Debug)]
pub struct EnrollmentForm<Submission> {
    submission: Submission,
    courses: Vec<CourseName>,
    draft: EnrollmentDraft,
    errors: ValidationErrors,
    notice: Option<FormNotice>,
    status: FormStatus,
}

impl<Submission> EnrollmentForm<Submission>
where
    Submission: SubmissionService,
{
    pub fn new(submission: Submission, courses: Vec<CourseName>) -> Self {
        Self {
            submission,
            courses,
            draft: EnrollmentDraft::default(),
            errors: ValidationErrors::default(),
            notice: None,
            status: FormStatus::Idle,
        }
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn draft(&self) -> &EnrollmentDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut EnrollmentDraft {
        &mut self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn notice(&self) -> Option<FormNotice> {
        self.notice
    }

    pub fn courses(&self) -> &[CourseName] {
        &self.courses
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Validates the draft and, if it is valid, moves to `Submitting`.
    ///
    /// Returns the request to hand to the submission service, or `None` if
    /// the form stays where it is (validation errors, or not `Idle`).
    pub fn begin_submit(&mut self) -> Option<EnrollmentRequest> {
        if self.status != FormStatus::Idle {
            return None;
        }
        match validate(&self.draft, &self.courses) {
            Ok(request) => {
                self.errors = ValidationErrors::default();
                self.notice = None;
                self.status = FormStatus::Submitting;
                Some(request)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// Applies the submission result. `Ok` discards the draft and ends the
    /// form in `Success`; an error returns to `Idle` with the draft
    /// preserved and raises a notice.
    pub fn finish_submit(&mut self, result: Result<(), SubmissionError>) {
        if self.status != FormStatus::Submitting {
            return;
        }
        match result {
            Ok(()) => {
                self.draft = EnrollmentDraft::default();
                self.status = FormStatus::Success;
            }
            Err(err) => {
                tracing::warn!("Failed to submit enrollment request: {err}");
                self.notice = Some(FormNotice::SubmissionFailed);
                self.status = FormStatus::Idle;
            }
        }
    }

    /// Runs a full submit attempt and returns the resulting status.
    pub async fn submit(&mut self) -> FormStatus {
        let Some(request) = self.begin_submit() else {
            return self.status;
        };
        let result = self.submission.submit(request).await;
        self.finish_submit(result);
        self.status
    }
}

#[cfg(test)]
mod tests {
    use futurelink_models::enrollment::{
        EnrollmentField, FieldError, PhoneNumber, StudentName,
    };
    use futurelink_submission_contracts::MockSubmissionService;
    use pretty_assertions::assert_eq;

    use super::*;

    type Sut = EnrollmentForm<MockSubmissionService>;

    fn courses() -> Vec<CourseName> {
        [
            "Full Stack Web Development",
            "UI/UX Class",
            "Programming Basic Class",
            "English Essential Class",
            "Chinese Class",
        ]
        .into_iter()
        .map(|name| CourseName::try_new(name).unwrap())
        .collect()
    }

    fn fill(form: &mut Sut) {
        let draft = form.draft_mut();
        draft.name = "Jane Doe".into();
        draft.phone = "09123456789".into();
        draft.course = "UI/UX Class".into();
    }

    fn request() -> EnrollmentRequest {
        EnrollmentRequest {
            name: StudentName::try_new("Jane Doe").unwrap(),
            email: None,
            phone: Some(PhoneNumber::try_new("09123456789").unwrap()),
            course: CourseName::try_new("UI/UX Class").unwrap(),
            message: None,
        }
    }

    #[tokio::test]
    async fn submit_ok() {
        // Arrange
        let submission = MockSubmissionService::new().with_submit(request(), Ok(()));
        let mut sut = Sut::new(submission, courses());
        fill(&mut sut);

        // Act
        let status = sut.submit().await;

        // Assert
        assert_eq!(status, FormStatus::Success);
        assert!(sut.errors().is_empty());
        assert_eq!(sut.notice(), None);
        assert_eq!(*sut.draft(), EnrollmentDraft::default());
    }

    #[tokio::test]
    async fn submit_invalid() {
        // Arrange: the submission service must not be called
        let mut sut = Sut::new(MockSubmissionService::new(), courses());

        // Act
        let status = sut.submit().await;

        // Assert
        assert_eq!(status, FormStatus::Idle);
        assert_eq!(
            sut.errors().get(EnrollmentField::Name),
            Some(FieldError::Required)
        );
        assert_eq!(
            sut.errors().get(EnrollmentField::Email),
            Some(FieldError::CrossFieldRequired)
        );
        assert_eq!(
            sut.errors().get(EnrollmentField::Course),
            Some(FieldError::Required)
        );
    }

    #[tokio::test]
    async fn submit_failed() {
        // Arrange
        let submission = MockSubmissionService::new()
            .with_submit(request(), Err(SubmissionError::Rejected))
            .with_submit(request(), Ok(()));
        let mut sut = Sut::new(submission, courses());
        fill(&mut sut);
        let draft = sut.draft().clone();

        // Act
        let status = sut.submit().await;

        // Assert: back to Idle with the draft preserved
        assert_eq!(status, FormStatus::Idle);
        assert_eq!(sut.notice(), Some(FormNotice::SubmissionFailed));
        assert_eq!(*sut.draft(), draft);
        assert!(sut.errors().is_empty());

        // Act: the user tries again
        sut.dismiss_notice();
        let status = sut.submit().await;

        // Assert
        assert_eq!(status, FormStatus::Success);
        assert_eq!(sut.notice(), None);
    }

    #[test]
    fn begin_submit_moves_to_submitting() {
        // Arrange
        let mut sut = Sut::new(MockSubmissionService::new(), courses());
        fill(&mut sut);

        // Act
        let request_out = sut.begin_submit();

        // Assert
        assert_eq!(request_out, Some(request()));
        assert_eq!(sut.status(), FormStatus::Submitting);

        // Act: a second attempt while in flight is ignored
        assert_eq!(sut.begin_submit(), None);
        assert_eq!(sut.status(), FormStatus::Submitting);

        // Act
        sut.finish_submit(Ok(()));

        // Assert
        assert_eq!(sut.status(), FormStatus::Success);
    }

    #[tokio::test]
    async fn success_is_terminal() {
        // Arrange
        let submission = MockSubmissionService::new().with_submit(request(), Ok(()));
        let mut sut = Sut::new(submission, courses());
        fill(&mut sut);
        sut.submit().await;

        // Act
        let status = sut.submit().await;

        // Assert
        assert_eq!(status, FormStatus::Success);
    }

    #[test]
    fn finish_submit_outside_submitting_is_ignored() {
        // Arrange
        let mut sut = Sut::new(MockSubmissionService::new(), courses());

        // Act
        sut.finish_submit(Ok(()));

        // Assert
        assert_eq!(sut.status(), FormStatus::Idle);
    }
}
