use anyhow::anyhow;
use email_address::EmailAddress;
use futurelink_models::enrollment::EnrollmentRequest;
use futurelink_submission_contracts::{SubmissionError, SubmissionService};
use lettre::{
    message::header, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

/// Delivers enrollment requests to the admissions mailbox via SMTP.
#[derive(Debug, Clone)]
pub struct SmtpSubmissionService {
    from: EmailAddress,
    recipient: EmailAddress,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpSubmissionService {
    pub async fn new(
        url: &str,
        from: EmailAddress,
        recipient: EmailAddress,
    ) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?.build();

        Ok(Self {
            from,
            recipient,
            transport,
        })
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to connect to the smtp server"))
    }
}

impl SubmissionService for SmtpSubmissionService {
    async fn submit(&self, request: EnrollmentRequest) -> Result<(), SubmissionError> {
        let mut builder = Message::builder()
            .from(self.from.as_str().parse().map_err(anyhow::Error::from)?)
            .to(self.recipient.as_str().parse().map_err(anyhow::Error::from)?)
            .subject(subject(&request))
            .header(header::ContentType::TEXT_PLAIN);
        if let Some(email) = &request.email {
            builder = builder.reply_to(email.as_str().parse().map_err(anyhow::Error::from)?);
        }
        let message = builder.body(body(&request)).map_err(anyhow::Error::from)?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(anyhow::Error::from)?;
        if !response.is_positive() {
            return Err(SubmissionError::Rejected);
        }

        Ok(())
    }
}

fn subject(request: &EnrollmentRequest) -> String {
    format!("[Enrollment] {}", *request.course)
}

fn body(request: &EnrollmentRequest) -> String {
    let mut body = format!(
        "New enrollment request from {}\n\nCourse: {}\n",
        *request.name, *request.course
    );
    if let Some(email) = &request.email {
        body.push_str(&format!("Email: {email}\n"));
    }
    if let Some(phone) = &request.phone {
        body.push_str(&format!("Phone: {}\n", **phone));
    }
    if let Some(message) = &request.message {
        body.push_str(&format!("\n{}\n", **message));
    }
    body
}

#[cfg(test)]
mod tests {
    use futurelink_models::enrollment::{CourseName, EnrollmentMessage, PhoneNumber, StudentName};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn formats_message() {
        // Arrange
        let request = EnrollmentRequest {
            name: StudentName::try_new("Jane Doe").unwrap(),
            email: Some("jane.doe@example.com".parse().unwrap()),
            phone: Some(PhoneNumber::try_new("09123456789").unwrap()),
            course: CourseName::try_new("UI/UX Class").unwrap(),
            message: Some(EnrollmentMessage::try_new("When does the next class start?").unwrap()),
        };

        // Act
        let subject = subject(&request);
        let body = body(&request);

        // Assert
        assert_eq!(subject, "[Enrollment] UI/UX Class");
        assert_eq!(
            body,
            "New enrollment request from Jane Doe\n\nCourse: UI/UX Class\nEmail: jane.doe@example.com\nPhone: 09123456789\n\nWhen does the next class start?\n"
        );
    }

    #[test]
    fn formats_message_without_optional_fields() {
        // Arrange
        let request = EnrollmentRequest {
            name: StudentName::try_new("Jane Doe").unwrap(),
            email: None,
            phone: Some(PhoneNumber::try_new("09123456789").unwrap()),
            course: CourseName::try_new("Chinese Class").unwrap(),
            message: None,
        };

        // Act
        let body = body(&request);

        // Assert
        assert_eq!(
            body,
            "New enrollment request from Jane Doe\n\nCourse: Chinese Class\nPhone: 09123456789\n"
        );
    }
}
