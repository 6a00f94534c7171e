use anyhow::bail;
use clap::Args;
use futurelink_config::Config;
use futurelink_form::{EnrollmentForm, FormStatus};
use futurelink_models::enrollment::{error_message, EnrollmentDraft};
use futurelink_submission_contracts::SubmissionService;
use futurelink_submission_impl::{SimulatedSubmissionService, SmtpSubmissionService};

#[derive(Debug, Args)]
pub struct EnrollCommand {
    /// Full name of the prospective student
    #[arg(long, default_value = "")]
    name: String,
    /// Email address to reach the student at
    #[arg(long, default_value = "")]
    email: String,
    /// Myanmar mobile number to reach the student at
    #[arg(long, default_value = "")]
    phone: String,
    /// Name of the course to enroll in
    #[arg(long, default_value = "")]
    course: String,
    /// Additional message to the admissions team
    #[arg(long, default_value = "")]
    message: String,
    /// Do not deliver the request, only simulate the submission
    #[arg(long)]
    simulate: bool,
}

impl EnrollCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let EnrollCommand {
            name,
            email,
            phone,
            course,
            message,
            simulate,
        } = self;

        let draft = EnrollmentDraft {
            name,
            email,
            phone,
            course,
            message,
        };
        let courses = config.enrollment.courses;

        if simulate {
            let submission =
                SimulatedSubmissionService::new(config.enrollment.simulated_delay.into());
            submit(EnrollmentForm::new(submission, courses), draft).await
        } else {
            let submission = SmtpSubmissionService::new(
                &config.email.smtp_url,
                config.email.from,
                config.enrollment.recipient,
            )
            .await?;
            submit(EnrollmentForm::new(submission, courses), draft).await
        }
    }
}

async fn submit<Submission>(
    mut form: EnrollmentForm<Submission>,
    draft: EnrollmentDraft,
) -> anyhow::Result<()>
where
    Submission: SubmissionService,
{
    *form.draft_mut() = draft;

    match form.submit().await {
        FormStatus::Success => {
            println!("Success! Your enrollment has been received.");
            println!("We will contact you shortly.");
            Ok(())
        }
        FormStatus::Idle => {
            for (field, error) in form.errors().iter() {
                eprintln!("{field}: {}", error_message(field, error));
            }
            if let Some(notice) = form.notice() {
                bail!("{notice}");
            }
            bail!("The enrollment request is invalid.");
        }
        FormStatus::Submitting => unreachable!(),
    }
}
