use clap::Subcommand;
use futurelink_config::Config;
use futurelink_submission_impl::SmtpSubmissionService;

#[derive(Debug, Subcommand)]
pub enum SmtpCommand {
    /// Test the connection to the smtp server
    Ping,
}

impl SmtpCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            SmtpCommand::Ping => ping(config).await,
        }
    }
}

async fn ping(config: Config) -> anyhow::Result<()> {
    let submission = SmtpSubmissionService::new(
        &config.email.smtp_url,
        config.email.from,
        config.enrollment.recipient,
    )
    .await?;

    submission.ping().await?;
    println!("The smtp connection is working!");

    Ok(())
}
