use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::commands::{courses::list_courses, enroll::EnrollCommand, smtp::SmtpCommand};

mod commands;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::Completion { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            env!("CARGO_BIN_NAME"),
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    init_tracing();

    let config_path = cli
        .config
        .unwrap_or_else(|| futurelink_config::DEFAULT_CONFIG_PATH.into());
    let config = futurelink_config::load(&[&config_path]).context("Failed to load config")?;

    match cli.command {
        Command::Enroll(command) => command.invoke(config).await?,
        Command::Courses => list_courses(config),
        Command::Smtp { command } => command.invoke(config).await?,
        Command::CheckConfig { verbose } => {
            verbose.then(|| println!("{config:#?}"));
        }
        Command::Completion { .. } => unreachable!(),
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Path to the config file
    #[arg(short, long, env = "FUTURELINK_CONFIG", global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Submit an enrollment request to Future Link
    #[command(aliases(["e"]))]
    Enroll(EnrollCommand),
    /// List the courses currently open for enrollment
    #[command(aliases(["c"]))]
    Courses,
    /// Inspect the connection to the admissions mailbox
    Smtp {
        #[command(subcommand)]
        command: SmtpCommand,
    },
    /// Validate configuration
    CheckConfig {
        /// Print a debug representation of the config
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(EnvFilter::from_default_env()))
        .init();
}
