use std::path::Path;

use anyhow::Context;
use config::{File, FileFormat};
use email_address::EmailAddress;
use futurelink_models::enrollment::CourseName;
use serde::Deserialize;

mod duration;

pub use duration::Duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    let mut builder = config::Config::builder();
    for path in paths {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        builder = builder.add_source(File::from_str(&content, FileFormat::Toml));
    }
    builder
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub email: EmailConfig,
    pub enrollment: EnrollmentConfig,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    pub from: EmailAddress,
}

#[derive(Debug, Deserialize)]
pub struct EnrollmentConfig {
    pub recipient: EmailAddress,
    pub simulated_delay: Duration,
    pub courses: Vec<CourseName>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_default_config() {
        let config = load(&[Path::new(DEFAULT_CONFIG_PATH)]).unwrap();
        assert!(!config.enrollment.courses.is_empty());
    }
}
