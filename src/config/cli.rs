use crate::config::SiteConfig;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "agni-site")]
#[command(about = "Run the Agni site page script headlessly")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Path to a site TOML configuration")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show or toggle the persisted colour theme
    Theme {
        #[arg(long, default_value = "./agni-prefs.json")]
        store: PathBuf,

        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Submit contact form fields to a form endpoint
    Submit {
        #[arg(long)]
        action: String,

        #[arg(long, default_value = "post")]
        method: String,

        #[arg(long = "field", value_parser = parse_field, help = "Form field as name=value")]
        fields: Vec<(String, String)>,
    },
    /// Print the frames of a counter animation
    Counter {
        #[arg(long)]
        target: String,

        #[arg(long, default_value = "60")]
        fps: u32,
    },
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ThemeAction {
    Show,
    Toggle,
}

fn parse_field(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| format!("expected name=value, got `{}`", raw))
}

impl CliConfig {
    /// Loads the configured TOML file, or the defaults when none is given.
    pub fn site_config(&self) -> Result<SiteConfig> {
        let config = match &self.config {
            Some(path) => SiteConfig::from_file(path)?,
            None => SiteConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Submit { action, method, .. } => {
                validate_url("action", action)?;
                if matches!(method.trim().to_ascii_lowercase().as_str(), "get" | "head") {
                    return Err(SiteError::InvalidConfigValue {
                        field: "method".to_string(),
                        value: method.clone(),
                        reason: "Form data cannot be sent with GET or HEAD".to_string(),
                    });
                }
            }
            Command::Counter { fps, .. } => validate_positive_number("fps", u64::from(*fps), 1)?,
            Command::Theme { .. } => {}
        }
        Ok(())
    }
}
