//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::{Durations, ModePresets};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "study-timer")]
#[command(about = "A study timer daemon that syncs focus and break sessions with a study backend")]
#[command(version)]
pub struct Config {
    /// Port to bind the control server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Base URL of the study backend
    #[arg(short, long, env = "STUDY_TIMER_BACKEND", default_value = "http://127.0.0.1:5000")]
    pub backend_url: String,

    /// Cookie header sent with every backend request (e.g. "session=...")
    #[arg(long, env = "STUDY_TIMER_COOKIE", hide_env_values = true)]
    pub cookie: Option<String>,

    /// Initial study minutes for the custom mode
    #[arg(long, default_value = "25", value_parser = clap::value_parser!(u32).range(1..=1440))]
    pub custom_study: u32,

    /// Initial break minutes for the custom mode
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..=1440))]
    pub custom_break: u32,

    /// Do not ring the terminal bell at phase changes
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Mode table seeded with the configured custom durations
    pub fn presets(&self) -> ModePresets {
        ModePresets::new(Durations::new(self.custom_study, self.custom_break))
    }
}
