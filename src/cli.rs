//! Command-line interface for Tabrelay
//!
//! Provides argument parsing and subcommand handling for the Tabrelay binary.

use clap::{Parser, Subcommand};

/// Minimal HTTP relay for LLM-backed tabular document analysis
#[derive(Parser)]
#[command(name = "tabrelay")]
#[command(version)]
#[command(about = "Minimal HTTP relay for LLM-backed tabular document analysis")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# Tabrelay Configuration
# ======================

[server]
# IP address to bind to (0.0.0.0 for all interfaces, 127.0.0.1 for localhost only)
host = "0.0.0.0"

# Port to listen on
port = 5000

# Timeout for calls to the upstream completion service, in seconds (1-300)
request_timeout_seconds = 30

[upstream]
# Base URL of the OpenAI-compatible completion service (no trailing slash)
base_url = "https://api.openai.com/v1"

# Model requested for document analysis completions
model = "gpt-3.5-turbo"

[observability]
# Log level: "trace", "debug", "info", "warn", "error"
log_level = "info"
"#
}
