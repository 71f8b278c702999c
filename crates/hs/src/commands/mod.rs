//! Command implementations for the hs CLI.

pub mod compile;
pub mod completions;
pub mod config;
pub mod cursor;
pub mod search;

use portal_api_rs::error::ApiError;

use crate::cli::Cli;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Search client error.
    #[error("API error: {0}")]
    Api(#[from] portal_api_rs::error::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Filter input could not be read.
    #[error("filter error: {0}")]
    Filter(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CommandError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Api(e) => e.exit_code(),
            _ => 1,
        }
    }

    /// Returns a stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            CommandError::Api(portal_api_rs::error::Error::MissingEndpoint) => "MISSING_PORTAL",
            CommandError::Api(e) => match e.as_api_error() {
                Some(ApiError::Auth { .. }) => "AUTH_ERROR",
                Some(ApiError::RateLimit { .. }) => "RATE_LIMITED",
                Some(ApiError::Validation { .. }) => "INVALID_QUERY",
                Some(ApiError::Network { .. }) => "NETWORK_ERROR",
                Some(ApiError::Http { .. }) | None => "API_ERROR",
            },
            CommandError::Config(_) => "CONFIG_ERROR",
            CommandError::Filter(_) => "FILTER_ERROR",
            CommandError::Io(_) => "IO_ERROR",
            CommandError::Json(_) => "JSON_ERROR",
        }
    }
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    pub json_output: bool,
    pub use_colors: bool,
    pub quiet: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && std::env::var_os("NO_COLOR").is_none(),
            quiet: cli.quiet,
        }
    }
}
