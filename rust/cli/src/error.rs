//! Error types for the CLI application.

use std::fmt;

use showdown_engine::errors::GameError;

/// Custom error type for CLI operations.
///
/// Every command handler returns `Result<(), CliError>`; [`crate::run`] maps
/// any error to exit code `2`.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (stdout/stderr writes, config file reads)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Rejected engine operation
    Engine(GameError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(e) => write!(f, "Engine error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        CliError::Io(std::io::Error::other(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_keep_their_message() {
        let e: CliError = GameError::NoActiveRound.into();
        assert_eq!(e.to_string(), "Engine error: No active round");
    }

    #[test]
    fn invalid_input_is_prefixed() {
        let e = CliError::InvalidInput("bad card".into());
        assert_eq!(e.to_string(), "Invalid input: bad card");
    }
}
