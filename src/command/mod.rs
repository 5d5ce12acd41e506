mod commands;

pub use commands::Command;

use thiserror::Error;

use crate::error::TransitionError;

/// Result type for command operations
pub type CommandResult = Result<(), CommandError>;

/// Errors that can occur during command execution
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The command cannot be executed in the current state
    #[error("Command rejected: {0}")]
    Rejected(#[from] TransitionError),
}
