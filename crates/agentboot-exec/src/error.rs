//! Error types for agentboot-exec

use thiserror::Error;

/// Failure of a single remote invocation
///
/// There are exactly two kinds. A [`ExecError::CommandFailed`] means the
/// command ran and reported failure; a [`ExecError::ExecutionError`] means
/// the command could not be run at all and the connection should not be
/// trusted. A command failure is never re-wrapped as an execution error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// The remote command ran and returned a non-zero status
    #[error("command `{command}` failed with exit code {code}: {stderr}")]
    CommandFailed {
        /// Command text as submitted
        command: String,
        /// Captured stderr, or a synthesized diagnostic
        stderr: String,
        /// Exit status (`-1` for synthesized failures)
        code: i32,
    },

    /// The invocation itself could not be completed
    #[error("failed to execute `{command}`: {cause}")]
    ExecutionError {
        /// Command text as submitted
        command: String,
        /// Description of the underlying fault
        cause: String,
    },
}

impl ExecError {
    /// Build a command failure
    pub fn command_failed(
        command: impl Into<String>,
        stderr: impl Into<String>,
        code: i32,
    ) -> Self {
        Self::CommandFailed {
            command: command.into(),
            stderr: stderr.into(),
            code,
        }
    }

    /// Build an execution error
    pub fn execution(command: impl Into<String>, cause: impl ToString) -> Self {
        Self::ExecutionError {
            command: command.into(),
            cause: cause.to_string(),
        }
    }

    /// Whether the remote command ran and reported failure
    #[must_use]
    pub fn is_command_failure(&self) -> bool {
        matches!(self, ExecError::CommandFailed { .. })
    }

    /// The command this failure belongs to
    #[must_use]
    pub fn command(&self) -> &str {
        match self {
            ExecError::CommandFailed { command, .. } | ExecError::ExecutionError { command, .. } => {
                command
            }
        }
    }

    /// Exit code of a command failure
    #[must_use]
    pub fn code(&self) -> Option<i32> {
        match self {
            ExecError::CommandFailed { code, .. } => Some(*code),
            ExecError::ExecutionError { .. } => None,
        }
    }
}

/// Faults raised while spawning or talking to a local process
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaunchError {
    /// Nothing to run
    #[error("empty command line")]
    EmptyCommand,

    /// Process spawn error
    #[error("failed to spawn process: {0}")]
    Spawn(String),

    /// I/O error while feeding input or collecting output
    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors raised while splitting a connection template into words
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A quote was opened and never closed
    #[error("unterminated {quote} quote in `{template}`")]
    UnterminatedQuote {
        /// The quote character
        quote: char,
        /// The offending template
        template: String,
    },

    /// A backslash at the very end of the template
    #[error("trailing escape in `{0}`")]
    TrailingEscape(String),
}
