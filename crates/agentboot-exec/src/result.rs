//! Result types for command execution

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Raw capture of one local process run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessOutput {
    /// Exit status code (`-1` when killed by a signal)
    pub status: i32,
    /// stdout output
    pub stdout: String,
    /// stderr output
    pub stderr: String,
    /// Time taken to execute
    pub duration: Duration,
}

impl ProcessOutput {
    /// Check if the process succeeded (exit code 0)
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Outcome of a successful remote command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Command text as submitted
    pub command: String,
    /// Captured stdout
    pub stdout: String,
    /// Captured stderr; dropped on success paths
    pub stderr: Option<String>,
    /// Effective exit code
    pub return_code: i32,
    /// Time taken to execute
    pub duration: Duration,
}

impl ExecutionResult {
    /// stdout with trailing whitespace removed
    #[must_use]
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim_end()
    }
}
