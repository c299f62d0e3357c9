//! Executor and launcher traits

use async_trait::async_trait;

use crate::error::{ExecError, LaunchError};
use crate::options::RunOptions;
use crate::result::{ExecutionResult, ProcessOutput};

/// Runs shell command text against a remote host
#[async_trait]
pub trait RemoteExecutor: Send + Sync {
    /// Run `cmd` with explicit options
    ///
    /// # Errors
    /// `ExecError::CommandFailed` on a non-zero effective exit code,
    /// `ExecError::ExecutionError` when the command could not be run
    async fn run_with(&self, cmd: &str, options: &RunOptions)
    -> Result<ExecutionResult, ExecError>;

    /// Run `cmd` with default options
    ///
    /// # Errors
    /// See [`RemoteExecutor::run_with`]
    async fn run(&self, cmd: &str) -> Result<ExecutionResult, ExecError> {
        self.run_with(cmd, &RunOptions::default()).await
    }

    /// Run `cmd` under `sudo` with explicit options
    ///
    /// Elevation is assumed to be non-interactive.
    ///
    /// # Errors
    /// See [`RemoteExecutor::run_with`]
    async fn sudo_with(
        &self,
        cmd: &str,
        options: &RunOptions,
    ) -> Result<ExecutionResult, ExecError> {
        self.run_with(&format!("sudo {cmd}"), options).await
    }

    /// Run `cmd` under `sudo` with default options
    ///
    /// # Errors
    /// See [`RemoteExecutor::run_with`]
    async fn sudo(&self, cmd: &str) -> Result<ExecutionResult, ExecError> {
        self.sudo_with(cmd, &RunOptions::default()).await
    }
}

/// Spawns a local process and collects its output
#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    /// Run `argv`, writing `input` to its stdin when given
    ///
    /// # Errors
    /// Returns `LaunchError` if the process cannot be spawned or its pipes break
    async fn launch(
        &self,
        argv: &[String],
        input: Option<&str>,
    ) -> Result<ProcessOutput, LaunchError>;
}
