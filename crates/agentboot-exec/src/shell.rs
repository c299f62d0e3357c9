//! Remote shell transport
//!
//! Runs command text by launching `<connection template> <shell>` and
//! feeding the command on stdin, so multi-line bodies need no escaping.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, instrument, warn};

use crate::error::{ExecError, TemplateError};
use crate::local::LocalLauncher;
use crate::options::RunOptions;
use crate::result::ExecutionResult;
use crate::template::{ConnectionTemplate, split_words};
use crate::traits::{ProcessLauncher, RemoteExecutor};

/// Default remote shell interpreter
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Executor that reaches a remote shell through a connection template
pub struct ShellTransport {
    template: ConnectionTemplate,
    shell: String,
    argv: Vec<String>,
    launcher: Arc<dyn ProcessLauncher>,
}

impl std::fmt::Debug for ShellTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShellTransport")
            .field("template", &self.template.as_str())
            .field("shell", &self.shell)
            .finish_non_exhaustive()
    }
}

impl ShellTransport {
    /// Create a transport that spawns local processes
    ///
    /// # Errors
    /// Returns `TemplateError` if the template or shell path cannot be split
    pub fn new(template: &str, shell: &str) -> Result<Self, TemplateError> {
        Self::with_launcher(template, shell, Arc::new(LocalLauncher::new()))
    }

    /// Create a transport on top of a custom launcher
    ///
    /// # Errors
    /// Returns `TemplateError` if the template or shell path cannot be split
    pub fn with_launcher(
        template: &str,
        shell: &str,
        launcher: Arc<dyn ProcessLauncher>,
    ) -> Result<Self, TemplateError> {
        let template = ConnectionTemplate::parse(template)?;
        let argv = template.argv_with(&split_words(shell)?);

        Ok(Self {
            template,
            shell: shell.to_string(),
            argv,
            launcher,
        })
    }

    /// Connection template
    #[must_use]
    pub fn template(&self) -> &ConnectionTemplate {
        &self.template
    }

    /// Remote shell interpreter path
    #[must_use]
    pub fn shell(&self) -> &str {
        &self.shell
    }

    /// Full argv used for every invocation
    #[must_use]
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    /// Launcher used to spawn local processes
    #[must_use]
    pub fn launcher(&self) -> &Arc<dyn ProcessLauncher> {
        &self.launcher
    }
}

#[async_trait]
impl RemoteExecutor for ShellTransport {
    #[instrument(skip(self, options), fields(shell = %self.shell))]
    async fn run_with(
        &self,
        cmd: &str,
        options: &RunOptions,
    ) -> Result<ExecutionResult, ExecError> {
        debug!(command = %cmd, "executing remote command");

        let output = self
            .launcher
            .launch(&self.argv, Some(cmd))
            .await
            .map_err(|e| {
                error!(command = %cmd, error = %e, "remote invocation broke");
                ExecError::execution(cmd, e)
            })?;

        let return_code = if options.check_return_code {
            output.status
        } else {
            if output.status != 0 {
                warn!(
                    command = %cmd,
                    status = output.status,
                    "ignoring non-zero exit status"
                );
            }
            0
        };

        if return_code != 0 {
            error!(
                command = %cmd,
                status = return_code,
                stderr = %output.stderr,
                "command failed"
            );
            return Err(ExecError::command_failed(cmd, output.stderr, return_code));
        }

        debug!(
            command = %cmd,
            duration = ?output.duration,
            "remote command completed"
        );

        Ok(ExecutionResult {
            command: cmd.to_string(),
            stdout: output.stdout,
            stderr: None,
            return_code,
            duration: output.duration,
        })
    }
}
