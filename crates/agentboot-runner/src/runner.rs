//! Remote shell runner
//!
//! Bootstraps one live connection and layers file transfer, inline
//! interpreter scripts and temp-path helpers on top of [`ShellTransport`].

use std::path::Path;
use std::sync::Arc;

use agentboot_exec::{
    ExecError, ExecutionResult, LocalLauncher, ProcessLauncher, RemoteExecutor, RunOptions,
    ShellTransport,
};
use agentboot_pkg::{HelperStatus, PackageError, ensure_program};
use tracing::{debug, info, instrument, warn};

use crate::config::RunnerConfig;
use crate::error::BootstrapError;
use crate::facts::Distribution;
use crate::sentinel;
use crate::transfer::{self, join_remote, split_remote_path};

/// Remote shell executor for a single connection
///
/// Every operation awaits its remote invocations one after another; the
/// runner keeps no state besides its immutable configuration.
pub struct ShellRunner {
    transport: Arc<ShellTransport>,
    config: RunnerConfig,
}

impl std::fmt::Debug for ShellRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShellRunner")
            .field("transport", &self.transport)
            .field("config", &self.config)
            .finish()
    }
}

impl ShellRunner {
    /// Build a runner that spawns local processes and bootstrap it
    ///
    /// # Errors
    /// See [`ShellRunner::connect_with`]
    pub async fn connect(config: RunnerConfig) -> Result<Self, BootstrapError> {
        Self::connect_with(config, Arc::new(LocalLauncher::new())).await
    }

    /// Build a runner on top of `launcher` and bootstrap it
    ///
    /// Validates the connection (when configured) before any helper program
    /// is checked, then ensures every configured helper program.
    ///
    /// # Errors
    /// Returns `BootstrapError` if the connection style is unsupported, the
    /// template is invalid, the `echo` probe fails, or a helper cannot be
    /// installed
    #[instrument(skip_all, fields(conn = %config.conn_cmd))]
    pub async fn connect_with(
        config: RunnerConfig,
        launcher: Arc<dyn ProcessLauncher>,
    ) -> Result<Self, BootstrapError> {
        if !config.is_shell {
            return Err(BootstrapError::NotShell);
        }

        let transport = ShellTransport::with_launcher(&config.conn_cmd, &config.sh_cmd, launcher)?;
        let runner = Self {
            transport: Arc::new(transport),
            config,
        };

        if runner.config.validate_connection {
            runner
                .validate_connection()
                .await
                .map_err(BootstrapError::Connection)?;
        }

        for program in &runner.config.required_programs {
            runner
                .check_and_install_program(program)
                .await
                .map_err(|source| BootstrapError::Helper {
                    program: program.clone(),
                    source,
                })?;
        }

        info!("shell runner ready");
        Ok(runner)
    }

    /// Runner configuration
    #[must_use]
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Underlying transport as a shareable executor
    #[must_use]
    pub fn executor(&self) -> Arc<dyn RemoteExecutor> {
        self.transport.clone()
    }

    /// Check the connection with a no-op command
    ///
    /// # Errors
    /// Propagates the failure of the `echo` probe
    pub async fn validate_connection(&self) -> Result<(), ExecError> {
        debug!("validating connection");
        self.ping().await?;
        debug!("connection is ready");
        Ok(())
    }

    /// Run `echo` on the remote host
    ///
    /// # Errors
    /// See [`RemoteExecutor::run_with`]
    pub async fn ping(&self) -> Result<ExecutionResult, ExecError> {
        self.run("echo").await
    }

    /// Run a command with default options
    ///
    /// # Errors
    /// See [`RemoteExecutor::run_with`]
    pub async fn run(&self, cmd: &str) -> Result<ExecutionResult, ExecError> {
        self.transport.run(cmd).await
    }

    /// Run a command with explicit options
    ///
    /// # Errors
    /// See [`RemoteExecutor::run_with`]
    pub async fn run_with(
        &self,
        cmd: &str,
        options: &RunOptions,
    ) -> Result<ExecutionResult, ExecError> {
        self.transport.run_with(cmd, options).await
    }

    /// Run a command under sudo
    ///
    /// # Errors
    /// See [`RemoteExecutor::run_with`]
    pub async fn sudo(&self, cmd: &str) -> Result<ExecutionResult, ExecError> {
        self.transport.sudo(cmd).await
    }

    /// Run a command under sudo with explicit options
    ///
    /// # Errors
    /// See [`RemoteExecutor::run_with`]
    pub async fn sudo_with(
        &self,
        cmd: &str,
        options: &RunOptions,
    ) -> Result<ExecutionResult, ExecError> {
        self.transport.sudo_with(cmd, options).await
    }

    /// Upload a local script, make it executable and run it under sudo
    ///
    /// The temporary upload directory is left in place.
    ///
    /// # Errors
    /// Propagates transfer, chmod and execution failures
    #[instrument(skip(self))]
    pub async fn run_script(&self, script: &Path) -> Result<ExecutionResult, ExecError> {
        let remote_path = self.put_file(script, None).await?;
        self.sudo(&format!("chmod +x {remote_path}")).await?;
        self.sudo(&remote_path).await
    }

    /// Copy a local file to the remote host and return its remote path
    ///
    /// Without `dst` the file lands in a fresh remote temp directory under
    /// its own file name. With `dst` the parent directory is created first.
    ///
    /// # Errors
    /// `ExecError::CommandFailed` with code `-1` when rsync reports nothing,
    /// otherwise whatever the temp-dir, mkdir, rsync or mv steps raise
    #[instrument(skip(self))]
    pub async fn put_file(&self, src: &Path, dst: Option<&str>) -> Result<String, ExecError> {
        let src_text = src.to_string_lossy().to_string();

        let dst = match dst {
            Some(dst) => {
                let (dir, _) = split_remote_path(dst);
                self.verify_dir_exists(&dir).await?;
                dst.to_string()
            }
            None => {
                let name = src
                    .file_name()
                    .ok_or_else(|| ExecError::execution(&src_text, "source path has no file name"))?
                    .to_string_lossy()
                    .to_string();
                let tempdir = self.mkdtemp(true).await?;
                join_remote(&tempdir, &name)
            }
        };

        transfer::mirror(
            self.transport.launcher().as_ref(),
            self.transport.template(),
            &src_text,
            &dst,
        )
        .await?;

        // A bare name already sits where it belongs; moving it onto itself fails.
        let (dir, name) = split_remote_path(&dst);
        if dir != "." {
            self.run(&format!("mv {name} {}", join_remote(&dir, &name)))
                .await?;
        }

        info!(src = %src_text, dst = %dst, "file uploaded");
        Ok(dst)
    }

    /// Ask the remote `mktemp` for a temporary path
    ///
    /// `create = false` only reserves a name (`-u`); `directory` asks for a
    /// directory (`-d`). Nothing created here is removed automatically.
    ///
    /// # Errors
    /// See [`RemoteExecutor::run_with`]
    pub async fn mktemp(&self, create: bool, directory: bool) -> Result<String, ExecError> {
        let mut cmd = String::from("mktemp");
        if !create {
            cmd.push_str(" -u");
        }
        if directory {
            cmd.push_str(" -d");
        }
        let result = self.run(&cmd).await?;
        Ok(result.stdout_trimmed().to_string())
    }

    /// Ask the remote `mktemp` for a temporary directory path
    ///
    /// # Errors
    /// See [`RemoteExecutor::run_with`]
    pub async fn mkdtemp(&self, create: bool) -> Result<String, ExecError> {
        self.mktemp(create, true).await
    }

    /// Run `f` inside a fresh remote temp directory, removing it afterwards
    ///
    /// The directory is deleted whether `f` succeeds or fails. If both `f`
    /// and the removal fail, the error from `f` wins.
    ///
    /// # Errors
    /// Propagates failures from creating the directory, from `f`, or from
    /// removing the directory
    pub async fn with_temp_dir<T, F>(&self, f: F) -> Result<T, ExecError>
    where
        F: AsyncFnOnce(&str) -> Result<T, ExecError>,
    {
        let dir = self.mkdtemp(true).await?;
        let outcome = f(&dir).await;
        let cleanup = self.delete(&dir).await;

        match (outcome, cleanup) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), cleanup) => {
                if let Err(cleanup_err) = cleanup {
                    warn!(dir = %dir, error = %cleanup_err, "failed to remove temp dir");
                }
                Err(e)
            }
        }
    }

    /// Home directory of `username` on the remote host, as reported by `pwd`
    ///
    /// # Errors
    /// See [`ShellRunner::python`]
    pub async fn home_dir(&self, username: &str) -> Result<String, ExecError> {
        self.python("import pwd", &format!("pwd.getpwnam('{username}').pw_dir"))
            .await
    }

    /// `mkdir -p` on the remote host
    ///
    /// # Errors
    /// See [`RemoteExecutor::run_with`]
    pub async fn verify_dir_exists(&self, dirname: &str) -> Result<(), ExecError> {
        self.run(&format!("mkdir -p {dirname}")).await?;
        Ok(())
    }

    /// Evaluate an interpreter expression remotely and return its string form
    ///
    /// The value is returned verbatim; decoding is up to the caller.
    ///
    /// # Errors
    /// Propagates the invocation failure, or `ExecError::CommandFailed` with
    /// code `-1` if the output carries no framed value
    #[instrument(skip(self))]
    pub async fn python(&self, imports: &str, expression: &str) -> Result<String, ExecError> {
        let cmd = sentinel::interpreter_command(&self.config.python, imports, expression);
        let result = self.run(&cmd).await?;

        match sentinel::extract(&result.stdout) {
            Some(value) => Ok(value.to_string()),
            None => Err(ExecError::command_failed(
                cmd,
                format!(
                    "output did not contain a value framed by {} and {}",
                    sentinel::OPEN,
                    sentinel::CLOSE
                ),
                -1,
            )),
        }
    }

    /// Distribution of the remote host
    ///
    /// # Errors
    /// Propagates [`ShellRunner::python`] failures, or
    /// `ExecError::CommandFailed` with code `-1` if the value is not a
    /// `[name, version, id]` JSON array
    pub async fn machine_distribution(&self) -> Result<Distribution, ExecError> {
        let imports = "import platform, json";
        let expression = "json.dumps(platform.dist())";
        let raw = self.python(imports, expression).await?;

        serde_json::from_str(&raw).map_err(|e| {
            let cmd = sentinel::interpreter_command(&self.config.python, imports, expression);
            ExecError::command_failed(cmd, format!("could not decode {raw:?}: {e}"), -1)
        })
    }

    /// Make sure `program` is on the remote `PATH`, installing it if needed
    ///
    /// # Errors
    /// Returns `PackageError` if probing or installation fails
    pub async fn check_and_install_program(
        &self,
        program: &str,
    ) -> Result<HelperStatus, PackageError> {
        ensure_program(
            self.executor(),
            program,
            &self.config.package_managers,
            self.config.install_with_sudo,
        )
        .await
    }

    /// `rm -rf` on the remote host
    ///
    /// # Errors
    /// See [`RemoteExecutor::run_with`]
    pub async fn delete(&self, path: &str) -> Result<(), ExecError> {
        self.run(&format!("rm -rf {path}")).await?;
        Ok(())
    }

    /// Finish with the runner
    ///
    /// Nothing is released; the connection belongs to whoever supplied the
    /// template.
    pub fn close(self) {
        debug!(conn = %self.config.conn_cmd, "shell runner closed");
    }
}
