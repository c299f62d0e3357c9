//! Scripted executor for unit tests

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use agentboot_exec::{ExecError, ExecutionResult, RemoteExecutor, RunOptions};
use async_trait::async_trait;

/// Executor that answers from a table and records every command
#[derive(Default)]
pub(crate) struct ScriptedExecutor {
    stdout: HashMap<String, String>,
    failures: HashMap<String, (String, i32)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, cmd: &str, stdout: &str) -> Self {
        self.stdout.insert(cmd.to_string(), stdout.to_string());
        self
    }

    pub(crate) fn fail_on(mut self, cmd: &str, stderr: &str, code: i32) -> Self {
        self.failures
            .insert(cmd.to_string(), (stderr.to_string(), code));
        self
    }

    pub(crate) fn commands(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteExecutor for ScriptedExecutor {
    async fn run_with(
        &self,
        cmd: &str,
        options: &RunOptions,
    ) -> Result<ExecutionResult, ExecError> {
        self.calls.lock().unwrap().push(cmd.to_string());

        if let Some((stderr, code)) = self.failures.get(cmd)
            && options.check_return_code
        {
            return Err(ExecError::command_failed(cmd, stderr.clone(), *code));
        }

        Ok(ExecutionResult {
            command: cmd.to_string(),
            stdout: self.stdout.get(cmd).cloned().unwrap_or_default(),
            stderr: None,
            return_code: 0,
            duration: Duration::ZERO,
        })
    }
}
