//! Scripted fake host shared by runner tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use agentboot_exec::{LaunchError, ProcessLauncher, ProcessOutput};
use agentboot_runner::{RunnerConfig, ShellRunner};
use async_trait::async_trait;

/// One recorded launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// Command text fed to the remote shell
    Remote(String),
    /// Local process (rsync) argv
    Local(Vec<String>),
}

#[derive(Clone)]
struct Reply {
    status: i32,
    stdout: String,
    stderr: String,
}

/// Launcher that plays a remote host from a rule table
///
/// Remote commands are matched by prefix, first rule wins; unmatched
/// commands succeed silently. Local launches (rsync) get `rsync_reply`.
pub struct FakeHost {
    rules: Vec<(String, Reply)>,
    rsync_reply: Reply,
    calls: Mutex<Vec<Call>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            rsync_reply: Reply {
                status: 0,
                stdout: "sending incremental file list\n".to_string(),
                stderr: String::new(),
            },
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on(mut self, prefix: &str, status: i32, stdout: &str, stderr: &str) -> Self {
        self.rules.push((
            prefix.to_string(),
            Reply {
                status,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
        ));
        self
    }

    pub fn rsync(mut self, status: i32, stdout: &str, stderr: &str) -> Self {
        self.rsync_reply = Reply {
            status,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        };
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn remote_commands(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Remote(cmd) => Some(cmd),
                Call::Local(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl ProcessLauncher for FakeHost {
    async fn launch(
        &self,
        argv: &[String],
        input: Option<&str>,
    ) -> Result<ProcessOutput, LaunchError> {
        let reply = match input {
            Some(cmd) => {
                self.calls.lock().unwrap().push(Call::Remote(cmd.to_string()));
                self.rules
                    .iter()
                    .find(|(prefix, _)| cmd.starts_with(prefix.as_str()))
                    .map(|(_, reply)| reply.clone())
                    .unwrap_or(Reply {
                        status: 0,
                        stdout: String::new(),
                        stderr: String::new(),
                    })
            }
            None => {
                self.calls.lock().unwrap().push(Call::Local(argv.to_vec()));
                self.rsync_reply.clone()
            }
        };

        Ok(ProcessOutput {
            status: reply.status,
            stdout: reply.stdout,
            stderr: reply.stderr,
            duration: Duration::from_millis(1),
        })
    }
}

/// Config with no validation and no helper programs
pub fn quiet_config() -> RunnerConfig {
    RunnerConfig::new("ssh -T agent@box")
        .with_validation(false)
        .with_required_programs(Vec::<String>::new())
}

/// Bootstrap a runner against `host` with [`quiet_config`]
pub async fn runner(host: &Arc<FakeHost>) -> ShellRunner {
    ShellRunner::connect_with(quiet_config(), host.clone())
        .await
        .unwrap()
}
