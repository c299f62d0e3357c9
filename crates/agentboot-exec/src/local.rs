//! Local process launching using `tokio::process`

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::error::LaunchError;
use crate::result::ProcessOutput;
use crate::traits::ProcessLauncher;

/// Local process launcher
///
/// Spawns argv directly (no intermediate shell), optionally feeds `input`
/// on stdin, and captures stdout, stderr and the exit status.
#[derive(Debug, Clone)]
pub struct LocalLauncher;

impl LocalLauncher {
    /// Create a new local launcher
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalLauncher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessLauncher for LocalLauncher {
    #[instrument(skip(self, input), level = "debug")]
    async fn launch(
        &self,
        argv: &[String],
        input: Option<&str>,
    ) -> Result<ProcessOutput, LaunchError> {
        let (program, args) = argv.split_first().ok_or(LaunchError::EmptyCommand)?;
        let start = Instant::now();

        let mut child = Command::new(program)
            .args(args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| LaunchError::Spawn(format!("{program}: {e}")))?;

        let stdin = child.stdin.take();
        let feed = async move {
            if let (Some(mut pipe), Some(data)) = (stdin, input) {
                pipe.write_all(data.as_bytes()).await?;
                pipe.shutdown().await?;
            }
            Ok::<(), std::io::Error>(())
        };

        // Feed and drain concurrently so a chatty process cannot fill its
        // stdout pipe while we are still writing.
        let (fed, output) = tokio::join!(feed, child.wait_with_output());

        match fed {
            Err(e) if e.kind() != ErrorKind::BrokenPipe => {
                return Err(LaunchError::Io(e.to_string()));
            }
            _ => {}
        }
        let output = output.map_err(|e| LaunchError::Io(e.to_string()))?;

        let status = output.status.code().unwrap_or(-1);
        let duration = start.elapsed();

        debug!(
            program = %program,
            status = status,
            duration = ?duration,
            "process completed"
        );

        Ok(ProcessOutput {
            status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            duration,
        })
    }
}
