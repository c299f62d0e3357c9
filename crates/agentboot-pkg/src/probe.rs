//! Presence probes

use agentboot_exec::{ExecError, RemoteExecutor, RunOptions};
use tracing::debug;

/// Check whether `program` resolves on the remote `PATH`
///
/// Runs `which` with exit-status checking disabled, so a missing program is
/// reported as `Ok(false)` rather than a command failure. Presence is judged
/// by the program name appearing in the output.
///
/// # Errors
/// Returns `ExecError::ExecutionError` if the probe could not be run
pub async fn program_on_path(
    executor: &dyn RemoteExecutor,
    program: &str,
) -> Result<bool, ExecError> {
    let result = executor
        .run_with(&format!("which {program}"), &RunOptions::unchecked())
        .await?;
    let found = result.stdout.contains(program);
    debug!(program = %program, found = found, "probed remote PATH");
    Ok(found)
}
