//! File mirroring through rsync over the connection template

use agentboot_exec::{ConnectionTemplate, ExecError, ProcessLauncher, split_words};
use tracing::{debug, error, instrument};

/// rsync invocation that tunnels through `template`
///
/// The flags are fixed; transfer success is judged from rsync's verbose
/// listing, so `-v` must stay.
#[must_use]
pub fn rsync_command(template: &ConnectionTemplate, src: &str, dst: &str) -> String {
    format!("rsync -av --blocking-io --rsync-path= --rsh='{template}' {src} rsync:{dst}")
}

/// Split a remote POSIX path into `(directory, file name)`
#[must_use]
pub fn split_remote_path(path: &str) -> (String, String) {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some(("", name)) => ("/".to_string(), name.to_string()),
        Some((dir, name)) => (dir.to_string(), name.to_string()),
        None => (".".to_string(), trimmed.to_string()),
    }
}

/// Join a remote directory and a file name
#[must_use]
pub fn join_remote(dir: &str, name: &str) -> String {
    format!("{}/{name}", dir.trim_end_matches('/'))
}

/// Run rsync locally to push `src` to `dst` on the remote host
///
/// # Errors
/// `ExecError::ExecutionError` if rsync cannot be started,
/// `ExecError::CommandFailed` if it exits non-zero or prints nothing
/// (code `-1`)
#[instrument(skip(launcher, template))]
pub async fn mirror(
    launcher: &dyn ProcessLauncher,
    template: &ConnectionTemplate,
    src: &str,
    dst: &str,
) -> Result<(), ExecError> {
    let cmd = rsync_command(template, src, dst);
    let argv = split_words(&cmd).map_err(|e| ExecError::execution(&cmd, e))?;

    debug!(command = %cmd, "mirroring file");

    let output = launcher
        .launch(&argv, None)
        .await
        .map_err(|e| ExecError::execution(&cmd, e))?;

    if !output.success() {
        error!(command = %cmd, status = output.status, "rsync failed");
        return Err(ExecError::command_failed(cmd, output.stderr, output.status));
    }

    if output.stdout.is_empty() {
        error!(command = %cmd, "rsync produced no output");
        return Err(ExecError::command_failed(
            cmd,
            format!("Failed uploading {src} to {dst}"),
            -1,
        ));
    }

    Ok(())
}
