//! Package manager detection and helper installation

use std::sync::Arc;

use agentboot_exec::{ExecError, RemoteExecutor};
use tracing::{debug, info, instrument, warn};

use crate::apt::AptGetManager;
use crate::error::PackageError;
use crate::probe::program_on_path;
use crate::traits::PackageManager;
use crate::types::{HelperStatus, PackageManagerType};
use crate::yum::YumManager;

/// Build the manager implementation for `kind`
pub fn manager_for(
    kind: PackageManagerType,
    executor: Arc<dyn RemoteExecutor>,
    use_sudo: bool,
) -> Box<dyn PackageManager> {
    match kind {
        PackageManagerType::AptGet => Box::new(AptGetManager::new(executor, use_sudo)),
        PackageManagerType::Yum => Box::new(YumManager::new(executor, use_sudo)),
    }
}

/// Find the first available package manager in `probes` order
///
/// Later entries are not probed once one matches. Returns `Ok(None)` if no
/// entry is available.
///
/// # Errors
/// Returns `ExecError::ExecutionError` if a probe could not be run
#[instrument(skip(executor))]
pub async fn detect_manager(
    executor: Arc<dyn RemoteExecutor>,
    probes: &[PackageManagerType],
    use_sudo: bool,
) -> Result<Option<Box<dyn PackageManager>>, ExecError> {
    for &kind in probes {
        let manager = manager_for(kind, executor.clone(), use_sudo);
        if manager.is_available().await? {
            debug!(manager = %kind, "package manager detected");
            return Ok(Some(manager));
        }
    }
    Ok(None)
}

/// Make sure `program` exists on the remote host, installing it if needed
///
/// A missing program with no detectable package manager is accepted and
/// reported as [`HelperStatus::Unresolved`].
///
/// # Errors
/// Returns `PackageError` if probing, refreshing or installing fails
#[instrument(skip(executor))]
pub async fn ensure_program(
    executor: Arc<dyn RemoteExecutor>,
    program: &str,
    probes: &[PackageManagerType],
    use_sudo: bool,
) -> Result<HelperStatus, PackageError> {
    if program_on_path(executor.as_ref(), program).await? {
        return Ok(HelperStatus::Present);
    }

    let Some(manager) = detect_manager(executor, probes, use_sudo).await? else {
        warn!(program = %program, "program missing and no package manager found");
        return Ok(HelperStatus::Unresolved);
    };

    manager.refresh().await?;
    manager.install(program).await?;

    info!(program = %program, manager = %manager.manager_type(), "helper program installed");
    Ok(HelperStatus::Installed(manager.manager_type()))
}
