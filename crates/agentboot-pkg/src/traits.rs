//! Package manager traits

use agentboot_exec::ExecError;
use async_trait::async_trait;

use crate::error::PackageError;
use crate::types::PackageManagerType;

/// A remote package manager able to install helper programs
#[async_trait]
pub trait PackageManager: Send + Sync {
    /// Which manager this is
    fn manager_type(&self) -> PackageManagerType;

    /// Whether the manager binary is present on the remote host
    ///
    /// # Errors
    /// Returns `ExecError::ExecutionError` if the probe could not be run
    async fn is_available(&self) -> Result<bool, ExecError>;

    /// Refresh package metadata
    ///
    /// # Errors
    /// Returns `PackageError::Exec` if the refresh command fails
    async fn refresh(&self) -> Result<(), PackageError>;

    /// Install a single package non-interactively
    ///
    /// # Errors
    /// Returns `PackageError::InstallFailed` if the install command fails
    async fn install(&self, package: &str) -> Result<(), PackageError>;
}
