//! apt-get package manager (Debian/Ubuntu)

use std::sync::Arc;

use agentboot_exec::{ExecError, RemoteExecutor};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::error::PackageError;
use crate::probe::program_on_path;
use crate::traits::PackageManager;
use crate::types::PackageManagerType;

/// apt-get package manager implementation
pub struct AptGetManager {
    /// Remote executor for running commands
    executor: Arc<dyn RemoteExecutor>,
    /// Whether to use sudo
    use_sudo: bool,
}

impl AptGetManager {
    /// Create a new apt-get manager
    ///
    /// # Arguments
    /// * `executor` - Remote executor for running apt-get commands
    /// * `use_sudo` - Whether to prefix commands with sudo
    pub fn new(executor: Arc<dyn RemoteExecutor>, use_sudo: bool) -> Self {
        Self { executor, use_sudo }
    }

    /// Build apt-get command with optional sudo
    fn apt_cmd(&self, args: &str) -> String {
        if self.use_sudo {
            format!("sudo apt-get {args}")
        } else {
            format!("apt-get {args}")
        }
    }
}

#[async_trait]
impl PackageManager for AptGetManager {
    fn manager_type(&self) -> PackageManagerType {
        PackageManagerType::AptGet
    }

    async fn is_available(&self) -> Result<bool, ExecError> {
        program_on_path(self.executor.as_ref(), "apt-get").await
    }

    #[instrument(skip(self))]
    async fn refresh(&self) -> Result<(), PackageError> {
        debug!("refreshing apt package lists");
        self.executor.run(&self.apt_cmd("update")).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn install(&self, package: &str) -> Result<(), PackageError> {
        let cmd = self.apt_cmd(&format!("install -y {package}"));
        self.executor
            .run(&cmd)
            .await
            .map_err(|source| PackageError::InstallFailed {
                program: package.to_string(),
                manager: PackageManagerType::AptGet,
                source,
            })?;

        info!(package = %package, "installed with apt-get");
        Ok(())
    }
}
