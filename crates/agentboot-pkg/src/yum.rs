//! yum package manager (RHEL/CentOS)

use std::sync::Arc;

use agentboot_exec::{ExecError, RemoteExecutor};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::error::PackageError;
use crate::probe::program_on_path;
use crate::traits::PackageManager;
use crate::types::PackageManagerType;

/// yum package manager implementation
pub struct YumManager {
    executor: Arc<dyn RemoteExecutor>,
    use_sudo: bool,
}

impl YumManager {
    /// Create a new yum manager
    pub fn new(executor: Arc<dyn RemoteExecutor>, use_sudo: bool) -> Self {
        Self { executor, use_sudo }
    }

    /// Build yum command with optional sudo
    fn yum_cmd(&self, args: &str) -> String {
        if self.use_sudo {
            format!("sudo yum {args}")
        } else {
            format!("yum {args}")
        }
    }
}

#[async_trait]
impl PackageManager for YumManager {
    fn manager_type(&self) -> PackageManagerType {
        PackageManagerType::Yum
    }

    async fn is_available(&self) -> Result<bool, ExecError> {
        program_on_path(self.executor.as_ref(), "yum").await
    }

    #[instrument(skip(self))]
    async fn refresh(&self) -> Result<(), PackageError> {
        debug!("running yum update");
        // stdin carries the command script, so yum must not prompt
        self.executor.run(&self.yum_cmd("update -y")).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn install(&self, package: &str) -> Result<(), PackageError> {
        let cmd = self.yum_cmd(&format!("install -y {package}"));
        self.executor
            .run(&cmd)
            .await
            .map_err(|source| PackageError::InstallFailed {
                program: package.to_string(),
                manager: PackageManagerType::Yum,
                source,
            })?;

        info!(package = %package, "installed with yum");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedExecutor;

    #[tokio::test]
    async fn test_available_from_which_output() {
        let executor = Arc::new(ScriptedExecutor::new().respond("which yum", "/usr/bin/yum\n"));
        let manager = YumManager::new(executor, false);

        assert!(manager.is_available().await.unwrap());
    }

    #[tokio::test]
    async fn test_refresh_failure_propagates() {
        let executor =
            Arc::new(ScriptedExecutor::new().fail_on("yum update -y", "repo unreachable", 1));
        let manager = YumManager::new(executor, false);

        let err = manager.refresh().await.unwrap_err();

        assert!(matches!(err, PackageError::Exec(ExecError::CommandFailed { code: 1, .. })));
    }
}
