//! Error types for agentboot-pkg

use agentboot_exec::ExecError;
use thiserror::Error;

use crate::types::PackageManagerType;

/// Errors that can occur during package operations
#[derive(Error, Debug, Clone)]
pub enum PackageError {
    /// Probing or refreshing failed on the remote side
    #[error(transparent)]
    Exec(#[from] ExecError),

    /// Installing a program failed
    #[error("{manager} could not install {program}: {source}")]
    InstallFailed {
        /// Program being installed
        program: String,
        /// Manager used for the install
        manager: PackageManagerType,
        /// Underlying failure
        #[source]
        source: ExecError,
    },
}

impl PackageError {
    /// Whether the remote side reported failure (as opposed to a broken connection)
    #[must_use]
    pub fn is_command_failure(&self) -> bool {
        match self {
            PackageError::Exec(e) | PackageError::InstallFailed { source: e, .. } => {
                e.is_command_failure()
            }
        }
    }
}
