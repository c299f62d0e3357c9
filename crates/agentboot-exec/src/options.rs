//! Per-call execution options

use serde::{Deserialize, Serialize};

/// Options recognised by [`crate::RemoteExecutor::run_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Treat a non-zero exit status as a command failure.
    ///
    /// When false the call always succeeds with exit code 0.
    #[serde(default = "default_check_return_code", alias = "checkReturnCode")]
    pub check_return_code: bool,
}

fn default_check_return_code() -> bool {
    true
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            check_return_code: default_check_return_code(),
        }
    }
}

impl RunOptions {
    /// Options for best-effort commands whose exit status is ignored
    #[must_use]
    pub fn unchecked() -> Self {
        Self {
            check_return_code: false,
        }
    }
}
