//! agentboot-exec: Remote shell execution
//!
//! Runs command text against a remote shell reached through an externally
//! supplied connection template (typically an `ssh` invocation), and turns
//! the outcome into an [`ExecutionResult`] or a two-kind [`ExecError`].

pub mod error;
pub mod local;
pub mod options;
pub mod result;
pub mod shell;
pub mod template;
pub mod traits;

pub use error::{ExecError, LaunchError, TemplateError};
pub use local::LocalLauncher;
pub use options::RunOptions;
pub use result::{ExecutionResult, ProcessOutput};
pub use shell::{DEFAULT_SHELL, ShellTransport};
pub use template::{ConnectionTemplate, split_words};
pub use traits::{ProcessLauncher, RemoteExecutor};
