//! agentboot-runner: Remote shell executor used to bootstrap an agent host
//!
//! Wraps one connection template (typically `ssh ...`) and offers command
//! execution, sudo, rsync-based file upload, sentinel-framed interpreter
//! queries, temp paths and helper-program bootstrap.

pub mod config;
pub mod error;
pub mod facts;
pub mod runner;
pub mod sentinel;
pub mod transfer;

pub use config::{DEFAULT_REQUIRED_PROGRAMS, RunnerConfig};
pub use error::{BootstrapError, ConfigError};
pub use facts::Distribution;
pub use runner::ShellRunner;
