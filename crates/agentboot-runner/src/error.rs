//! Error types for agentboot-runner

use std::path::PathBuf;

use agentboot_exec::{ExecError, TemplateError};
use agentboot_pkg::PackageError;
use thiserror::Error;

/// Errors that abort [`crate::ShellRunner::connect`]
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// Only shell-style connections are supported
    #[error("unsupported connection: only shell connections are accepted")]
    NotShell,

    /// The connection template could not be parsed
    #[error("invalid connection template: {0}")]
    Template(#[from] TemplateError),

    /// The `echo` probe failed
    #[error("connection validation failed: {0}")]
    Connection(#[source] ExecError),

    /// A helper program could not be ensured
    #[error("could not ensure helper program {program}: {source}")]
    Helper {
        /// Program being ensured
        program: String,
        /// Underlying failure
        #[source]
        source: PackageError,
    },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// Config file path
        path: PathBuf,
        /// I/O error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid configuration
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        /// Config file path
        path: PathBuf,
        /// TOML error
        #[source]
        source: toml::de::Error,
    },
}
