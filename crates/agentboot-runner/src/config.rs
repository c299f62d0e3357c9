//! Runner configuration

use std::path::Path;

use agentboot_exec::DEFAULT_SHELL;
use agentboot_pkg::{DEFAULT_PROBE_ORDER, PackageManagerType};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Helper programs ensured during bootstrap when none are configured
pub const DEFAULT_REQUIRED_PROGRAMS: [&str; 4] = ["sudo", "wget", "rsync", "python"];

/// Configuration for a [`crate::ShellRunner`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Connection-transport command template, e.g. `ssh -T admin@10.0.0.5`
    pub conn_cmd: String,
    /// Remote shell interpreter path
    #[serde(default = "default_sh_cmd")]
    pub sh_cmd: String,
    /// Probe the connection with `echo` while bootstrapping
    #[serde(default = "default_true")]
    pub validate_connection: bool,
    /// Connection-style discriminator; only shell connections are supported
    #[serde(default = "default_true")]
    pub is_shell: bool,
    /// Remote interpreter used for inline scripts
    #[serde(default = "default_python")]
    pub python: String,
    /// Helper programs that must exist on the remote host
    #[serde(default = "default_required_programs")]
    pub required_programs: Vec<String>,
    /// Package managers to probe, in order
    #[serde(default = "default_package_managers")]
    pub package_managers: Vec<PackageManagerType>,
    /// Prefix package manager commands with sudo
    #[serde(default)]
    pub install_with_sudo: bool,
}

fn default_sh_cmd() -> String {
    DEFAULT_SHELL.to_string()
}

fn default_true() -> bool {
    true
}

fn default_python() -> String {
    "python".to_string()
}

fn default_required_programs() -> Vec<String> {
    DEFAULT_REQUIRED_PROGRAMS
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_package_managers() -> Vec<PackageManagerType> {
    DEFAULT_PROBE_ORDER.to_vec()
}

impl RunnerConfig {
    /// Configuration with defaults for everything but the template
    pub fn new(conn_cmd: impl Into<String>) -> Self {
        Self {
            conn_cmd: conn_cmd.into(),
            sh_cmd: default_sh_cmd(),
            validate_connection: true,
            is_shell: true,
            python: default_python(),
            required_programs: default_required_programs(),
            package_managers: default_package_managers(),
            install_with_sudo: false,
        }
    }

    /// Set the remote shell interpreter
    #[must_use]
    pub fn with_shell(mut self, sh_cmd: impl Into<String>) -> Self {
        self.sh_cmd = sh_cmd.into();
        self
    }

    /// Enable or disable the connection probe
    #[must_use]
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate_connection = validate;
        self
    }

    /// Replace the helper program list
    #[must_use]
    pub fn with_required_programs<I, S>(mut self, programs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_programs = programs.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the package manager probe order
    #[must_use]
    pub fn with_package_managers(mut self, managers: Vec<PackageManagerType>) -> Self {
        self.package_managers = managers;
        self
    }

    /// Set the remote interpreter used for inline scripts
    #[must_use]
    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// Returns the TOML error if the text is not a valid configuration
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
