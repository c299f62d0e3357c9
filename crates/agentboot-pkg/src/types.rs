//! Type definitions for package management

use serde::{Deserialize, Serialize};

/// Package manager type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackageManagerType {
    /// apt-get (Debian/Ubuntu)
    #[serde(rename = "apt-get")]
    AptGet,
    /// yum (RHEL/CentOS)
    #[serde(rename = "yum")]
    Yum,
}

impl PackageManagerType {
    /// Binary name probed with `which`
    #[must_use]
    pub fn binary(self) -> &'static str {
        match self {
            PackageManagerType::AptGet => "apt-get",
            PackageManagerType::Yum => "yum",
        }
    }
}

impl std::fmt::Display for PackageManagerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.binary())
    }
}

/// Probe order used when none is configured
pub const DEFAULT_PROBE_ORDER: [PackageManagerType; 2] =
    [PackageManagerType::AptGet, PackageManagerType::Yum];

/// Outcome of ensuring a helper program exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HelperStatus {
    /// Already on the remote `PATH`
    Present,
    /// Installed through the given manager
    Installed(PackageManagerType),
    /// Missing and no known package manager was found
    Unresolved,
}
