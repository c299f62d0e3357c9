//! agentboot-pkg: Package manager abstraction
//!
//! Probes for helper programs on the remote host and installs missing ones
//! through the first available package manager (apt-get, yum).

pub mod apt;
pub mod detect;
pub mod error;
pub mod probe;
pub mod traits;
pub mod types;
pub mod yum;

#[cfg(test)]
mod testing;

pub use detect::{detect_manager, ensure_program, manager_for};
pub use error::PackageError;
pub use probe::program_on_path;
pub use traits::PackageManager;
pub use types::{DEFAULT_PROBE_ORDER, HelperStatus, PackageManagerType};
