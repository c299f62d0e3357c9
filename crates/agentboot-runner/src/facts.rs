//! Host facts gathered through inline scripts

use serde::{Deserialize, Serialize};

/// Linux distribution as reported by `platform.dist()`
///
/// Decodes from the JSON array `[name, version, id]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    /// Distribution name, e.g. `Ubuntu`
    pub name: String,
    /// Release version, e.g. `14.04`
    pub version: String,
    /// Release codename, e.g. `trusty`
    pub id: String,
}
