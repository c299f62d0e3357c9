//! Configuration lookup for the CLI

use std::path::{Path, PathBuf};

use agentboot_runner::RunnerConfig;
use eyre::{Result, WrapErr, eyre};

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "AGENTBOOT_CONFIG";

/// Overrides taken from the command line
#[derive(Debug, Default)]
pub struct Overrides {
    pub conn: Option<String>,
    pub shell: Option<String>,
    pub no_validate: bool,
}

/// Resolve the runner configuration
///
/// Order: explicit `--config`, `AGENTBOOT_CONFIG`, then the common paths.
/// Without any file a config is built from `--conn` alone.
pub fn resolve(explicit: Option<&Path>, overrides: Overrides) -> Result<RunnerConfig> {
    let mut config = match find_config_file(explicit) {
        Some(path) => RunnerConfig::load(&path)
            .wrap_err_with(|| format!("loading {}", path.display()))?,
        None => {
            let conn = overrides
                .conn
                .clone()
                .ok_or_else(|| eyre!("no config file found; pass --conn or --config"))?;
            tracing::debug!("no config file found, using --conn");
            RunnerConfig::new(conn)
        }
    };

    if let Some(conn) = overrides.conn {
        config.conn_cmd = conn;
    }
    if let Some(shell) = overrides.shell {
        config.sh_cmd = shell;
    }
    if overrides.no_validate {
        config.validate_connection = false;
    }

    Ok(config)
}

fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }

    let mut paths = vec![
        PathBuf::from("agentboot.toml"),
        PathBuf::from("/etc/agentboot/agentboot.toml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("agentboot/agentboot.toml"));
    }

    paths.into_iter().find(|path| path.exists())
}
