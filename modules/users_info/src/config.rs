use anyhow::bail;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_PATH: &str = "/api/users";

/// Configuration for the users_info module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsersInfoConfig {
    /// Mount point of the users collection; items live under `{base_path}/{id}`.
    #[serde(default = "default_base_path")]
    pub base_path: String,
}

impl Default for UsersInfoConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
        }
    }
}

impl UsersInfoConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        let p = self.base_path.as_str();
        if !p.starts_with('/') || p.len() < 2 || p.ends_with('/') {
            bail!("users_info.base_path must look like '/segment[/segment]', got '{p}'");
        }
        if p.contains(['{', '}', '*']) {
            bail!("users_info.base_path must not contain route captures, got '{p}'");
        }
        Ok(())
    }
}

fn default_base_path() -> String {
    DEFAULT_BASE_PATH.to_string()
}
