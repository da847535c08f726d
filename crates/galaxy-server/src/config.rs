use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    pub bind: Ipv4Addr,
    pub port: u16,
    /// Catalog CSV; a synthetic catalog is generated when unset
    pub catalog: Option<PathBuf>,
    pub synthetic_count: usize,
    pub seed: u64,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            bind: Ipv4Addr::UNSPECIFIED,
            port: 8000,
            catalog: None,
            synthetic_count: 200_000,
            seed: 42,
        }
    }
}

impl ServeConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read serve config: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("invalid serve config: {}", path.display()))
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((self.bind, self.port))
    }
}
