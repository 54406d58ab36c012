//! Render service configuration.
//!
//! Loaded from an optional JSON file; every field has a default, and the command line
//! overrides individual values after loading.

use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{SvgvidgenError, SvgvidgenResult};
use crate::render::{RenderDefaults, SvgTemplate};

/// Settings of the render stub service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to bind.
    pub addr: String,
    /// TCP port to bind; `0` picks a free port.
    pub port: u16,
    /// Template used for `POST /render`.
    pub template: SvgTemplate,
    /// Largest accepted request body.
    pub max_body_bytes: usize,
    /// Socket read timeout in seconds.
    pub read_timeout_secs: u64,
    /// Fallback render parameters.
    pub defaults: RenderDefaults,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1".to_string(),
            port: 8787,
            template: SvgTemplate::default(),
            max_body_bytes: 64 * 1024,
            read_timeout_secs: 15,
            defaults: RenderDefaults::default(),
        }
    }
}

impl ServerConfig {
    /// Read a JSON config file.
    pub fn from_path(path: &Path) -> SvgvidgenResult<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&raw)
            .map_err(|e| SvgvidgenError::serde(format!("{}: {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check value ranges.
    pub fn validate(&self) -> SvgvidgenResult<()> {
        if self.addr.trim().is_empty() {
            return Err(SvgvidgenError::validation("addr must be non-empty"));
        }
        if self.max_body_bytes == 0 {
            return Err(SvgvidgenError::validation("max_body_bytes must be non-zero"));
        }
        if self.read_timeout_secs == 0 {
            return Err(SvgvidgenError::validation(
                "read_timeout_secs must be non-zero",
            ));
        }
        self.defaults.validate()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
