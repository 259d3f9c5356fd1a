use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use chordata_inspect::{ValueFormatter, DEFAULT_SAMPLE_CAP};

use crate::error::{ServerError, ServerResult};

/// Port the inspector listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 8080;

/// Inspector configuration.
///
/// Every field has a default, so a TOML file only needs the keys it wants
/// to change:
///
/// ```toml
/// bind_addr = "0.0.0.0:9090"
/// sample_cap = 25
/// utc_offset_minutes = -300
/// assets_dir = "./dashboard"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    pub bind_addr: SocketAddr,
    /// Records sampled per entity.
    pub sample_cap: usize,
    /// Offset from UTC, in minutes, used to render dates.
    pub utc_offset_minutes: i32,
    /// Serve dashboard assets from this directory instead of the bundled ones.
    pub assets_dir: Option<PathBuf>,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            sample_cap: DEFAULT_SAMPLE_CAP,
            utc_offset_minutes: 0,
            assets_dir: None,
        }
    }
}

impl InspectorConfig {
    pub fn from_toml_str(raw: &str) -> ServerResult<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| ServerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> ServerResult<()> {
        if self.sample_cap == 0 {
            return Err(ServerError::Config("sample_cap must be at least 1".into()));
        }
        self.utc_offset()?;
        Ok(())
    }

    pub fn utc_offset(&self) -> ServerResult<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                ServerError::Config(format!(
                    "utc_offset_minutes out of range: {}",
                    self.utc_offset_minutes
                ))
            })
    }

    pub fn formatter(&self) -> ServerResult<ValueFormatter> {
        Ok(ValueFormatter::with_offset(self.utc_offset()?))
    }
}
