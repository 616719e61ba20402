use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub devices: DevicesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// smartctl binary, looked up on `PATH` unless absolute.
    pub smartctl_path: String,
    /// Power-state policy passed as `-n <policy>` ("never", "sleep", "standby", "idle").
    /// smartctl exits with status 2 when it skips a device, which counts as a
    /// failed run; use e.g. "standby,0" to have the skipped run accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nocheck: Option<String>,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DevicesConfig {
    /// smartctl `-d` hints by device path: { "/dev/sdb" = "sat", "/dev/sdc" = "megaraid,0" }
    #[serde(default)]
    pub type_hints: HashMap<String, String>,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            smartctl_path: "smartctl".into(),
            nocheck:       None,
            log_level:     "info".into(),
        }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    /// Load the user config, writing defaults on first run.
    pub fn load() -> Self {
        match try_load() {
            Ok(c)  => c,
            Err(_) => {
                // Best-effort; a read-only home still gets defaults.
                let _ = try_write_defaults();
                Config::default()
            }
        }
    }

    /// Load from an explicit path. Unlike [`Config::load`] a missing or
    /// malformed file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("smartdiag").join("smartdiag.toml"))
    }

    /// `-d` hint configured for `device_path`.
    pub fn type_hint(&self, device_path: &str) -> Option<&str> {
        self.devices.type_hints.get(device_path).map(String::as_str)
    }
}

fn try_load() -> Result<Config> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    Config::load_from(&path)
}

fn try_write_defaults() -> Result<()> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# smartdiag configuration\n# Generated on first run, edit freely\n\n{}", text))?;
    Ok(())
}
