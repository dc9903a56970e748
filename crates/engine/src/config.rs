//! Engine configuration
//!
//! Stored as pretty-printed JSON. Every field has a default, so a partial file
//! (or none at all) yields a usable configuration.

use std::path::{Path, PathBuf};

use padlink_device_types::ControllerFamily;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("No platform configuration directory")]
    NoConfigDir,
}

/// Per-family switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyConfig {
    pub enabled: bool,
    /// 1-based player slot shown on the controller's LEDs.
    pub player_index: u8,
}

impl FamilyConfig {
    pub const fn player(player_index: u8) -> Self {
        Self {
            enabled: true,
            player_index,
        }
    }
}

impl Default for FamilyConfig {
    fn default() -> Self {
        Self::player(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub switch_pro: FamilyConfig,
    pub dualsense: FamilyConfig,
    pub dualshock4: FamilyConfig,
    pub wiimote: FamilyConfig,
    pub gamecube: FamilyConfig,
    /// Sleep between multiplexer ticks on the poller thread.
    pub poll_interval_ms: u64,
    /// Consecutive mid-stream extension re-probes before the Wiimote faults.
    pub wiimote_max_reprobes: u32,
    /// Consecutive wrong report ids before the Switch Pro faults.
    pub switch_pro_max_bad_frames: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            switch_pro: FamilyConfig::player(3),
            dualsense: FamilyConfig::player(1),
            dualshock4: FamilyConfig::player(2),
            wiimote: FamilyConfig::player(1),
            gamecube: FamilyConfig::player(1),
            poll_interval_ms: 1,
            wiimote_max_reprobes: 8,
            switch_pro_max_bad_frames: 3,
        }
    }
}

impl EngineConfig {
    pub const FILE_NAME: &'static str = "config.json";

    pub fn family(&self, family: ControllerFamily) -> &FamilyConfig {
        match family {
            ControllerFamily::SwitchPro => &self.switch_pro,
            ControllerFamily::DualSense => &self.dualsense,
            ControllerFamily::DualShock4 => &self.dualshock4,
            ControllerFamily::Wiimote => &self.wiimote,
            ControllerFamily::GameCubeAdapter => &self.gamecube,
        }
    }

    pub fn family_mut(&mut self, family: ControllerFamily) -> &mut FamilyConfig {
        match family {
            ControllerFamily::SwitchPro => &mut self.switch_pro,
            ControllerFamily::DualSense => &mut self.dualsense,
            ControllerFamily::DualShock4 => &mut self.dualshock4,
            ControllerFamily::Wiimote => &mut self.wiimote,
            ControllerFamily::GameCubeAdapter => &mut self.gamecube,
        }
    }

    /// Families to discover, in discovery order.
    pub fn enabled_families(&self) -> impl Iterator<Item = ControllerFamily> + '_ {
        ControllerFamily::ALL
            .into_iter()
            .filter(|family| self.family(*family).enabled)
    }

    /// `<config dir>/padlink/config.json`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("padlink").join(Self::FILE_NAME))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for family in ControllerFamily::ALL {
            let player = self.family(family).player_index;
            if !(1..=4).contains(&player) {
                return Err(ConfigError::Invalid(format!(
                    "{family} player_index must be 1-4, got {player}"
                )));
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load `path`, or the defaults if it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write as JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        let write_error = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        std::fs::write(path, self.to_json()?).map_err(write_error)
    }
}
