//! Platform configuration
//!
//! Read from an optional `nxcore.toml` next to the application; every field
//! has a default matching the device's fixed behaviour.
//!
//! ```toml
//! [display]
//! width = 1280
//! height = 720
//! gles = "es2"
//!
//! [input]
//! exit_key = "escape"   # any key name, or "none"
//! mouse_scale = [1.0, 1.0]
//!
//! [emulation]
//! enabled = true
//! cursor_sensitivity = 10.0
//!
//! [logging]
//! filter = "info"
//!
//! [debug]
//! usb_debugger = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use nxcore_platform::{Key, PlatformError, Size};
use serde::de::value::StrDeserializer;
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::graphics::GlesVersion;

/// Default cursor speed in pixels per frame at full right-stick deflection
pub const DEFAULT_CURSOR_SENSITIVITY: f32 = 10.0;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("invalid config value: {0}")]
    Invalid(String),
}

impl From<ConfigError> for PlatformError {
    fn from(err: ConfigError) -> Self {
        PlatformError::Config(err.to_string())
    }
}

/// Full configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SwitchConfig {
    pub display: DisplayConfig,
    pub input: InputConfig,
    pub emulation: EmulationConfig,
    pub logging: LoggingConfig,
    pub debug: DebugConfig,
}

/// Screen size and GLES version
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    pub gles: GlesVersion,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            gles: GlesVersion::Es2,
        }
    }
}

impl DisplayConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Input defaults
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Key that requests close; `None` disables it
    #[serde(deserialize_with = "deserialize_exit_key")]
    pub exit_key: Option<Key>,
    pub mouse_scale: [f32; 2],
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            exit_key: Some(Key::Escape),
            mouse_scale: [1.0, 1.0],
        }
    }
}

/// Gamepad emulation of keyboard and mouse
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EmulationConfig {
    /// Has no effect when built without the `gamepad-emulation` feature
    pub enabled: bool,
    /// Cursor pixels per frame at full right-stick deflection
    pub cursor_sensitivity: f32,
}

impl Default for EmulationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cursor_sensitivity: DEFAULT_CURSOR_SENSITIVITY,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives; `RUST_LOG` takes precedence
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Start the USB debugging channel before anything else
    pub usb_debugger: bool,
}

fn deserialize_exit_key<'de, D>(deserializer: D) -> Result<Option<Key>, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    if name.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    let name: StrDeserializer<'_, D::Error> = name.as_str().into_deserializer();
    Key::deserialize(name).map(Some)
}

impl SwitchConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SwitchConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load `path` if it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.width == 0 || self.display.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "display size must be non-zero, got {}x{}",
                self.display.width, self.display.height
            )));
        }
        if self
            .input
            .mouse_scale
            .iter()
            .any(|s| !s.is_finite() || *s <= 0.0)
        {
            return Err(ConfigError::Invalid(format!(
                "mouse_scale must be positive, got {:?}",
                self.input.mouse_scale
            )));
        }
        let sensitivity = self.emulation.cursor_sensitivity;
        if !sensitivity.is_finite() || sensitivity < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "cursor_sensitivity must be a non-negative number, got {sensitivity}"
            )));
        }
        Ok(())
    }

    /// Set the screen size
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.display.width = width;
        self.display.height = height;
        self
    }

    /// Set the GLES version
    pub fn gles(mut self, gles: GlesVersion) -> Self {
        self.display.gles = gles;
        self
    }

    /// Set the exit key
    pub fn exit_key(mut self, key: Option<Key>) -> Self {
        self.input.exit_key = key;
        self
    }

    /// Set the mouse coordinate scale
    pub fn mouse_scale(mut self, x: f32, y: f32) -> Self {
        self.input.mouse_scale = [x, y];
        self
    }

    /// Enable or disable gamepad emulation
    pub fn emulation(mut self, enabled: bool) -> Self {
        self.emulation.enabled = enabled;
        self
    }

    /// Set the emulated cursor speed
    pub fn cursor_sensitivity(mut self, sensitivity: f32) -> Self {
        self.emulation.cursor_sensitivity = sensitivity;
        self
    }

    /// Set the log filter
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.logging.filter = filter.into();
        self
    }

    /// Enable the USB debugging channel
    pub fn usb_debugger(mut self, enabled: bool) -> Self {
        self.debug.usb_debugger = enabled;
        self
    }
}
