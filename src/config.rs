//! Configuration file handling.
//!
//! Settings come from a TOML file and are overridden by command-line flags.
//! Every key is optional; missing keys keep their defaults.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pipeline::TimelineOptions;
use crate::terminal::TerminalSettings;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "SEQ2GIF_CONFIG";

const CONFIG_DIR: &str = "seq2gif";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid {field}: {value} (expected {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}

/// Conversion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Terminal width in cells
    pub width: usize,
    /// Terminal height in cells
    pub height: usize,
    /// Extra time the last frame is shown, in milliseconds
    pub last_frame_delay: u32,
    pub foreground_color: u32,
    pub background_color: u32,
    pub cursor_color: u32,
    /// Hardware tab width
    pub tabstop: u32,
    /// Treat East-Asian ambiguous width characters as wide
    pub cjkwidth: bool,
    /// Loop count, 0 = infinite
    pub repeat: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            last_frame_delay: 300,
            foreground_color: 7,
            background_color: 0,
            cursor_color: 2,
            tabstop: 8,
            cjkwidth: false,
            repeat: 0,
        }
    }
}

impl Config {
    /// Load the configuration from `explicit`, `$SEQ2GIF_CONFIG` or the
    /// default location, in that order.
    ///
    /// Only a missing file at the default location falls back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = resolve_path(
            explicit,
            std::env::var_os(CONFIG_ENV),
            dirs::config_dir(),
        );
        let Some(path) = path else {
            debug!("No config directory, using defaults");
            return Ok(Self::default());
        };
        Self::load_from(&path, required)
    }

    /// Read and validate a config file.
    pub fn load_from(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
                debug!("No config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        debug!("Loading config from {}", path.display());
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check("width", self.width as u64, 1, u64::from(u16::MAX))?;
        check("height", self.height as u64, 1, u64::from(u16::MAX))?;
        check(
            "last_frame_delay",
            u64::from(self.last_frame_delay),
            0,
            u64::from(u32::MAX),
        )?;
        check("foreground_color", u64::from(self.foreground_color), 0, 255)?;
        check("background_color", u64::from(self.background_color), 0, 255)?;
        check("cursor_color", u64::from(self.cursor_color), 0, 255)?;
        check("tabstop", u64::from(self.tabstop), 0, 255)?;
        check("repeat", u64::from(self.repeat), 0, u64::from(u16::MAX))?;
        Ok(())
    }

    /// Interpreter settings. Call after [`validate`](Self::validate).
    pub fn terminal_settings(&self) -> TerminalSettings {
        TerminalSettings {
            cols: self.width,
            rows: self.height,
            fg: clamp_u8(self.foreground_color),
            bg: clamp_u8(self.background_color),
            cursor: clamp_u8(self.cursor_color),
            tab_width: self.tabstop as usize,
            cjk_wide: self.cjkwidth,
        }
    }

    pub fn timeline_options(&self) -> TimelineOptions {
        TimelineOptions {
            repeat: self.repeat.min(u32::from(u16::MAX)) as u16,
            last_frame_delay_ms: self.last_frame_delay,
        }
    }
}

/// Pick the config path and whether it must exist.
fn resolve_path(
    explicit: Option<&Path>,
    env: Option<OsString>,
    config_dir: Option<PathBuf>,
) -> (Option<PathBuf>, bool) {
    if let Some(path) = explicit {
        return (Some(path.to_path_buf()), true);
    }
    if let Some(path) = env.filter(|p| !p.is_empty()) {
        return (Some(PathBuf::from(path)), true);
    }
    (
        config_dir.map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE)),
        false,
    )
}

fn check(field: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

fn clamp_u8(value: u32) -> u8 {
    value.min(255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_cli_defaults() {
        let config = Config::default();
        assert_eq!(config.terminal_settings(), TerminalSettings::default());
        assert_eq!(config.timeline_options(), TimelineOptions::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str("width = 132\ncjkwidth = true\n").unwrap();
        assert_eq!(config.width, 132);
        assert!(config.cjkwidth);
        assert_eq!(config.height, 24);
        assert_eq!(config.last_frame_delay, 300);
    }

    #[test]
    fn config_serializes_to_loadable_toml() {
        let config = Config {
            repeat: 2,
            ..Config::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("repeat = 2"));
        assert_eq!(toml::from_str::<Config>(&text).unwrap(), config);
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let config = Config {
            width: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { field: "width", .. })
        ));

        let config = Config {
            cursor_color: 256,
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid cursor_color: 256 (expected 0..=255)");

        let config = Config {
            repeat: 70_000,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_default_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml"), false).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load_from(&dir.path().join("nope.toml"), true).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn load_reads_and_validates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "height = 40\nrepeat = 3\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.height, 40);
        assert_eq!(config.timeline_options().repeat, 3);

        fs::write(&path, "tabstop = 300\n").unwrap();
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::OutOfRange { field: "tabstop", .. })
        ));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "width = \"wide\"\n").unwrap();
        assert!(matches!(
            Config::load_from(&path, true),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn path_resolution_order() {
        let explicit = PathBuf::from("/tmp/explicit.toml");
        let env = Some(OsString::from("/tmp/env.toml"));
        let dir = Some(PathBuf::from("/home/u/.config"));

        assert_eq!(
            resolve_path(Some(&explicit), env.clone(), dir.clone()),
            (Some(explicit.clone()), true)
        );
        assert_eq!(
            resolve_path(None, env, dir.clone()),
            (Some(PathBuf::from("/tmp/env.toml")), true)
        );
        assert_eq!(
            resolve_path(None, Some(OsString::new()), dir),
            (
                Some(PathBuf::from("/home/u/.config/seq2gif/config.toml")),
                false
            )
        );
        assert_eq!(resolve_path(None, None, None), (None, false));
    }
}
