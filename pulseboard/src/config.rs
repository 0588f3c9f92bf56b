//! Configuration file handling.
//!
//! Configuration lives in an INI file, by default `~/.pulseboard/config.ini`.
//! A missing file yields defaults; unknown keys are ignored.
//!
//! ```ini
//! [dashboard]
//! status_url = http://127.0.0.1:5001/api/status
//! export_dir = /home/me/Downloads
//! seed = 42
//!
//! [schedule]
//! metrics_interval_ms = 5000
//! realtime_interval_ms = 3000
//! degradation_delay_ms = 10000
//! degradation_interval_ms = 30000
//! status_initial_delay_ms = 2000
//! status_interval_ms = 30000
//! activity_chance = 0.3
//! degradation_chance = 0.1
//!
//! [layout]
//! metrics = true
//! chart = true
//! activity = true
//! services = true
//! status = true
//!
//! [services]
//! names = API Gateway, Database, Cache Layer
//!
//! [logging]
//! directory = /home/me/.pulseboard/logs
//! level = info
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;

use crate::random::{DEFAULT_ACTIVITY_CHANCE, DEFAULT_DEGRADATION_CHANCE};
use crate::services::DEFAULT_SERVICES;
use crate::status::DEFAULT_STATUS_URL;

/// Name of the application directory under the home directory.
pub const APP_DIR_NAME: &str = ".pulseboard";

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Errors from loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },

    #[error("Probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
}

/// `[dashboard]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    pub status_url: String,
    pub export_dir: PathBuf,
    pub seed: Option<u64>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            status_url: DEFAULT_STATUS_URL.to_string(),
            export_dir: default_export_dir(),
            seed: None,
        }
    }
}

/// `[schedule]` section. Durations are in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleSettings {
    pub metrics_interval_ms: u64,
    pub realtime_interval_ms: u64,
    pub degradation_delay_ms: u64,
    pub degradation_interval_ms: u64,
    pub status_initial_delay_ms: u64,
    pub status_interval_ms: u64,
    pub activity_chance: f64,
    pub degradation_chance: f64,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            metrics_interval_ms: 5_000,
            realtime_interval_ms: 3_000,
            degradation_delay_ms: 10_000,
            degradation_interval_ms: 30_000,
            status_initial_delay_ms: 2_000,
            status_interval_ms: 30_000,
            activity_chance: DEFAULT_ACTIVITY_CHANCE,
            degradation_chance: DEFAULT_DEGRADATION_CHANCE,
        }
    }
}

/// `[layout]` section: which panels exist on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSettings {
    pub metrics: bool,
    pub chart: bool,
    pub activity: bool,
    pub services: bool,
    pub status: bool,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            metrics: true,
            chart: true,
            activity: true,
            services: true,
            status: true,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: app_dir().join("logs"),
            level: "info".to_string(),
        }
    }
}

/// Complete configuration file contents.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub dashboard: DashboardSettings,
    pub schedule: ScheduleSettings,
    pub layout: LayoutSettings,
    pub services: Vec<String>,
    pub logging: LoggingSettings,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            dashboard: DashboardSettings::default(),
            schedule: ScheduleSettings::default(),
            layout: LayoutSettings::default(),
            services: DEFAULT_SERVICES.iter().map(|s| s.to_string()).collect(),
            logging: LoggingSettings::default(),
        }
    }
}

impl ConfigFile {
    /// Load from the default location, falling back to defaults when absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from a specific file, falling back to defaults when absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    /// Parse from INI text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<string>"),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(v) = ini.get_from(Some("dashboard"), "status_url") {
            config.dashboard.status_url = v.to_string();
        }
        if let Some(v) = ini.get_from(Some("dashboard"), "export_dir") {
            config.dashboard.export_dir = PathBuf::from(v);
        }
        if let Some(v) = ini.get_from(Some("dashboard"), "seed") {
            config.dashboard.seed = Some(parse_value("dashboard.seed", v)?);
        }

        let s = &mut config.schedule;
        read_into(ini, "schedule", "metrics_interval_ms", &mut s.metrics_interval_ms)?;
        read_into(ini, "schedule", "realtime_interval_ms", &mut s.realtime_interval_ms)?;
        read_into(ini, "schedule", "degradation_delay_ms", &mut s.degradation_delay_ms)?;
        read_into(ini, "schedule", "degradation_interval_ms", &mut s.degradation_interval_ms)?;
        read_into(ini, "schedule", "status_initial_delay_ms", &mut s.status_initial_delay_ms)?;
        read_into(ini, "schedule", "status_interval_ms", &mut s.status_interval_ms)?;
        read_into(ini, "schedule", "activity_chance", &mut s.activity_chance)?;
        read_into(ini, "schedule", "degradation_chance", &mut s.degradation_chance)?;

        let l = &mut config.layout;
        read_bool(ini, "metrics", &mut l.metrics)?;
        read_bool(ini, "chart", &mut l.chart)?;
        read_bool(ini, "activity", &mut l.activity)?;
        read_bool(ini, "services", &mut l.services)?;
        read_bool(ini, "status", &mut l.status)?;

        if let Some(v) = ini.get_from(Some("services"), "names") {
            config.services = v
                .split(',')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(v) = ini.get_from(Some("logging"), "directory") {
            config.logging.directory = PathBuf::from(v);
        }
        if let Some(v) = ini.get_from(Some("logging"), "level") {
            config.logging.level = v.to_string();
        }

        Ok(config)
    }

    /// Render as INI.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();

        {
            let mut section = ini.with_section(Some("dashboard"));
            section
                .set("status_url", self.dashboard.status_url.as_str())
                .set("export_dir", self.dashboard.export_dir.to_string_lossy());
            if let Some(seed) = self.dashboard.seed {
                section.set("seed", seed.to_string());
            }
        }

        let s = &self.schedule;
        ini.with_section(Some("schedule"))
            .set("metrics_interval_ms", s.metrics_interval_ms.to_string())
            .set("realtime_interval_ms", s.realtime_interval_ms.to_string())
            .set("degradation_delay_ms", s.degradation_delay_ms.to_string())
            .set("degradation_interval_ms", s.degradation_interval_ms.to_string())
            .set("status_initial_delay_ms", s.status_initial_delay_ms.to_string())
            .set("status_interval_ms", s.status_interval_ms.to_string())
            .set("activity_chance", s.activity_chance.to_string())
            .set("degradation_chance", s.degradation_chance.to_string());

        let l = &self.layout;
        ini.with_section(Some("layout"))
            .set("metrics", l.metrics.to_string())
            .set("chart", l.chart.to_string())
            .set("activity", l.activity.to_string())
            .set("services", l.services.to_string())
            .set("status", l.status.to_string());

        ini.with_section(Some("services"))
            .set("names", self.services.join(", "));

        ini.with_section(Some("logging"))
            .set("directory", self.logging.directory.to_string_lossy())
            .set("level", self.logging.level.as_str());

        ini
    }

    /// Write to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Write to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.to_ini().write_to_file(path)?;
        Ok(())
    }
}

/// Application directory (`~/.pulseboard`).
pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Default configuration file path.
pub fn config_file_path() -> PathBuf {
    app_dir().join(CONFIG_FILE_NAME)
}

/// Default export directory: the user's downloads folder when known.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn read_into<T: FromStr>(
    ini: &Ini,
    section: &str,
    key: &str,
    target: &mut T,
) -> Result<(), ConfigError> {
    if let Some(v) = ini.get_from(Some(section), key) {
        *target = parse_value(&format!("{}.{}", section, key), v)?;
    }
    Ok(())
}

fn read_bool(ini: &Ini, key: &str, target: &mut bool) -> Result<(), ConfigError> {
    if let Some(v) = ini.get_from(Some("layout"), key) {
        *target = match v.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => true,
            "false" | "no" | "off" | "0" => false,
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: format!("layout.{}", key),
                    value: v.to_string(),
                })
            }
        };
    }
    Ok(())
}
