//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Planet tessellation settings.
    pub tessellation: TessellationConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Planet tessellation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TessellationConfig {
    /// Planet radius in meters.
    pub radius_m: f64,
    /// Target edge length of a global cell in meters.
    pub global_cell_m: f64,
    /// Target edge length of a continental cell in meters.
    pub continental_cell_m: f64,
    /// Target edge length of a local cell in meters.
    pub local_cell_m: f64,
    /// Explicit global/continental/local orders. Overrides the cell targets.
    pub orders: Option<[u32; 3]>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Number of global regions sampled for continental/local reports.
    pub report_samples: u32,
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self {
            radius_m: 1_000_000.0,
            global_cell_m: 100_000.0,
            continental_cell_m: 1_800.0,
            local_cell_m: 150.0,
            orders: None,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            report_samples: 3,
        }
    }
}

impl TessellationConfig {
    /// Check that lengths are positive and explicit orders are non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lengths = [
            ("tessellation.radius_m", self.radius_m),
            ("tessellation.global_cell_m", self.global_cell_m),
            ("tessellation.continental_cell_m", self.continental_cell_m),
            ("tessellation.local_cell_m", self.local_cell_m),
        ];
        for (field, value) in lengths {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("expected a positive length, got {value}"),
                });
            }
        }
        if let Some(orders) = self.orders
            && orders.contains(&0)
        {
            return Err(ConfigError::InvalidValue {
                field: "tessellation.orders",
                reason: format!("orders must be at least 1, got {orders:?}"),
            });
        }
        Ok(())
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read the file: returns `Some(new_config)` if it changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
