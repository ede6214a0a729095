use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::occupancy::SimulationConfig;
use crate::core::poisson::SeriesParams;
use crate::core::sweep::SweepConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartConfig {
    #[serde(default = "ChartConfig::default_path")]
    pub path: String,
    #[serde(default = "ChartConfig::default_width")]
    pub width: u32,
    #[serde(default = "ChartConfig::default_height")]
    pub height: u32,
    /// Draw the Poisson insert-probe curve next to miss and hit.
    #[serde(default = "ChartConfig::default_show_insert")]
    pub show_insert: bool,
}

impl ChartConfig {
    fn default_path() -> String {
        "hash_map.png".to_string()
    }
    fn default_width() -> u32 {
        1280
    }
    fn default_height() -> u32 {
        480
    }
    fn default_show_insert() -> bool {
        false
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            width: Self::default_width(),
            height: Self::default_height(),
            show_insert: Self::default_show_insert(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    #[serde(default = "ReportConfig::default_print_sequences")]
    pub print_sequences: bool,
    #[serde(default)]
    pub csv_path: Option<String>,
    #[serde(default)]
    pub json_path: Option<String>,
    /// Append textbook open-addressing and chaining columns to the CSV.
    #[serde(default = "ReportConfig::default_classic_columns")]
    pub classic_columns: bool,
}

impl ReportConfig {
    fn default_print_sequences() -> bool {
        true
    }
    fn default_classic_columns() -> bool {
        false
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            print_sequences: Self::default_print_sequences(),
            csv_path: None,
            json_path: None,
            classic_columns: Self::default_classic_columns(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "chainprobe=debug". RUST_LOG wins.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub series: SeriesParams,
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Comment out every key so the written file documents the defaults
    /// without pinning them.
    fn commented(text: &str) -> String {
        let mut out = String::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                out.push('\n');
            } else if trimmed.starts_with('[') && trimmed.ends_with(']') && !line.contains('=') {
                out.push_str(line);
                out.push('\n');
            } else {
                out.push_str("# ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }

    /// Read the config at `path`. A missing file is `Ok(None)`; nothing is
    /// created on disk.
    pub fn load(path: &str) -> Result<Option<Self>> {
        let path_obj = Path::new(path);
        if !path_obj.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path_obj)?;
        let cfg = toml::from_str(&contents)
            .map_err(|err| Error::Config(format!("failed to parse {path}: {err}")))?;
        Ok(Some(cfg))
    }

    /// Write the defaults to `path` with every key commented out. An existing
    /// file is left untouched.
    pub fn write_default(path: &str) -> Result<()> {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            return Err(Error::Config(format!("{path} already exists")));
        }
        let text = toml::to_string_pretty(&Self::default())
            .map_err(|err| Error::Config(format!("failed to serialize defaults: {err}")))?;
        fs::write(path_obj, Self::commented(&text))?;
        Ok(())
    }
}
