use blockday_core::error::CoreError;
use blockday_core::layout::{GridConfig, DEFAULT_END_HOUR, DEFAULT_ORIGIN_HOUR, DEFAULT_PIXELS_PER_HOUR};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

const DEFAULT_DATABASE_PATH: &str = "blockday.db";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database_path: String,
    pub grid: GridSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            grid: GridSettings::default(),
        }
    }
}

/// Time-grid geometry used by the day view
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GridSettings {
    /// First hour shown on the grid
    pub origin_hour: u8,
    /// Hour the grid ends at (exclusive)
    pub end_hour: u8,
    pub pixels_per_hour: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            origin_hour: DEFAULT_ORIGIN_HOUR,
            end_hour: DEFAULT_END_HOUR,
            pixels_per_hour: DEFAULT_PIXELS_PER_HOUR,
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    /// `config.toml` in the working directory, overridden by `BLOCKDAY_*`
    /// variables. Nested keys use a double underscore: `BLOCKDAY_GRID__ORIGIN_HOUR`.
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("BLOCKDAY_").split("__"))
    }

    pub fn grid(&self) -> Result<GridConfig, CoreError> {
        GridConfig::new(self.grid.origin_hour, self.grid.end_hour, self.grid.pixels_per_hour)
    }
}
