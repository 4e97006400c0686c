use anyhow::{ensure, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::countdown::phase::{DEFAULT_SEHAR_FALLBACK_HOURS, DEFAULT_TOMORROW_FALLBACK_HOURS};
use crate::countdown::{Fallbacks, TickerOptions};
use crate::models::{City, Lang};

fn default_city() -> String {
    "Dhaka".to_string()
}
fn default_country() -> String {
    "Bangladesh".to_string()
}
fn default_base_url() -> String {
    "https://api.aladhan.com/v1".to_string()
}
fn default_method() -> u8 {
    1 // University of Islamic Sciences, Karachi
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_sehar_fallback_hours() -> i64 {
    DEFAULT_SEHAR_FALLBACK_HOURS
}
fn default_tomorrow_fallback_hours() -> i64 {
    DEFAULT_TOMORROW_FALLBACK_HOURS
}
/// Longest fallback window accepted from the config file.
pub const MAX_FALLBACK_HOURS: i64 = 24;

fn default_tick_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_city")]
    pub city: String,
    #[serde(default = "default_country")]
    pub country: String,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
            country: default_country(),
        }
    }
}

impl LocationConfig {
    /// Unknown names in a hand-edited config fall back to Dhaka.
    pub fn city(&self) -> City {
        City::find_or_default(&self.city)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub lang: Lang,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// AlAdhan calculation method id.
    #[serde(default = "default_method")]
    pub method: u8,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            method: default_method(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownConfig {
    /// Assumed gap between the previous Iftar and Sehar on the first day of a month.
    #[serde(default = "default_sehar_fallback_hours")]
    pub sehar_fallback_hours: i64,
    /// Assumed wait for the next Sehar after Iftar on the last day of a month.
    #[serde(default = "default_tomorrow_fallback_hours")]
    pub tomorrow_fallback_hours: i64,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            sehar_fallback_hours: default_sehar_fallback_hours(),
            tomorrow_fallback_hours: default_tomorrow_fallback_hours(),
            tick_ms: default_tick_ms(),
        }
    }
}

impl CountdownConfig {
    /// Fallback windows must be a positive number of hours, at most a day.
    pub fn validate(&self) -> Result<()> {
        for (name, hours) in [
            ("sehar_fallback_hours", self.sehar_fallback_hours),
            ("tomorrow_fallback_hours", self.tomorrow_fallback_hours),
        ] {
            ensure!(
                (1..=MAX_FALLBACK_HOURS).contains(&hours),
                "[countdown] {} must be between 1 and {}, got {}",
                name,
                MAX_FALLBACK_HOURS,
                hours
            );
        }
        Ok(())
    }

    pub fn ticker_options(&self, lang: Lang) -> TickerOptions {
        TickerOptions {
            period: Duration::from_millis(self.tick_ms.max(1)),
            fallbacks: Fallbacks::from_hours(
                self.sehar_fallback_hours,
                self.tomorrow_fallback_hours,
            ),
            lang,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub countdown: CountdownConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "roza")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("roza.db"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        config
            .countdown
            .validate()
            .with_context(|| format!("Invalid config {:?}", path))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    pub fn ticker_options(&self) -> TickerOptions {
        self.countdown.ticker_options(self.display.lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.location.city, "Dhaka");
        assert_eq!(config.display.lang, Lang::Bn);
        assert_eq!(config.api.method, 1);
        assert_eq!(config.countdown.sehar_fallback_hours, 11);
        assert_eq!(config.countdown.tomorrow_fallback_hours, 10);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\nlang = \"en\"\n[countdown]\ntick_ms = 250\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.display.lang, Lang::En);
        assert_eq!(config.countdown.tick_ms, 250);
        assert_eq!(config.countdown.tomorrow_fallback_hours, 10);
        assert_eq!(config.api.base_url, "https://api.aladhan.com/v1");
    }

    #[test]
    fn saves_and_reloads_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.location.city = "Sylhet".to_string();
        config.display.lang = Lang::En;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.location.city().name, "Sylhet");
        assert_eq!(loaded.display.lang, Lang::En);
    }

    #[test]
    fn out_of_range_fallback_hours_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        for body in [
            "[countdown]\nsehar_fallback_hours = 9000000000000000\n",
            "[countdown]\ntomorrow_fallback_hours = 0\n",
            "[countdown]\nsehar_fallback_hours = -3\n",
        ] {
            std::fs::write(&path, body).unwrap();
            let err = AppConfig::load_from(&path).unwrap_err();
            assert!(format!("{:#}", err).contains("fallback_hours"), "{:#}", err);
        }

        std::fs::write(&path, "[countdown]\nsehar_fallback_hours = 24\n").unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap().countdown.sehar_fallback_hours, 24);
    }

    #[test]
    fn ticker_options_follow_config() {
        let mut config = AppConfig::default();
        config.countdown.sehar_fallback_hours = 9;
        config.countdown.tick_ms = 0;
        let opts = config.ticker_options();
        assert_eq!(opts.fallbacks.sehar_window, chrono::Duration::hours(9));
        assert_eq!(opts.period, Duration::from_millis(1));
        assert_eq!(opts.lang, Lang::Bn);
    }
}
