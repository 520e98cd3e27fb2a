//! Service configuration file support.
//!
//! Configuration is read from a TOML file (`chart.toml`) and then patched
//! with environment variables, so a deployment can run from the environment
//! alone.
//!
//! # Environment Variables
//!
//! - `CHART_CONFIG`: explicit path to the configuration file
//! - `HOST` / `PORT`: bind address
//! - `EPHEMERIS_TYPE`: `analytic` or `tabulated`
//! - `EPHE_PATH`: directory holding `ephemeris.json`
//! - `OPENCAGE_API_KEY`: API key for the OpenCage geocoder
//! - `GEOCODER_TYPE`: `opencage` or `static`

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ChartError, ChartResult};
use crate::models::{AspectTable, Body, SignLocale};
use crate::providers::adapters::PlaceEntry;
use crate::providers::HouseSystem;
use crate::services::ChartSettings;

/// Full service configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub ephemeris: EphemerisSettings,
    #[serde(default)]
    pub geocoding: GeocodingSettings,
    #[serde(default)]
    pub chart: ChartSection,
}

/// HTTP bind settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Ephemeris source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisSettings {
    /// `analytic` or `tabulated`; analytic when absent.
    #[serde(default)]
    pub provider: Option<String>,
    /// Directory containing `ephemeris.json` for the tabulated provider.
    #[serde(default = "default_ephemeris_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub house_system: HouseSystem,
}

/// Geocoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodingSettings {
    /// `opencage` or `static`; chosen from the environment when absent.
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_geocoding_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Gazetteer for the static geocoder.
    #[serde(default)]
    pub places: Vec<PlaceEntry>,
}

/// Chart presentation and aspect settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSection {
    #[serde(default)]
    pub locale: SignLocale,
    #[serde(default = "default_orb")]
    pub orb: f64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_ephemeris_path() -> PathBuf {
    PathBuf::from("./ephe")
}

fn default_geocoding_url() -> String {
    "https://api.opencagedata.com/geocode/v1/json".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_orb() -> f64 {
    crate::models::aspect::DEFAULT_ORB_DEG
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for EphemerisSettings {
    fn default() -> Self {
        Self {
            provider: None,
            path: default_ephemeris_path(),
            house_system: HouseSystem::default(),
        }
    }
}

impl Default for GeocodingSettings {
    fn default() -> Self {
        Self {
            provider: None,
            api_key: None,
            base_url: default_geocoding_url(),
            timeout_secs: default_timeout_secs(),
            places: Vec::new(),
        }
    }
}

impl Default for ChartSection {
    fn default() -> Self {
        Self {
            locale: SignLocale::default(),
            orb: default_orb(),
        }
    }
}

impl ChartConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ChartConfig)` if successful
    /// * `Err(ChartError::Configuration)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> ChartResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ChartError::configuration(format!("Failed to read config file: {}", e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> ChartResult<Self> {
        let config: ChartConfig = toml::from_str(content).map_err(|e| {
            ChartError::configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `chart.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(Some(ChartConfig))` if found and parsed successfully
    /// * `Ok(None)` if no file exists in any of the locations
    /// * `Err(ChartError)` on a read or parse error
    pub fn from_default_location() -> ChartResult<Option<Self>> {
        let search_paths = [
            PathBuf::from("chart.toml"),
            PathBuf::from("backend/chart.toml"),
            PathBuf::from("../chart.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Using configuration file {}", path.display());
                return Self::from_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// Resolve the configuration the server should run with.
    ///
    /// `CHART_CONFIG` wins over the default search; without any file the
    /// built-in defaults are used. Environment overrides are applied last.
    pub fn load() -> ChartResult<Self> {
        let mut config = match env::var("CHART_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::from_default_location()?.unwrap_or_else(|| {
                log::warn!("No chart.toml found, using built-in defaults");
                Self::default()
            }),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Patch settings from environment variables.
    pub fn apply_env_overrides(&mut self) -> ChartResult<()> {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ChartError::configuration(format!("PORT must be a valid port number, got '{}'", port)))?;
        }
        if let Ok(provider) = env::var("EPHEMERIS_TYPE") {
            self.ephemeris.provider = Some(provider);
        }
        if let Ok(path) = env::var("EPHE_PATH") {
            self.ephemeris.path = PathBuf::from(path);
        }
        if let Ok(key) = env::var("OPENCAGE_API_KEY") {
            if !key.trim().is_empty() {
                self.geocoding.api_key = Some(key);
            }
        }
        if let Ok(provider) = env::var("GEOCODER_TYPE") {
            self.geocoding.provider = Some(provider);
        }
        self.validate()
    }

    fn validate(&self) -> ChartResult<()> {
        if !(self.chart.orb.is_finite() && self.chart.orb >= 0.0) {
            return Err(ChartError::configuration(format!(
                "chart.orb must be a non-negative number, got {}",
                self.chart.orb
            )));
        }
        Ok(())
    }

    /// Immutable chart tables derived from this configuration.
    pub fn chart_settings(&self) -> ChartSettings {
        ChartSettings {
            bodies: Body::ALL.to_vec(),
            aspects: AspectTable::with_orb(self.chart.orb),
            locale: self.chart.locale,
            house_system: self.ephemeris.house_system,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ChartConfig::from_toml_str("").unwrap();
        assert_eq!(config, ChartConfig::default());
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.ephemeris.path, PathBuf::from("./ephe"));
        assert!(config.ephemeris.provider.is_none());
        assert_eq!(config.chart.locale, SignLocale::Turkish);
        assert_eq!(config.chart.orb, 5.0);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8081

[ephemeris]
provider = "tabulated"
path = "/srv/ephe"
house_system = "whole_sign"

[geocoding]
provider = "static"

[[geocoding.places]]
name = "Istanbul"
latitude = 41.0082
longitude = 28.9784
timezone = "Europe/Istanbul"

[chart]
locale = "english"
orb = 6.0
"#;
        let config = ChartConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.ephemeris.house_system, HouseSystem::WholeSign);
        assert_eq!(config.ephemeris.provider.as_deref(), Some("tabulated"));
        assert_eq!(config.geocoding.provider.as_deref(), Some("static"));
        assert_eq!(config.geocoding.places.len(), 1);
        assert_eq!(config.geocoding.places[0].timezone, "Europe/Istanbul");
        assert_eq!(config.chart.locale, SignLocale::English);

        let settings = config.chart_settings();
        assert_eq!(settings.bodies.len(), 10);
        assert!(settings.aspects.rules().iter().all(|r| r.orb == 6.0));
        assert_eq!(settings.house_system, HouseSystem::WholeSign);
    }

    #[test]
    fn test_negative_orb_rejected() {
        let err = ChartConfig::from_toml_str("[chart]\norb = -1.0\n").unwrap_err();
        assert!(matches!(err, ChartError::Configuration { .. }));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = ChartConfig::from_toml_str("[server\nport = ").unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_missing_file() {
        let err = ChartConfig::from_file("/definitely/not/here/chart.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
