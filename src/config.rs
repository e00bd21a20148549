use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::clock::ClockResolution;
use crate::validator::LastModifiedComparison;

pub const ENV_PREFIX: &str = "CACHE_DEMO_";
pub const CONFIG_PATH_ENV: &str = "CACHE_DEMO_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Serialize, Debug, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_age: u32,
    pub clock_resolution: ClockResolution,
    pub last_modified_comparison: LastModifiedComparison,
    pub payload_min_length: usize,
    pub payload_max_length: usize,
    pub public_dir: PathBuf,
    pub max_asset_delay_ms: u64,
    pub log_config: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: String::from("0.0.0.0"),
            port: 3000,
            max_age: 30,
            clock_resolution: ClockResolution::Seconds,
            last_modified_comparison: LastModifiedComparison::Lexical,
            payload_min_length: 100,
            payload_max_length: 200,
            public_dir: PathBuf::from("public"),
            max_asset_delay_ms: 10_000,
            log_config: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Extraction(figment::Error),
    InvalidPayloadLength(usize, usize),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Extraction(e) => write!(f, "Failed to load configuration: {}", e),
            ConfigError::InvalidPayloadLength(min, max) => write!(
                f,
                "PayloadMinLength ({}) must not exceed PayloadMaxLength ({}), which must be positive",
                min, max
            ),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Extraction(e)
    }
}

/// `max_age` -> `MaxAge`, so environment keys line up with the YAML keys.
fn pascal_case(key: &str) -> String {
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
                None => String::new(),
            }
        })
        .collect()
}

impl Config {
    /// Defaults, then the YAML file, then `CACHE_DEMO_*` variables.
    pub fn figment() -> Figment {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| String::from(DEFAULT_CONFIG_PATH));
        Config::figment_from(path)
    }

    pub fn figment_from<P: Into<PathBuf>>(path: P) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.into()))
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .ignore(&["config"])
                    .map(|key| pascal_case(key.as_str()).into()),
            )
    }

    pub fn load() -> Result<Config, ConfigError> {
        Config::extract(Config::figment())
    }

    pub fn extract(figment: Figment) -> Result<Config, ConfigError> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.payload_max_length == 0 || self.payload_min_length > self.payload_max_length {
            return Err(ConfigError::InvalidPayloadLength(
                self.payload_min_length,
                self.payload_max_length,
            ));
        }
        Ok(())
    }
}
