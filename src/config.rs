use std::env;

use thiserror::Error;

use crate::stats::TotalWeightMode;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid TOTAL_WEIGHT_MODE {0:?}, expected \"sum\" or \"volume\"")]
    TotalWeightMode(String),

    #[error("invalid SEED_EXERCISES {0:?}, expected \"true\" or \"false\"")]
    SeedExercises(String),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub total_weight_mode: TotalWeightMode,
    pub seed_exercises: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source. `from_env` is the
    /// process-environment case.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let total_weight_mode = match lookup("TOTAL_WEIGHT_MODE") {
            Some(raw) => TotalWeightMode::parse(&raw).ok_or(ConfigError::TotalWeightMode(raw))?,
            None => TotalWeightMode::default(),
        };

        let seed_exercises = match lookup("SEED_EXERCISES") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::SeedExercises(raw))?,
            None => true,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite:.data/fitness.db".to_string()),
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            total_weight_mode,
            seed_exercises,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
