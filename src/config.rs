use std::path::PathBuf;

use crate::error::config::ConfigError;

pub struct Config {
    pub database_url: String,
    pub data_dir: PathBuf,
    pub places_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = require("DATABASE_URL")?;
        let data_dir = PathBuf::from(
            std::env::var("IMPORT_DATA_DIR").unwrap_or_else(|_| "data".to_string()),
        );
        let places_dir = match std::env::var("IMPORT_PLACES_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => data_dir.join("places"),
        };

        Ok(Self {
            database_url,
            data_dir,
            places_dir,
        })
    }
}

fn require(name: &str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) => Ok(value),
        Err(std::env::VarError::NotPresent) => Err(ConfigError::MissingEnvVar(name.to_string())),
        Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidEnvValue {
            var: name.to_string(),
            reason: "not valid unicode".to_string(),
        }),
    }
}
