use serde::Deserialize;
use std::env;
use std::str::FromStr;
use thiserror::Error;

use crate::engine::{MAX_ROWS, MAX_SEATS_PER_ROW};

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub cinema: CinemaConfig,
    pub features: FeatureFlags,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

// Параметры зала: один сеанс на процесс
#[derive(Debug, Clone, Deserialize)]
pub struct CinemaConfig {
    pub title: String,
    pub rows: usize,
    pub seats_per_row: usize,
}

// Feature flags для включения/выключения функциональности
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    pub enable_cors: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{key} must be between {min} and {max}, got {value}")]
    OutOfBounds {
        key: &'static str,
        min: usize,
        max: usize,
        value: usize,
    },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Собирает конфиг из произвольного источника переменных.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let config = Config {
            app: AppConfig {
                host: text("HOST", "0.0.0.0"),
                port: parse_var(&lookup, "PORT", 8000, "port number")?,
                environment: text("ENVIRONMENT", "development"),
                rust_log: text("RUST_LOG", "cinema_system=debug,tower_http=debug"),
            },
            cinema: CinemaConfig {
                title: text("CINEMA_TITLE", "Inception"),
                rows: parse_var(&lookup, "CINEMA_ROWS", 8, "number")?,
                seats_per_row: parse_var(&lookup, "CINEMA_SEATS_PER_ROW", 10, "number")?,
            },
            features: FeatureFlags {
                enable_cors: parse_var(&lookup, "ENABLE_CORS", true, "true or false")?,
            },
        };

        config.cinema.validate()?;
        Ok(config)
    }
}

impl CinemaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Empty("CINEMA_TITLE"));
        }
        check_bounds("CINEMA_ROWS", self.rows, MAX_ROWS)?;
        check_bounds("CINEMA_SEATS_PER_ROW", self.seats_per_row, MAX_SEATS_PER_ROW)
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str, default: T, expected: &'static str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            expected,
            value: raw,
        }),
    }
}

fn check_bounds(key: &'static str, value: usize, max: usize) -> Result<(), ConfigError> {
    if (1..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfBounds { key, min: 1, max, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.app.port, 8000);
        assert_eq!(config.cinema.title, "Inception");
        assert_eq!((config.cinema.rows, config.cinema.seats_per_row), (8, 10));
        assert!(config.features.enable_cors);
    }

    #[test]
    fn reads_cinema_settings() {
        let config = Config::from_lookup(lookup(&[
            ("CINEMA_TITLE", "The Dark Knight"),
            ("CINEMA_ROWS", "26"),
            ("CINEMA_SEATS_PER_ROW", " 50 "),
            ("ENABLE_CORS", "false"),
        ]))
        .unwrap();
        assert_eq!(config.cinema.title, "The Dark Knight");
        assert_eq!(config.cinema.rows, 26);
        assert_eq!(config.cinema.seats_per_row, 50);
        assert!(!config.features.enable_cors);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("PORT", "http")])),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
        assert_eq!(
            Config::from_lookup(lookup(&[("CINEMA_ROWS", "27")])).unwrap_err(),
            ConfigError::OutOfBounds { key: "CINEMA_ROWS", min: 1, max: 26, value: 27 }
        );
        assert!(matches!(
            Config::from_lookup(lookup(&[("CINEMA_SEATS_PER_ROW", "0")])),
            Err(ConfigError::OutOfBounds { key: "CINEMA_SEATS_PER_ROW", .. })
        ));
        assert_eq!(
            Config::from_lookup(lookup(&[("CINEMA_TITLE", "  ")])).unwrap_err(),
            ConfigError::Empty("CINEMA_TITLE")
        );
    }
}
