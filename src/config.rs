use std::env;

use crate::error::AppError;

const DEFAULT_HTTP_PORT: u16 = 3000;
const DEFAULT_MATCH_LIMIT: usize = 3;
const DEFAULT_INITIAL_RADIUS_KM: f64 = 2.0;
const DEFAULT_SCORING_TIMEOUT_MS: u64 = 1500;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub match_limit: usize,
    pub initial_radius_km: f64,
    pub scoring_timeout_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            http_port: parse_or_default("HTTP_PORT", DEFAULT_HTTP_PORT)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            match_limit: parse_or_default("MATCH_LIMIT", DEFAULT_MATCH_LIMIT)?,
            initial_radius_km: parse_or_default("INITIAL_RADIUS_KM", DEFAULT_INITIAL_RADIUS_KM)?,
            scoring_timeout_ms: parse_or_default("SCORING_TIMEOUT_MS", DEFAULT_SCORING_TIMEOUT_MS)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            log_level: "info".to_string(),
            match_limit: DEFAULT_MATCH_LIMIT,
            initial_radius_km: DEFAULT_INITIAL_RADIUS_KM,
            scoring_timeout_ms: DEFAULT_SCORING_TIMEOUT_MS,
        }
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
