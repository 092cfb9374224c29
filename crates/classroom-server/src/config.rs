use std::collections::HashMap;
use std::time::Duration;

use classroom_hub::DEFAULT_CAPACITY;
use classroom_store::Seed;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_KEEPALIVE_SECS: u64 = 15;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    NotANumber { key: &'static str, value: String },

    #[error("{key} must be greater than zero")]
    Zero { key: &'static str },

    #[error("CLASSROOM_TIMETABLE entry {0:?} is not of the form teacher=hours")]
    TimetableEntry(String),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub seed: Seed,
    pub subscriber_capacity: usize,
    pub keep_alive: Option<Duration>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Seed::default();

        let classes = match lookup("CLASSROOM_CLASSES") {
            Some(raw) => split_list(&raw).map(str::to_string).collect(),
            None => defaults.classes,
        };

        let timetable = match lookup("CLASSROOM_TIMETABLE") {
            Some(raw) => parse_timetable(&raw)?,
            None => defaults.timetable,
        };

        let subscriber_capacity = match lookup("CLASSROOM_SUBSCRIBER_CAPACITY") {
            Some(raw) => match parse_number::<usize>("CLASSROOM_SUBSCRIBER_CAPACITY", &raw)? {
                0 => return Err(ConfigError::Zero { key: "CLASSROOM_SUBSCRIBER_CAPACITY" }),
                n => n,
            },
            None => DEFAULT_CAPACITY,
        };

        let keepalive_secs = match lookup("CLASSROOM_KEEPALIVE_SECS") {
            Some(raw) => parse_number::<u64>("CLASSROOM_KEEPALIVE_SECS", &raw)?,
            None => DEFAULT_KEEPALIVE_SECS,
        };

        let port = match lookup("CLASSROOM_PORT") {
            Some(raw) => parse_number::<u16>("CLASSROOM_PORT", &raw)?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: lookup("CLASSROOM_HOST").unwrap_or_else(|| DEFAULT_HOST.into()),
            port,
            seed: Seed { classes, timetable },
            subscriber_capacity,
            keep_alive: (keepalive_secs > 0).then(|| Duration::from_secs(keepalive_secs)),
        })
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::NotANumber {
        key,
        value: raw.to_string(),
    })
}

fn parse_timetable(raw: &str) -> Result<HashMap<String, u32>, ConfigError> {
    split_list(raw)
        .map(|entry| {
            let (teacher, hours) = entry
                .split_once('=')
                .ok_or_else(|| ConfigError::TimetableEntry(entry.to_string()))?;
            let teacher = teacher.trim();
            if teacher.is_empty() {
                return Err(ConfigError::TimetableEntry(entry.to_string()));
            }
            let hours = hours
                .trim()
                .parse()
                .map_err(|_| ConfigError::TimetableEntry(entry.to_string()))?;
            Ok((teacher.to_string(), hours))
        })
        .collect()
}
