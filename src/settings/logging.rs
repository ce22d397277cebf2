use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Level;
use super::{env::parse_env_var, SettingsError};

pub const LOG_FORMAT: &str = "LOG_FORMAT";
pub const LOG_LEVEL: &str = "LOG_LEVEL";
pub const LOG_OUTPUT: &str = "LOG_OUTPUT";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogOutput {
    #[default]
    Stdout,
    File(PathBuf),
}

impl FromStr for LogOutput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "stdout" => Ok(LogOutput::Stdout),
            _ => Ok(LogOutput::File(PathBuf::from(s))),
        }
    }
}

/// 로깅 설정 (`LOG_FORMAT`, `LOG_LEVEL`, `LOG_OUTPUT`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub format: LogFormat,
    pub level: Level,
    pub output: LogOutput,
}

impl LogSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Ok(Self {
            format: parse_env_var(LOG_FORMAT, LogFormat::default)?,
            level: parse_log_level(env::var(LOG_LEVEL).unwrap_or_else(|_| "info".to_string()))?,
            output: parse_env_var(LOG_OUTPUT, LogOutput::default)?,
        })
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: Level::INFO,
            output: LogOutput::default(),
        }
    }
}

fn parse_log_level(level: String) -> Result<Level, SettingsError> {
    Level::from_str(&level).map_err(|_| SettingsError::EnvVarInvalid {
        var_name: LOG_LEVEL.to_string(),
        value: level,
        reason: "유효하지 않은 로그 레벨".to_string(),
    })
}
