use crate::middleware::MiddlewareError;
use crate::settings::SettingsError;
use std::fmt;

#[derive(Debug)]
pub enum Error {
    ConfigError(String),
    IoError(std::io::Error),
    SettingsError(SettingsError),
    MiddlewareError(MiddlewareError),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<SettingsError> for Error {
    fn from(err: SettingsError) -> Self {
        Error::SettingsError(err)
    }
}

impl From<MiddlewareError> for Error {
    fn from(err: MiddlewareError) -> Self {
        Error::MiddlewareError(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConfigError(msg) => write!(f, "Config Error: {}", msg),
            Error::IoError(e) => write!(f, "IO Error: {}", e),
            Error::SettingsError(e) => write!(f, "Settings Error: {}", e),
            Error::MiddlewareError(e) => write!(f, "Middleware Error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(e) => Some(e),
            Error::SettingsError(e) => Some(e),
            Error::MiddlewareError(e) => Some(e),
            Error::ConfigError(_) => None,
        }
    }
}
