use std::env;
use super::SettingsError;

pub const CACHE_CONTROL: &str = "CACHE_CONTROL";
pub const ENVIRONMENT: &str = "ENVIRONMENT";
pub const NODE_ENV: &str = "NODE_ENV";
pub const HOST: &str = "HOST";
pub const DEFAULT_MAX_LISTENERS: &str = "DEFAULT_MAX_LISTENERS";
pub const PORT: &str = "PORT";
pub const SURROGATE_CACHE_CONTROL: &str = "SURROGATE_CACHE_CONTROL";
pub const TLS: &str = "TLS";

/// 설정 해석에 사용되는 모든 환경 변수
pub const RESOLVER_VARS: [&str; 8] = [
    CACHE_CONTROL,
    ENVIRONMENT,
    NODE_ENV,
    HOST,
    DEFAULT_MAX_LISTENERS,
    PORT,
    SURROGATE_CACHE_CONTROL,
    TLS,
];

/// 프로세스 환경 변수 조회. 유니코드가 아닌 값은 없는 것으로 취급합니다.
pub fn process_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

pub fn parse_env_var<T: std::str::FromStr, F: FnOnce() -> T>(name: &str, default: F) -> Result<T, SettingsError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val.parse().map_err(|e: T::Err| SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: val,
            reason: e.to_string(),
        }),
        Err(env::VarError::NotPresent) => Ok(default()),
        Err(e) => Err(SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: "".to_string(),
            reason: e.to_string(),
        }),
    }
}
