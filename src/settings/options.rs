use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;

use super::{Result, SettingsError};

/// 응답에 추가할 사용자 정의 헤더
///
/// `name`이나 `value`가 비어 있는 항목은 적용 시 건너뜁니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomHeader {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl CustomHeader {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
        }
    }

    /// 이름과 값이 모두 있을 때만 `(name, value)`를 돌려줍니다.
    pub fn pair(&self) -> Option<(&str, &str)> {
        match (self.name.as_deref(), self.value.as_deref()) {
            (Some(name), Some(value)) if !name.is_empty() && !value.is_empty() => Some((name, value)),
            _ => None,
        }
    }
}

/// 호출자가 넘기는 서비스 옵션
///
/// 타입 검사는 병합 후 스키마 검증 단계에서 이루어지므로 값은 JSON 그대로 보관합니다.
/// 덕분에 `port = "not-a-number"` 같은 입력도 어떤 필드가 잘못됐는지 알려줄 수 있습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceOptions(Map<String, Value>);

impl ServiceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).map_err(|e| SettingsError::ParseError {
            format: "JSON",
            reason: e.to_string(),
        })?;
        Self::from_value(value)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let value: Value = toml::from_str(content).map_err(|e| SettingsError::ParseError {
            format: "TOML",
            reason: e.to_string(),
        })?;
        Self::from_value(value)
    }

    /// 확장자(`.json` / `.toml`)에 따라 옵션 파일을 읽습니다.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| SettingsError::FileError {
            path: path.to_string_lossy().to_string(),
            error: e,
        })?;

        debug!(path = %path.display(), "옵션 파일 로드");
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&content),
            _ => Self::from_json(&content),
        }
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(SettingsError::ParseError {
                format: "JSON",
                reason: format!("옵션은 객체여야 합니다: {}", other),
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// 임의의 키를 설정합니다. 잘못된 타입도 그대로 받아 검증 단계에서 걸러냅니다.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn base_path(self, base_path: impl Into<String>) -> Self {
        self.set("basePath", base_path.into())
    }

    pub fn cache_control_header(self, value: impl Into<String>) -> Self {
        self.set("cacheControlHeader", value.into())
    }

    pub fn surrogate_cache_control(self, value: impl Into<String>) -> Self {
        self.set("surrogateCacheControl", value.into())
    }

    pub fn custom_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let entry = json!({ "name": name.into(), "value": value.into() });
        match self.0.get_mut("customHeaders") {
            Some(Value::Array(headers)) => headers.push(entry),
            _ => {
                self.0.insert("customHeaders".to_string(), Value::Array(vec![entry]));
            }
        }
        self
    }

    pub fn custom_headers(self, headers: Vec<CustomHeader>) -> Self {
        let headers = headers
            .into_iter()
            .map(|h| {
                let mut entry = Map::new();
                if let Some(name) = h.name {
                    entry.insert("name".to_string(), Value::String(name));
                }
                if let Some(value) = h.value {
                    entry.insert("value".to_string(), Value::String(value));
                }
                Value::Object(entry)
            })
            .collect::<Vec<_>>();
        self.set("customHeaders", headers)
    }

    pub fn description(self, value: impl Into<String>) -> Self {
        self.set("description", value.into())
    }

    pub fn environment(self, value: impl Into<String>) -> Self {
        self.set("environment", value.into())
    }

    pub fn health_checks(self, checks: Vec<Value>) -> Self {
        self.set("healthChecks", checks)
    }

    pub fn host(self, value: impl Into<String>) -> Self {
        self.set("host", value.into())
    }

    pub fn layouts_dir(self, value: impl Into<String>) -> Self {
        self.set("layoutsDir", value.into())
    }

    pub fn loader_io_validation_key(self, value: impl Into<String>) -> Self {
        self.set("loaderIoValidationKey", value.into())
    }

    pub fn max_listeners(self, value: u32) -> Self {
        self.set("maxListeners", value)
    }

    pub fn metrics(self, provider: Value, options: Value) -> Self {
        self.set("metrics", json!({ "provider": provider, "options": options }))
    }

    pub fn name(self, value: impl Into<String>) -> Self {
        self.set("name", value.into())
    }

    pub fn port(self, port: u16) -> Self {
        self.set("port", port)
    }

    pub fn services(self, services: Vec<Value>) -> Self {
        self.set("services", services)
    }

    pub fn tls(self, tls: Value) -> Self {
        self.set("tls", tls)
    }

    pub fn version(self, value: impl Into<String>) -> Self {
        self.set("version", value.into())
    }

    pub fn with_good_console(self, enabled: bool) -> Self {
        self.set("withGoodConsole", enabled)
    }

    pub fn with_swagger(self, enabled: bool) -> Self {
        self.set("withSwagger", enabled)
    }
}
