//! 서비스 설정
//!
//! # Data Flow
//! ```text
//! 기본값 / 환경 변수 / 호출자 옵션 / Identity
//!     → resolver.rs (필드별 우선순위 테이블)
//!     → validator.rs (JSON 스키마 검증)
//!     → Settings (불변, Arc로 공유)
//!     → cache_headers() / connection_options()
//! ```

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error, info};

use crate::middleware::context::{has_headers, insert_header, ResponseContext};

mod connection;
pub mod env;
mod error;
mod identity;
pub mod logging;
mod options;
pub mod resolver;
mod schema;
mod validator;

pub use connection::{relative_path, CacheHeaders, ConnectionOptions, RouteOptions};
pub use error::{FieldError, SettingsError};
pub use identity::Identity;
pub use logging::LogSettings;
pub use options::{CustomHeader, ServiceOptions};
pub use schema::SETTINGS_SCHEMA;
pub use validator::SettingsValidator;

pub type Result<T> = std::result::Result<T, SettingsError>;

pub const SURROGATE_CONTROL: &str = "Surrogate-Control";
pub const CACHE_CONTROL: &str = "Cache-Control";

/// `metrics` 옵션. provider 자체는 외부 구성 요소입니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsOptions {
    #[serde(default)]
    pub provider: Option<Value>,
    #[serde(default)]
    pub options: Option<Value>,
}

/// 검증이 끝난 서비스 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub base_path: PathBuf,
    pub cache_control_header: String,
    #[serde(default)]
    pub custom_headers: Vec<CustomHeader>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub environment: String,
    #[serde(default)]
    pub health_checks: Vec<Value>,
    pub host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loader_io_validation_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layouts_dir: Option<String>,
    #[serde(default = "default_max_listeners")]
    pub max_listeners: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsOptions>,
    #[serde(default)]
    pub name: String,
    pub port: u16,
    #[serde(default)]
    pub services: Option<Vec<Value>>,
    pub surrogate_cache_control: String,
    #[serde(default)]
    pub tls: Option<Value>,
    pub version: String,
    #[serde(default)]
    pub with_good_console: bool,
    #[serde(default)]
    pub with_swagger: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routes: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<Value>,
}

fn default_max_listeners() -> u32 {
    resolver::DEFAULT_MAX_LISTENERS
}

impl Settings {
    /// 프로세스 환경 변수를 읽어 설정을 만듭니다.
    pub fn from_env<P: AsRef<Path>>(
        identity: &Identity,
        options: &ServiceOptions,
        base_path: P,
    ) -> Result<Self> {
        Self::resolve(identity, options, base_path, env::process_env)
    }

    /// 주어진 환경 변수 조회 함수로 설정을 만듭니다.
    ///
    /// 검증에 실패하면 일부만 만들어진 설정 없이 오류를 돌려줍니다.
    pub fn resolve<P, F>(
        identity: &Identity,
        options: &ServiceOptions,
        base_path: P,
        lookup: F,
    ) -> Result<Self>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let base_path = base_path.as_ref().to_string_lossy();
        let ctx = resolver::ResolveContext {
            identity,
            options,
            base_path: &base_path,
            lookup,
        };

        let merged = Value::Object(resolver::merge(&ctx));
        debug!(settings = %merged, "설정 병합 완료");

        SettingsValidator::new()?
            .validate(&merged)
            .map_err(|errors| {
                for e in &errors {
                    error!(field = %e.field, reason = %e.reason, "설정 검증 실패");
                }
                SettingsError::from(errors)
            })?;

        let settings = Settings::deserialize(&merged).map_err(|e| {
            let field = resolver::failed_field(&merged, &e.to_string());
            error!(field = %field, error = %e, "설정 변환 실패");
            SettingsError::Validation {
                errors: vec![FieldError {
                    field,
                    reason: e.to_string(),
                }],
            }
        })?;

        info!(
            name = %settings.name,
            version = %settings.version,
            environment = %settings.environment,
            host = %settings.host,
            port = settings.port,
            "서비스 설정 완료"
        );
        Ok(settings)
    }

    pub fn cache_headers(&self) -> CacheHeaders {
        CacheHeaders {
            cache_control_header: self.cache_control_header.clone(),
            surrogate_cache_control: self.surrogate_cache_control.clone(),
        }
    }

    /// 정적 파일 기준 경로. 레이아웃 디렉터리가 없으면 base path 그대로입니다.
    pub fn relative_path(&self) -> PathBuf {
        relative_path(&self.base_path, self.layouts_dir.as_deref())
    }

    pub fn connection_options(&self) -> ConnectionOptions {
        let labels = if self.environment.is_empty() {
            "dev".to_string()
        } else {
            self.environment.clone()
        };

        ConnectionOptions {
            host: self.host.clone(),
            labels,
            port: self.port,
            tls: self.tls.clone().filter(resolver::is_truthy),
            routes: connection::build_routes(
                &self.relative_path(),
                self.routes.as_ref(),
                self.connections.as_ref(),
            ),
        }
    }

    /// 응답에 `Surrogate-Control`과 `Cache-Control`을 설정합니다.
    ///
    /// 값이 비어 있거나 헤더 값으로 쓸 수 없으면 해당 헤더는 건너뜁니다.
    pub fn set_cache_control_headers(&self, ctx: &mut dyn ResponseContext, headers: &CacheHeaders) {
        if has_headers(&*ctx).is_none() {
            return;
        }

        if let Some(response_headers) = ctx.headers_mut() {
            if !headers.surrogate_cache_control.is_empty() {
                insert_header(response_headers, SURROGATE_CONTROL, &headers.surrogate_cache_control);
            }
            if !headers.cache_control_header.is_empty() {
                insert_header(response_headers, CACHE_CONTROL, &headers.cache_control_header);
            }
        }
    }

    /// 이름과 값이 모두 있는 사용자 정의 헤더를 응답에 설정합니다. 같은 이름의 기존 값은 바뀝니다.
    pub fn set_custom_headers(&self, ctx: &mut dyn ResponseContext, custom_headers: &[CustomHeader]) {
        if has_headers(&*ctx).is_none() {
            return;
        }

        if let Some(response_headers) = ctx.headers_mut() {
            for (name, value) in custom_headers.iter().filter_map(CustomHeader::pair) {
                insert_header(response_headers, name, value);
            }
        }
    }
}
