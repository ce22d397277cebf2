//! Origin Headers는 HTTP 오리진 서버를 위한 설정 해석과 캐시 헤더 응답 훅을 제공합니다.
//!
//! # 주요 기능
//!
//! - 기본값 / 환경 변수 / 호출자 옵션 / Identity 우선순위에 따른 설정 해석
//! - JSON 스키마 기반 설정 검증
//! - `Cache-Control`, `Surrogate-Control`, 사용자 정의 헤더를 붙이는 응답 훅
//!
//! # 예제
//!
//! ```
//! use origin_headers::settings::{Identity, ServiceOptions, Settings};
//!
//! let identity = Identity::new("A Test Harness", "testHarness", "0.1.0");
//! let options = ServiceOptions::new()
//!     .port(8080)
//!     .custom_header("Connection", "close");
//!
//! // 환경 변수 PORT가 설정되어 있으면 옵션보다 우선합니다.
//! let settings = Settings::resolve(&identity, &options, "/srv/app", |name: &str| {
//!     (name == "PORT").then(|| "9090".to_string())
//! })
//! .unwrap();
//!
//! assert_eq!(settings.port, 9090);
//! assert_eq!(settings.connection_options().labels, "dev");
//! ```
//!
//! # 응답 훅
//!
//! ```
//! use hyper::Response;
//! use origin_headers::middleware::{ResponseHeaderHook, ResponseHeaderOptions};
//! use origin_headers::settings::CustomHeader;
//!
//! let hook = ResponseHeaderHook::new(
//!     ResponseHeaderOptions::new("max-age=60", "max-age=360")
//!         .with_custom_headers(vec![CustomHeader::new("Connection", "close")]),
//! );
//!
//! let mut response = Response::new(());
//! hook.on_pre_response(&mut response);
//!
//! assert_eq!(response.headers()["cache-control"], "max-age=60");
//! assert_eq!(response.headers()["surrogate-control"], "max-age=360");
//! assert_eq!(response.headers()["connection"], "close");
//! ```

pub mod logging;
pub mod middleware;
pub mod server;
pub mod settings;
pub mod tls;
