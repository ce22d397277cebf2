//! 캐시 헤더 응답 훅
//!
//! 모든 응답에 `Cache-Control`, `Surrogate-Control`과 사용자 정의 헤더를 붙입니다.

mod config;
mod middleware;

pub use config::ResponseHeaderOptions;
pub use middleware::ResponseHeaderHook;
