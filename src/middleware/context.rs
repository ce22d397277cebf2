//! 응답 컨텍스트
//!
//! 서버가 소유한 응답 객체를 훅이 잠시 들여다보고 헤더를 바꿀 수 있게 해주는 추상화입니다.
//! 아직 응답으로 만들어지지 않은 오류는 헤더가 없으므로 `None`을 돌려줍니다.

use hyper::header::{HeaderName, HeaderValue, CACHE_CONTROL};
use hyper::{HeaderMap, Response};
use tracing::debug;

pub trait ResponseContext {
    /// 실제 HTTP 응답이면 헤더 맵을 돌려줍니다.
    fn headers(&self) -> Option<&HeaderMap>;

    fn headers_mut(&mut self) -> Option<&mut HeaderMap>;
}

impl<B> ResponseContext for Response<B> {
    fn headers(&self) -> Option<&HeaderMap> {
        Some(Response::headers(self))
    }

    fn headers_mut(&mut self) -> Option<&mut HeaderMap> {
        Some(Response::headers_mut(self))
    }
}

impl<B, E> ResponseContext for Result<Response<B>, E> {
    fn headers(&self) -> Option<&HeaderMap> {
        self.as_ref().ok().map(Response::headers)
    }

    fn headers_mut(&mut self) -> Option<&mut HeaderMap> {
        self.as_mut().ok().map(Response::headers_mut)
    }
}

/// 응답이 헤더를 가졌는지 판단하는 함수
pub type HasHeaders = for<'a> fn(&'a dyn ResponseContext) -> Option<&'a HeaderMap>;

/// 기본 `Cache-Control`을 넣어야 하는지 판단하는 함수. `HasHeaders`의 결과를 받습니다.
pub type ShouldSetDefaultCacheControl = fn(Option<&HeaderMap>) -> bool;

pub fn has_headers(ctx: &dyn ResponseContext) -> Option<&HeaderMap> {
    ctx.headers()
}

/// 핸들러가 이미 `Cache-Control`을 정했다면 덮어쓰지 않습니다.
pub fn should_set_default_cache_control(headers: Option<&HeaderMap>) -> bool {
    headers.map_or(false, |headers| !headers.contains_key(CACHE_CONTROL))
}

fn parse_header(name: &str, value: &str) -> Option<(HeaderName, HeaderValue)> {
    let header_name = match HeaderName::from_bytes(name.as_bytes()) {
        Ok(header_name) => header_name,
        Err(e) => {
            debug!(header = %name, error = %e, "잘못된 헤더 이름, 건너뜀");
            return None;
        }
    };
    let header_value = match HeaderValue::from_str(value) {
        Ok(header_value) => header_value,
        Err(e) => {
            debug!(header = %name, error = %e, "잘못된 헤더 값, 건너뜀");
            return None;
        }
    };
    Some((header_name, header_value))
}

/// 같은 이름의 기존 값을 모두 바꿉니다. 적용했으면 `true`.
pub fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) -> bool {
    match parse_header(name, value) {
        Some((name, value)) => {
            headers.insert(name, value);
            true
        }
        None => false,
    }
}
