use crate::middleware::context::{
    has_headers, should_set_default_cache_control, HasHeaders, ShouldSetDefaultCacheControl,
};
use std::fmt;
use crate::settings::{CustomHeader, Settings};

/// 응답 훅 설정
///
/// 헤더 값은 서버 시작 시 한 번 정해지고, 판단 함수는 응답마다 호출됩니다.
#[derive(Clone)]
pub struct ResponseHeaderOptions {
    pub cache_control_header: String,
    pub custom_headers: Vec<CustomHeader>,
    pub has_headers: HasHeaders,
    pub should_set_default_cache_control: ShouldSetDefaultCacheControl,
    pub surrogate_cache_control: String,
}

impl ResponseHeaderOptions {
    pub fn new(cache_control_header: impl Into<String>, surrogate_cache_control: impl Into<String>) -> Self {
        Self {
            cache_control_header: cache_control_header.into(),
            custom_headers: Vec::new(),
            has_headers,
            should_set_default_cache_control,
            surrogate_cache_control: surrogate_cache_control.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let cache_headers = settings.cache_headers();
        Self::new(cache_headers.cache_control_header, cache_headers.surrogate_cache_control)
            .with_custom_headers(settings.custom_headers.clone())
    }

    pub fn with_custom_headers(mut self, custom_headers: Vec<CustomHeader>) -> Self {
        self.custom_headers = custom_headers;
        self
    }

    pub fn with_has_headers(mut self, has_headers: HasHeaders) -> Self {
        self.has_headers = has_headers;
        self
    }

    pub fn with_should_set_default_cache_control(mut self, predicate: ShouldSetDefaultCacheControl) -> Self {
        self.should_set_default_cache_control = predicate;
        self
    }
}

impl fmt::Debug for ResponseHeaderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseHeaderOptions")
            .field("cache_control_header", &self.cache_control_header)
            .field("custom_headers", &self.custom_headers)
            .field("surrogate_cache_control", &self.surrogate_cache_control)
            .finish_non_exhaustive()
    }
}
