use crate::middleware::context::{insert_header, ResponseContext};
use crate::middleware::{Middleware, MiddlewareError, Reply};
use crate::settings::{CACHE_CONTROL, SURROGATE_CONTROL};
use super::config::ResponseHeaderOptions;
use async_trait::async_trait;
use tracing::trace;

/// 응답 직전에 캐시 헤더를 설정하는 훅
///
/// 실패하지 않습니다. 잘못된 사용자 정의 헤더는 건너뛰고 응답 처리는 항상 계속됩니다.
#[derive(Debug, Clone)]
pub struct ResponseHeaderHook {
    options: ResponseHeaderOptions,
}

impl ResponseHeaderHook {
    pub const NAME: &'static str = "cnn-hapi-onPreResponse";

    pub fn new(options: ResponseHeaderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ResponseHeaderOptions {
        &self.options
    }

    fn is_protected(name: &str) -> bool {
        name.eq_ignore_ascii_case(CACHE_CONTROL) || name.eq_ignore_ascii_case(SURROGATE_CONTROL)
    }

    /// 응답 하나에 헤더를 적용합니다.
    pub fn on_pre_response(&self, ctx: &mut dyn ResponseContext) {
        let options = &self.options;

        if (options.should_set_default_cache_control)((options.has_headers)(&*ctx)) {
            if let Some(headers) = ctx.headers_mut() {
                insert_header(headers, CACHE_CONTROL, &options.cache_control_header);
            }
        }

        if (options.has_headers)(&*ctx).is_none() {
            trace!("헤더가 없는 응답, 건너뜀");
            return;
        }

        if let Some(headers) = ctx.headers_mut() {
            insert_header(headers, SURROGATE_CONTROL, &options.surrogate_cache_control);

            for header in &options.custom_headers {
                let (Some(name), Some(value)) = (header.name.as_deref(), header.value.as_deref()) else {
                    continue;
                };
                if Self::is_protected(name) {
                    trace!(header = %name, "보호된 헤더는 사용자 정의 값으로 바꾸지 않음");
                    continue;
                }
                insert_header(headers, name, value);
            }
        }
    }
}

#[async_trait]
impl Middleware for ResponseHeaderHook {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn handle_response(&self, mut reply: Reply) -> Result<Reply, MiddlewareError> {
        self.on_pre_response(&mut reply);
        Ok(reply)
    }
}
