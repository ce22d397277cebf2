use std::convert::Infallible;
use std::sync::Arc;
use hyper::{Method, Request, Response, StatusCode};
use hyper::body::{Bytes, Incoming};
use hyper::header::CONTENT_TYPE;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use http_body_util::Full;
use tracing::{debug, error};
use uuid::Uuid;

use crate::logging::{log_request, RequestLog};
use crate::middleware::{
    error_response, HandlerError, MiddlewareChain, Reply, ResponseHeaderHook, ResponseHeaderOptions,
};
use crate::settings::Settings;
use super::Result;

pub struct RequestHandler {
    settings: Arc<Settings>,
    middleware_chain: MiddlewareChain,
}

impl RequestHandler {
    pub fn new(settings: Arc<Settings>) -> Result<Self> {
        let mut middleware_chain = MiddlewareChain::new();
        middleware_chain.add(ResponseHeaderHook::new(ResponseHeaderOptions::from_settings(&settings)))?;

        Ok(Self {
            settings,
            middleware_chain,
        })
    }

    pub async fn handle_request(
        &self,
        req: Request<Incoming>,
    ) -> std::result::Result<Response<Full<Bytes>>, Infallible> {
        let mut log = RequestLog::new(Uuid::new_v4().to_string());
        log.with_request(&req);

        // 1. 요청 미들웨어
        let reply = match self.middleware_chain.execute_request_chain(req).await {
            Ok(req) => self.route(&req),
            Err(e) => Err(HandlerError::from(e)),
        };

        // 2. 응답 미들웨어 (응답 훅)
        let reply = match self.middleware_chain.execute_response_chain(reply).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "응답 미들웨어 처리 실패");
                Err(HandlerError::from(e))
            }
        };

        let response = reply.unwrap_or_else(|e| {
            log.with_error(&e);
            error_response(&e)
        });
        debug!("최종 헤더: {:?}", response.headers());

        if self.settings.with_good_console {
            log.with_response(response.status());
            log_request(&log);
        }

        Ok(response)
    }

    /// 요청을 처리할 라우트를 고릅니다.
    pub fn route<B>(&self, req: &Request<B>) -> Reply {
        if req.method() != Method::GET && req.method() != Method::HEAD {
            return Err(HandlerError::MethodNotAllowed(req.method().clone()));
        }

        let path = req.uri().path();
        if path == "/" {
            return Ok(text_response(format!("{} {}", self.settings.name, self.settings.version)));
        }

        if let Some(key) = self.settings.loader_io_validation_key.as_deref() {
            if is_loader_io_path(path, key) {
                return Ok(text_response(key.to_string()));
            }
        }

        Err(HandlerError::NotFound(path.to_string()))
    }

    pub async fn handle_connection<I>(&self, io: I) -> std::result::Result<(), hyper::Error>
    where
        I: hyper::rt::Read + hyper::rt::Write + Send + Unpin + 'static,
    {
        http1::Builder::new()
            .serve_connection(
                io,
                service_fn(|req| self.handle_request(req)),
            )
            .await
    }
}

/// loader.io 도메인 확인 경로 (`/<key>`, `/<key>/`, `/<key>.txt`, `/<key>.html`)
fn is_loader_io_path(path: &str, key: &str) -> bool {
    let candidate = path.trim_start_matches('/');
    let candidate = candidate.strip_suffix('/').unwrap_or(candidate);
    let candidate = candidate
        .strip_suffix(".txt")
        .or_else(|| candidate.strip_suffix(".html"))
        .unwrap_or(candidate);
    !key.is_empty() && candidate == key
}

fn text_response(body: String) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = StatusCode::OK;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, hyper::header::HeaderValue::from_static("text/plain; charset=utf-8"));
    response
}
