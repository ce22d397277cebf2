use hyper::{Response, StatusCode};
use http_body_util::Full;
use bytes::Bytes;
use super::HandlerError;

/// 핸들러 오류를 HTTP 응답으로 변환합니다.
pub fn error_response(err: &HandlerError) -> Response<Full<Bytes>> {
    Response::builder()
        .status(err.status())
        .body(Full::new(Bytes::from(err.to_string())))
        .unwrap_or_else(|_| {
            let mut response = Response::new(Full::new(Bytes::from("Internal Server Error")));
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response
        })
}
