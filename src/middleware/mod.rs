//! 응답 미들웨어
//!
//! 핸들러가 만든 응답(또는 아직 응답이 되지 않은 오류)을 서버로 돌려보내기 전에
//! 등록된 미들웨어를 차례로 거치게 합니다.

pub mod cache_headers;
pub mod chain;
pub mod context;
pub mod error;
pub mod response;
pub mod traits;

use bytes::Bytes;
use http_body_util::Full;

pub use cache_headers::{ResponseHeaderHook, ResponseHeaderOptions};
pub use chain::MiddlewareChain;
pub use context::ResponseContext;
pub use error::{HandlerError, MiddlewareError};
pub use response::error_response;
pub use traits::Middleware;

pub type Request = hyper::Request<hyper::body::Incoming>;
pub type Response = hyper::Response<Full<Bytes>>;

/// 핸들러 결과. `Err`는 아직 HTTP 응답으로 만들어지지 않은 오류입니다.
pub type Reply = std::result::Result<Response, HandlerError>;
