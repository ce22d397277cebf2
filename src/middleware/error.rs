use hyper::{Method, StatusCode};

#[derive(Debug, thiserror::Error)]
pub enum MiddlewareError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("미들웨어 {middleware} 실행 실패: {message}")]
    Execution {
        middleware: String,
        message: String,
    },
}

/// 핸들러가 응답 대신 돌려주는 오류
///
/// 응답 미들웨어를 모두 거친 뒤에야 HTTP 응답으로 바뀌므로 그 사이에는 헤더가 없습니다.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("경로를 찾을 수 없음: {0}")]
    NotFound(String),

    #[error("허용되지 않는 메서드: {0}")]
    MethodNotAllowed(Method),

    #[error(transparent)]
    Middleware(#[from] MiddlewareError),
}

impl HandlerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Middleware(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
