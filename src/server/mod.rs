//! 데모 서버
//!
//! 해석된 설정으로 리스너를 열고, 모든 응답이 응답 훅을 거치도록 연결합니다.

pub mod error;
pub mod handler;
pub mod listener;

use std::sync::Arc;

pub use error::Error;
pub use handler::RequestHandler;
pub use listener::ServerListener;

use crate::settings::Settings;

pub type Result<T> = std::result::Result<T, Error>;

/// 설정의 연결 옵션으로 리스너를 열고 요청을 처리합니다. 정상적으로는 반환하지 않습니다.
pub async fn serve(settings: Settings) -> Result<()> {
    let settings = Arc::new(settings);
    let listener = ServerListener::bind(&settings.connection_options()).await?;
    let handler = Arc::new(RequestHandler::new(settings)?);
    listener.run(handler).await
}
