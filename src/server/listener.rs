use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use hyper_util::rt::TokioIo;
use tracing::{error, info};

use crate::settings::ConnectionOptions;
use crate::tls::{build_acceptor, TlsFiles};
use super::handler::RequestHandler;
use super::Result;

pub struct ServerListener {
    listener: TcpListener,
    acceptor: Option<TlsAcceptor>,
}

impl ServerListener {
    /// 연결 옵션의 host/port로 리스너를 엽니다. `tls`가 있으면 TLS로 받습니다.
    pub async fn bind(connection: &ConnectionOptions) -> Result<Self> {
        let acceptor = match &connection.tls {
            Some(tls) => Some(build_acceptor(&TlsFiles::from_options(tls)?)?),
            None => None,
        };

        let address = format!("{}:{}", connection.host, connection.port);
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|e| {
                error!(error = %e, address = %address, "포트 바인딩 실패");
                e
            })?;

        info!(
            address = %address,
            labels = %connection.labels,
            tls = acceptor.is_some(),
            "리스너 시작"
        );

        Ok(Self::from_listener(listener, acceptor))
    }

    pub fn from_listener(listener: TcpListener, acceptor: Option<TlsAcceptor>) -> Self {
        Self { listener, acceptor }
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub async fn run(self, handler: Arc<RequestHandler>) -> Result<()> {
        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!(error = %e, "연결 수락 실패");
                    continue;
                }
            };

            let handler = handler.clone();
            match self.acceptor.clone() {
                None => {
                    tokio::spawn(async move {
                        let io = TokioIo::new(stream);
                        if let Err(err) = handler.handle_connection(io).await {
                            error!(error = %err, peer = %peer, "HTTP 연결 처리 실패");
                        }
                    });
                }
                Some(acceptor) => {
                    tokio::spawn(async move {
                        match acceptor.accept(stream).await {
                            Ok(tls_stream) => {
                                let io = TokioIo::new(tls_stream);
                                if let Err(err) = handler.handle_connection(io).await {
                                    error!(error = %err, peer = %peer, "HTTPS 연결 처리 실패");
                                }
                            }
                            Err(e) => {
                                error!(error = %e, peer = %peer, "TLS 핸드쉐이크 실패");
                            }
                        }
                    });
                }
            }
        }
    }
}
