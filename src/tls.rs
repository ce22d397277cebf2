use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;
use serde::Deserialize;
use serde_json::Value;
use tokio_rustls::rustls::{self, Certificate, PrivateKey};
use tokio_rustls::TlsAcceptor;
use tracing::info;

use crate::server::Error;

/// `tls` 설정 중 서버가 이해하는 부분 (PEM 인증서와 개인키 경로)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TlsFiles {
    pub cert: PathBuf,
    pub key: PathBuf,
}

impl TlsFiles {
    /// 연결 옵션의 `tls` 값에서 인증서/키 경로를 꺼냅니다.
    pub fn from_options(tls: &Value) -> Result<Self, Error> {
        serde_json::from_value(tls.clone()).map_err(|e| {
            Error::ConfigError(format!("tls 설정에는 cert, key 경로가 필요합니다: {}", e))
        })
    }
}

pub fn build_acceptor(files: &TlsFiles) -> Result<TlsAcceptor, Error> {
    let tls_config = load_tls_config(files)?;
    info!(cert = %files.cert.display(), "TLS 설정 로드");
    Ok(TlsAcceptor::from(Arc::new(tls_config)))
}

fn load_tls_config(files: &TlsFiles) -> Result<rustls::ServerConfig, Error> {
    let cert_file = File::open(&files.cert)?;
    let mut cert_reader = BufReader::new(cert_file);
    let certs = rustls_pemfile::certs(&mut cert_reader)?
        .into_iter()
        .map(Certificate)
        .collect();

    let key_file = File::open(&files.key)?;
    let mut key_reader = BufReader::new(key_file);
    let key = rustls_pemfile::pkcs8_private_keys(&mut key_reader)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::ConfigError("개인키를 찾을 수 없음".to_string()))?;

    rustls::ServerConfig::builder()
        .with_safe_defaults()
        .with_no_client_auth()
        .with_single_cert(certs, PrivateKey(key))
        .map_err(|e| Error::ConfigError(format!("TLS 설정 오류: {}", e)))
}
