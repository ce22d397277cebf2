use std::path::Path;
use std::time::Instant;
use tracing::{error, info, warn, Level, span};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, fmt::time::UtcTime, EnvFilter};

use crate::settings::logging::{LogFormat, LogOutput, LogSettings};

pub type InitResult = Result<WorkerGuard, Box<dyn std::error::Error + Send + Sync>>;

/// 전역 subscriber를 설정합니다.
///
/// 돌려받은 guard가 살아 있는 동안 버퍼에 쌓인 로그가 기록되므로 `main`에서 끝까지 들고 있어야 합니다.
pub fn init_logging(settings: &LogSettings) -> InitResult {
    let filter = EnvFilter::from_default_env()
        .add_directive(settings.level.into());

    let (writer, guard) = match &settings.output {
        LogOutput::Stdout => tracing_appender::non_blocking(std::io::stdout()),
        LogOutput::File(path) => {
            let directory = path.parent().unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .map(|name| name.to_os_string())
                .unwrap_or_else(|| "origin_headers.log".into());
            tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name))
        }
    };

    match settings.format {
        LogFormat::Text => fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .try_init()?,
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_timer(UtcTime::rfc_3339())
            .with_current_span(true)
            .try_init()?,
    }

    Ok(guard)
}

/// 요청 한 건의 콘솔 로그 (`withGoodConsole`)
#[derive(Debug)]
pub struct RequestLog {
    pub request_id: String,
    pub method: String,
    pub path: String,
    pub status_code: u16,
    pub duration_ms: u64,
    pub error: Option<String>,
    started: Instant,
}

impl RequestLog {
    pub fn new(request_id: String) -> Self {
        Self {
            request_id,
            method: String::new(),
            path: String::new(),
            status_code: 0,
            duration_ms: 0,
            error: None,
            started: Instant::now(),
        }
    }

    pub fn with_request<B>(&mut self, req: &hyper::Request<B>) {
        self.method = req.method().to_string();
        self.path = req.uri().path().to_string();
    }

    pub fn with_response(&mut self, status: hyper::StatusCode) {
        self.status_code = status.as_u16();
        self.duration_ms = self.started.elapsed().as_millis() as u64;
    }

    pub fn with_error(&mut self, error: impl std::fmt::Display) {
        self.error = Some(error.to_string());
    }

    fn level(&self) -> Level {
        if self.error.is_some() && self.status_code >= 500 {
            Level::ERROR
        } else if self.status_code >= 400 {
            Level::WARN
        } else {
            Level::INFO
        }
    }
}

pub fn log_request(log: &RequestLog) {
    let level = log.level();

    let span = span!(
        Level::INFO,
        "request",
        request_id = %log.request_id,
        method = %log.method,
        path = %log.path,
        status = %log.status_code,
        duration_ms = %log.duration_ms
    );
    let _enter = span.enter();

    match level {
        Level::ERROR => error!(error = ?log.error, "Request failed"),
        Level::WARN => warn!(error = ?log.error, "Request completed with warning"),
        _ => info!("Request completed successfully"),
    }
}
