use std::env;
use std::path::PathBuf;

use origin_headers::identity_from_cargo;
use origin_headers::logging::init_logging;
use origin_headers::server;
use origin_headers::settings::{LogSettings, ServiceOptions, Settings};
use tracing::{error, info};

const OPTIONS_FILE: &str = "ORIGIN_OPTIONS_FILE";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_settings = LogSettings::from_env()?;
    let _guard = init_logging(&log_settings).map_err(|e| e as Box<dyn std::error::Error>)?;

    let options = match env::var(OPTIONS_FILE) {
        Ok(path) => ServiceOptions::from_file(&path)?,
        Err(_) => ServiceOptions::new(),
    };
    let base_path = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let settings = match Settings::from_env(&identity_from_cargo!(), &options, &base_path) {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "서비스 설정 실패");
            return Err(e.into());
        }
    };

    info!("Server name: {}", settings.name);
    info!("Server version: {}", settings.version);
    info!("Server maxListeners: {}", settings.max_listeners);
    info!("Server environment: {}", settings.connection_options().labels);

    if let Err(e) = server::serve(settings).await {
        error!(error = %e, "서버 실행 실패");
        return Err(e.into());
    }

    Ok(())
}
