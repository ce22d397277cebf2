use origin_headers::settings::{env::RESOLVER_VARS, Identity, ServiceOptions, Settings};
use std::io::Write;
use std::sync::Once;

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;  // 환경 변수를 바꾸는 테스트는 순서대로 실행

    static INIT: Once = Once::new();

    fn setup() {
        INIT.call_once(|| {
            cleanup_env();
        });
    }

    fn teardown() {
        cleanup_env();
    }

    // 테스트 전후 환경변수 초기화를 위한 헬퍼 함수
    fn cleanup_env() {
        for name in RESOLVER_VARS {
            std::env::remove_var(name);
        }
    }

    fn identity() -> Identity {
        Identity::new("A Test Harness for building services", "testHarness", "1.0.0")
    }

    #[test]
    #[serial]
    fn test_settings_defaults() {
        setup();

        let settings = Settings::from_env(&identity(), &ServiceOptions::new(), "/srv/app").unwrap();

        assert_eq!(settings.port, 3000);
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.cache_control_header, "max-age=60");
        assert_eq!(settings.max_listeners, 10);
        assert_eq!(settings.connection_options().labels, "dev");
        teardown();
    }

    #[test]
    #[serial]
    fn test_env_wins_over_options() {
        setup();

        std::env::set_var("PORT", "9090");
        std::env::set_var("HOST", "127.0.0.1");
        std::env::set_var("SURROGATE_CACHE_CONTROL", "max-age=5");

        let options = ServiceOptions::new()
            .port(8080)
            .host("10.1.1.1")
            .surrogate_cache_control("max-age=60, stale-while-revalidate=10, stale-if-error=6400");
        let settings = Settings::from_env(&identity(), &options, "/srv/app").unwrap();

        assert_eq!(settings.port, 9090);
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.surrogate_cache_control, "max-age=5");
        teardown();

        // 환경 변수가 없으면 옵션이 이김
        let settings = Settings::from_env(&identity(), &options, "/srv/app").unwrap();
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.host, "10.1.1.1");
        teardown();
    }

    #[test]
    #[serial]
    fn test_environment_label() {
        setup();

        std::env::set_var("NODE_ENV", "production");
        let settings = Settings::from_env(&identity(), &ServiceOptions::new(), "/srv/app").unwrap();
        assert_eq!(settings.connection_options().labels, "production");

        std::env::set_var("ENVIRONMENT", "prod");
        let settings = Settings::from_env(&identity(), &ServiceOptions::new(), "/srv/app").unwrap();
        assert_eq!(settings.connection_options().labels, "prod");
        teardown();
    }

    #[test]
    #[serial]
    fn test_invalid_env_values() {
        setup();

        // 1. 숫자가 아닌 포트
        std::env::set_var("PORT", "not-a-number");
        let result = Settings::from_env(&identity(), &ServiceOptions::new(), "/srv/app");
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.mentions_field("port"));
            assert!(e.to_string().contains("port"));
        }
        teardown();

        // 2. 범위를 벗어난 포트
        std::env::set_var("PORT", "99999");
        let result = Settings::from_env(&identity(), &ServiceOptions::new(), "/srv/app");
        assert!(result.is_err(), "범위를 벗어난 포트는 허용되지 않아야 함");
        teardown();

        // 3. 숫자가 아닌 리스너 수
        std::env::set_var("DEFAULT_MAX_LISTENERS", "many");
        let result = Settings::from_env(&identity(), &ServiceOptions::new(), "/srv/app");
        assert!(result.unwrap_err().mentions_field("maxListeners"));
        teardown();
    }

    #[test]
    #[serial]
    fn test_tls_from_env() {
        setup();

        std::env::set_var("TLS", "true");
        let settings = Settings::from_env(&identity(), &ServiceOptions::new(), "/srv/app").unwrap();
        assert_eq!(settings.connection_options().tls, Some(serde_json::json!("true")));
        teardown();
    }

    #[test]
    #[serial]
    fn test_settings_from_options_file() {
        setup();

        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("options.json");
        let mut file = std::fs::File::create(&file_path).unwrap();
        file.write_all(br#"{
            "description": "ignored",
            "surrogateCacheControl": "max-age=60, stale-while-revalidate=10, stale-if-error=6400",
            "withGoodConsole": true,
            "withSwagger": true,
            "loaderIoValidationKey": "loaderio-abc",
            "customHeaders": [{ "name": "Connection", "value": "close" }],
            "metrics": { "options": { "flushEvery": 6000 } }
        }"#).unwrap();

        let options = ServiceOptions::from_file(&file_path).unwrap();
        let settings = Settings::from_env(&identity(), &options, dir.path()).unwrap();

        assert_eq!(settings.description, "A Test Harness for building services");
        assert!(settings.with_good_console);
        assert!(settings.with_swagger);
        assert_eq!(settings.loader_io_validation_key.as_deref(), Some("loaderio-abc"));
        assert_eq!(settings.custom_headers.len(), 1);
        assert_eq!(
            settings.metrics.and_then(|m| m.options),
            Some(serde_json::json!({ "flushEvery": 6000 }))
        );
        teardown();
    }

    #[test]
    #[serial]
    fn test_settings_from_toml_file() {
        setup();

        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("options.toml");
        std::fs::write(&file_path, r#"
            port = 4000
            layoutsDir = "views"

            [[customHeaders]]
            name = "X-Served-By"
            value = "origin"
        "#).unwrap();

        let options = ServiceOptions::from_file(&file_path).unwrap();
        let settings = Settings::from_env(&identity(), &options, "/srv/app").unwrap();

        assert_eq!(settings.port, 4000);
        assert_eq!(
            settings.connection_options().routes.relative_to().map(std::path::PathBuf::from),
            Some(std::path::PathBuf::from("/srv/app/views"))
        );
        teardown();
    }

    #[test]
    #[serial]
    fn test_unknown_option_is_rejected() {
        setup();

        let options = ServiceOptions::new().set("localTLS", serde_json::json!({ "port": 8443 }));
        let result = Settings::from_env(&identity(), &options, "/srv/app");
        assert!(result.unwrap_err().mentions_field("localTLS"));
        teardown();
    }
}
