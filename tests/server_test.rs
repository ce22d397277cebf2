use origin_headers::{
    server::{RequestHandler, ServerListener},
    settings::{Identity, ServiceOptions, Settings},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity::new("A Test Harness for building services", "testHarness", "1.0.0")
    }

    fn settings(options: ServiceOptions) -> Settings {
        // 프로세스 환경 변수와 무관하게 옵션만으로 해석
        Settings::resolve(&identity(), &options, "/srv/app", |_: &str| None).unwrap()
    }

    async fn start_server(options: ServiceOptions) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server = ServerListener::from_listener(listener, None);
        let addr = server.local_addr().unwrap();

        let handler = Arc::new(RequestHandler::new(Arc::new(settings(options))).unwrap());
        tokio::spawn(async move {
            let _ = server.run(handler).await;
        });

        addr
    }

    #[tokio::test]
    async fn test_root_response_carries_cache_headers() {
        let addr = start_server(
            ServiceOptions::new()
                .surrogate_cache_control("max-age=60, stale-while-revalidate=10, stale-if-error=6400")
                .custom_header("X-Served-By", "origin"),
        )
        .await;

        let response = reqwest::get(format!("http://{}/", addr)).await.unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers["cache-control"], "max-age=60");
        assert_eq!(
            headers["surrogate-control"],
            "max-age=60, stale-while-revalidate=10, stale-if-error=6400"
        );
        assert_eq!(headers["x-served-by"], "origin");
        assert_eq!(response.text().await.unwrap(), "testHarness 1.0.0");
    }

    #[tokio::test]
    async fn test_custom_header_cannot_override_cache_headers() {
        let addr = start_server(
            ServiceOptions::new()
                .custom_header("Cache-Control", "no-store")
                .custom_header("surrogate-control", "no-store"),
        )
        .await;

        let response = reqwest::get(format!("http://{}/", addr)).await.unwrap();
        let headers = response.headers();

        assert_eq!(headers.get_all("cache-control").iter().count(), 1);
        assert_eq!(headers["cache-control"], "max-age=60");
        assert_eq!(
            headers["surrogate-control"],
            "max-age=360, stale-while-revalidate=60, stale-if-error=86400"
        );
    }

    #[tokio::test]
    async fn test_loader_io_validation() {
        let addr = start_server(ServiceOptions::new().loader_io_validation_key("loaderio-0123")).await;

        for path in ["loaderio-0123", "loaderio-0123/", "loaderio-0123.txt", "loaderio-0123.html"] {
            let response = reqwest::get(format!("http://{}/{}", addr, path)).await.unwrap();
            assert_eq!(response.status(), reqwest::StatusCode::OK, "경로: {}", path);
            assert_eq!(response.text().await.unwrap(), "loaderio-0123");
        }
    }

    #[tokio::test]
    async fn test_not_found_has_no_hook_headers() {
        let addr = start_server(ServiceOptions::new().custom_header("X-Served-By", "origin")).await;

        let response = reqwest::get(format!("http://{}/missing", addr)).await.unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
        assert!(response.headers().get("cache-control").is_none());
        assert!(response.headers().get("surrogate-control").is_none());
        assert!(response.headers().get("x-served-by").is_none());
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let addr = start_server(ServiceOptions::new()).await;

        let response = reqwest::Client::new()
            .post(format!("http://{}/", addr))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
    }
}
