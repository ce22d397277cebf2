use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::resolver::is_truthy;

/// 캐시 헤더 값의 읽기 전용 스냅샷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheHeaders {
    pub cache_control_header: String,
    pub surrogate_cache_control: String,
}

/// 서버 시작 시 넘겨줄 연결 옵션
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionOptions {
    pub host: String,
    /// 환경 이름. 비어 있으면 `"dev"`
    pub labels: String,
    pub port: u16,
    pub tls: Option<Value>,
    pub routes: RouteOptions,
}

/// 라우트 공통 옵션
///
/// `files`, `cors`, `state`는 `connections.routes` 아래에 같은 이름의 재정의가 있으면 그것으로 바뀝니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteOptions {
    pub files: Value,
    pub cors: Value,
    pub state: Value,
    /// `routes` 설정의 나머지 키
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RouteOptions {
    /// 정적 파일 기준 경로 (`files.relativeTo`)
    pub fn relative_to(&self) -> Option<&str> {
        self.files.get("relativeTo").and_then(Value::as_str)
    }
}

/// base path에 레이아웃 디렉터리를 이어 붙입니다.
///
/// 레이아웃 디렉터리가 절대 경로처럼 써 있어도 base path 아래로 붙입니다.
pub fn relative_path(base_path: &Path, layouts_dir: Option<&str>) -> PathBuf {
    match layouts_dir {
        Some(dir) => base_path.join(dir.trim_start_matches(['/', '\\'])),
        None => base_path.to_path_buf(),
    }
}

/// `connections.routes.<key>` 재정의를 찾습니다. 참이 아닌 값은 무시합니다.
fn route_override<'a>(connections: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    connections
        .and_then(|c| c.get("routes"))
        .and_then(|routes| routes.get(key))
        .filter(|v| is_truthy(v))
}

pub(super) fn build_routes(
    relative_path: &Path,
    routes: Option<&Map<String, Value>>,
    connections: Option<&Value>,
) -> RouteOptions {
    let mut extra = routes.cloned().unwrap_or_default();
    for key in ["files", "cors", "state"] {
        extra.remove(key);
    }

    let files = route_override(connections, "files")
        .cloned()
        .unwrap_or_else(|| json!({ "relativeTo": relative_path.to_string_lossy() }));
    let cors = route_override(connections, "cors")
        .cloned()
        .unwrap_or_else(|| json!({}));
    let state = route_override(connections, "state")
        .cloned()
        .unwrap_or_else(|| json!({}));

    RouteOptions { files, cors, state, extra }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path() {
        let base = Path::new("/srv/app");
        assert_eq!(relative_path(base, None), PathBuf::from("/srv/app"));
        assert_eq!(relative_path(base, Some("views")), PathBuf::from("/srv/app/views"));
        assert_eq!(relative_path(base, Some("/views/")), PathBuf::from("/srv/app/views/"));
    }

    #[test]
    fn test_build_routes_defaults() {
        let routes = build_routes(Path::new("/srv/app"), None, None);

        assert_eq!(routes.relative_to(), Some("/srv/app"));
        assert_eq!(routes.cors, json!({}));
        assert_eq!(routes.state, json!({}));
        assert!(routes.extra.is_empty());
    }

    #[test]
    fn test_build_routes_overrides() {
        let connections = json!({
            "routes": {
                "cors": { "origin": ["*"] },
                "state": false
            }
        });
        let mut routes = Map::new();
        routes.insert("timeout".to_string(), json!({ "server": 5000 }));
        routes.insert("cors".to_string(), json!(true));

        let built = build_routes(Path::new("/srv/app"), Some(&routes), Some(&connections));

        assert_eq!(built.relative_to(), Some("/srv/app"));
        assert_eq!(built.cors, json!({ "origin": ["*"] }));
        // false는 재정의로 보지 않음
        assert_eq!(built.state, json!({}));
        assert_eq!(built.extra.get("timeout"), Some(&json!({ "server": 5000 })));
        assert!(!built.extra.contains_key("cors"));
    }
}
