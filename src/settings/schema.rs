/// 서비스 설정 스키마 정의
///
/// 병합이 끝난 설정 객체를 검증하는 JSON 스키마입니다.
/// 스키마는 JSON Schema Draft 7을 따릅니다.

/// 설정 스키마 상수
pub const SETTINGS_SCHEMA: &str = r#"{
    "$schema": "http://json-schema.org/draft-07/schema#",
    "type": "object",
    "required": ["basePath", "cacheControlHeader", "host", "port", "surrogateCacheControl", "version"],
    "additionalProperties": false,
    "properties": {
        "basePath": {
            "type": "string",
            "description": "directory of the current process"
        },
        "cacheControlHeader": {
            "type": "string",
            "description": "maximum cache lifetime in seconds"
        },
        "customHeaders": {
            "type": "array",
            "items": {
                "type": "object",
                "properties": {
                    "name": {"type": "string"},
                    "value": {"type": "string"}
                }
            }
        },
        "description": {
            "type": "string",
            "description": "a description of the application"
        },
        "environment": {
            "type": "string",
            "description": "application environment"
        },
        "healthChecks": {"type": "array"},
        "host": {
            "type": "string",
            "description": "application host"
        },
        "loaderIoValidationKey": {
            "type": "string",
            "description": "loader.io validation"
        },
        "layoutsDir": {
            "type": "string",
            "description": "the application view directory, relative to basePath"
        },
        "maxListeners": {
            "type": "integer",
            "minimum": 0,
            "maximum": 4294967295,
            "description": "max listeners per event"
        },
        "metrics": {
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "provider": {"type": "object"},
                "options": {"type": "object"}
            }
        },
        "name": {
            "type": "string",
            "description": "application name"
        },
        "port": {
            "type": "integer",
            "minimum": 0,
            "maximum": 65535,
            "description": "application port"
        },
        "services": {
            "type": ["array", "null"],
            "description": "services started before connections are accepted and stopped after they are closed"
        },
        "surrogateCacheControl": {
            "type": "string",
            "description": "external cache layer"
        },
        "tls": {},
        "version": {
            "type": "string",
            "description": "version of the application"
        },
        "withGoodConsole": {"type": "boolean"},
        "withSwagger": {"type": "boolean"},
        "routes": {"type": "object"},
        "connections": {
            "type": "object",
            "properties": {
                "routes": {
                    "type": "object",
                    "properties": {
                        "files": {"type": ["object", "boolean", "null"]},
                        "cors": {"type": ["object", "boolean", "null"]},
                        "state": {"type": ["object", "boolean", "null"]}
                    }
                }
            }
        }
    }
}"#;
