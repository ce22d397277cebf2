use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use tracing::debug;

use super::error::{FieldError, SettingsError};
use super::schema::SETTINGS_SCHEMA;
use super::Result;

/// 병합된 설정 검증을 위한 구조체
pub struct SettingsValidator {
    schema: JSONSchema,
}

impl SettingsValidator {
    /// 새 validator 인스턴스 생성
    pub fn new() -> Result<Self> {
        let schema_value: Value = serde_json::from_str(SETTINGS_SCHEMA)
            .map_err(|e| SettingsError::SchemaCompileError {
                reason: format!("스키마 파싱 오류: {}", e)
            })?;

        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema_value)
            .map_err(|e| SettingsError::SchemaCompileError {
                reason: format!("스키마 컴파일 오류: {}", e)
            })?;

        debug!("설정 스키마 컴파일 성공");
        Ok(Self { schema })
    }

    /// 설정 객체 검증. 발견된 모든 필드 오류를 모아 돌려줍니다.
    pub fn validate(&self, value: &Value) -> std::result::Result<(), Vec<FieldError>> {
        let result = self.schema.validate(value);
        if let Err(errors) = result {
            let mut field_errors = Vec::new();
            for error in errors {
                match &error.kind {
                    // 최상위 경로에서 나는 오류이므로 키 이름으로 필드를 표시
                    ValidationErrorKind::AdditionalProperties { unexpected } => {
                        let base = field_name(&error.instance_path.to_string());
                        for key in unexpected {
                            let field = if base.is_empty() {
                                key.clone()
                            } else {
                                format!("{}/{}", base, key)
                            };
                            field_errors.push(FieldError {
                                field,
                                reason: "is not allowed".to_string(),
                            });
                        }
                    }
                    _ => field_errors.push(FieldError {
                        field: field_name(&error.instance_path.to_string()),
                        reason: error.to_string(),
                    }),
                }
            }
            return Err(field_errors);
        }

        Ok(())
    }
}

/// JSON 포인터(`/customHeaders/0/name`)를 필드 이름(`customHeaders/0/name`)으로 바꿉니다.
fn field_name(pointer: &str) -> String {
    pointer.trim_start_matches('/').to_string()
}

impl From<Vec<FieldError>> for SettingsError {
    fn from(errors: Vec<FieldError>) -> Self {
        SettingsError::Validation { errors }
    }
}
