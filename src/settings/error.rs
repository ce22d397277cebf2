use std::fmt;

/// 스키마 검증에서 발견된 개별 필드 오류
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// 문제가 된 필드 (예: `port`, `customHeaders/0/name`)
    pub field: String,
    /// 위반한 제약 조건
    pub reason: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" {}", self.field, self.reason)
    }
}

#[derive(Debug)]
pub enum SettingsError {
    EnvVarInvalid {
        var_name: String,
        value: String,
        reason: String,
    },
    FileError {
        path: String,
        error: std::io::Error,
    },
    ParseError {
        format: &'static str,
        reason: String,
    },
    SchemaCompileError {
        reason: String,
    },
    Validation {
        errors: Vec<FieldError>,
    },
}

impl SettingsError {
    /// 검증 오류에 해당 필드가 포함되어 있는지 확인
    pub fn mentions_field(&self, field: &str) -> bool {
        match self {
            Self::Validation { errors } => errors.iter().any(|e| {
                e.field == field || e.field.starts_with(&format!("{}/", field))
            }),
            Self::EnvVarInvalid { var_name, .. } => var_name == field,
            _ => false,
        }
    }
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnvVarInvalid { var_name, value, reason } =>
                write!(f, "환경 변수 {} 값 {} 오류: {}", var_name, value, reason),
            Self::FileError { path, error } =>
                write!(f, "설정 파일 {} 오류: {}", path, error),
            Self::ParseError { format, reason } =>
                write!(f, "{} 옵션 파싱 오류: {}", format, reason),
            Self::SchemaCompileError { reason } =>
                write!(f, "스키마 컴파일 오류: {}", reason),
            Self::Validation { errors } => {
                write!(f, "Invalid service configuration: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileError { error, .. } => Some(error),
            _ => None,
        }
    }
}
