use serde::{Deserialize, Serialize};

/// 서비스 식별 정보 (description, name, version)
///
/// 이 세 필드는 호출자 옵션이나 환경 변수와 관계없이 항상 최종 설정에 반영됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub description: String,
    pub name: String,
    pub version: String,
}

impl Identity {
    pub fn new(
        description: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

/// 크레이트 메타데이터로 Identity를 만듭니다.
///
/// ```
/// let identity = origin_headers::identity_from_cargo!();
/// assert_eq!(identity.name, "origin_headers");
/// ```
#[macro_export]
macro_rules! identity_from_cargo {
    () => {
        $crate::settings::Identity::new(
            env!("CARGO_PKG_DESCRIPTION"),
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
        )
    };
}
