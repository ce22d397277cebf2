//! 설정 필드 해석 테이블
//!
//! 각 필드는 우선순위가 정해진 값 출처 목록을 가지며, 처음으로 "참"인 값을 내는 출처가 이깁니다.
//! 빈 문자열, `0`, `false`, `null`은 값이 없는 것으로 보고 다음 출처로 넘어갑니다.
//!
//! ```text
//! env(PORT) ─┐
//! option ────┼─▶ 첫 번째 참 값 ─▶ 병합 객체 ─▶ 스키마 검증 ─▶ Settings
//! default ───┘
//! ```

use serde_json::{json, Map, Value};

use super::env;
use super::{Identity, ServiceOptions};

/// 필드 값을 가져올 출처
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Source {
    /// 환경 변수
    Env(&'static str),
    /// 호출자 옵션의 같은 이름 키
    Option,
    /// Identity 레코드
    Identity,
    /// `construct`에 넘긴 base path
    BasePath,
    /// 내장 기본값
    Default(Fallback),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fallback {
    Str(&'static str),
    Int(u64),
    Bool(bool),
    EmptyArray,
    Null,
    /// 값을 두지 않음
    Absent,
}

impl Fallback {
    fn to_value(self) -> Option<Value> {
        match self {
            Fallback::Str(s) => Some(Value::String(s.to_string())),
            Fallback::Int(n) => Some(json!(n)),
            Fallback::Bool(b) => Some(Value::Bool(b)),
            Fallback::EmptyArray => Some(Value::Array(Vec::new())),
            Fallback::Null => Some(Value::Null),
            Fallback::Absent => None,
        }
    }
}

/// 필드 하나의 해석 규칙
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub key: &'static str,
    pub sources: &'static [Source],
    /// 정수 필드는 숫자 형태의 문자열을 숫자로 바꿔 검증합니다.
    pub integer: bool,
}

const fn rule(key: &'static str, sources: &'static [Source]) -> FieldRule {
    FieldRule { key, sources, integer: false }
}

const fn integer_rule(key: &'static str, sources: &'static [Source]) -> FieldRule {
    FieldRule { key, sources, integer: true }
}

pub const DEFAULT_CACHE_CONTROL: &str = "max-age=60";
pub const DEFAULT_SURROGATE_CACHE_CONTROL: &str =
    "max-age=360, stale-while-revalidate=60, stale-if-error=86400";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_LISTENERS: u32 = 10;

use Source::{BasePath, Default as Lit, Env, Identity as Id, Option as Opt};

pub const FIELD_RULES: &[FieldRule] = &[
    rule("basePath", &[Opt, BasePath]),
    rule("cacheControlHeader", &[Env(env::CACHE_CONTROL), Opt, Lit(Fallback::Str(DEFAULT_CACHE_CONTROL))]),
    rule("customHeaders", &[Opt, Lit(Fallback::EmptyArray)]),
    rule("description", &[Id]),
    rule("environment", &[Env(env::ENVIRONMENT), Env(env::NODE_ENV), Opt, Lit(Fallback::Str(""))]),
    rule("healthChecks", &[Opt, Lit(Fallback::EmptyArray)]),
    rule("host", &[Env(env::HOST), Opt, Lit(Fallback::Str(DEFAULT_HOST))]),
    rule("loaderIoValidationKey", &[Opt, Lit(Fallback::Absent)]),
    integer_rule("maxListeners", &[Env(env::DEFAULT_MAX_LISTENERS), Opt, Lit(Fallback::Int(DEFAULT_MAX_LISTENERS as u64))]),
    rule("name", &[Id]),
    integer_rule("port", &[Env(env::PORT), Opt, Lit(Fallback::Int(DEFAULT_PORT as u64))]),
    rule("services", &[Opt, Lit(Fallback::Null)]),
    rule("surrogateCacheControl", &[Env(env::SURROGATE_CACHE_CONTROL), Opt, Lit(Fallback::Str(DEFAULT_SURROGATE_CACHE_CONTROL))]),
    rule("tls", &[Env(env::TLS), Opt, Lit(Fallback::Null)]),
    rule("version", &[Id]),
    rule("withGoodConsole", &[Opt, Lit(Fallback::Bool(false))]),
    rule("withSwagger", &[Opt, Lit(Fallback::Bool(false))]),
];

/// 해석에 필요한 입력 묶음
pub struct ResolveContext<'a, F>
where
    F: Fn(&str) -> Option<String>,
{
    pub identity: &'a Identity,
    pub options: &'a ServiceOptions,
    pub base_path: &'a str,
    pub lookup: F,
}

/// JavaScript의 `||` 연산과 같은 기준으로 값이 있는지 판단합니다.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// 정수 필드에 들어온 숫자 문자열과 소수부가 0인 실수(`8080.0`)를 정수로 바꿉니다.
/// 변환할 수 없으면 그대로 둡니다.
fn coerce_integer(value: Value) -> Value {
    let parsed = match &value {
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .map(|n| json!(n))
                .or_else(|_| s.parse::<i64>().map(|n| json!(n)))
                .ok()
        }
        Value::Number(n) if !n.is_u64() && !n.is_i64() => n
            .as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .and_then(|f| {
                if f >= 0.0 && f <= u64::MAX as f64 {
                    Some(json!(f as u64))
                } else if f < 0.0 && f >= i64::MIN as f64 {
                    Some(json!(f as i64))
                } else {
                    None
                }
            }),
        _ => None,
    };
    parsed.unwrap_or(value)
}

/// 타입 변환 실패를 일으킨 필드를 찾습니다.
///
/// 스키마를 통과한 값 중 변환에 실패할 수 있는 것은 정수 필드뿐이므로 그것부터 봅니다.
pub fn failed_field(merged: &Value, error: &str) -> String {
    let integer_field = FIELD_RULES
        .iter()
        .filter(|rule| rule.integer)
        .find(|rule| merged.get(rule.key).map_or(false, |v| !v.is_u64()));
    if let Some(rule) = integer_field {
        return rule.key.to_string();
    }

    error
        .split_once("missing field `")
        .and_then(|(_, rest)| rest.split_once('`'))
        .map(|(field, _)| field.to_string())
        .unwrap_or_else(|| "settings".to_string())
}

fn identity_field(identity: &Identity, key: &str) -> Option<Value> {
    match key {
        "description" => Some(Value::String(identity.description.clone())),
        "name" => Some(Value::String(identity.name.clone())),
        "version" => Some(Value::String(identity.version.clone())),
        _ => None,
    }
}

/// 규칙 하나를 평가합니다. 순수 함수이며 값이 없으면 `None`을 돌려줍니다.
pub fn resolve_field<F>(rule: &FieldRule, ctx: &ResolveContext<'_, F>) -> Option<Value>
where
    F: Fn(&str) -> Option<String>,
{
    let resolved = rule.sources.iter().find_map(|source| match source {
        Source::Env(name) => (ctx.lookup)(*name)
            .map(Value::String)
            .filter(is_truthy),
        Source::Option => ctx.options.get(rule.key).cloned().filter(is_truthy),
        // identity 값은 비어 있어도 그대로 씁니다
        Source::Identity => identity_field(ctx.identity, rule.key),
        Source::BasePath => Some(Value::String(ctx.base_path.to_string())),
        Source::Default(fallback) => fallback.to_value(),
    })?;

    Some(if rule.integer { coerce_integer(resolved) } else { resolved })
}

/// 모든 규칙을 평가하고, 테이블에 없는 옵션 키는 그대로 복사해 병합 객체를 만듭니다.
pub fn merge<F>(ctx: &ResolveContext<'_, F>) -> Map<String, Value>
where
    F: Fn(&str) -> Option<String>,
{
    let mut merged = Map::new();

    for (key, value) in ctx.options.iter() {
        if !FIELD_RULES.iter().any(|rule| rule.key == key.as_str()) {
            merged.insert(key.clone(), value.clone());
        }
    }

    for rule in FIELD_RULES {
        if let Some(value) = resolve_field(rule, ctx) {
            merged.insert(rule.key.to_string(), value);
        }
    }

    merged
}
