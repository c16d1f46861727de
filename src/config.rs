/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, CORS 許可、bcrypt cost など)
 * - 設定値のバリデーション (不正なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://fsjstd-restapi.db?mode=rwc";
pub const DEFAULT_BCRYPT_COST: u32 = 10;
// bcrypt が受け付ける work factor
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub database_max_connections: u32,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub bcrypt_cost: u32,

    pub request_timeout_seconds: u64,
    pub body_limit_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            database_max_connections: 5,
            app_env: AppEnv::Development,
            cors_allowed_origins: Vec::new(),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            request_timeout_seconds: 30,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();
        let env = |key: &str| std::env::var(key).ok();

        let port = parse_or("PORT", env("PORT"), DEFAULT_PORT)?;
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let database_url = env("DATABASE_URL").unwrap_or(defaults.database_url);

        let database_max_connections = parse_or(
            "DATABASE_MAX_CONNECTIONS",
            env("DATABASE_MAX_CONNECTIONS"),
            defaults.database_max_connections,
        )?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = split_origins(&env("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        let bcrypt_cost = checked_bcrypt_cost(parse_or(
            "BCRYPT_COST",
            env("BCRYPT_COST"),
            defaults.bcrypt_cost,
        )?)?;

        let request_timeout_seconds = parse_or(
            "REQUEST_TIMEOUT_SECONDS",
            env("REQUEST_TIMEOUT_SECONDS"),
            defaults.request_timeout_seconds,
        )?;

        let body_limit_bytes = parse_or(
            "BODY_LIMIT_BYTES",
            env("BODY_LIMIT_BYTES"),
            defaults.body_limit_bytes,
        )?;

        Ok(Self {
            addr,
            database_url,
            database_max_connections,
            app_env,
            cors_allowed_origins,
            bcrypt_cost,
            request_timeout_seconds,
            body_limit_bytes,
        })
    }
}

fn checked_bcrypt_cost(cost: u32) -> Result<u32, ConfigError> {
    if BCRYPT_COST_RANGE.contains(&cost) {
        Ok(cost)
    } else {
        Err(ConfigError::Invalid("BCRYPT_COST"))
    }
}

// 未設定なら default、設定されていて parse できなければ起動失敗
fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid(key)),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_value_falls_back_to_default() {
        assert_eq!(parse_or("PORT", None, DEFAULT_PORT).unwrap(), 5000);
    }

    #[test]
    fn garbage_value_is_rejected() {
        let err = parse_or::<u16>("PORT", Some("abc".into()), DEFAULT_PORT).unwrap_err();
        assert_eq!(err.to_string(), "invalid configuration: PORT");
    }

    #[test]
    fn bcrypt_cost_must_be_within_bcrypt_range() {
        assert_eq!(checked_bcrypt_cost(4).unwrap(), 4);
        assert_eq!(checked_bcrypt_cost(31).unwrap(), 31);
        for bad in [0, 3, 32] {
            let err = checked_bcrypt_cost(bad).unwrap_err();
            assert_eq!(err.to_string(), "invalid configuration: BCRYPT_COST");
        }
    }

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            split_origins(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn app_env_accepts_short_production_name() {
        assert!(AppEnv::parse("PROD").is_production());
        assert!(!AppEnv::parse("staging").is_production());
    }
}
