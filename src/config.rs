/*
 * Responsibility
 * - 環境変数や設定の読み込み (AWS_REGION, COGNITO_USER_POOL_ID, cookie 名など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_COOKIE_NAME: &str = "token";
// Authorizer events are headers + a method ARN; API Gateway caps request headers well below this.
pub const DEFAULT_REQUEST_BODY_LIMIT_BYTES: usize = 64 * 1024;
// API Gateway gives up on an authorizer after 29s, so nothing past that is useful.
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 29;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub region: String,
    // Unset means every token is denied.
    pub user_pool_id: Option<String>,
    pub cookie_name: String,
    // Alternate IdP origin (cognito-local, LocalStack).
    pub cognito_idp_endpoint: Option<String>,

    pub request_body_limit_bytes: usize,
    // Outer bound on /authorize; the JWKS fetch itself has no timeout.
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map instead of the process env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port: u16 = match non_empty("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let region = non_empty("AWS_REGION").ok_or(ConfigError::Missing("AWS_REGION"))?;

        let user_pool_id = non_empty("COGNITO_USER_POOL_ID");

        let cookie_name =
            non_empty("AUTH_COOKIE_NAME").unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());
        if cookie_name.contains(['=', ';']) {
            return Err(ConfigError::Invalid("AUTH_COOKIE_NAME"));
        }

        let cognito_idp_endpoint = non_empty("COGNITO_IDP_ENDPOINT");

        let request_body_limit_bytes = match non_empty("REQUEST_BODY_LIMIT_BYTES") {
            Some(v) => v
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("REQUEST_BODY_LIMIT_BYTES"))?,
            None => DEFAULT_REQUEST_BODY_LIMIT_BYTES,
        };

        let request_timeout_seconds = match non_empty("REQUEST_TIMEOUT_SECONDS") {
            Some(v) => v
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))?,
            None => DEFAULT_REQUEST_TIMEOUT_SECONDS,
        };

        Ok(Self {
            addr,
            app_env,
            region,
            user_pool_id,
            cookie_name,
            cognito_idp_endpoint,
            request_body_limit_bytes,
            request_timeout: Duration::from_secs(request_timeout_seconds),
        })
    }
}
