//! 应用运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 可选的列表排序方式取值。
pub const SORT_MODES: [&str; 2] = ["recency", "triage"];

/// 本地时区偏移的合法范围（分钟，开区间 ±24h）。
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    /// 未设置时使用带演示数据的内存存储
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub store_timeout_ms: u64,
    /// 未设置时使用进程所在时区
    pub utc_offset_minutes: Option<i32>,
    pub today_sort: String,
    pub history_sort: String,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_addr =
            env::var("TRIAGE_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let database_url = read_optional("TRIAGE_DATABASE_URL");
        let db_max_connections = read_u32_with_default("TRIAGE_DB_MAX_CONNECTIONS", 8)?;
        if db_max_connections == 0 {
            return Err(ConfigError::Invalid(
                "TRIAGE_DB_MAX_CONNECTIONS".to_string(),
                "0".to_string(),
            ));
        }
        let store_timeout_ms = read_u64_with_default("TRIAGE_STORE_TIMEOUT_MS", 10_000)?;
        let utc_offset_minutes = read_offset_minutes("TRIAGE_UTC_OFFSET_MINUTES")?;
        let today_sort = read_sort_mode("TRIAGE_TODAY_SORT", "triage")?;
        let history_sort = read_sort_mode("TRIAGE_HISTORY_SORT", "recency")?;

        Ok(Self {
            http_addr,
            database_url,
            db_max_connections,
            store_timeout_ms,
            utc_offset_minutes,
            today_sort,
            history_sort,
        })
    }
}

fn read_u32_with_default(key: &str, default: u32) -> Result<u32, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u32>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

fn read_offset_minutes(key: &str) -> Result<Option<i32>, ConfigError> {
    let Some(value) = read_optional(key) else {
        return Ok(None);
    };
    match value.trim().parse::<i32>() {
        Ok(minutes) if minutes.abs() <= MAX_OFFSET_MINUTES => Ok(Some(minutes)),
        _ => Err(ConfigError::Invalid(key.to_string(), value)),
    }
}

fn read_sort_mode(key: &str, default: &str) -> Result<String, ConfigError> {
    let Some(value) = read_optional(key) else {
        return Ok(default.to_string());
    };
    let normalized = value.trim().to_ascii_lowercase();
    if SORT_MODES.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(ConfigError::Invalid(key.to_string(), value))
    }
}
