use triage_config::{AppConfig, ConfigError};

const KEYS: [&str; 7] = [
    "TRIAGE_HTTP_ADDR",
    "TRIAGE_DATABASE_URL",
    "TRIAGE_DB_MAX_CONNECTIONS",
    "TRIAGE_STORE_TIMEOUT_MS",
    "TRIAGE_UTC_OFFSET_MINUTES",
    "TRIAGE_TODAY_SORT",
    "TRIAGE_HISTORY_SORT",
];

fn clear() {
    for key in KEYS {
        // Rust 2024 中 remove_var 需要显式标注 unsafe（测试进程内可控）。
        unsafe { std::env::remove_var(key) };
    }
}

fn set(key: &str, value: &str) {
    unsafe { std::env::set_var(key, value) };
}

// 环境变量是进程全局状态，全部场景放在同一个测试里顺序执行。
#[test]
fn load_config_from_env() {
    clear();
    let config = AppConfig::from_env().expect("defaults");
    assert_eq!(config.http_addr, "127.0.0.1:8080");
    assert!(config.database_url.is_none());
    assert_eq!(config.db_max_connections, 8);
    assert_eq!(config.store_timeout_ms, 10_000);
    assert!(config.utc_offset_minutes.is_none());
    assert_eq!(config.today_sort, "triage");
    assert_eq!(config.history_sort, "recency");

    set("TRIAGE_HTTP_ADDR", "0.0.0.0:9000");
    set("TRIAGE_DATABASE_URL", "postgres://localhost/triage");
    set("TRIAGE_UTC_OFFSET_MINUTES", "480");
    set("TRIAGE_TODAY_SORT", "Recency");
    let config = AppConfig::from_env().expect("overrides");
    assert_eq!(config.http_addr, "0.0.0.0:9000");
    assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/triage"));
    assert_eq!(config.utc_offset_minutes, Some(480));
    assert_eq!(config.today_sort, "recency");

    set("TRIAGE_HISTORY_SORT", "oldest");
    let err = AppConfig::from_env().expect_err("bad sort");
    assert!(matches!(err, ConfigError::Invalid(key, _) if key == "TRIAGE_HISTORY_SORT"));
    unsafe { std::env::remove_var("TRIAGE_HISTORY_SORT") };

    set("TRIAGE_UTC_OFFSET_MINUTES", "1440");
    assert!(AppConfig::from_env().is_err());
    set("TRIAGE_UTC_OFFSET_MINUTES", "-330");

    set("TRIAGE_STORE_TIMEOUT_MS", "soon");
    assert!(AppConfig::from_env().is_err());
    clear();
}
