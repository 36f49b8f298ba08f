//! 报修分诊管理 API：今日列表、历史筛选、标记完成、删除，以及楼宇层级下拉数据。

mod handlers;
mod middleware;
mod routes;
mod selection;
mod utils;

use chrono::{FixedOffset, Utc};
use domain::DayZone;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::info;
use triage_config::AppConfig;
use triage_lifecycle::LifecycleManager;
use triage_query::{ReportQueryComposer, SortMode};
use triage_storage::{
    InMemoryRecordStore, PgRecordStore, PoolSettings, RecordStore, TimeoutStore, seed_demo,
};
use triage_telemetry::init_tracing;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub composer: ReportQueryComposer,
    pub lifecycle: LifecycleManager,
    /// `/reports/today` 未指定 mode 时的排序
    pub today_sort: SortMode,
    /// `/reports` 未指定 mode 时的排序
    pub history_sort: SortMode,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        zone: DayZone,
        today_sort: SortMode,
        history_sort: SortMode,
    ) -> Self {
        Self {
            composer: ReportQueryComposer::new(store.clone(), zone),
            lifecycle: LifecycleManager::new(store.clone()),
            store,
            today_sort,
            history_sort,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    let store = build_store(&config).await?;
    // 未配置偏移时按进程所在时区逐日解析（含夏令时）
    let zone = match config.utc_offset_minutes {
        Some(minutes) => {
            DayZone::Fixed(FixedOffset::east_opt(minutes * 60).ok_or("invalid utc offset")?)
        }
        None => DayZone::Local,
    };
    let today_sort: SortMode = config.today_sort.parse()?;
    let history_sort: SortMode = config.history_sort.parse()?;
    let state = AppState::new(store, zone, today_sort, history_sort);

    let app = routes::build_app(state).layer(TraceLayer::new_for_http());

    info!(
        target: "triage.api",
        addr = %config.http_addr,
        day_zone = %zone,
        "triage_api_listening"
    );
    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// 配置了数据库时使用 Postgres，否则使用带演示数据的内存存储；
/// 两者都套上单次请求超时。
async fn build_store(
    config: &AppConfig,
) -> Result<Arc<dyn RecordStore>, Box<dyn std::error::Error>> {
    let budget = Duration::from_millis(config.store_timeout_ms);
    let inner: Arc<dyn RecordStore> = match &config.database_url {
        Some(database_url) => {
            let settings = PoolSettings {
                max_connections: config.db_max_connections,
                acquire_timeout: budget,
            };
            info!(
                target: "triage.api",
                max_connections = settings.max_connections,
                "store_postgres"
            );
            Arc::new(PgRecordStore::connect(database_url, settings).await?)
        }
        None => {
            let store = InMemoryRecordStore::new();
            seed_demo(&store, Utc::now())?;
            info!(target: "triage.api", "store_in_memory_demo");
            Arc::new(store)
        }
    };
    Ok(Arc::new(TimeoutStore::new(inner, budget)))
}
