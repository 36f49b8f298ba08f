//! # Triage Storage 模块
//!
//! 本模块提供分诊核心依赖的存储适配器契约及其实现。
//!
//! ## 架构设计
//!
//! 1. **表目录层** (`models.rs`)：表、列及其类型；行即 JSON 对象
//! 2. **请求层** (`request.rs`)：读请求（表 + join 链 + 谓词 + 排序）与部分字段更新
//! 3. **接口抽象层** (`traits.rs`)：`RecordStore` 的 select/update/delete
//! 4. **验证辅助层** (`validation.rs`)：请求在执行前按表目录校验
//! 5. **错误处理层** (`error.rs`)：统一的存储错误类型（含超时标记）
//! 6. **连接管理层** (`connection.rs`)：数据库连接池管理
//! 7. **实现层**：
//!    - `in_memory/`：内存存储实现（用于测试和演示）
//!    - `postgres/`：PostgreSQL 存储实现（生产环境使用）
//!    - `timeout.rs`：为任意实现加上单次请求超时
//!
//! ## 关联读取
//!
//! 报修单只持有 `room_id` 一个外键，楼层与楼宇通过 join 链
//! `reports → rooms → floors → buildings` 逐层嵌套取回：
//!
//! ```json
//! { "id": "report-1", "room_id": "r-1",
//!   "room": { "id": "r-1", "floor": { "id": "f-1", "building": { "id": "b-1" } } } }
//! ```
//!
//! 关联缺失时对应层为 `null`；引用缺失层的谓词不成立。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use triage_storage::{InMemoryRecordStore, RecordStore, SelectRequest, Table};
//!
//! let store = InMemoryRecordStore::new();
//! let rows = store.select(&SelectRequest::from_table(Table::Buildings)).await?;
//! ```

// 模块导出：将子模块的内容导出到 crate 根目录
pub mod connection;
pub mod error;
pub mod in_memory;
pub mod models;
pub mod postgres;
pub mod request;
pub mod timeout;
pub mod traits;
pub mod validation;

// 导出常用类型到 crate 根目录，方便外部引用
pub use connection::*;
pub use error::*;
pub use models::*;
pub use request::*;
pub use timeout::TimeoutStore;
pub use traits::*;
pub use validation::*;

// 导出存储实现类型
pub use in_memory::{InMemoryRecordStore, seed_demo};
pub use postgres::PgRecordStore;
