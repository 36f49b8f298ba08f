//! # PostgreSQL 存储实现模块
//!
//! 本模块提供存储适配器接口的 PostgreSQL 实现，用于生产环境。
//!
//! ## 设计原则
//!
//! 1. **参数化查询**：所有值通过参数绑定（`$1`, `$2` 等）传入
//! 2. **静态列名**：拼进 SQL 的表名和列名只来自静态表目录，并在执行前校验
//! 3. **join 链**：按 `left join` 逐层关联，结果按嵌套对象还原
//! 4. **连接池管理**：连接数与获取超时来自配置
//!
//! ## 数据库模式要求
//!
//! 见 `migrations/0001_init.sql`：
//! - `buildings`（id, name）
//! - `floors`（id, floor_name, building_id → buildings.id）
//! - `rooms`（id, room_name, floor_id → floors.id）
//! - `reports`（id, name, equipment, description, action_taken, created_at, status, room_id → rooms.id）
//!
//! ## 错误处理
//!
//! 所有操作返回 `Result<T, StorageError>`，`sqlx::Error` 自动转换；
//! 获取连接超时转换为带超时标记的 `StorageError`。

pub mod store;

pub use store::*;
