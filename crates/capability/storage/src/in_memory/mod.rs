//! 内存存储实现模块
//!
//! 仅用于本地演示和测试。
//!
//! 包含以下实现：
//! - RecordStore: InMemoryRecordStore
//! - 演示数据：seed_demo

pub mod seed;
pub mod store;

pub use seed::*;
pub use store::*;
