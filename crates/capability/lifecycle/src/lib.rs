//! 报修单生命周期
//!
//! 状态机只有一条边 `pending → completed`，`completed` 可重复进入以修改处理说明；
//! 删除为物理删除，与状态无关。两种操作都要求调用方出示 [`Confirmation`]。
//!
//! 成功时返回 [`ReportChange`]，调用方据此同步列表；失败时调用方不得假设状态已变。

mod confirmation;
mod manager;

pub use confirmation::{COMPLETE_WARNING, Confirmation, DELETE_FAILED_NOTICE, DELETE_WARNING};
pub use manager::LifecycleManager;
