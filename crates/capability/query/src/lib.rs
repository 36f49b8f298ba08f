//! 报修单查询组合器
//!
//! - [`ReportQueryComposer`]：把 [`ReportQuery`]（筛选条件 + 状态范围 + 排序方式）
//!   翻译成一次存储读请求，并把结果行解码为带层级路径的 [`domain::ReportView`]
//! - [`SortMode`]：`Recency`（创建时间倒序）与 `Triage`（未处理优先）
//! - [`ReportBoard`]：调用方持有的列表状态，按 [`QueryTicket`] 丢弃过期响应

pub mod board;
pub mod composer;
mod decode;
pub mod mode;

pub use board::{QuerySequencer, QueryTicket, ReportBoard};
pub use composer::{ReportQuery, ReportQueryComposer, report_location_join};
pub use mode::{SortMode, sort_reports};
