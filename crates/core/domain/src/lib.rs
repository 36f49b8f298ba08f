//! 报修分诊领域模型：所有模块共享的实体与值对象。
//!
//! - 楼宇层级：[`Building`] ⊃ [`Floor`] ⊃ [`Room`]
//! - 报修单：[`Report`]、[`ReportStatus`]、[`ReportView`]
//! - 查询条件：[`FilterCriteria`]、[`DayWindow`]
//! - 状态变更通知：[`ReportChange`]
//! - 错误分类：[`TriageError`]

pub mod change;
pub mod error;
pub mod filter;
pub mod location;
pub mod report;

pub use change::ReportChange;
pub use error::TriageError;
pub use filter::{DayWindow, DayZone, FilterCriteria, parse_calendar_date};
pub use location::{Building, Floor, LocationPath, Room};
pub use report::{Report, ReportStatus, ReportView};
