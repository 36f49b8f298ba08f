//! 分诊核心的错误分类。
//!
//! 所有失败都以类型化结果返回调用方，核心不做自动重试。

/// 分诊核心错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TriageError {
    /// 读取查询失败（连接错误、过滤条件非法等）。
    #[error("query failed: {0}")]
    QueryFailed(String),
    /// 报修单不存在。
    #[error("report not found: {0}")]
    NotFound(String),
    /// 更新/删除时存储层失败（含超时无响应）。
    #[error("store failure: {0}")]
    StoreFailure(String),
    /// 输入校验失败（日期格式错误、未确认等）。
    #[error("validation error: {0}")]
    Validation(String),
}

impl TriageError {
    /// 面向用户展示的原始消息（不含分类前缀）。
    pub fn message(&self) -> &str {
        match self {
            TriageError::QueryFailed(message)
            | TriageError::NotFound(message)
            | TriageError::StoreFailure(message)
            | TriageError::Validation(message) => message,
        }
    }
}
