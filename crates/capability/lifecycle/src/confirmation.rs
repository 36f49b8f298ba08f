use domain::TriageError;

/// 删除前向用户展示的确认提示。
pub const DELETE_WARNING: &str = "Are you sure you want to remove this report?";

/// 标记完成前向用户展示的确认提示。
pub const COMPLETE_WARNING: &str = "Mark this report as completed?";

/// 删除失败时向用户展示的提示。
pub const DELETE_FAILED_NOTICE: &str = "Failed to delete report. Please try again.";

/// 用户已确认操作的凭证，只能由明确的确认结果构造。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation(());

impl Confirmation {
    pub fn from_user(confirmed: bool) -> Result<Self, TriageError> {
        if confirmed {
            Ok(Self(()))
        } else {
            Err(TriageError::Validation("confirmation required".to_string()))
        }
    }
}
