// ==========================================
// 节日烘焙排产系统 - 引擎层错误类型
// ==========================================
// 说明: "未找到" 与空输入不属于错误, 引擎降级为零结果
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum PlanningError {
    // ===== 配置/数据错误 (不可在本地恢复) =====
    #[error("参数无效 (field={field}): {message}")]
    InvalidArgument { field: String, message: String },

    #[error("BOM 存在循环引用: assembly_id={assembly_id}, path={path:?}")]
    CircularComposition { assembly_id: i64, path: Vec<i64> },

    #[error("配方产量不一致: recipe_id={recipe_id}, yields={yields:?}")]
    AmbiguousYield { recipe_id: i64, yields: Vec<i64> },

    // ===== 外部协作方错误 =====
    #[error("外部检查失败: {0}")]
    Collaborator(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl PlanningError {
    pub fn invalid_argument(field: &str, message: impl Into<String>) -> Self {
        PlanningError::InvalidArgument {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result 类型别名
pub type PlanningResult<T> = Result<T, PlanningError>;
