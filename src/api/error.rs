// ==========================================
// 节日烘焙排产系统 - API层错误类型
// ==========================================
// 职责: 将引擎/仓储错误转换为界面可展示的错误类别
// 约定: 只有配置类 (产量/参数) 与数据完整性错误会阻断计划;
//       未找到与可行性降级从不阻断
// ==========================================

use crate::engine::error::PlanningError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 阻断类错误
    // ==========================================
    /// 参数/配置错误 (例如产量为 0)
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 数据完整性错误 (BOM 循环、产量冲突、组成关系行损坏)
    #[error("数据完整性错误: {0}")]
    DataIntegrity(String),

    // ==========================================
    // 非阻断类错误
    // ==========================================
    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("外部检查失败: {0}")]
    ExternalCheckFailed(String),

    // ==========================================
    // 基础设施错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("配置加载失败: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 是否阻断计划流程 (界面需要用户先修正数据/配置)
    pub fn is_blocking(&self) -> bool {
        matches!(self, ApiError::InvalidInput(_) | ApiError::DataIntegrity(_))
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),

            // 数据质量错误
            RepositoryError::ValidationError(msg) => ApiError::DataIntegrity(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::DataIntegrity(format!("字段{}错误: {}", field, message))
            }

            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// 从 PlanningError 转换
// ==========================================
impl From<PlanningError> for ApiError {
    fn from(err: PlanningError) -> Self {
        match err {
            PlanningError::InvalidArgument { field, message } => {
                ApiError::InvalidInput(format!("{}: {}", field, message))
            }
            PlanningError::CircularComposition { assembly_id, path } => ApiError::DataIntegrity(
                format!("礼盒 {} 的组成关系存在循环: {:?}", assembly_id, path),
            ),
            PlanningError::AmbiguousYield { recipe_id, yields } => ApiError::DataIntegrity(
                format!("配方 {} 下成品单元产量不一致: {:?}", recipe_id, yields),
            ),
            PlanningError::Collaborator(msg) => ApiError::ExternalCheckFailed(msg),
            PlanningError::Repository(err) => err.into(),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
