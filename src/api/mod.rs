// ==========================================
// 节日烘焙排产系统 - API 层
// ==========================================
// 职责: 提供计划/可行性接口, 供界面层调用
// ==========================================

pub mod error;
pub mod planning_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use planning_api::PlanningApi;
