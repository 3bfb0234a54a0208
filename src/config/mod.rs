// ==========================================
// 节日烘焙排产系统 - 配置层
// ==========================================
// 职责: 计划引擎配置管理
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod planner_config;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use planner_config::{PlannerConfig, YieldConflictPolicy};
