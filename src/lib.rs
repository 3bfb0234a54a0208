// ==========================================
// 节日烘焙排产系统 - 核心库
// ==========================================
// 职责: 礼盒 BOM 展开、最小批次计算、配方聚合、组装可行性判定
// 技术栈: Rust + SQLite
// 系统定位: 决策支持 (计划结果为建议, 不修改库存)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 只读数据访问
pub mod repository;

// 引擎层 - 计划规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 界面接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ComponentKind, FeasibilityStatus, RequirementBasis};

// 领域实体
pub use domain::{
    ComponentRef, Composition, Event, EventAssemblyTarget, EventBatchPlan, EventProductionTarget,
    FeasibilityResult, FinishedGood, FinishedUnit, PackagingProduct, Recipe, RecipeBatchResult,
};

// 引擎
pub use engine::{
    BatchCalculator, BundleExplosion, EventPlanner, FeasibilityEngine, InventorySnapshot,
    PlanningContext, PlanningError, RecipeAggregator,
};

// 配置
pub use config::{PlannerConfig, YieldConflictPolicy};

// API
pub use api::{ApiError, PlanningApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "节日烘焙排产系统";
