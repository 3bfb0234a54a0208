// ==========================================
// 节日烘焙排产系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、计算结果
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod catalog;
pub mod event;
pub mod planning;
pub mod types;

// 重导出核心类型
pub use catalog::{ComponentRef, Composition, FinishedGood, FinishedUnit, PackagingProduct, Recipe};
pub use event::{Event, EventAssemblyTarget, EventProductionTarget};
pub use planning::{
    AssemblyCheck, EventBatchPlan, FeasibilityResult, MissingComponent, MissingIngredient,
    ProductionCheck, ProductionFeasibilityResult, RecipeBatchResult,
};
pub use types::{ComponentKind, FeasibilityStatus, RequirementBasis};
