// ==========================================
// 节日烘焙排产系统 - 引擎层
// ==========================================
// 职责: 批次计算、BOM 展开、配方聚合、可行性判定
// 红线: Engine 不拼 SQL, 只通过 InventorySource 读取库存
// 红线: Engine 只读, 从不修改库存
// ==========================================

pub mod batch_calculator;
pub mod bundle_explosion;
pub mod component_checker;
pub mod context;
pub mod error;
pub mod event_planner;
pub mod feasibility;
pub mod inventory;
pub mod recipe_aggregator;
pub mod repositories;
pub mod snapshot;

// 重导出核心引擎
pub use batch_calculator::BatchCalculator;
pub use bundle_explosion::BundleExplosion;
pub use component_checker::InventoryComponentChecker;
pub use context::PlanningContext;
pub use error::{PlanningError, PlanningResult};
pub use event_planner::EventPlanner;
pub use feasibility::FeasibilityEngine;
pub use inventory::{ComponentSufficiencyChecker, IngredientSufficiencyChecker, InventorySource};
pub use recipe_aggregator::RecipeAggregator;
pub use repositories::PlanningRepositories;
pub use snapshot::InventorySnapshot;
