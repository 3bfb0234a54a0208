// ==========================================
// 节日烘焙排产系统 - 库存读取与外部检查接口
// ==========================================
// 职责: 定义引擎所需的外部协作方 trait，实现依赖倒置
// 说明: Engine 层定义 trait，Repository / 上层服务实现
// 红线: 引擎只读库存, 从不修改
// ==========================================

use crate::domain::catalog::{Composition, FinishedGood, FinishedUnit, Recipe};
use crate::domain::event::{Event, EventAssemblyTarget, EventProductionTarget};
use crate::domain::planning::{AssemblyCheck, ProductionCheck};
use crate::engine::error::PlanningResult;
use crate::repository::error::RepositoryResult;
use rust_decimal::Decimal;

// ==========================================
// InventorySource - 库存/目录只读访问
// ==========================================

/// 库存与目录的时点只读视图
///
/// # 实现者
/// - `InventorySnapshot`: 内存快照
/// - `PlanningRepositories`: SQLite 仓储聚合
///
/// 未找到返回 `Ok(None)` / 空列表, 不视为错误
pub trait InventorySource {
    fn get_recipe(&self, recipe_id: i64) -> RepositoryResult<Option<Recipe>>;

    fn get_finished_unit(&self, unit_id: i64) -> RepositoryResult<Option<FinishedUnit>>;

    fn get_finished_good(&self, good_id: i64) -> RepositoryResult<Option<FinishedGood>>;

    /// 礼盒的直接组成关系
    fn list_compositions(&self, assembly_id: i64) -> RepositoryResult<Vec<Composition>>;

    /// 包装材料现有库存 (未找到返回 None)
    fn packaging_on_hand(&self, packaging_product_id: i64) -> RepositoryResult<Option<Decimal>>;

    fn get_event(&self, event_id: i64) -> RepositoryResult<Option<Event>>;

    fn list_production_targets(&self, event_id: i64) -> RepositoryResult<Vec<EventProductionTarget>>;

    fn list_assembly_targets(&self, event_id: i64) -> RepositoryResult<Vec<EventAssemblyTarget>>;
}

// ==========================================
// 外部检查原语
// ==========================================

/// 配料充足性检查 (生产可行性原语)
///
/// 作为黑盒由 FeasibilityEngine::check_production_feasibility 调用
pub trait IngredientSufficiencyChecker: Send + Sync {
    fn check_can_produce(&self, recipe_id: i64, num_batches: i64) -> PlanningResult<ProductionCheck>;
}

/// 组件充足性检查 (组装可行性原语)
///
/// 传入与引擎相同的库存视图, 保证同一次计算读取同一快照
pub trait ComponentSufficiencyChecker: Send + Sync {
    fn check_can_assemble(
        &self,
        finished_good_id: i64,
        quantity: i64,
        inventory: &dyn InventorySource,
    ) -> PlanningResult<AssemblyCheck>;
}
