// ==========================================
// 节日烘焙排产系统 - 可行性引擎
// ==========================================
// 职责: 活动生产/组装目标的可行性判定与四态分类
// 输入: 活动目标 + 库存视图 + 外部检查原语
// 输出: ProductionFeasibilityResult / FeasibilityResult
// 红线: 0 <= can_assemble <= target_quantity
// 红线: 未找到的礼盒/目标不报错, 降级为 can_assemble = 0
// 说明: 结果为建议性质, 不是事务保证 (检查与实际消耗之间库存可能变化)
// ==========================================

use crate::config::planner_config::PlannerConfig;
use crate::domain::catalog::{ComponentRef, Composition, FinishedGood};
use crate::domain::planning::{FeasibilityResult, ProductionFeasibilityResult};
use crate::domain::types::FeasibilityStatus;
use crate::engine::context::PlanningContext;
use crate::engine::error::PlanningResult;
use crate::engine::inventory::{
    ComponentSufficiencyChecker, IngredientSufficiencyChecker, InventorySource,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::sync::Arc;

// ==========================================
// FeasibilityEngine - 可行性引擎
// ==========================================
pub struct FeasibilityEngine {
    config: PlannerConfig,
    ingredient_checker: Arc<dyn IngredientSufficiencyChecker>,
    component_checker: Arc<dyn ComponentSufficiencyChecker>,
}

impl FeasibilityEngine {
    /// 构造函数
    ///
    /// # 参数
    /// - `config`: 计划引擎配置 (包装是否参与最大可组装数计算)
    /// - `ingredient_checker`: 配料充足性检查 (外部)
    /// - `component_checker`: 组件充足性检查
    pub fn new(
        config: PlannerConfig,
        ingredient_checker: Arc<dyn IngredientSufficiencyChecker>,
        component_checker: Arc<dyn ComponentSufficiencyChecker>,
    ) -> Self {
        Self {
            config,
            ingredient_checker,
            component_checker,
        }
    }

    // ==========================================
    // 生产可行性
    // ==========================================

    /// 检查活动所有生产目标的配料可行性
    ///
    /// 纯扇出: 逐个目标调用外部配料检查, 透传结果与缺料清单
    pub fn check_production_feasibility(
        &self,
        ctx: &PlanningContext,
        event_id: i64,
        inventory: &dyn InventorySource,
    ) -> PlanningResult<Vec<ProductionFeasibilityResult>> {
        let span = ctx.child_span("check_production_feasibility");
        let _guard = span.enter();

        let targets = inventory.list_production_targets(event_id)?;
        let mut results = Vec::with_capacity(targets.len());

        for target in targets {
            let recipe_name = inventory
                .get_recipe(target.recipe_id)?
                .map(|r| r.name)
                .unwrap_or_default();

            ctx.record_external_check();
            let check = self
                .ingredient_checker
                .check_can_produce(target.recipe_id, target.target_batches)?;

            tracing::debug!(
                recipe_id = target.recipe_id,
                target_batches = target.target_batches,
                can_produce = check.can_produce,
                missing = check.missing.len(),
                "生产目标检查完成"
            );

            results.push(ProductionFeasibilityResult {
                recipe_id: target.recipe_id,
                recipe_name,
                target_batches: target.target_batches,
                can_produce: check.can_produce,
                missing: check.missing,
            });
        }

        Ok(results)
    }

    // ==========================================
    // 组装可行性
    // ==========================================

    /// 检查活动所有组装目标的可行性
    pub fn check_assembly_feasibility(
        &self,
        ctx: &PlanningContext,
        event_id: i64,
        inventory: &dyn InventorySource,
    ) -> PlanningResult<Vec<FeasibilityResult>> {
        let span = ctx.child_span("check_assembly_feasibility");
        let _guard = span.enter();

        let targets = inventory.list_assembly_targets(event_id)?;
        let mut results = Vec::with_capacity(targets.len());

        for target in targets {
            let result = match inventory.get_finished_good(target.finished_good_id)? {
                Some(good) => self.evaluate(ctx, &good, target.target_quantity, inventory)?,
                None => {
                    tracing::warn!(
                        event_id,
                        finished_good_id = target.finished_good_id,
                        "组装目标引用的礼盒不存在"
                    );
                    FeasibilityResult::not_found(
                        target.finished_good_id,
                        target.target_quantity.max(0),
                    )
                }
            };
            results.push(result);
        }

        let partial = results
            .iter()
            .filter(|r| r.status != FeasibilityStatus::CanAssemble)
            .count();
        tracing::info!(
            event_id,
            targets = results.len(),
            not_fully_assemblable = partial,
            "组装可行性检查完成"
        );
        Ok(results)
    }

    /// 检查单个礼盒的组装可行性
    ///
    /// 礼盒不存在时返回 CANNOT_ASSEMBLE 结果 (而非错误)
    pub fn check_single_assembly_feasibility(
        &self,
        ctx: &PlanningContext,
        finished_good_id: i64,
        quantity: i64,
        inventory: &dyn InventorySource,
    ) -> PlanningResult<FeasibilityResult> {
        let span = ctx.child_span("check_single_assembly_feasibility");
        let _guard = span.enter();

        match inventory.get_finished_good(finished_good_id)? {
            Some(good) => self.evaluate(ctx, &good, quantity, inventory),
            None => {
                tracing::debug!(finished_good_id, "礼盒不存在, 降级为 CANNOT_ASSEMBLE");
                Ok(FeasibilityResult::not_found(finished_good_id, quantity.max(0)))
            }
        }
    }

    /// 计算最多可组装数量
    ///
    /// # 规则
    /// 1) 外部全量检查通过 → 直接返回 target (多余库存不抬高结果)
    /// 2) 否则逐条直接组成关系取 floor(可用量 / 单件用量) 的最小值
    ///    - 成品单元: 单元库存
    ///    - 嵌套礼盒: 嵌套礼盒库存 (只看一层, 不展开)
    ///    - 包装: 默认不参与; packaging_limits_assembly 开启时按现有库存参与
    ///    - 通用物料 / 单件用量非正: 跳过
    /// 3) 结果限制在 [0, target]; 无组成关系返回 0
    pub fn calculate_max_assemblable(
        &self,
        ctx: &PlanningContext,
        finished_good_id: i64,
        target_quantity: i64,
        inventory: &dyn InventorySource,
    ) -> PlanningResult<i64> {
        let span = ctx.child_span("calculate_max_assemblable");
        let _guard = span.enter();

        let target = target_quantity.max(0);
        ctx.record_external_check();
        let full_check = self
            .component_checker
            .check_can_assemble(finished_good_id, target, inventory)?;
        let compositions = inventory.list_compositions(finished_good_id)?;

        self.max_assemblable(ctx, target, full_check.can_assemble, &compositions, inventory)
    }

    // ==========================================
    // 内部实现
    // ==========================================

    /// 单个礼盒: 全量检查 → 最大可组装数 → 四态分类
    fn evaluate(
        &self,
        ctx: &PlanningContext,
        good: &FinishedGood,
        target_quantity: i64,
        inventory: &dyn InventorySource,
    ) -> PlanningResult<FeasibilityResult> {
        let target = target_quantity.max(0);

        ctx.record_external_check();
        let full_check = self
            .component_checker
            .check_can_assemble(good.id, target, inventory)?;
        let compositions = inventory.list_compositions(good.id)?;

        let can_assemble =
            self.max_assemblable(ctx, target, full_check.can_assemble, &compositions, inventory)?;

        let has_zero_stock_unit = if can_assemble == 0 && target > 0 {
            self.has_zero_stock_unit(&compositions, inventory)?
        } else {
            false
        };
        let status = FeasibilityStatus::classify(can_assemble, target, has_zero_stock_unit);

        tracing::debug!(
            finished_good_id = good.id,
            target,
            can_assemble,
            status = %status,
            "礼盒可行性已分类"
        );

        Ok(FeasibilityResult {
            finished_good_id: good.id,
            finished_good_name: good.display_name.clone(),
            target_quantity: target,
            can_assemble,
            status,
            missing_components: full_check.missing,
        })
    }

    fn max_assemblable(
        &self,
        ctx: &PlanningContext,
        target: i64,
        full_check_passed: bool,
        compositions: &[Composition],
        inventory: &dyn InventorySource,
    ) -> PlanningResult<i64> {
        if full_check_passed {
            return Ok(target);
        }
        if compositions.is_empty() {
            return Ok(0);
        }

        let mut max_assemblable = target;
        for composition in compositions {
            ctx.record_composition_visit();

            if composition.component_quantity <= Decimal::ZERO {
                continue;
            }

            let available = match composition.component {
                ComponentRef::FinishedUnit(unit_id) => Decimal::from(
                    inventory
                        .get_finished_unit(unit_id)?
                        .map(|u| u.inventory_count)
                        .unwrap_or(0),
                ),
                ComponentRef::NestedBundle(good_id) => Decimal::from(
                    inventory
                        .get_finished_good(good_id)?
                        .map(|g| g.inventory_count)
                        .unwrap_or(0),
                ),
                ComponentRef::Packaging(product_id) if self.config.packaging_limits_assembly => {
                    inventory
                        .packaging_on_hand(product_id)?
                        .unwrap_or(Decimal::ZERO)
                }
                ComponentRef::Packaging(_) | ComponentRef::GenericMaterial(_) => continue,
            };

            let component_max = available
                .checked_div(composition.component_quantity)
                .and_then(|n| n.floor().to_i64())
                .unwrap_or(i64::MAX);
            max_assemblable = max_assemblable.min(component_max);
        }

        Ok(max_assemblable.clamp(0, target))
    }

    /// 是否存在零库存的成品单元组件 (生产尚未发生)
    fn has_zero_stock_unit(
        &self,
        compositions: &[Composition],
        inventory: &dyn InventorySource,
    ) -> PlanningResult<bool> {
        for composition in compositions {
            if let ComponentRef::FinishedUnit(unit_id) = composition.component {
                let stock = inventory
                    .get_finished_unit(unit_id)?
                    .map(|u| u.inventory_count)
                    .unwrap_or(0);
                if stock <= 0 {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}
