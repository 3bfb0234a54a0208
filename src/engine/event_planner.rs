// ==========================================
// 节日烘焙排产系统 - 活动排产编排
// ==========================================
// 职责: 活动组装目标 → 成品单元需求 → 配方批次方案
// 流程: BundleExplosion (逐目标展开求和) → 可选扣减库存 → RecipeAggregator
// ==========================================

use crate::config::planner_config::PlannerConfig;
use crate::domain::planning::EventBatchPlan;
use crate::domain::types::RequirementBasis;
use crate::engine::bundle_explosion::BundleExplosion;
use crate::engine::context::PlanningContext;
use crate::engine::error::{PlanningError, PlanningResult};
use crate::engine::inventory::InventorySource;
use crate::engine::recipe_aggregator::RecipeAggregator;
use crate::repository::error::RepositoryError;
use chrono::Utc;
use std::collections::BTreeMap;

// ==========================================
// EventPlanner - 活动排产编排器
// ==========================================
pub struct EventPlanner {
    explosion: BundleExplosion,
    aggregator: RecipeAggregator,
}

impl EventPlanner {
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            explosion: BundleExplosion::new(),
            aggregator: RecipeAggregator::new(config),
        }
    }

    /// 汇总活动所有组装目标的成品单元需求
    ///
    /// 每个目标单独展开后按成品单元求和; 无组装目标返回空映射
    /// 求和溢出 → InvalidArgument(field=target_quantity)
    pub fn explode_event_requirements(
        &self,
        ctx: &PlanningContext,
        event_id: i64,
        inventory: &dyn InventorySource,
    ) -> PlanningResult<BTreeMap<i64, i64>> {
        let span = ctx.child_span("explode_event_requirements");
        let _guard = span.enter();

        let mut totals: BTreeMap<i64, i64> = BTreeMap::new();
        for target in inventory.list_assembly_targets(event_id)? {
            let exploded = self.explosion.explode_bundle_requirements(
                ctx,
                target.finished_good_id,
                target.target_quantity,
                inventory,
            )?;
            for (unit_id, quantity) in exploded {
                let total = totals.entry(unit_id).or_insert(0);
                *total = total.checked_add(quantity).ok_or_else(|| {
                    PlanningError::invalid_argument(
                        "target_quantity",
                        format!("活动 {} 成品单元 {} 需求量求和溢出", event_id, unit_id),
                    )
                })?;
            }
        }

        tracing::debug!(event_id, unit_kinds = totals.len(), "活动需求展开完成");
        Ok(totals)
    }

    /// 生成活动批次方案
    ///
    /// # 参数
    /// - `basis`: Gross 按毛需求排产; NetOfInventory 先扣减成品单元现有库存
    ///   (扣减后不小于 0, 已被库存覆盖的单元不再排产)
    ///
    /// # 错误
    /// - 活动不存在 → Repository(NotFound)
    pub fn plan_event_batches(
        &self,
        ctx: &PlanningContext,
        event_id: i64,
        basis: RequirementBasis,
        inventory: &dyn InventorySource,
    ) -> PlanningResult<EventBatchPlan> {
        let span = ctx.child_span("plan_event_batches");
        let _guard = span.enter();

        let event = inventory.get_event(event_id)?.ok_or_else(|| {
            PlanningError::Repository(RepositoryError::NotFound {
                entity: "Event".to_string(),
                id: event_id.to_string(),
            })
        })?;

        let gross = self.explode_event_requirements(ctx, event_id, inventory)?;
        let unit_requirements = match basis {
            RequirementBasis::Gross => gross,
            RequirementBasis::NetOfInventory => {
                let mut net = BTreeMap::new();
                for (unit_id, quantity) in gross {
                    let on_hand = inventory
                        .get_finished_unit(unit_id)?
                        .map(|u| u.inventory_count.max(0))
                        .unwrap_or(0);
                    let remaining = (quantity - on_hand).max(0);
                    if remaining > 0 {
                        net.insert(unit_id, remaining);
                    }
                }
                net
            }
        };

        let recipe_batches = self
            .aggregator
            .aggregate_by_recipe(ctx, &unit_requirements, inventory)?;
        let total_batches = recipe_batches
            .iter()
            .try_fold(0i64, |acc, r| acc.checked_add(r.batches))
            .ok_or_else(|| {
                PlanningError::invalid_argument("total_batches", "活动总批次数溢出")
            })?;

        tracing::info!(
            event_id,
            basis = %basis,
            recipes = recipe_batches.len(),
            total_batches,
            "活动批次方案已生成"
        );

        Ok(EventBatchPlan {
            event_id,
            event_name: event.name,
            basis,
            unit_requirements,
            recipe_batches,
            total_batches,
            generated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{ComponentRef, Composition, FinishedUnit};
    use crate::domain::event::{Event, EventAssemblyTarget};
    use crate::engine::snapshot::InventorySnapshot;
    use rust_decimal::Decimal;

    const EVENT: i64 = 7;
    const COOKIE: i64 = 1;
    const BROWNIE: i64 = 2;
    const BAG: i64 = 10;
    const TIN: i64 = 11;

    fn unit(id: i64, items_per_batch: i64, inventory_count: i64) -> FinishedUnit {
        FinishedUnit {
            id,
            display_name: format!("unit-{}", id),
            recipe_id: id,
            items_per_batch,
            inventory_count,
        }
    }

    fn inventory() -> InventorySnapshot {
        InventorySnapshot::new()
            .with_recipe(COOKIE, "曲奇")
            .with_recipe(BROWNIE, "布朗尼")
            .with_finished_unit(unit(COOKIE, 24, 10))
            .with_finished_unit(unit(BROWNIE, 16, 100))
            .with_finished_good(BAG, "礼品袋", 0)
            .with_finished_good(TIN, "礼品罐", 0)
            .with_composition(Composition::new(BAG, ComponentRef::FinishedUnit(COOKIE), Decimal::from(3)))
            .with_composition(Composition::new(BAG, ComponentRef::FinishedUnit(BROWNIE), Decimal::from(2)))
            .with_composition(Composition::new(TIN, ComponentRef::FinishedUnit(COOKIE), Decimal::from(6)))
            .with_event(Event {
                id: EVENT,
                name: "圣诞礼品季".to_string(),
                event_date: None,
            })
            .with_assembly_target(EventAssemblyTarget {
                event_id: EVENT,
                finished_good_id: BAG,
                target_quantity: 10,
            })
            .with_assembly_target(EventAssemblyTarget {
                event_id: EVENT,
                finished_good_id: TIN,
                target_quantity: 5,
            })
    }

    #[test]
    fn test_explode_event_sums_targets() {
        let ctx = PlanningContext::for_event("test", EVENT);
        let totals = EventPlanner::new(&PlannerConfig::default())
            .explode_event_requirements(&ctx, EVENT, &inventory())
            .unwrap();
        assert_eq!(totals.get(&COOKIE), Some(&60)); // 30 + 30
        assert_eq!(totals.get(&BROWNIE), Some(&20));
    }

    #[test]
    fn test_plan_gross() {
        let ctx = PlanningContext::for_event("test", EVENT);
        let plan = EventPlanner::new(&PlannerConfig::default())
            .plan_event_batches(&ctx, EVENT, RequirementBasis::Gross, &inventory())
            .unwrap();
        assert_eq!(plan.event_name, "圣诞礼品季");
        assert_eq!(plan.recipe_batches.len(), 2);
        // 曲奇 60 / 24 → 3 批; 布朗尼 20 / 16 → 2 批
        assert_eq!(plan.total_batches, 5);
    }

    #[test]
    fn test_plan_net_of_inventory_drops_covered_units() {
        let ctx = PlanningContext::for_event("test", EVENT);
        let plan = EventPlanner::new(&PlannerConfig::default())
            .plan_event_batches(&ctx, EVENT, RequirementBasis::NetOfInventory, &inventory())
            .unwrap();
        assert_eq!(plan.unit_requirements.get(&COOKIE), Some(&50));
        assert!(!plan.unit_requirements.contains_key(&BROWNIE));
        assert_eq!(plan.recipe_batches.len(), 1);
        assert_eq!(plan.total_batches, 3);
    }

    #[test]
    fn test_explode_event_sum_overflow_is_invalid_argument() {
        // 两个目标各自展开不溢出, 合计超出 i64
        let inventory = inventory()
            .with_finished_good(20, "单曲奇袋", 0)
            .with_composition(Composition::new(20, ComponentRef::FinishedUnit(COOKIE), Decimal::from(1)))
            .with_assembly_target(EventAssemblyTarget {
                event_id: EVENT,
                finished_good_id: 20,
                target_quantity: i64::MAX,
            });
        let ctx = PlanningContext::for_event("test", EVENT);
        let err = EventPlanner::new(&PlannerConfig::default())
            .explode_event_requirements(&ctx, EVENT, &inventory)
            .unwrap_err();
        match err {
            PlanningError::InvalidArgument { field, .. } => assert_eq!(field, "target_quantity"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_plan_unknown_event() {
        let ctx = PlanningContext::new("test");
        let err = EventPlanner::new(&PlannerConfig::default())
            .plan_event_batches(&ctx, 404, RequirementBasis::Gross, &inventory())
            .unwrap_err();
        assert!(matches!(
            err,
            PlanningError::Repository(RepositoryError::NotFound { .. })
        ));
    }
}
