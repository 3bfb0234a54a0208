// ==========================================
// 节日烘焙排产系统 - 配方聚合引擎
// ==========================================
// 职责: 按配方合并成品单元需求, 为每个配方生成批次结果
// 输入: finished_unit_id → 需求数量
// 输出: 每个配方一条 RecipeBatchResult (按首次出现顺序)
// 红线: 结果继承 BatchCalculator 的零短缺保证
// ==========================================

use crate::config::planner_config::{PlannerConfig, YieldConflictPolicy};
use crate::domain::planning::RecipeBatchResult;
use crate::engine::batch_calculator::BatchCalculator;
use crate::engine::context::PlanningContext;
use crate::engine::error::{PlanningError, PlanningResult};
use crate::engine::inventory::InventorySource;
use crate::repository::error::RepositoryError;
use std::collections::{BTreeMap, HashMap};

/// 单个配方的聚合中间态
struct RecipeGroup {
    recipe_id: i64,
    units_needed: i64,
    yield_per_batch: i64,
    yields_seen: Vec<i64>,
}

// ==========================================
// RecipeAggregator - 配方聚合引擎
// ==========================================
pub struct RecipeAggregator {
    yield_conflict_policy: YieldConflictPolicy,
}

impl RecipeAggregator {
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            yield_conflict_policy: config.yield_conflict_policy,
        }
    }

    /// 按配方聚合成品单元需求
    ///
    /// # 规则
    /// - 共用同一配方的成品单元 (例如大小两种曲奇) 需求量求和
    /// - 组内 items_per_batch 不一致时按 yield_conflict_policy 处理:
    ///   FirstEncountered 取首个并告警, Reject 返回 AmbiguousYield
    ///
    /// # 错误
    /// - 成品单元不存在 → Repository(NotFound), 需求不可静默丢弃
    /// - 产量非正 → InvalidArgument (来自 BatchCalculator)
    /// - 同配方需求量求和溢出 → InvalidArgument(field=units_needed)
    pub fn aggregate_by_recipe(
        &self,
        ctx: &PlanningContext,
        unit_quantities: &BTreeMap<i64, i64>,
        inventory: &dyn InventorySource,
    ) -> PlanningResult<Vec<RecipeBatchResult>> {
        let span = ctx.child_span("aggregate_by_recipe");
        let _guard = span.enter();

        let mut groups: Vec<RecipeGroup> = Vec::new();
        let mut index_by_recipe: HashMap<i64, usize> = HashMap::new();

        for (&unit_id, &quantity) in unit_quantities {
            let unit = inventory.get_finished_unit(unit_id)?.ok_or_else(|| {
                PlanningError::Repository(RepositoryError::NotFound {
                    entity: "FinishedUnit".to_string(),
                    id: unit_id.to_string(),
                })
            })?;

            match index_by_recipe.get(&unit.recipe_id) {
                Some(&idx) => {
                    let group = &mut groups[idx];
                    group.units_needed =
                        group.units_needed.checked_add(quantity).ok_or_else(|| {
                            PlanningError::invalid_argument(
                                "units_needed",
                                format!("配方 {} 需求量求和溢出", unit.recipe_id),
                            )
                        })?;
                    if !group.yields_seen.contains(&unit.items_per_batch) {
                        group.yields_seen.push(unit.items_per_batch);
                    }
                }
                None => {
                    index_by_recipe.insert(unit.recipe_id, groups.len());
                    groups.push(RecipeGroup {
                        recipe_id: unit.recipe_id,
                        units_needed: quantity,
                        yield_per_batch: unit.items_per_batch,
                        yields_seen: vec![unit.items_per_batch],
                    });
                }
            }
        }

        let mut results = Vec::with_capacity(groups.len());
        for group in groups {
            if group.yields_seen.len() > 1 {
                match self.yield_conflict_policy {
                    YieldConflictPolicy::Reject => {
                        return Err(PlanningError::AmbiguousYield {
                            recipe_id: group.recipe_id,
                            yields: group.yields_seen,
                        });
                    }
                    YieldConflictPolicy::FirstEncountered => {
                        tracing::warn!(
                            recipe_id = group.recipe_id,
                            yields = ?group.yields_seen,
                            chosen = group.yield_per_batch,
                            "同一配方下成品单元产量不一致, 采用首个产量"
                        );
                    }
                }
            }

            let recipe_name = inventory
                .get_recipe(group.recipe_id)?
                .map(|r| r.name)
                .unwrap_or_else(|| format!("Recipe {}", group.recipe_id));

            let result = BatchCalculator::create_batch_result(
                group.recipe_id,
                &recipe_name,
                group.units_needed,
                group.yield_per_batch,
            )?;

            tracing::debug!(
                recipe_id = result.recipe_id,
                units_needed = result.units_needed,
                batches = result.batches,
                waste_units = result.waste_units,
                "配方批次已计算"
            );
            results.push(result);
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::FinishedUnit;
    use crate::engine::snapshot::InventorySnapshot;

    const DOUGH: i64 = 1;
    const BROWNIE_RECIPE: i64 = 2;

    fn unit(id: i64, recipe_id: i64, items_per_batch: i64) -> FinishedUnit {
        FinishedUnit {
            id,
            display_name: format!("unit-{}", id),
            recipe_id,
            items_per_batch,
            inventory_count: 0,
        }
    }

    fn inventory() -> InventorySnapshot {
        InventorySnapshot::new()
            .with_recipe(DOUGH, "黄油曲奇面团")
            .with_recipe(BROWNIE_RECIPE, "布朗尼")
            .with_finished_unit(unit(11, DOUGH, 48)) // 大曲奇
            .with_finished_unit(unit(12, DOUGH, 48)) // 小曲奇
            .with_finished_unit(unit(21, BROWNIE_RECIPE, 16))
    }

    #[test]
    fn test_aggregate_groups_shared_recipe() {
        let ctx = PlanningContext::new("test");
        let mut demand = BTreeMap::new();
        demand.insert(11, 100);
        demand.insert(12, 200);
        demand.insert(21, 20);

        let results = RecipeAggregator::new(&PlannerConfig::default())
            .aggregate_by_recipe(&ctx, &demand, &inventory())
            .unwrap();

        assert_eq!(results.len(), 2);
        let dough = &results[0];
        assert_eq!(dough.recipe_id, DOUGH);
        assert_eq!(dough.recipe_name, "黄油曲奇面团");
        assert_eq!(dough.units_needed, 300);
        assert_eq!(dough.batches, 7);

        let brownie = &results[1];
        assert_eq!(brownie.units_needed, 20);
        assert_eq!(brownie.batches, 2);
        assert_eq!(brownie.waste_units, 12);
    }

    #[test]
    fn test_aggregate_empty_input() {
        let ctx = PlanningContext::new("test");
        let results = RecipeAggregator::new(&PlannerConfig::default())
            .aggregate_by_recipe(&ctx, &BTreeMap::new(), &inventory())
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_aggregate_mixed_yield_first_encountered() {
        let inventory = inventory().with_finished_unit(unit(13, DOUGH, 24));
        let ctx = PlanningContext::new("test");
        let mut demand = BTreeMap::new();
        demand.insert(11, 50);
        demand.insert(13, 50);

        let results = RecipeAggregator::new(&PlannerConfig::default())
            .aggregate_by_recipe(&ctx, &demand, &inventory)
            .unwrap();
        assert_eq!(results[0].yield_per_batch, 48);
        assert_eq!(results[0].batches, 3);
    }

    #[test]
    fn test_aggregate_mixed_yield_rejected() {
        let inventory = inventory().with_finished_unit(unit(13, DOUGH, 24));
        let ctx = PlanningContext::new("test");
        let mut demand = BTreeMap::new();
        demand.insert(11, 50);
        demand.insert(13, 50);

        let config = PlannerConfig::default().with_yield_conflict_policy(YieldConflictPolicy::Reject);
        let err = RecipeAggregator::new(&config)
            .aggregate_by_recipe(&ctx, &demand, &inventory)
            .unwrap_err();
        match err {
            PlanningError::AmbiguousYield { recipe_id, yields } => {
                assert_eq!(recipe_id, DOUGH);
                assert_eq!(yields, vec![48, 24]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_aggregate_unknown_unit_is_error() {
        let ctx = PlanningContext::new("test");
        let mut demand = BTreeMap::new();
        demand.insert(999, 5);
        let err = RecipeAggregator::new(&PlannerConfig::default())
            .aggregate_by_recipe(&ctx, &demand, &inventory())
            .unwrap_err();
        assert!(matches!(
            err,
            PlanningError::Repository(RepositoryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_aggregate_zero_yield_propagates() {
        let inventory = inventory().with_finished_unit(unit(31, 3, 0));
        let ctx = PlanningContext::new("test");
        let mut demand = BTreeMap::new();
        demand.insert(31, 5);
        let err = RecipeAggregator::new(&PlannerConfig::default())
            .aggregate_by_recipe(&ctx, &demand, &inventory)
            .unwrap_err();
        assert!(matches!(err, PlanningError::InvalidArgument { .. }));
    }

    #[test]
    fn test_aggregate_sum_overflow_is_invalid_argument() {
        let ctx = PlanningContext::new("test");
        let mut demand = BTreeMap::new();
        demand.insert(11, i64::MAX);
        demand.insert(12, 1);
        let err = RecipeAggregator::new(&PlannerConfig::default())
            .aggregate_by_recipe(&ctx, &demand, &inventory())
            .unwrap_err();
        match err {
            PlanningError::InvalidArgument { field, .. } => assert_eq!(field, "units_needed"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_aggregate_missing_recipe_name_falls_back() {
        let inventory = inventory().with_finished_unit(unit(41, 4, 10));
        let ctx = PlanningContext::new("test");
        let mut demand = BTreeMap::new();
        demand.insert(41, 5);
        let results = RecipeAggregator::new(&PlannerConfig::default())
            .aggregate_by_recipe(&ctx, &demand, &inventory)
            .unwrap();
        assert_eq!(results[0].recipe_name, "Recipe 4");
    }
}
