// ==========================================
// 节日烘焙排产系统 - 组件充足性检查 (默认实现)
// ==========================================
// 职责: 基于库存视图实现 check_can_assemble
// 规则: 逐条直接组成关系比较 需求量 与 可用量
//   - 成品单元: finished_unit.inventory_count
//   - 嵌套礼盒: finished_good.inventory_count (不再向下展开)
//   - 包装: packaging_product.on_hand
//   - 通用物料: 跳过 (具体物料组装时才确定)
// 需求量超出小数表示范围时按 Decimal::MAX 记为缺料
// ==========================================

use crate::domain::catalog::ComponentRef;
use crate::domain::planning::{AssemblyCheck, MissingComponent};
use crate::engine::error::PlanningResult;
use crate::engine::inventory::{ComponentSufficiencyChecker, InventorySource};
use rust_decimal::Decimal;

/// 基于库存视图的组件充足性检查
#[derive(Debug, Clone, Default)]
pub struct InventoryComponentChecker;

impl InventoryComponentChecker {
    pub fn new() -> Self {
        Self
    }
}

impl ComponentSufficiencyChecker for InventoryComponentChecker {
    fn check_can_assemble(
        &self,
        finished_good_id: i64,
        quantity: i64,
        inventory: &dyn InventorySource,
    ) -> PlanningResult<AssemblyCheck> {
        if inventory.get_finished_good(finished_good_id)?.is_none() {
            return Ok(AssemblyCheck::default());
        }

        let compositions = inventory.list_compositions(finished_good_id)?;
        // 无组成关系的礼盒无从组装
        if compositions.is_empty() {
            return Ok(AssemblyCheck::default());
        }

        if quantity <= 0 {
            return Ok(AssemblyCheck {
                can_assemble: true,
                missing: Vec::new(),
            });
        }

        let mut missing = Vec::new();
        for composition in compositions {
            let needed = composition
                .component_quantity
                .checked_mul(Decimal::from(quantity))
                .map(|n| n.ceil())
                .unwrap_or(Decimal::MAX);

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
                ComponentRef::Packaging(product_id) => inventory
                    .packaging_on_hand(product_id)?
                    .unwrap_or(Decimal::ZERO),
                ComponentRef::GenericMaterial(_) => continue,
            };

            if available < needed {
                missing.push(MissingComponent {
                    component_type: composition.component.kind(),
                    component_id: composition.component.id(),
                    needed,
                    available,
                });
            }
        }

        Ok(AssemblyCheck {
            can_assemble: missing.is_empty(),
            missing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Composition, FinishedUnit};
    use crate::domain::types::ComponentKind;
    use crate::engine::snapshot::InventorySnapshot;

    fn inventory() -> InventorySnapshot {
        InventorySnapshot::new()
            .with_finished_unit(FinishedUnit {
                id: 1,
                display_name: "曲奇".to_string(),
                recipe_id: 1,
                items_per_batch: 48,
                inventory_count: 40,
            })
            .with_finished_good(10, "礼品袋", 0)
            .with_finished_good(20, "空礼盒", 0)
            .with_packaging(5, "丝带", Decimal::from(3))
            .with_composition(Composition::new(10, ComponentRef::FinishedUnit(1), Decimal::from(4)))
            .with_composition(Composition::new(10, ComponentRef::Packaging(5), Decimal::from(1)))
            .with_composition(Composition::new(10, ComponentRef::GenericMaterial(77), Decimal::from(1)).generic())
    }

    #[test]
    fn test_sufficient() {
        let check = InventoryComponentChecker::new()
            .check_can_assemble(10, 3, &inventory())
            .unwrap();
        assert!(check.can_assemble);
        assert!(check.missing.is_empty());
    }

    #[test]
    fn test_reports_each_short_component() {
        let check = InventoryComponentChecker::new()
            .check_can_assemble(10, 11, &inventory())
            .unwrap();
        assert!(!check.can_assemble);
        assert_eq!(check.missing.len(), 2);
        assert_eq!(check.missing[0].component_type, ComponentKind::FinishedUnit);
        assert_eq!(check.missing[0].needed, Decimal::from(44));
        assert_eq!(check.missing[0].available, Decimal::from(40));
        assert_eq!(check.missing[1].component_type, ComponentKind::Packaging);
    }

    #[test]
    fn test_overflowing_need_reports_missing() {
        let inventory = inventory()
            .with_finished_good(30, "巨型礼盒", 0)
            .with_composition(Composition::new(
                30,
                ComponentRef::Packaging(5),
                Decimal::from(100_000_000_000i64),
            ));
        let check = InventoryComponentChecker::new()
            .check_can_assemble(30, i64::MAX, &inventory)
            .unwrap();
        assert!(!check.can_assemble);
        assert_eq!(check.missing.len(), 1);
        assert_eq!(check.missing[0].needed, Decimal::MAX);
        assert_eq!(check.missing[0].available, Decimal::from(3));
    }

    #[test]
    fn test_missing_or_empty_assembly_is_not_assemblable() {
        let checker = InventoryComponentChecker::new();
        assert!(!checker.check_can_assemble(999, 1, &inventory()).unwrap().can_assemble);
        assert!(!checker.check_can_assemble(20, 1, &inventory()).unwrap().can_assemble);
    }
}
