// ==========================================
// 节日烘焙排产系统 - 礼盒 BOM 展开引擎
// ==========================================
// 职责: 递归遍历组成关系图, 累计叶子成品单元需求量
// 输入: 礼盒 ID + 礼盒数量 + 库存视图
// 输出: finished_unit_id → 需求数量
// 红线: 包装与通用物料不进入成品单元需求 (由外部包装服务跟踪)
// 红线: 检测循环引用, 不允许无限递归
// ==========================================

use crate::domain::catalog::ComponentRef;
use crate::engine::context::PlanningContext;
use crate::engine::error::{PlanningError, PlanningResult};
use crate::engine::inventory::InventorySource;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

// ==========================================
// BundleExplosion - BOM 展开引擎
// ==========================================
pub struct BundleExplosion {
    // 无状态引擎，不需要注入依赖
}

impl BundleExplosion {
    pub fn new() -> Self {
        Self {}
    }

    /// 展开礼盒需求到成品单元
    ///
    /// # 规则
    /// - 基础乘数为 bundle_quantity
    /// - 成品单元组件: 累加 component_quantity * 当前乘数 (多路径到达同一单元时求和)
    /// - 嵌套礼盒组件: 以 当前乘数 * component_quantity 为新乘数递归
    /// - 包装/通用物料组件: 跳过
    /// - 中间结果以精确小数累计, 最后一次性向上取整为整数件数
    ///
    /// 组成数量均为整数时结果随 bundle_quantity 线性缩放; 含小数数量时
    /// 只保证 scaled >= k * single - (k - 1) (单次取整在 k 倍之间摊薄)
    ///
    /// # 返回
    /// - 礼盒不存在 / 无组成关系 / bundle_quantity <= 0 → 空映射
    /// - 组成关系图存在环 → CircularComposition
    /// - 累计需求超出可表示范围 → InvalidArgument(field=bundle_quantity)
    pub fn explode_bundle_requirements(
        &self,
        ctx: &PlanningContext,
        bundle_id: i64,
        bundle_quantity: i64,
        inventory: &dyn InventorySource,
    ) -> PlanningResult<BTreeMap<i64, i64>> {
        let span = ctx.child_span("explode_bundle_requirements");
        let _guard = span.enter();

        if bundle_quantity <= 0 {
            if bundle_quantity < 0 {
                tracing::warn!(bundle_id, bundle_quantity, "礼盒数量为负, 按 0 处理");
            }
            return Ok(BTreeMap::new());
        }

        if inventory.get_finished_good(bundle_id)?.is_none() {
            tracing::debug!(bundle_id, "礼盒不存在, 返回空需求");
            return Ok(BTreeMap::new());
        }

        let mut accumulated: BTreeMap<i64, Decimal> = BTreeMap::new();
        let mut path: Vec<i64> = Vec::new();
        self.explode_into(
            ctx,
            bundle_id,
            Decimal::from(bundle_quantity),
            inventory,
            &mut path,
            &mut accumulated,
        )?;

        let mut result = BTreeMap::new();
        for (unit_id, quantity) in accumulated {
            let whole = quantity.ceil().to_i64().ok_or_else(|| {
                PlanningError::invalid_argument(
                    "component_quantity",
                    format!("成品单元 {} 需求量溢出: {}", unit_id, quantity),
                )
            })?;
            result.insert(unit_id, whole);
        }

        tracing::debug!(
            bundle_id,
            bundle_quantity,
            unit_kinds = result.len(),
            "礼盒展开完成"
        );
        Ok(result)
    }

    /// 递归累计 (path 为当前调用栈上的礼盒 ID)
    fn explode_into(
        &self,
        ctx: &PlanningContext,
        assembly_id: i64,
        multiplier: Decimal,
        inventory: &dyn InventorySource,
        path: &mut Vec<i64>,
        accumulated: &mut BTreeMap<i64, Decimal>,
    ) -> PlanningResult<()> {
        if path.contains(&assembly_id) {
            let mut cycle = path.clone();
            cycle.push(assembly_id);
            tracing::error!(assembly_id, path = ?cycle, "BOM 循环引用");
            return Err(PlanningError::CircularComposition {
                assembly_id,
                path: cycle,
            });
        }

        path.push(assembly_id);

        for composition in inventory.list_compositions(assembly_id)? {
            ctx.record_composition_visit();

            if composition.component_quantity <= Decimal::ZERO {
                tracing::warn!(
                    assembly_id,
                    component = ?composition.component,
                    quantity = %composition.component_quantity,
                    "组成数量非正, 已跳过"
                );
                continue;
            }

            let scaled = multiplier
                .checked_mul(composition.component_quantity)
                .ok_or_else(|| Self::overflow(assembly_id, multiplier))?;
            match composition.component {
                ComponentRef::FinishedUnit(unit_id) => {
                    let total = accumulated.entry(unit_id).or_insert(Decimal::ZERO);
                    *total = total
                        .checked_add(scaled)
                        .ok_or_else(|| Self::overflow(assembly_id, multiplier))?;
                }
                ComponentRef::NestedBundle(nested_id) => {
                    self.explode_into(ctx, nested_id, scaled, inventory, path, accumulated)?;
                }
                ComponentRef::Packaging(_) | ComponentRef::GenericMaterial(_) => {}
            }
        }

        path.pop();
        Ok(())
    }

    fn overflow(assembly_id: i64, multiplier: Decimal) -> PlanningError {
        tracing::warn!(assembly_id, multiplier = %multiplier, "礼盒展开需求量溢出");
        PlanningError::invalid_argument(
            "bundle_quantity",
            format!("礼盒 {} 展开需求量溢出 (乘数 {})", assembly_id, multiplier),
        )
    }
}

impl Default for BundleExplosion {
    fn default() -> Self {
        Self::new()
    }
}
