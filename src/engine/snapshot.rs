// ==========================================
// 节日烘焙排产系统 - 内存库存快照
// ==========================================
// 职责: InventorySource 的内存实现 (时点快照)
// 用途: 上层已加载数据时直接计算; 引擎单元测试
// ==========================================

use crate::domain::catalog::{
    Composition, FinishedGood, FinishedUnit, PackagingProduct, Recipe,
};
use crate::domain::event::{Event, EventAssemblyTarget, EventProductionTarget};
use crate::engine::inventory::InventorySource;
use crate::repository::error::RepositoryResult;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// 内存库存快照
#[derive(Debug, Clone, Default)]
pub struct InventorySnapshot {
    recipes: HashMap<i64, Recipe>,
    finished_units: HashMap<i64, FinishedUnit>,
    finished_goods: HashMap<i64, FinishedGood>,
    packaging: HashMap<i64, PackagingProduct>,
    compositions: HashMap<i64, Vec<Composition>>,
    events: HashMap<i64, Event>,
    production_targets: Vec<EventProductionTarget>,
    assembly_targets: Vec<EventAssemblyTarget>,
}

impl InventorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== 构建方法 =====

    pub fn with_recipe(mut self, id: i64, name: &str) -> Self {
        self.recipes.insert(
            id,
            Recipe {
                id,
                name: name.to_string(),
            },
        );
        self
    }

    pub fn with_finished_unit(mut self, unit: FinishedUnit) -> Self {
        self.finished_units.insert(unit.id, unit);
        self
    }

    pub fn with_finished_good(mut self, id: i64, name: &str, inventory_count: i64) -> Self {
        self.finished_goods.insert(
            id,
            FinishedGood {
                id,
                display_name: name.to_string(),
                inventory_count,
            },
        );
        self
    }

    pub fn with_packaging(mut self, id: i64, name: &str, on_hand: Decimal) -> Self {
        self.packaging.insert(
            id,
            PackagingProduct {
                id,
                display_name: name.to_string(),
                on_hand,
            },
        );
        self
    }

    /// 组成关系按添加顺序保存
    pub fn with_composition(mut self, composition: Composition) -> Self {
        self.compositions
            .entry(composition.assembly_id)
            .or_default()
            .push(composition);
        self
    }

    pub fn with_event(mut self, event: Event) -> Self {
        self.events.insert(event.id, event);
        self
    }

    pub fn with_production_target(mut self, target: EventProductionTarget) -> Self {
        self.production_targets.push(target);
        self
    }

    pub fn with_assembly_target(mut self, target: EventAssemblyTarget) -> Self {
        self.assembly_targets.push(target);
        self
    }

    // ===== 库存调整 =====

    /// 覆写成品单元库存 (不存在时忽略)
    pub fn set_unit_inventory(&mut self, unit_id: i64, inventory_count: i64) {
        if let Some(unit) = self.finished_units.get_mut(&unit_id) {
            unit.inventory_count = inventory_count;
        }
    }

    /// 覆写礼盒库存 (不存在时忽略)
    pub fn set_good_inventory(&mut self, good_id: i64, inventory_count: i64) {
        if let Some(good) = self.finished_goods.get_mut(&good_id) {
            good.inventory_count = inventory_count;
        }
    }
}

impl InventorySource for InventorySnapshot {
    fn get_recipe(&self, recipe_id: i64) -> RepositoryResult<Option<Recipe>> {
        Ok(self.recipes.get(&recipe_id).cloned())
    }

    fn get_finished_unit(&self, unit_id: i64) -> RepositoryResult<Option<FinishedUnit>> {
        Ok(self.finished_units.get(&unit_id).cloned())
    }

    fn get_finished_good(&self, good_id: i64) -> RepositoryResult<Option<FinishedGood>> {
        Ok(self.finished_goods.get(&good_id).cloned())
    }

    fn list_compositions(&self, assembly_id: i64) -> RepositoryResult<Vec<Composition>> {
        Ok(self.compositions.get(&assembly_id).cloned().unwrap_or_default())
    }

    fn packaging_on_hand(&self, packaging_product_id: i64) -> RepositoryResult<Option<Decimal>> {
        Ok(self.packaging.get(&packaging_product_id).map(|p| p.on_hand))
    }

    fn get_event(&self, event_id: i64) -> RepositoryResult<Option<Event>> {
        Ok(self.events.get(&event_id).cloned())
    }

    fn list_production_targets(&self, event_id: i64) -> RepositoryResult<Vec<EventProductionTarget>> {
        Ok(self
            .production_targets
            .iter()
            .filter(|t| t.event_id == event_id)
            .cloned()
            .collect())
    }

    fn list_assembly_targets(&self, event_id: i64) -> RepositoryResult<Vec<EventAssemblyTarget>> {
        Ok(self
            .assembly_targets
            .iter()
            .filter(|t| t.event_id == event_id)
            .cloned()
            .collect())
    }
}
