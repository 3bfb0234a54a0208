// ==========================================
// 测试数据构建器 - 内存库存快照
// ==========================================

use bake_planner::domain::{ComponentRef, Composition, FinishedUnit};
use bake_planner::engine::InventorySnapshot;
use rust_decimal::Decimal;

// ==========================================
// FinishedUnit 构建器
// ==========================================

pub struct UnitBuilder {
    id: i64,
    display_name: String,
    recipe_id: i64,
    items_per_batch: i64,
    inventory_count: i64,
}

impl UnitBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            display_name: format!("unit-{}", id),
            recipe_id: id,
            items_per_batch: 24,
            inventory_count: 0,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.display_name = name.to_string();
        self
    }

    pub fn recipe(mut self, recipe_id: i64) -> Self {
        self.recipe_id = recipe_id;
        self
    }

    pub fn yield_per_batch(mut self, items_per_batch: i64) -> Self {
        self.items_per_batch = items_per_batch;
        self
    }

    pub fn stock(mut self, inventory_count: i64) -> Self {
        self.inventory_count = inventory_count;
        self
    }

    pub fn build(self) -> FinishedUnit {
        FinishedUnit {
            id: self.id,
            display_name: self.display_name,
            recipe_id: self.recipe_id,
            items_per_batch: self.items_per_batch,
            inventory_count: self.inventory_count,
        }
    }
}

pub fn unit_part(assembly_id: i64, unit_id: i64, quantity: i64) -> Composition {
    Composition::new(assembly_id, ComponentRef::FinishedUnit(unit_id), Decimal::from(quantity))
}

pub fn nested_part(assembly_id: i64, nested_id: i64, quantity: i64) -> Composition {
    Composition::new(assembly_id, ComponentRef::NestedBundle(nested_id), Decimal::from(quantity))
}

// ==========================================
// 标准目录
// ==========================================

pub const COOKIE: i64 = 101;
pub const BROWNIE: i64 = 102;
pub const TRUFFLE: i64 = 103;
pub const GIFT_BAG: i64 = 201;
pub const MEGA_BUNDLE: i64 = 202;
pub const HOLIDAY_TIN: i64 = 203;

/// 礼品袋 (3 曲奇 + 2 布朗尼) 与超级礼盒 (2 礼品袋)
pub fn gift_bag_catalog() -> InventorySnapshot {
    InventorySnapshot::new()
        .with_recipe(1, "黄油曲奇")
        .with_recipe(2, "布朗尼")
        .with_finished_unit(UnitBuilder::new(COOKIE).name("曲奇").recipe(1).yield_per_batch(48).build())
        .with_finished_unit(UnitBuilder::new(BROWNIE).name("布朗尼").recipe(2).yield_per_batch(16).build())
        .with_finished_good(GIFT_BAG, "礼品袋", 0)
        .with_finished_good(MEGA_BUNDLE, "超级礼盒", 0)
        .with_composition(unit_part(GIFT_BAG, COOKIE, 3))
        .with_composition(unit_part(GIFT_BAG, BROWNIE, 2))
        .with_composition(nested_part(MEGA_BUNDLE, GIFT_BAG, 2))
}

/// 节日铁盒: 每件 4 曲奇 + 2 布朗尼 + 3 松露
///
/// 参数为各成品单元可支持的铁盒件数
pub fn holiday_tin_catalog(cookie_sets: i64, brownie_sets: i64, truffle_sets: i64) -> InventorySnapshot {
    InventorySnapshot::new()
        .with_finished_unit(UnitBuilder::new(COOKIE).stock(cookie_sets * 4).build())
        .with_finished_unit(UnitBuilder::new(BROWNIE).stock(brownie_sets * 2).build())
        .with_finished_unit(UnitBuilder::new(TRUFFLE).stock(truffle_sets * 3).build())
        .with_finished_good(HOLIDAY_TIN, "节日铁盒", 0)
        .with_composition(unit_part(HOLIDAY_TIN, COOKIE, 4))
        .with_composition(unit_part(HOLIDAY_TIN, BROWNIE, 2))
        .with_composition(unit_part(HOLIDAY_TIN, TRUFFLE, 3))
}
