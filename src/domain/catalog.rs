// ==========================================
// 节日烘焙排产系统 - 产品目录领域模型
// ==========================================
// 职责: 配方、成品单元、礼盒(组装件)、包装、BOM 组成关系
// 红线: 组成关系的组件引用有且仅有一个 (ComponentRef 和类型)
// ==========================================

use crate::domain::types::ComponentKind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// Recipe - 配方
// ==========================================
// 用途: 生产批次的核算/排程单位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
}

// ==========================================
// FinishedUnit - 成品单元 (BOM 叶子)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishedUnit {
    pub id: i64,
    pub display_name: String,
    pub recipe_id: i64,         // 来源配方
    pub items_per_batch: i64,   // 每批产出数量
    pub inventory_count: i64,   // 当前库存 (非负)
}

// ==========================================
// FinishedGood - 礼盒 / 组装件
// ==========================================
// 可被其他礼盒的组成关系嵌套引用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishedGood {
    pub id: i64,
    pub display_name: String,
    pub inventory_count: i64,
}

// ==========================================
// PackagingProduct - 包装材料
// ==========================================
// 库存可为小数 (例如丝带按米计)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackagingProduct {
    pub id: i64,
    pub display_name: String,
    pub on_hand: Decimal,
}

// ==========================================
// ComponentRef - 组件引用 (和类型)
// ==========================================
// 替代四个可空外键,非法状态在类型层面不可表达
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentRef {
    FinishedUnit(i64),
    NestedBundle(i64),
    Packaging(i64),
    GenericMaterial(i64),
}

impl ComponentRef {
    /// 由四个可空引用列构造
    ///
    /// # 返回
    /// - Some(ComponentRef): 恰好一个引用非空
    /// - None: 零个或多个引用非空
    pub fn from_columns(
        finished_unit_id: Option<i64>,
        finished_good_id: Option<i64>,
        packaging_product_id: Option<i64>,
        material_id: Option<i64>,
    ) -> Option<Self> {
        match (finished_unit_id, finished_good_id, packaging_product_id, material_id) {
            (Some(id), None, None, None) => Some(ComponentRef::FinishedUnit(id)),
            (None, Some(id), None, None) => Some(ComponentRef::NestedBundle(id)),
            (None, None, Some(id), None) => Some(ComponentRef::Packaging(id)),
            (None, None, None, Some(id)) => Some(ComponentRef::GenericMaterial(id)),
            _ => None,
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentRef::FinishedUnit(_) => ComponentKind::FinishedUnit,
            ComponentRef::NestedBundle(_) => ComponentKind::FinishedGood,
            ComponentRef::Packaging(_) => ComponentKind::Packaging,
            ComponentRef::GenericMaterial(_) => ComponentKind::GenericMaterial,
        }
    }

    pub fn id(&self) -> i64 {
        match *self {
            ComponentRef::FinishedUnit(id)
            | ComponentRef::NestedBundle(id)
            | ComponentRef::Packaging(id)
            | ComponentRef::GenericMaterial(id) => id,
        }
    }
}

// ==========================================
// Composition - BOM 组成关系 (图的边)
// ==========================================
// 红线: component_quantity > 0 (单位组装件所需组件数量)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub assembly_id: i64,             // 所属礼盒
    pub component: ComponentRef,      // 组件引用
    pub component_quantity: Decimal,  // 每个组装件所需组件数量
    pub is_generic: bool,             // 组件具体身份是否延迟到组装时确定
}

impl Composition {
    pub fn new(assembly_id: i64, component: ComponentRef, component_quantity: Decimal) -> Self {
        Self {
            assembly_id,
            component,
            component_quantity,
            is_generic: false,
        }
    }

    pub fn generic(mut self) -> Self {
        self.is_generic = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_ref_from_columns_exactly_one() {
        assert_eq!(
            ComponentRef::from_columns(Some(3), None, None, None),
            Some(ComponentRef::FinishedUnit(3))
        );
        assert_eq!(
            ComponentRef::from_columns(None, Some(7), None, None),
            Some(ComponentRef::NestedBundle(7))
        );
        assert_eq!(
            ComponentRef::from_columns(None, None, Some(1), None),
            Some(ComponentRef::Packaging(1))
        );
        assert_eq!(
            ComponentRef::from_columns(None, None, None, Some(9)),
            Some(ComponentRef::GenericMaterial(9))
        );
    }

    #[test]
    fn test_component_ref_from_columns_rejects_invalid() {
        assert_eq!(ComponentRef::from_columns(None, None, None, None), None);
        assert_eq!(ComponentRef::from_columns(Some(1), Some(2), None, None), None);
    }

    #[test]
    fn test_component_ref_kind_and_id() {
        let r = ComponentRef::NestedBundle(42);
        assert_eq!(r.kind(), ComponentKind::FinishedGood);
        assert_eq!(r.id(), 42);
    }
}
