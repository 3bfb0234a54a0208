// ==========================================
// 节日烘焙排产系统 - 领域类型定义
// ==========================================
// 职责: 可行性状态、组件类型、需求口径等枚举
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库/前端一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 组装可行性状态 (Feasibility Status)
// ==========================================
// 四个终态,无状态迁移,每次调用重新计算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeasibilityStatus {
    CanAssemble,        // 可全量组装
    Partial,            // 可部分组装
    AwaitingProduction, // 等待生产(有成品单元零库存)
    CannotAssemble,     // 无法组装(其他原因短缺)
}

impl FeasibilityStatus {
    /// 按可组装数量与目标数量分类
    ///
    /// # 规则
    /// - can_assemble >= target → CanAssemble
    /// - 0 < can_assemble < target → Partial
    /// - can_assemble == 0 且存在零库存成品单元 → AwaitingProduction
    /// - 其他 → CannotAssemble
    pub fn classify(can_assemble: i64, target_quantity: i64, has_zero_stock_unit: bool) -> Self {
        if can_assemble >= target_quantity {
            FeasibilityStatus::CanAssemble
        } else if can_assemble > 0 {
            FeasibilityStatus::Partial
        } else if has_zero_stock_unit {
            FeasibilityStatus::AwaitingProduction
        } else {
            FeasibilityStatus::CannotAssemble
        }
    }

    /// 本地化显示文案
    pub fn label(&self) -> String {
        crate::i18n::t(self.i18n_key())
    }

    fn i18n_key(&self) -> &'static str {
        match self {
            FeasibilityStatus::CanAssemble => "feasibility.can_assemble",
            FeasibilityStatus::Partial => "feasibility.partial",
            FeasibilityStatus::AwaitingProduction => "feasibility.awaiting_production",
            FeasibilityStatus::CannotAssemble => "feasibility.cannot_assemble",
        }
    }
}

impl fmt::Display for FeasibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeasibilityStatus::CanAssemble => write!(f, "CAN_ASSEMBLE"),
            FeasibilityStatus::Partial => write!(f, "PARTIAL"),
            FeasibilityStatus::AwaitingProduction => write!(f, "AWAITING_PRODUCTION"),
            FeasibilityStatus::CannotAssemble => write!(f, "CANNOT_ASSEMBLE"),
        }
    }
}

// ==========================================
// 组件类型 (Component Kind)
// ==========================================
// 用于缺料明细,与 ComponentRef 的变体一一对应
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentKind {
    FinishedUnit,    // 成品单元
    FinishedGood,    // 嵌套礼盒
    Packaging,       // 包装
    GenericMaterial, // 通用物料(组装时确定)
}

impl ComponentKind {
    /// 本地化显示文案
    pub fn label(&self) -> String {
        let key = match self {
            ComponentKind::FinishedUnit => "component.finished_unit",
            ComponentKind::FinishedGood => "component.finished_good",
            ComponentKind::Packaging => "component.packaging",
            ComponentKind::GenericMaterial => "component.generic_material",
        };
        crate::i18n::t(key)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::FinishedUnit => write!(f, "FINISHED_UNIT"),
            ComponentKind::FinishedGood => write!(f, "FINISHED_GOOD"),
            ComponentKind::Packaging => write!(f, "PACKAGING"),
            ComponentKind::GenericMaterial => write!(f, "GENERIC_MATERIAL"),
        }
    }
}

// ==========================================
// 需求口径 (Requirement Basis)
// ==========================================
// 活动排产时使用毛需求还是扣减现有库存后的净需求
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequirementBasis {
    Gross,          // 毛需求
    NetOfInventory, // 扣减成品库存后的净需求
}

impl fmt::Display for RequirementBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequirementBasis::Gross => write!(f, "GROSS"),
            RequirementBasis::NetOfInventory => write!(f, "NET_OF_INVENTORY"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_full() {
        assert_eq!(FeasibilityStatus::classify(10, 10, false), FeasibilityStatus::CanAssemble);
        assert_eq!(FeasibilityStatus::classify(0, 0, true), FeasibilityStatus::CanAssemble);
    }

    #[test]
    fn test_classify_partial() {
        assert_eq!(FeasibilityStatus::classify(5, 10, true), FeasibilityStatus::Partial);
    }

    #[test]
    fn test_classify_zero() {
        assert_eq!(
            FeasibilityStatus::classify(0, 10, true),
            FeasibilityStatus::AwaitingProduction
        );
        assert_eq!(
            FeasibilityStatus::classify(0, 10, false),
            FeasibilityStatus::CannotAssemble
        );
    }

    #[test]
    fn test_status_serde_format() {
        let json = serde_json::to_string(&FeasibilityStatus::AwaitingProduction).unwrap();
        assert_eq!(json, "\"AWAITING_PRODUCTION\"");
        assert_eq!(FeasibilityStatus::Partial.to_string(), "PARTIAL");
    }
}
