// ==========================================
// 节日烘焙排产系统 - 计划计算结果
// ==========================================
// 职责: 批次计算结果、可行性结果、缺料明细、活动排产方案
// 说明: 均为即时计算对象,不落库
// ==========================================

use crate::domain::types::{ComponentKind, FeasibilityStatus, RequirementBasis};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// RecipeBatchResult - 配方批次计算结果
// ==========================================
// 红线: total_yield = batches * yield_per_batch >= units_needed (零短缺)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeBatchResult {
    pub recipe_id: i64,
    pub recipe_name: String,
    pub units_needed: i64,
    pub batches: i64,
    pub yield_per_batch: i64,
    pub total_yield: i64,
    pub waste_units: i64,
    pub waste_percent: f64,
}

// ==========================================
// 缺料明细
// ==========================================

/// 配料短缺 (来自外部配料充足性检查)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingIngredient {
    pub ingredient_id: i64,
    pub ingredient_name: String,
    pub needed: Decimal,
    pub available: Decimal,
    pub unit: String,
}

/// 组件短缺 (来自组件充足性检查)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingComponent {
    pub component_type: ComponentKind,
    pub component_id: i64,
    pub needed: Decimal,
    pub available: Decimal,
}

// ==========================================
// 外部检查原语的返回值
// ==========================================

/// check_can_produce 结果
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductionCheck {
    pub can_produce: bool,
    pub missing: Vec<MissingIngredient>,
}

/// check_can_assemble 结果
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssemblyCheck {
    pub can_assemble: bool,
    pub missing: Vec<MissingComponent>,
}

// ==========================================
// ProductionFeasibilityResult - 生产可行性 (单个生产目标)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionFeasibilityResult {
    pub recipe_id: i64,
    pub recipe_name: String,
    pub target_batches: i64,
    pub can_produce: bool,
    pub missing: Vec<MissingIngredient>,
}

// ==========================================
// FeasibilityResult - 组装可行性 (单个组装目标)
// ==========================================
// 红线: 0 <= can_assemble <= target_quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityResult {
    pub finished_good_id: i64,
    pub finished_good_name: String,
    pub target_quantity: i64,
    pub can_assemble: i64,
    pub status: FeasibilityStatus,
    pub missing_components: Vec<MissingComponent>,
}

impl FeasibilityResult {
    /// 礼盒不存在时的降级结果
    pub fn not_found(finished_good_id: i64, target_quantity: i64) -> Self {
        Self {
            finished_good_id,
            finished_good_name: String::new(),
            target_quantity,
            can_assemble: 0,
            status: FeasibilityStatus::CannotAssemble,
            missing_components: Vec::new(),
        }
    }

    /// 尚差多少件未能组装
    pub fn shortfall(&self) -> i64 {
        (self.target_quantity - self.can_assemble).max(0)
    }

    /// 本地化的短缺描述
    pub fn shortfall_label(&self) -> String {
        crate::i18n::t_with_args(
            "feasibility.shortfall",
            &[("count", &self.shortfall().to_string())],
        )
    }
}

// ==========================================
// EventBatchPlan - 活动排产方案
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventBatchPlan {
    pub event_id: i64,
    pub event_name: String,
    pub basis: RequirementBasis,
    /// finished_unit_id → 需求数量
    pub unit_requirements: BTreeMap<i64, i64>,
    pub recipe_batches: Vec<RecipeBatchResult>,
    pub total_batches: i64,
    pub generated_at: DateTime<Utc>,
}
