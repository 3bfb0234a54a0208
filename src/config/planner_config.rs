// ==========================================
// 节日烘焙排产系统 - 计划引擎配置
// ==========================================
// 职责: 计划引擎可调策略 (产量冲突策略、包装约束)
// 存储: config_kv 表, 由 ConfigManager 读取
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 产量冲突策略 (Yield Conflict Policy)
// ==========================================
// 同一配方下多个成品单元 items_per_batch 不一致时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum YieldConflictPolicy {
    FirstEncountered, // 取首个遇到的产量 (告警)
    Reject,           // 拒绝计算, 返回 AmbiguousYield
}

impl fmt::Display for YieldConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YieldConflictPolicy::FirstEncountered => write!(f, "FIRST_ENCOUNTERED"),
            YieldConflictPolicy::Reject => write!(f, "REJECT"),
        }
    }
}

impl FromStr for YieldConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FIRST_ENCOUNTERED" => Ok(YieldConflictPolicy::FirstEncountered),
            "REJECT" => Ok(YieldConflictPolicy::Reject),
            other => Err(format!("未知的产量冲突策略: {}", other)),
        }
    }
}

// ==========================================
// PlannerConfig - 计划引擎配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// 产量冲突策略
    pub yield_conflict_policy: YieldConflictPolicy,
    /// 包装库存是否参与最大可组装数量计算
    pub packaging_limits_assembly: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            yield_conflict_policy: YieldConflictPolicy::FirstEncountered,
            packaging_limits_assembly: false,
        }
    }
}

impl PlannerConfig {
    pub fn with_yield_conflict_policy(mut self, policy: YieldConflictPolicy) -> Self {
        self.yield_conflict_policy = policy;
        self
    }

    pub fn with_packaging_limits_assembly(mut self, enabled: bool) -> Self {
        self.packaging_limits_assembly = enabled;
        self
    }
}
