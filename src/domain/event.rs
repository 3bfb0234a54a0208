// ==========================================
// 节日烘焙排产系统 - 活动与活动目标
// ==========================================
// 职责: 活动 (节日/聚会) 及其生产目标、组装目标
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 活动 (例如圣诞礼品季)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub event_date: Option<NaiveDate>,
}

/// 活动生产目标: 某配方需要生产的批次数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventProductionTarget {
    pub event_id: i64,
    pub recipe_id: i64,
    pub target_batches: i64,
}

/// 活动组装目标: 某礼盒需要组装的数量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventAssemblyTarget {
    pub event_id: i64,
    pub finished_good_id: i64,
    pub target_quantity: i64,
}
