// ==========================================
// 节日烘焙排产系统 - 批次计算器
// ==========================================
// 职责: 最小整数批次计算 + 余量(浪费)指标
// 红线: 零短缺 batches * yield_per_batch >= units_needed
// 红线: 无状态、无副作用、无 I/O 操作, 不使用浮点取整
// ==========================================

use crate::domain::planning::RecipeBatchResult;
use crate::engine::error::{PlanningError, PlanningResult};

// ==========================================
// BatchCalculator - 纯函数工具类
// ==========================================
pub struct BatchCalculator;

impl BatchCalculator {
    /// 计算满足需求的最小批次数
    ///
    /// # 规则
    /// - batches = ceil(units_needed / yield_per_batch) (整数上取整)
    /// - batches == 0 当且仅当 units_needed == 0
    ///
    /// # 错误
    /// - yield_per_batch <= 0 → InvalidArgument(field=yield_per_batch)
    /// - units_needed < 0 → InvalidArgument(field=units_needed)
    ///
    /// # 示例
    /// ```
    /// use bake_planner::engine::BatchCalculator;
    /// assert_eq!(BatchCalculator::calculate_batches(300, 48).unwrap(), 7);
    /// ```
    pub fn calculate_batches(units_needed: i64, yield_per_batch: i64) -> PlanningResult<i64> {
        if yield_per_batch <= 0 {
            return Err(PlanningError::invalid_argument(
                "yield_per_batch",
                format!("yield_per_batch 必须为正数, 实际为 {}", yield_per_batch),
            ));
        }
        if units_needed < 0 {
            return Err(PlanningError::invalid_argument(
                "units_needed",
                format!("units_needed 不能为负数, 实际为 {}", units_needed),
            ));
        }

        let whole = units_needed / yield_per_batch;
        let remainder = units_needed % yield_per_batch;
        Ok(if remainder == 0 { whole } else { whole + 1 })
    }

    /// 计算余量(浪费)
    ///
    /// # 返回
    /// (waste_units, waste_percent)
    /// - total_yield = batches * yield_per_batch
    /// - waste_units = total_yield - units_needed (不小于 0)
    /// - waste_percent = total_yield 为 0 时 0.0, 否则 waste_units / total_yield * 100
    pub fn calculate_waste(units_needed: i64, batches: i64, yield_per_batch: i64) -> (i64, f64) {
        let total_yield = batches.saturating_mul(yield_per_batch);
        if total_yield <= 0 {
            return (0, 0.0);
        }

        let waste_units = (total_yield - units_needed).clamp(0, total_yield);
        let waste_percent = waste_units as f64 / total_yield as f64 * 100.0;
        (waste_units, waste_percent)
    }

    /// 组装完整的配方批次结果
    ///
    /// # 错误
    /// - 同 calculate_batches
    /// - batches * yield_per_batch 溢出 i64 → InvalidArgument(field=units_needed)
    pub fn create_batch_result(
        recipe_id: i64,
        recipe_name: &str,
        units_needed: i64,
        yield_per_batch: i64,
    ) -> PlanningResult<RecipeBatchResult> {
        let batches = Self::calculate_batches(units_needed, yield_per_batch)?;
        let total_yield = batches.checked_mul(yield_per_batch).ok_or_else(|| {
            PlanningError::invalid_argument(
                "units_needed",
                format!("总产量溢出: {} 批 * {} 件/批", batches, yield_per_batch),
            )
        })?;
        let (waste_units, waste_percent) =
            Self::calculate_waste(units_needed, batches, yield_per_batch);

        Ok(RecipeBatchResult {
            recipe_id,
            recipe_name: recipe_name.to_string(),
            units_needed,
            batches,
            yield_per_batch,
            total_yield,
            waste_units,
            waste_percent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================
    // 测试 1: 批次上取整
    // ==========================================

    #[test]
    fn test_calculate_batches_rounds_up() {
        let batches = BatchCalculator::calculate_batches(300, 48).unwrap();
        assert_eq!(batches, 7);
        assert!(batches * 48 >= 300); // 336 >= 300
    }

    #[test]
    fn test_calculate_batches_exact_multiple() {
        assert_eq!(BatchCalculator::calculate_batches(96, 48).unwrap(), 2);
    }

    #[test]
    fn test_calculate_batches_zero_units() {
        assert_eq!(BatchCalculator::calculate_batches(0, 48).unwrap(), 0);
    }

    #[test]
    fn test_calculate_batches_single_unit() {
        assert_eq!(BatchCalculator::calculate_batches(1, 48).unwrap(), 1);
    }

    // ==========================================
    // 测试 2: 非法产量
    // ==========================================

    #[test]
    fn test_calculate_batches_zero_yield_names_field() {
        let err = BatchCalculator::calculate_batches(10, 0).unwrap_err();
        match err {
            PlanningError::InvalidArgument { field, .. } => assert_eq!(field, "yield_per_batch"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_calculate_batches_negative_yield() {
        assert!(matches!(
            BatchCalculator::calculate_batches(10, -5),
            Err(PlanningError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_calculate_batches_negative_units() {
        let err = BatchCalculator::calculate_batches(-1, 12).unwrap_err();
        assert!(err.to_string().contains("units_needed"));
    }

    // ==========================================
    // 测试 3: 余量计算
    // ==========================================

    #[test]
    fn test_calculate_waste() {
        let (waste_units, waste_percent) = BatchCalculator::calculate_waste(49, 2, 48);
        assert_eq!(waste_units, 47);
        assert!((waste_percent - 48.958333).abs() < 1e-4);
    }

    #[test]
    fn test_calculate_waste_zero() {
        assert_eq!(BatchCalculator::calculate_waste(0, 0, 48), (0, 0.0));
    }

    #[test]
    fn test_calculate_waste_no_leftover() {
        assert_eq!(BatchCalculator::calculate_waste(96, 2, 48), (0, 0.0));
    }

    // ==========================================
    // 测试 4: 完整结果
    // ==========================================

    #[test]
    fn test_create_batch_result() {
        let result = BatchCalculator::create_batch_result(1, "姜饼", 300, 48).unwrap();
        assert_eq!(result.recipe_id, 1);
        assert_eq!(result.recipe_name, "姜饼");
        assert_eq!(result.batches, 7);
        assert_eq!(result.total_yield, 336);
        assert_eq!(result.waste_units, 36);
        assert!(result.total_yield >= result.units_needed);
    }

    #[test]
    fn test_create_batch_result_propagates_invalid_yield() {
        assert!(BatchCalculator::create_batch_result(1, "姜饼", 300, 0).is_err());
    }

    #[test]
    fn test_create_batch_result_total_yield_overflow() {
        // 2^62 批 * 2 件/批 超出 i64
        let err = BatchCalculator::create_batch_result(1, "姜饼", i64::MAX, 2).unwrap_err();
        match err {
            PlanningError::InvalidArgument { field, .. } => assert_eq!(field, "units_needed"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_create_batch_result_at_i64_max_exact() {
        let result = BatchCalculator::create_batch_result(1, "姜饼", i64::MAX, 1).unwrap();
        assert_eq!(result.total_yield, i64::MAX);
        assert_eq!(result.waste_units, 0);
    }
}
