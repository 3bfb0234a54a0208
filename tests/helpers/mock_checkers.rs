// ==========================================
// 外部检查原语的测试替身
// ==========================================

use bake_planner::domain::{MissingIngredient, ProductionCheck};
use bake_planner::engine::{IngredientSufficiencyChecker, PlanningError, PlanningResult};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// 按配方设置可生产的最大批次数; 未设置的配方视为配料充足
#[derive(Default)]
pub struct StubIngredientChecker {
    max_batches: HashMap<i64, i64>,
}

impl StubIngredientChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, recipe_id: i64, max_batches: i64) -> Self {
        self.max_batches.insert(recipe_id, max_batches);
        self
    }
}

impl IngredientSufficiencyChecker for StubIngredientChecker {
    fn check_can_produce(&self, recipe_id: i64, num_batches: i64) -> PlanningResult<ProductionCheck> {
        match self.max_batches.get(&recipe_id) {
            Some(&max) if num_batches > max => Ok(ProductionCheck {
                can_produce: false,
                missing: vec![MissingIngredient {
                    ingredient_id: 900 + recipe_id,
                    ingredient_name: "面粉".to_string(),
                    needed: Decimal::from(num_batches * 2),
                    available: Decimal::from(max * 2),
                    unit: "kg".to_string(),
                }],
            }),
            _ => Ok(ProductionCheck {
                can_produce: true,
                missing: Vec::new(),
            }),
        }
    }
}

/// 模拟配料服务不可用
pub struct UnavailableIngredientChecker;

impl IngredientSufficiencyChecker for UnavailableIngredientChecker {
    fn check_can_produce(&self, _recipe_id: i64, _num_batches: i64) -> PlanningResult<ProductionCheck> {
        Err(PlanningError::Collaborator("配料服务不可用".to_string()))
    }
}
