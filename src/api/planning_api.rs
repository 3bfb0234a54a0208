// ==========================================
// 节日烘焙排产系统 - 计划 API
// ==========================================
// 职责: 面向界面层的计划/可行性入口
// 流程: 打开数据库 → 加载 PlannerConfig → 组装引擎 → 每次调用新建 PlanningContext
// 说明: 配料充足性检查由外部服务注入, 组件充足性检查默认基于库存视图
// ==========================================

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, PlannerConfig};
use crate::db::{open_sqlite_connection, warn_if_schema_mismatch};
use crate::domain::planning::{
    EventBatchPlan, FeasibilityResult, ProductionFeasibilityResult, RecipeBatchResult,
};
use crate::domain::types::RequirementBasis;
use crate::engine::{
    BatchCalculator, BundleExplosion, ComponentSufficiencyChecker, EventPlanner,
    FeasibilityEngine, IngredientSufficiencyChecker, InventoryComponentChecker, PlanningContext,
    PlanningRepositories, RecipeAggregator,
};

// ==========================================
// PlanningApi - 计划 API
// ==========================================
pub struct PlanningApi {
    repos: PlanningRepositories,
    config_manager: Arc<ConfigManager>,
    config: PlannerConfig,
    ingredient_checker: Arc<dyn IngredientSufficiencyChecker>,
    component_checker: Arc<dyn ComponentSufficiencyChecker>,
    explosion: BundleExplosion,
    aggregator: RecipeAggregator,
    feasibility: FeasibilityEngine,
    event_planner: EventPlanner,
}

impl PlanningApi {
    /// 打开数据库并创建 PlanningApi
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    /// - ingredient_checker: 配料充足性检查 (外部服务)
    pub fn open(
        db_path: &str,
        ingredient_checker: Arc<dyn IngredientSufficiencyChecker>,
    ) -> ApiResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| ApiError::DatabaseConnectionError(e.to_string()))?;
        Self::from_connection(Arc::new(Mutex::new(conn)), ingredient_checker)
    }

    /// 基于已有连接创建 PlanningApi
    pub fn from_connection(
        conn: Arc<Mutex<Connection>>,
        ingredient_checker: Arc<dyn IngredientSufficiencyChecker>,
    ) -> ApiResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| ApiError::DatabaseConnectionError(format!("锁获取失败: {}", e)))?;
            warn_if_schema_mismatch(&guard);
        }

        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| ApiError::ConfigError(e.to_string()))?,
        );
        let config = config_manager
            .get_planner_config()
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        let component_checker: Arc<dyn ComponentSufficiencyChecker> =
            Arc::new(InventoryComponentChecker::new());

        Ok(Self {
            repos: PlanningRepositories::from_connection(conn),
            config_manager,
            aggregator: RecipeAggregator::new(&config),
            feasibility: FeasibilityEngine::new(
                config.clone(),
                ingredient_checker.clone(),
                component_checker.clone(),
            ),
            event_planner: EventPlanner::new(&config),
            explosion: BundleExplosion::new(),
            config,
            ingredient_checker,
            component_checker,
        })
    }

    /// 替换组件充足性检查 (例如接入包装服务的实现)
    pub fn with_component_checker(
        mut self,
        component_checker: Arc<dyn ComponentSufficiencyChecker>,
    ) -> Self {
        self.component_checker = component_checker;
        self.rebuild_engines();
        self
    }

    /// 当前生效的计划引擎配置
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// 重新从 config_kv 加载配置 (设置页保存后调用)
    pub fn reload_config(&mut self) -> ApiResult<()> {
        self.config = self
            .config_manager
            .get_planner_config()
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        self.rebuild_engines();
        tracing::info!(config = ?self.config, "计划引擎配置已重新加载");
        Ok(())
    }

    fn rebuild_engines(&mut self) {
        self.aggregator = RecipeAggregator::new(&self.config);
        self.event_planner = EventPlanner::new(&self.config);
        self.feasibility = FeasibilityEngine::new(
            self.config.clone(),
            self.ingredient_checker.clone(),
            self.component_checker.clone(),
        );
    }

    // ==========================================
    // 批次与需求
    // ==========================================

    /// 最小批次数
    pub fn calculate_batches(&self, units_needed: i64, yield_per_batch: i64) -> ApiResult<i64> {
        Ok(BatchCalculator::calculate_batches(units_needed, yield_per_batch)?)
    }

    /// 礼盒需求展开到成品单元
    pub fn explode_bundle(
        &self,
        bundle_id: i64,
        bundle_quantity: i64,
    ) -> ApiResult<BTreeMap<i64, i64>> {
        let ctx = PlanningContext::new("explode_bundle");
        let result =
            self.explosion
                .explode_bundle_requirements(&ctx, bundle_id, bundle_quantity, &self.repos);
        ctx.log_summary();
        Ok(result?)
    }

    /// 按配方聚合成品单元需求
    pub fn aggregate_by_recipe(
        &self,
        unit_quantities: &BTreeMap<i64, i64>,
    ) -> ApiResult<Vec<RecipeBatchResult>> {
        let ctx = PlanningContext::new("aggregate_by_recipe");
        let result = self
            .aggregator
            .aggregate_by_recipe(&ctx, unit_quantities, &self.repos);
        ctx.log_summary();
        Ok(result?)
    }

    /// 活动批次方案
    pub fn plan_event_batches(
        &self,
        event_id: i64,
        basis: RequirementBasis,
    ) -> ApiResult<EventBatchPlan> {
        let ctx = PlanningContext::for_event("plan_event_batches", event_id);
        let result = self
            .event_planner
            .plan_event_batches(&ctx, event_id, basis, &self.repos);
        ctx.log_summary();
        Ok(result?)
    }

    // ==========================================
    // 可行性
    // ==========================================

    /// 活动生产目标的配料可行性
    pub fn check_production_feasibility(
        &self,
        event_id: i64,
    ) -> ApiResult<Vec<ProductionFeasibilityResult>> {
        let ctx = PlanningContext::for_event("check_production_feasibility", event_id);
        let result = self
            .feasibility
            .check_production_feasibility(&ctx, event_id, &self.repos);
        ctx.log_summary();
        Ok(result?)
    }

    /// 活动组装目标的可行性
    pub fn check_assembly_feasibility(&self, event_id: i64) -> ApiResult<Vec<FeasibilityResult>> {
        let ctx = PlanningContext::for_event("check_assembly_feasibility", event_id);
        let result = self
            .feasibility
            .check_assembly_feasibility(&ctx, event_id, &self.repos);
        ctx.log_summary();
        Ok(result?)
    }

    /// 单个礼盒的组装可行性
    pub fn check_single_assembly_feasibility(
        &self,
        finished_good_id: i64,
        quantity: i64,
    ) -> ApiResult<FeasibilityResult> {
        let ctx = PlanningContext::new("check_single_assembly_feasibility");
        let result = self.feasibility.check_single_assembly_feasibility(
            &ctx,
            finished_good_id,
            quantity,
            &self.repos,
        );
        ctx.log_summary();
        Ok(result?)
    }
}
