// ==========================================
// 节日烘焙排产系统 - 引擎层仓储聚合
// ==========================================
// 职责: 聚合计划引擎所需的 Repository, 并以 InventorySource 形式暴露
// 说明: 引擎只依赖 InventorySource, 不直接依赖具体仓储
// ==========================================

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::domain::catalog::{Composition, FinishedGood, FinishedUnit, Recipe};
use crate::domain::event::{Event, EventAssemblyTarget, EventProductionTarget};
use crate::engine::inventory::InventorySource;
use crate::repository::error::RepositoryResult;
use crate::repository::{CatalogRepository, EventRepository};

/// 计划引擎仓储集合
///
/// # 包含的仓储
/// - `catalog_repo`: 配方 / 成品单元 / 礼盒 / 包装 / 组成关系
/// - `event_repo`: 活动及其生产、组装目标
#[derive(Clone)]
pub struct PlanningRepositories {
    pub catalog_repo: Arc<CatalogRepository>,
    pub event_repo: Arc<EventRepository>,
}

impl PlanningRepositories {
    pub fn new(catalog_repo: Arc<CatalogRepository>, event_repo: Arc<EventRepository>) -> Self {
        Self {
            catalog_repo,
            event_repo,
        }
    }

    /// 基于同一连接创建全部仓储
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            catalog_repo: Arc::new(CatalogRepository::from_connection(conn.clone())),
            event_repo: Arc::new(EventRepository::from_connection(conn)),
        }
    }
}

impl InventorySource for PlanningRepositories {
    fn get_recipe(&self, recipe_id: i64) -> RepositoryResult<Option<Recipe>> {
        self.catalog_repo.find_recipe(recipe_id)
    }

    fn get_finished_unit(&self, unit_id: i64) -> RepositoryResult<Option<FinishedUnit>> {
        self.catalog_repo.find_finished_unit(unit_id)
    }

    fn get_finished_good(&self, good_id: i64) -> RepositoryResult<Option<FinishedGood>> {
        self.catalog_repo.find_finished_good(good_id)
    }

    fn list_compositions(&self, assembly_id: i64) -> RepositoryResult<Vec<Composition>> {
        self.catalog_repo.list_compositions_by_assembly(assembly_id)
    }

    fn packaging_on_hand(&self, packaging_product_id: i64) -> RepositoryResult<Option<Decimal>> {
        Ok(self
            .catalog_repo
            .find_packaging_product(packaging_product_id)?
            .map(|p| p.on_hand))
    }

    fn get_event(&self, event_id: i64) -> RepositoryResult<Option<Event>> {
        self.event_repo.find_event(event_id)
    }

    fn list_production_targets(&self, event_id: i64) -> RepositoryResult<Vec<EventProductionTarget>> {
        self.event_repo.list_production_targets(event_id)
    }

    fn list_assembly_targets(&self, event_id: i64) -> RepositoryResult<Vec<EventAssemblyTarget>> {
        self.event_repo.list_assembly_targets(event_id)
    }
}
