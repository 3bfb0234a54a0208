// ==========================================
// 节日烘焙排产系统 - 活动目标数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑, 只读
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::event::{Event, EventAssemblyTarget, EventProductionTarget};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// EventRepository - 活动仓储
// ==========================================
pub struct EventRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EventRepository {
    /// 创建新的活动仓储实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按 ID 查询活动
    ///
    /// event_date 存储为 YYYY-MM-DD 文本, 无法解析时视为空
    pub fn find_event(&self, event_id: i64) -> RepositoryResult<Option<Event>> {
        let conn = self.get_conn()?;
        let event = conn
            .query_row(
                "SELECT id, name, event_date FROM event WHERE id = ?1",
                params![event_id],
                |row| {
                    let date_str: Option<String> = row.get(2)?;
                    Ok(Event {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        event_date: date_str
                            .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
                    })
                },
            )
            .optional()?;
        Ok(event)
    }

    /// 查询活动的生产目标
    pub fn list_production_targets(
        &self,
        event_id: i64,
    ) -> RepositoryResult<Vec<EventProductionTarget>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT event_id, recipe_id, target_batches
            FROM event_production_target
            WHERE event_id = ?1
            ORDER BY id
            "#,
        )?;

        let targets = stmt
            .query_map(params![event_id], |row| {
                Ok(EventProductionTarget {
                    event_id: row.get(0)?,
                    recipe_id: row.get(1)?,
                    target_batches: row.get(2)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(targets)
    }

    /// 查询活动的组装目标
    pub fn list_assembly_targets(
        &self,
        event_id: i64,
    ) -> RepositoryResult<Vec<EventAssemblyTarget>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT event_id, finished_good_id, target_quantity
            FROM event_assembly_target
            WHERE event_id = ?1
            ORDER BY id
            "#,
        )?;

        let targets = stmt
            .query_map(params![event_id], |row| {
                Ok(EventAssemblyTarget {
                    event_id: row.get(0)?,
                    finished_good_id: row.get(1)?,
                    target_quantity: row.get(2)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(targets)
    }
}
