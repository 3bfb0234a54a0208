// ==========================================
// 节日烘焙排产系统 - 产品目录数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑, 只读
// ==========================================
// 职责: 读取 recipe / finished_unit / finished_good /
//       packaging_product / composition 表
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::catalog::{
    ComponentRef, Composition, FinishedGood, FinishedUnit, PackagingProduct, Recipe,
};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

/// 将 SQLite 数值/文本列转换为 Decimal
///
/// 数量列允许以 INTEGER / REAL / TEXT 三种形式存储
pub(crate) fn decimal_from_value(value: Value, field: &str) -> RepositoryResult<Decimal> {
    let parsed = match value {
        Value::Integer(i) => Some(Decimal::from(i)),
        Value::Real(f) => Decimal::try_from(f).ok(),
        Value::Text(ref s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    };
    parsed.ok_or_else(|| RepositoryError::FieldValueError {
        field: field.to_string(),
        message: format!("无法解析为数量: {:?}", value),
    })
}

// ==========================================
// CatalogRepository - 产品目录仓储
// ==========================================
pub struct CatalogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CatalogRepository {
    /// 创建新的产品目录仓储实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
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

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按 ID 查询配方
    pub fn find_recipe(&self, recipe_id: i64) -> RepositoryResult<Option<Recipe>> {
        let conn = self.get_conn()?;
        let recipe = conn
            .query_row(
                "SELECT id, name FROM recipe WHERE id = ?1",
                params![recipe_id],
                |row| {
                    Ok(Recipe {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(recipe)
    }

    /// 按 ID 查询成品单元
    ///
    /// # 返回
    /// - Ok(Some(FinishedUnit)): 找到
    /// - Ok(None): 未找到
    /// - Err: 数据库错误
    pub fn find_finished_unit(&self, unit_id: i64) -> RepositoryResult<Option<FinishedUnit>> {
        let conn = self.get_conn()?;
        let unit = conn
            .query_row(
                r#"
                SELECT id, display_name, recipe_id, items_per_batch, inventory_count
                FROM finished_unit
                WHERE id = ?1
                "#,
                params![unit_id],
                |row| {
                    Ok(FinishedUnit {
                        id: row.get(0)?,
                        display_name: row.get(1)?,
                        recipe_id: row.get(2)?,
                        items_per_batch: row.get(3)?,
                        inventory_count: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(unit)
    }

    /// 按 ID 查询礼盒
    pub fn find_finished_good(&self, good_id: i64) -> RepositoryResult<Option<FinishedGood>> {
        let conn = self.get_conn()?;
        let good = conn
            .query_row(
                "SELECT id, display_name, inventory_count FROM finished_good WHERE id = ?1",
                params![good_id],
                |row| {
                    Ok(FinishedGood {
                        id: row.get(0)?,
                        display_name: row.get(1)?,
                        inventory_count: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(good)
    }

    /// 按 ID 查询包装材料
    pub fn find_packaging_product(
        &self,
        product_id: i64,
    ) -> RepositoryResult<Option<PackagingProduct>> {
        let conn = self.get_conn()?;
        let raw = conn
            .query_row(
                "SELECT id, display_name, on_hand FROM packaging_product WHERE id = ?1",
                params![product_id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Value>(2)?,
                    ))
                },
            )
            .optional()?;

        match raw {
            Some((id, display_name, on_hand)) => Ok(Some(PackagingProduct {
                id,
                display_name,
                on_hand: decimal_from_value(on_hand, "packaging_product.on_hand")?,
            })),
            None => Ok(None),
        }
    }

    /// 查询礼盒的直接组成关系
    ///
    /// # 说明
    /// - 四个可空引用列在此转换为 ComponentRef
    /// - 引用列不是恰好一个非空的行视为数据错误
    pub fn list_compositions_by_assembly(
        &self,
        assembly_id: i64,
    ) -> RepositoryResult<Vec<Composition>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT
                id, assembly_id, finished_unit_id, finished_good_id,
                packaging_product_id, material_id, component_quantity, is_generic
            FROM composition
            WHERE assembly_id = ?1
            ORDER BY sort_order, id
            "#,
        )?;

        #[allow(clippy::type_complexity)]
        let rows: Vec<(i64, i64, Option<i64>, Option<i64>, Option<i64>, Option<i64>, Value, bool)> =
            stmt.query_map(params![assembly_id], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                    row.get(7)?,
                ))
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        let mut compositions = Vec::with_capacity(rows.len());
        for (row_id, assembly_id, fu, fg, pkg, mat, qty, is_generic) in rows {
            let component = ComponentRef::from_columns(fu, fg, pkg, mat).ok_or_else(|| {
                RepositoryError::ValidationError(format!(
                    "composition(id={}) 组件引用必须恰好一个非空",
                    row_id
                ))
            })?;

            compositions.push(Composition {
                assembly_id,
                component,
                component_quantity: decimal_from_value(qty, "composition.component_quantity")?,
                is_generic,
            });
        }

        Ok(compositions)
    }
}
