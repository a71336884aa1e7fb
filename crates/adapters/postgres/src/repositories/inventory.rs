//! PostgreSQL 库存 Repository

use farmsync_common::OwnerId;
use farmsync_domain::InventoryItem;
use farmsync_errors::{AppError, AppResult};
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct InventoryRow {
    id: i32,
    user_id: i32,
    item_name: String,
    item_type: String,
    quantity: i64,
    unit: String,
}

impl From<InventoryRow> for InventoryItem {
    fn from(row: InventoryRow) -> Self {
        Self {
            id: row.id,
            owner_id: OwnerId::new(row.user_id),
            item_name: row.item_name,
            item_type: row.item_type,
            quantity: row.quantity,
            unit: row.unit,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewInventoryItem {
    pub item_name: String,
    pub item_type: String,
    pub quantity: i64,
    pub unit: String,
}

#[derive(Clone)]
pub struct PostgresInventoryRepository {
    pool: PgPool,
}

impl PostgresInventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 按物品名排序
    pub async fn list(&self, owner: OwnerId) -> AppResult<Vec<InventoryItem>> {
        let rows = sqlx::query_as::<_, InventoryRow>(
            r#"
            SELECT id, user_id, item_name, item_type, quantity, unit
            FROM inventory
            WHERE user_id = $1
            ORDER BY item_name, id
            "#,
        )
        .bind(owner.as_i32())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list inventory: {}", e)))?;

        Ok(rows.into_iter().map(InventoryItem::from).collect())
    }

    pub async fn create(&self, owner: OwnerId, item: &NewInventoryItem) -> AppResult<i32> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO inventory (user_id, item_name, item_type, quantity, unit)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(owner.as_i32())
        .bind(&item.item_name)
        .bind(&item.item_type)
        .bind(item.quantity)
        .bind(&item.unit)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create inventory item: {}", e)))?;

        Ok(id)
    }
}
