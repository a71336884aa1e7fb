//! PostgreSQL 收成 Repository

use chrono::NaiveDate;
use farmsync_common::OwnerId;
use farmsync_domain::Yield;
use farmsync_errors::{AppError, AppResult};
use sqlx::{PgConnection, PgPool};

#[derive(sqlx::FromRow)]
struct YieldRow {
    id: i32,
    user_id: i32,
    crop_name: String,
    quantity: i64,
    unit: String,
    date_recorded: NaiveDate,
}

impl From<YieldRow> for Yield {
    fn from(row: YieldRow) -> Self {
        Self {
            id: row.id,
            owner_id: OwnerId::new(row.user_id),
            crop_name: row.crop_name,
            quantity: row.quantity,
            unit: row.unit,
            date_recorded: row.date_recorded,
        }
    }
}

/// 新增收成
#[derive(Debug, Clone)]
pub struct NewYield {
    pub crop_name: String,
    pub quantity: i64,
    pub unit: String,
    pub date_recorded: NaiveDate,
}

#[derive(Clone)]
pub struct PostgresYieldRepository {
    pool: PgPool,
}

impl PostgresYieldRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 最新记录在前
    pub async fn list(&self, owner: OwnerId) -> AppResult<Vec<Yield>> {
        let rows = sqlx::query_as::<_, YieldRow>(
            r#"
            SELECT id, user_id, crop_name, quantity, unit, date_recorded
            FROM yields
            WHERE user_id = $1
            ORDER BY date_recorded DESC, id DESC
            "#,
        )
        .bind(owner.as_i32())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list yields: {}", e)))?;

        Ok(rows.into_iter().map(Yield::from).collect())
    }

    pub async fn find(&self, owner: OwnerId, id: i32) -> AppResult<Option<Yield>> {
        let row = sqlx::query_as::<_, YieldRow>(
            r#"
            SELECT id, user_id, crop_name, quantity, unit, date_recorded
            FROM yields
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner.as_i32())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find yield: {}", e)))?;

        Ok(row.map(Yield::from))
    }

    pub async fn create(&self, owner: OwnerId, new_yield: &NewYield) -> AppResult<i32> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO yields (user_id, crop_name, quantity, unit, date_recorded)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(owner.as_i32())
        .bind(&new_yield.crop_name)
        .bind(new_yield.quantity)
        .bind(&new_yield.unit)
        .bind(new_yield.date_recorded)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create yield: {}", e)))?;

        Ok(id)
    }

    pub async fn total_quantity(&self, owner: OwnerId) -> AppResult<i64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(quantity), 0)::BIGINT FROM yields WHERE user_id = $1",
        )
        .bind(owner.as_i32())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to sum yields: {}", e)))?;

        Ok(total)
    }

    /// 在事务内锁定收成行
    pub async fn lock(conn: &mut PgConnection, owner: OwnerId, id: i32) -> AppResult<Option<Yield>> {
        let row = sqlx::query_as::<_, YieldRow>(
            r#"
            SELECT id, user_id, crop_name, quantity, unit, date_recorded
            FROM yields
            WHERE id = $1 AND user_id = $2
            FOR UPDATE
            "#,
        )
        .bind(id)
        .bind(owner.as_i32())
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to lock yield: {}", e)))?;

        Ok(row.map(Yield::from))
    }

    /// 扣减库存数量，不做下限检查
    pub async fn decrement(conn: &mut PgConnection, id: i32, quantity: i64) -> AppResult<i64> {
        let remaining: i64 = sqlx::query_scalar(
            "UPDATE yields SET quantity = quantity - $2 WHERE id = $1 RETURNING quantity",
        )
        .bind(id)
        .bind(quantity)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to update yield: {}", e)))?;

        Ok(remaining)
    }
}
