//! PostgreSQL 工人 Repository

use farmsync_common::OwnerId;
use farmsync_domain::{PayType, Worker};
use farmsync_errors::{AppError, AppResult};
use sqlx::{PgConnection, PgPool};

#[derive(sqlx::FromRow)]
struct WorkerRow {
    id: i32,
    user_id: i32,
    name: String,
    role: String,
    pay_rate: i64,
    pay_type: String,
    loans: i64,
    is_active: bool,
}

impl TryFrom<WorkerRow> for Worker {
    type Error = AppError;

    fn try_from(row: WorkerRow) -> AppResult<Self> {
        let pay_type = row
            .pay_type
            .parse::<PayType>()
            .map_err(|e| AppError::database(format!("Corrupt worker row {}: {}", row.id, e)))?;

        Ok(Self {
            id: row.id,
            owner_id: OwnerId::new(row.user_id),
            name: row.name,
            role: row.role,
            pay_rate: row.pay_rate,
            pay_type,
            loans: row.loans,
            is_active: row.is_active,
        })
    }
}

/// 新增工人
#[derive(Debug, Clone)]
pub struct NewWorker {
    pub name: String,
    pub role: String,
    pub pay_rate: i64,
    pub pay_type: PayType,
}

#[derive(Clone)]
pub struct PostgresWorkerRepository {
    pool: PgPool,
}

impl PostgresWorkerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 按姓名排序
    pub async fn list(&self, owner: OwnerId) -> AppResult<Vec<Worker>> {
        let rows = sqlx::query_as::<_, WorkerRow>(
            r#"
            SELECT id, user_id, name, role, pay_rate, pay_type, loans, is_active
            FROM workers
            WHERE user_id = $1
            ORDER BY name, id
            "#,
        )
        .bind(owner.as_i32())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workers: {}", e)))?;

        rows.into_iter().map(Worker::try_from).collect()
    }

    pub async fn find(&self, owner: OwnerId, id: i32) -> AppResult<Option<Worker>> {
        let row = sqlx::query_as::<_, WorkerRow>(
            r#"
            SELECT id, user_id, name, role, pay_rate, pay_type, loans, is_active
            FROM workers
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner.as_i32())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find worker: {}", e)))?;

        row.map(Worker::try_from).transpose()
    }

    pub async fn create(&self, owner: OwnerId, worker: &NewWorker) -> AppResult<i32> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO workers (user_id, name, role, pay_rate, pay_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(owner.as_i32())
        .bind(&worker.name)
        .bind(&worker.role)
        .bind(worker.pay_rate)
        .bind(worker.pay_type.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create worker: {}", e)))?;

        Ok(id)
    }

    pub async fn count_active(&self, owner: OwnerId) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM workers WHERE user_id = $1 AND is_active")
                .bind(owner.as_i32())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to count workers: {}", e)))?;

        Ok(count)
    }

    /// 在事务内锁定工人行（`FOR UPDATE`），并发的借款/工资结算会在此排队
    pub async fn lock(conn: &mut PgConnection, owner: OwnerId, id: i32) -> AppResult<Option<Worker>> {
        let row = sqlx::query_as::<_, WorkerRow>(
            r#"
            SELECT id, user_id, name, role, pay_rate, pay_type, loans, is_active
            FROM workers
            WHERE id = $1 AND user_id = $2
            FOR UPDATE
            "#,
        )
        .bind(id)
        .bind(owner.as_i32())
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to lock worker: {}", e)))?;

        row.map(Worker::try_from).transpose()
    }

    /// 调整借款余额，返回调整后的余额
    pub async fn adjust_loans(conn: &mut PgConnection, id: i32, delta: i64) -> AppResult<i64> {
        let loans: i64 =
            sqlx::query_scalar("UPDATE workers SET loans = loans + $2 WHERE id = $1 RETURNING loans")
                .bind(id)
                .bind(delta)
                .fetch_one(conn)
                .await
                .map_err(|e| AppError::database(format!("Failed to update loans: {}", e)))?;

        Ok(loans)
    }
}
