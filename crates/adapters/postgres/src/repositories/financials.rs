//! PostgreSQL 收支流水 Repository
//!
//! 流水只追加，不更新不删除

use chrono::NaiveDate;
use farmsync_common::OwnerId;
use farmsync_domain::{EntryType, FinancialEntry, FinancialSummary};
use farmsync_errors::{AppError, AppResult};
use sqlx::{PgConnection, PgPool};

#[derive(sqlx::FromRow)]
struct FinancialRow {
    id: i32,
    user_id: i32,
    #[sqlx(rename = "type")]
    entry_type: String,
    description: String,
    amount: i64,
    transaction_date: NaiveDate,
    crop_name: Option<String>,
    worker_id: Option<i32>,
}

impl TryFrom<FinancialRow> for FinancialEntry {
    type Error = AppError;

    fn try_from(row: FinancialRow) -> AppResult<Self> {
        let entry_type = row
            .entry_type
            .parse::<EntryType>()
            .map_err(|e| AppError::database(format!("Corrupt financial row {}: {}", row.id, e)))?;

        Ok(Self {
            id: row.id,
            owner_id: OwnerId::new(row.user_id),
            entry_type,
            description: row.description,
            amount: row.amount,
            transaction_date: row.transaction_date,
            crop_name: row.crop_name,
            worker_id: row.worker_id,
        })
    }
}

/// 新增流水
#[derive(Debug, Clone)]
pub struct NewFinancialEntry {
    pub entry_type: EntryType,
    pub description: String,
    pub amount: i64,
    pub transaction_date: NaiveDate,
    pub crop_name: Option<String>,
    pub worker_id: Option<i32>,
}

/// 工人相关流水的类别（借款 / 工资）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerEntryKind {
    Loan,
    Payroll,
}

impl WorkerEntryKind {
    fn description_pattern(&self) -> &'static str {
        match self {
            Self::Loan => "Loan to %",
            Self::Payroll => "Worker salary - %",
        }
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    total_revenue: i64,
    total_expenses: i64,
}

#[derive(sqlx::FromRow)]
struct TrendRow {
    month: NaiveDate,
    #[sqlx(rename = "type")]
    entry_type: String,
    amount: i64,
}

#[derive(Clone)]
pub struct PostgresFinancialRepository {
    pool: PgPool,
}

const SELECT_COLUMNS: &str =
    "SELECT id, user_id, type, description, amount, transaction_date, crop_name, worker_id FROM financials";

impl PostgresFinancialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 最新记录在前
    pub async fn list(&self, owner: OwnerId) -> AppResult<Vec<FinancialEntry>> {
        let sql = format!(
            "{} WHERE user_id = $1 ORDER BY transaction_date DESC, id DESC",
            SELECT_COLUMNS
        );
        let rows = sqlx::query_as::<_, FinancialRow>(&sql)
            .bind(owner.as_i32())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list financials: {}", e)))?;

        rows.into_iter().map(FinancialEntry::try_from).collect()
    }

    /// 某个工人的借款或工资流水，按日期升序
    pub async fn list_for_worker(
        &self,
        owner: OwnerId,
        worker_id: i32,
        kind: WorkerEntryKind,
    ) -> AppResult<Vec<FinancialEntry>> {
        let sql = format!(
            "{} WHERE user_id = $1 AND worker_id = $2 AND description LIKE $3 \
             ORDER BY transaction_date, id",
            SELECT_COLUMNS
        );
        let rows = sqlx::query_as::<_, FinancialRow>(&sql)
            .bind(owner.as_i32())
            .bind(worker_id)
            .bind(kind.description_pattern())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list worker entries: {}", e)))?;

        rows.into_iter().map(FinancialEntry::try_from).collect()
    }

    /// 直接记账（手工收入/支出）
    pub async fn create(&self, owner: OwnerId, entry: &NewFinancialEntry) -> AppResult<i32> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {}", e)))?;

        Self::insert(&mut *conn, owner, entry).await
    }

    pub async fn insert(
        conn: &mut PgConnection,
        owner: OwnerId,
        entry: &NewFinancialEntry,
    ) -> AppResult<i32> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO financials (user_id, type, description, amount, transaction_date, crop_name, worker_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(owner.as_i32())
        .bind(entry.entry_type.as_str())
        .bind(&entry.description)
        .bind(entry.amount)
        .bind(entry.transaction_date)
        .bind(&entry.crop_name)
        .bind(entry.worker_id)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to record financial entry: {}", e)))?;

        Ok(id)
    }

    /// 按类型汇总金额
    pub async fn summary(&self, owner: OwnerId) -> AppResult<FinancialSummary> {
        let row = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT
                COALESCE(SUM(amount) FILTER (WHERE type = 'Revenue'), 0)::BIGINT AS total_revenue,
                COALESCE(SUM(amount) FILTER (WHERE type = 'Expense'), 0)::BIGINT AS total_expenses
            FROM financials
            WHERE user_id = $1
            "#,
        )
        .bind(owner.as_i32())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to summarise financials: {}", e)))?;

        Ok(FinancialSummary {
            total_revenue: row.total_revenue,
            total_expenses: row.total_expenses,
        })
    }

    /// `since` 起按月、按类型汇总，返回 (月初日期, 类型, 合计)
    pub async fn monthly_totals(
        &self,
        owner: OwnerId,
        since: NaiveDate,
    ) -> AppResult<Vec<(NaiveDate, EntryType, i64)>> {
        let rows = sqlx::query_as::<_, TrendRow>(
            r#"
            SELECT
                date_trunc('month', transaction_date::TIMESTAMP)::DATE AS month,
                type,
                COALESCE(SUM(amount), 0)::BIGINT AS amount
            FROM financials
            WHERE user_id = $1 AND transaction_date >= $2
            GROUP BY 1, 2
            ORDER BY 1
            "#,
        )
        .bind(owner.as_i32())
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load financial trend: {}", e)))?;

        rows.into_iter()
            .map(|row| {
                let entry_type = row
                    .entry_type
                    .parse::<EntryType>()
                    .map_err(|e| AppError::database(e.to_string()))?;
                Ok((row.month, entry_type, row.amount))
            })
            .collect()
    }
}
