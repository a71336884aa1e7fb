//! PostgreSQL 考勤 Repository

use chrono::NaiveDate;
use farmsync_domain::{Attendance, AttendanceStatus, PayrollWindow};
use farmsync_errors::{AppError, AppResult};
use sqlx::{PgConnection, PgPool};

#[derive(sqlx::FromRow)]
struct AttendanceRow {
    worker_id: i32,
    attendance_date: NaiveDate,
    status: String,
    hours: i32,
}

impl TryFrom<AttendanceRow> for Attendance {
    type Error = AppError;

    fn try_from(row: AttendanceRow) -> AppResult<Self> {
        let status = row.status.parse::<AttendanceStatus>().map_err(|e| {
            AppError::database(format!(
                "Corrupt attendance row ({}, {}): {}",
                row.worker_id, row.attendance_date, e
            ))
        })?;

        Ok(Self {
            worker_id: row.worker_id,
            attendance_date: row.attendance_date,
            status,
            hours: row.hours,
        })
    }
}

#[derive(Clone)]
pub struct PostgresAttendanceRepository {
    pool: PgPool,
}

impl PostgresAttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 按 (worker_id, attendance_date) 插入或覆盖
    pub async fn upsert(&self, record: &Attendance) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO attendance (worker_id, attendance_date, status, hours)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (worker_id, attendance_date)
            DO UPDATE SET status = EXCLUDED.status, hours = EXCLUDED.hours
            "#,
        )
        .bind(record.worker_id)
        .bind(record.attendance_date)
        .bind(record.status.as_str())
        .bind(record.hours)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save attendance: {}", e)))?;

        Ok(())
    }

    /// 工人全部考勤，按日期升序
    pub async fn list_for_worker(&self, worker_id: i32) -> AppResult<Vec<Attendance>> {
        let rows = sqlx::query_as::<_, AttendanceRow>(
            r#"
            SELECT worker_id, attendance_date, status, hours
            FROM attendance
            WHERE worker_id = $1
            ORDER BY attendance_date
            "#,
        )
        .bind(worker_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list attendance: {}", e)))?;

        rows.into_iter().map(Attendance::try_from).collect()
    }

    /// 结算窗口内的考勤
    pub async fn list_in_window(
        conn: &mut PgConnection,
        worker_id: i32,
        window: PayrollWindow,
    ) -> AppResult<Vec<Attendance>> {
        let rows = sqlx::query_as::<_, AttendanceRow>(
            r#"
            SELECT worker_id, attendance_date, status, hours
            FROM attendance
            WHERE worker_id = $1 AND attendance_date BETWEEN $2 AND $3
            ORDER BY attendance_date
            "#,
        )
        .bind(worker_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to load attendance window: {}", e)))?;

        rows.into_iter().map(Attendance::try_from).collect()
    }
}
