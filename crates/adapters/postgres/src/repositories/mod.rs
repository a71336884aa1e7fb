//! 各实体的 PostgreSQL Repository
//!
//! 读操作和单表写入直接使用连接池；级联写入中的步骤是接收
//! `&mut PgConnection` 的关联函数，由调用方在同一事务内串联

mod attendance;
mod financials;
mod inventory;
mod sales;
mod users;
mod workers;
mod yields;

pub use attendance::PostgresAttendanceRepository;
pub use financials::{NewFinancialEntry, PostgresFinancialRepository, WorkerEntryKind};
pub use inventory::{NewInventoryItem, PostgresInventoryRepository};
pub use sales::{NewSale, PostgresSaleRepository};
pub use users::PostgresUserRepository;
pub use workers::{NewWorker, PostgresWorkerRepository};
pub use yields::{NewYield, PostgresYieldRepository};

/// PostgreSQL unique_violation
const UNIQUE_VIOLATION: &str = "23505";

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION)
}
