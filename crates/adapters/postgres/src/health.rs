//! PostgreSQL 探测

use std::time::Instant;

use farmsync_common::Probe;
use sqlx::PgPool;
use tracing::warn;

use crate::check_connection;

/// `SELECT 1` 往返一次，附带连接池占用情况
pub async fn ping(pool: &PgPool) -> Probe {
    let started = Instant::now();

    match check_connection(pool).await {
        Ok(()) => Probe::up(started.elapsed().as_millis() as u64)
            .with_connections(pool.size(), pool.num_idle() as u32),
        Err(e) => {
            warn!(error = %e, "PostgreSQL health check failed");
            Probe::down(e.to_string())
        }
    }
}
