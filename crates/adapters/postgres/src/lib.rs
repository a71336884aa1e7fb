//! farmsync-adapter-postgres - PostgreSQL 适配器

mod connection;
mod health;
mod migration;
pub mod repositories;
mod transaction;

pub use connection::*;
pub use health::*;
pub use migration::*;
pub use repositories::*;
pub use transaction::*;

pub use sqlx::{PgConnection, PgPool};
