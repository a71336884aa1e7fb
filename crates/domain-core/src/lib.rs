//! farmsync-domain - 农场管理领域核心
//!
//! 实体、枚举、凭据值对象、工资计算与仪表盘汇总。不依赖数据库与 HTTP

mod credentials;
mod entity;
mod kinds;
pub mod ledger;
pub mod payroll;

pub use credentials::*;
pub use entity::*;
pub use kinds::*;
pub use ledger::{Dashboard, FarmMetrics, FinancialSummary, TrendPoint, TrendWindow};
pub use payroll::{Payroll, PayrollWindow};

// Re-export common types
pub use farmsync_common::{ExternalUserId, OwnerId};
