//! 工人服务
//!
//! 工人档案、考勤、借款与工资结算。借款和工资结算会同时修改工人借款余额
//! 与收支流水，在同一事务内完成

mod api;
mod application;

pub use api::router;
pub use application::*;
