//! 财务服务
//!
//! 收成、销售、收支流水、库存与仪表盘。销售会同时扣减收成并记一笔收入

mod api;
mod application;

pub use api::router;
pub use application::*;
