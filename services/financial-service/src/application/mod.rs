//! 应用层

mod commands;
mod handlers;

pub use commands::*;
pub use handlers::*;
