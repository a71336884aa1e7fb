//! 用户服务
//!
//! 注册、登录（签发 JWT）与当前用户查询

mod api;
mod application;

pub use api::router;
pub use application::{AuthHandler, LoginCommand, LoginResult, RegisterCommand};
