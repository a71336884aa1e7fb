//! 认证相关命令定义

/// 注册命令
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl RegisterCommand {
    /// 验证命令参数（邮箱格式由 `Email` 校验）
    pub fn validate(&self) -> Result<(), String> {
        if self.password.is_empty() {
            return Err("Password cannot be empty".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("Name cannot be empty".to_string());
        }
        if self.name.trim().chars().count() > 100 {
            return Err("Name cannot exceed 100 characters".to_string());
        }
        Ok(())
    }
}

/// 登录命令
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}
